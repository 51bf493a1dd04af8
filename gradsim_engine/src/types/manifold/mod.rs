/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use crate::types::rigid_body::RigidBody;
use crate::types::vec2::Vec2;

/// Maximum contact points carried by a manifold.
pub const MAX_MANIFOLD_POINTS: usize = 2;

/// One persistent contact point of a body pair.
///
/// `local_a` / `local_b` are the offsets from the two body centers at
/// detection time. The accumulated impulses warm-start the next solver
/// iteration; the effective masses are precomputed by
/// [`ContactManifold::compute_mass`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactPoint {
    pub local_a: Vec2,
    pub local_b: Vec2,
    pub normal_impulse: f64,
    pub tangent_impulse: f64,
    pub normal_mass: f64,
    pub tangent_mass: f64,
}

impl ContactPoint {
    pub fn new(local_a: Vec2, local_b: Vec2) -> Self {
        Self {
            local_a,
            local_b,
            ..Default::default()
        }
    }
}

/// Persistent record of contact between two bodies.
///
/// Created on first detected overlap, kept while `touching`, removed at
/// end-of-frame once the contact ends. Combined material parameters are
/// computed once at creation: friction sqrt(mu_a mu_b), restitution
/// max(e_a, e_b).
#[derive(Debug, Clone, PartialEq)]
pub struct ContactManifold {
    normal: Vec2,
    tangent: Vec2,
    points: Vec<ContactPoint>,
    friction: f64,
    restitution: f64,
    touching: bool,
    was_touching: bool,
}

impl ContactManifold {
    pub fn new(body_a: &RigidBody, body_b: &RigidBody) -> Self {
        Self {
            normal: Vec2::new(0.0, 1.0),
            tangent: Vec2::new(-1.0, 0.0),
            points: Vec::new(),
            friction: (body_a.friction() * body_b.friction()).sqrt(),
            restitution: body_a.restitution().max(body_b.restitution()),
            touching: false,
            was_touching: false,
        }
    }

    #[inline(always)]
    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    #[inline(always)]
    pub fn tangent(&self) -> Vec2 {
        self.tangent
    }

    #[inline(always)]
    pub fn points(&self) -> &[ContactPoint] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [ContactPoint] {
        &mut self.points
    }

    #[inline(always)]
    pub fn friction(&self) -> f64 {
        self.friction
    }

    #[inline(always)]
    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    #[inline(always)]
    pub fn is_touching(&self) -> bool {
        self.touching
    }

    #[inline(always)]
    pub fn was_touching(&self) -> bool {
        self.was_touching
    }

    /// Frame rollover: remembers the previous touching state and assumes
    /// no contact until the narrowphase reports one.
    pub(crate) fn begin_frame(&mut self) {
        self.was_touching = self.touching;
        self.touching = false;
    }

    /// Installs the narrowphase result and marks the manifold touching.
    ///
    /// Impulses accumulated on a point index in the previous frame carry
    /// over to the matching new point, seeding the next solver iteration;
    /// points beyond the previous count start at zero. At most
    /// [`MAX_MANIFOLD_POINTS`] points are kept.
    pub fn set_geometry(&mut self, normal: Vec2, tangent: Vec2, points: &[(Vec2, Vec2)]) {
        self.normal = normal;
        self.tangent = tangent;
        let mut new_points = Vec::with_capacity(points.len().min(MAX_MANIFOLD_POINTS));
        for (i, (local_a, local_b)) in points.iter().take(MAX_MANIFOLD_POINTS).enumerate() {
            let mut point = ContactPoint::new(*local_a, *local_b);
            if let Some(prev) = self.points.get(i) {
                point.normal_impulse = prev.normal_impulse;
                point.tangent_impulse = prev.tangent_impulse;
            }
            new_points.push(point);
        }
        self.points = new_points;
        self.touching = true;
    }

    /// Precomputes per-point effective masses:
    ///
    /// k_n = 1/m_a + 1/m_b + (r_a x n)^2 / I_a + (r_b x n)^2 / I_b
    ///
    /// and stores 1/k_n (analogous along the tangent). Zero is stored
    /// when the denominator is zero, i.e. both bodies are static.
    pub fn compute_mass(&mut self, body_a: &RigidBody, body_b: &RigidBody) {
        let inv_mass = body_a.inv_mass() + body_b.inv_mass();
        let inv_i_a = body_a.inv_inertia();
        let inv_i_b = body_b.inv_inertia();
        let normal = self.normal;
        let tangent = self.tangent;
        for point in &mut self.points {
            let rn_a = point.local_a.cross(normal);
            let rn_b = point.local_b.cross(normal);
            let k_normal = inv_mass + rn_a * rn_a * inv_i_a + rn_b * rn_b * inv_i_b;
            point.normal_mass = if k_normal > 0.0 { 1.0 / k_normal } else { 0.0 };

            let rt_a = point.local_a.cross(tangent);
            let rt_b = point.local_b.cross(tangent);
            let k_tangent = inv_mass + rt_a * rt_a * inv_i_a + rt_b * rt_b * inv_i_b;
            point.tangent_mass = if k_tangent > 0.0 { 1.0 / k_tangent } else { 0.0 };
        }
    }
}
