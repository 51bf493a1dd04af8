/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use std::cell::RefCell;
use std::rc::Rc;

use gradsim_render::prelude::*;
use gradsim_tensor::prelude::*;

use crate::errors::PhysicsError;
use crate::types::contact::apply_segment_contacts;
use crate::types::ground_segment::GroundSegment;
use crate::types::manifold_cache::ManifoldCache;
use crate::types::rigid_body::RigidBody;
use crate::types::shape::BodyShape;
use crate::types::vec2::Vec2;

const SEGMENT_COLOR: Rgb = Rgb {
    r: 0.8,
    g: 0.8,
    b: 0.8,
};
const DYNAMIC_BODY_COLOR: Rgb = Rgb {
    r: 0.2,
    g: 0.7,
    b: 0.3,
};
const STATIC_BODY_COLOR: Rgb = Rgb {
    r: 0.5,
    g: 0.5,
    b: 0.55,
};
const MOTOR_COLOR: Rgb = Rgb {
    r: 0.9,
    g: 0.55,
    b: 0.1,
};

/// Owner of the simulated world: bodies, static ground segments, gravity
/// and the substepped update loop.
///
/// Per substep and per body, in registered order: apply gravity, run the
/// segment contact kernel, apply motor thrusts, integrate. Renderer
/// interactions happen around [`PhysicsEngine::update`], never inside it.
pub struct PhysicsEngine {
    width: u32,
    height: u32,
    scale: f64,
    dt: f64,
    substeps: u32,
    gravity: GradTensor,
    bodies: Vec<Rc<RefCell<RigidBody>>>,
    segments: Vec<GroundSegment>,
    manifolds: ManifoldCache,
}

impl PhysicsEngine {
    pub fn new(width: u32, height: u32, scale: f64, dt: f64, substeps: u32) -> Self {
        Self {
            width,
            height,
            scale,
            dt,
            substeps: substeps.max(1),
            gravity: GradTensor::zeros(2, 1),
            bodies: Vec::new(),
            segments: Vec::new(),
            manifolds: ManifoldCache::new(),
        }
    }

    #[inline(always)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline(always)]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline(always)]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    #[inline(always)]
    pub fn substeps(&self) -> u32 {
        self.substeps
    }

    /// Registers a body and returns the shared handle the host uses to
    /// command motors and to build losses from body state.
    pub fn add_body(&mut self, body: RigidBody) -> Rc<RefCell<RigidBody>> {
        let handle = Rc::new(RefCell::new(body));
        self.bodies.push(Rc::clone(&handle));
        handle
    }

    #[inline(always)]
    pub fn bodies(&self) -> &[Rc<RefCell<RigidBody>>] {
        &self.bodies
    }

    #[inline(always)]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Replaces the gravity force tensor. Gravity is applied to every
    /// dynamic body as a constant (2, 1) force, not scaled by mass.
    pub fn set_gravity(&mut self, x: f64, y: f64) {
        self.gravity = GradTensor::from_vec(vec![x, y]);
    }

    pub fn gravity(&self) -> (f64, f64) {
        let data = self.gravity.to_vec();
        (data[0], data[1])
    }

    /// Adds a static ground segment. Stiffness and damping are fixed for
    /// stability; only friction varies per segment.
    pub fn add_ground_segment(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, friction: f64) {
        self.segments
            .push(GroundSegment::new(x1, y1, x2, y2, friction));
    }

    pub fn clear_geometry(&mut self) {
        self.segments.clear();
    }

    #[inline(always)]
    pub fn segments(&self) -> &[GroundSegment] {
        &self.segments
    }

    #[inline(always)]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Read access to the pairwise manifold cache.
    #[inline(always)]
    pub fn manifolds(&self) -> &ManifoldCache {
        &self.manifolds
    }

    /// Advances the world by one frame of `dt`, split into the configured
    /// number of substeps, then refreshes the body-body manifold cache.
    pub fn update(&mut self) -> Result<(), PhysicsError> {
        let h = self.dt / f64::from(self.substeps);
        for _ in 0..self.substeps {
            for body_rc in &self.bodies {
                let mut body = body_rc.borrow_mut();
                if body.is_static() {
                    continue;
                }
                body.apply_force(&self.gravity)?;
                apply_segment_contacts(&mut body, &self.segments)?;
                body.apply_motor_forces()?;
                body.step(h)?;
            }
        }
        self.update_manifolds();
        Ok(())
    }

    /// Broadphase: indices of body pairs whose conservative boxes overlap,
    /// skipping pairs where both bodies are static.
    pub fn broadphase_pairs(&self) -> Vec<(usize, usize)> {
        let aabbs: Vec<_> = self.bodies.iter().map(|b| b.borrow().aabb()).collect();
        let mut pairs = Vec::new();
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                if self.bodies[i].borrow().is_static() && self.bodies[j].borrow().is_static() {
                    continue;
                }
                if aabbs[i].overlaps(&aabbs[j]) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    /// Maintains the manifold cache for one frame.
    ///
    /// The narrowphase here is conservative disc overlap with a single
    /// contact point at the overlap midpoint. The cache tracks pair
    /// lifecycle, warm-start impulses and effective masses; the impulse
    /// solver consuming the active list is an external collaborator, so
    /// no impulses feed back into the dynamics. The segment penalty
    /// kernel remains the sole active contact path.
    fn update_manifolds(&mut self) {
        self.manifolds.begin_frame();
        for (i, j) in self.broadphase_pairs() {
            let a = &self.bodies[i];
            let b = &self.bodies[j];
            let (center_a, radius_a, center_b, radius_b) = {
                let body_a = a.borrow();
                let body_b = b.borrow();
                let (ax, ay) = body_a.position_values();
                let (bx, by) = body_b.position_values();
                (
                    Vec2::new(ax, ay),
                    body_a.bounding_radius(),
                    Vec2::new(bx, by),
                    body_b.bounding_radius(),
                )
            };
            let delta = center_b - center_a;
            let distance = delta.length();
            let penetration = radius_a + radius_b - distance;
            if penetration <= 0.0 {
                continue;
            }
            let normal = delta.normalize_or(Vec2::new(0.0, 1.0));
            let tangent = normal.perp();
            let contact = center_a + normal * (radius_a - 0.5 * penetration);
            let local_a = contact - center_a;
            let local_b = contact - center_b;
            let manifold = self.manifolds.get_or_create(a, b);
            manifold.set_geometry(normal, tangent, &[(local_a, local_b)]);
            manifold.compute_mass(&a.borrow(), &b.borrow());
        }
        self.manifolds.end_frame();
    }

    /// Draws the current world: segments as lines, body shapes as
    /// outlines, motors as filled triangles pointing along their thrust
    /// direction.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.clear();
        for segment in &self.segments {
            let p1 = segment.p1();
            let p2 = segment.p2();
            renderer.draw_line(p1.x, p1.y, p2.x, p2.y, SEGMENT_COLOR);
        }
        for body_rc in &self.bodies {
            let body = body_rc.borrow();
            let (x, y) = body.position_values();
            let rotation = body.rotation_value();
            let color = if body.is_static() {
                STATIC_BODY_COLOR
            } else {
                DYNAMIC_BODY_COLOR
            };
            for shape in body.shapes() {
                match shape {
                    BodyShape::Box { width, height, offset } => {
                        let center = rotate_offset(*offset, rotation) + Vec2::new(x, y);
                        renderer.draw_box(
                            center.x,
                            center.y,
                            0.5 * width,
                            0.5 * height,
                            rotation,
                            color,
                        );
                    }
                    BodyShape::Circle { radius, offset } => {
                        let center = rotate_offset(*offset, rotation) + Vec2::new(x, y);
                        renderer.draw_circle(center.x, center.y, *radius, color);
                    }
                }
            }
            for motor in body.motors() {
                let (ox, oy) = motor.offset();
                let center = rotate_offset(Vec2::new(ox, oy), rotation) + Vec2::new(x, y);
                let dir = rotate_offset(
                    Vec2::new(motor.angle().cos(), motor.angle().sin()),
                    rotation,
                );
                let (w, h) = motor.footprint();
                let size = 0.5 * w.min(h).max(0.1);
                let tip = center + dir * size;
                let base = dir.perp() * (0.5 * size);
                renderer.fill_triangle(
                    tip.x,
                    tip.y,
                    center.x - base.x,
                    center.y - base.y,
                    center.x + base.x,
                    center.y + base.y,
                    MOTOR_COLOR,
                );
            }
        }
        renderer.present();
    }
}

fn rotate_offset(offset: Vec2, rotation: f64) -> Vec2 {
    let (sin, cos) = rotation.sin_cos();
    Vec2::new(
        offset.x * cos - offset.y * sin,
        offset.x * sin + offset.y * cos,
    )
}
