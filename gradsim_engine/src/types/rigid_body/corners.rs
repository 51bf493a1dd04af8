/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use crate::errors::PhysicsError;
use crate::types::aabb::Aabb;
use crate::types::rigid_body::RigidBody;
use crate::types::vec2::Vec2;
use gradsim_tensor::prelude::*;

/// Corner sign pattern in world order TR, TL, BL, BR.
const CORNER_SIGNS: [(f64, f64); 4] = [(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)];

impl RigidBody {
    /// World-space box corners as a flat scalar-tensor list
    /// [x0, y0, x1, y1, x2, y2, x3, y3], ordered TR, TL, BL, BR.
    ///
    /// Each corner is pos + R(theta) (±w/2, ±h/2), built as graph
    /// operations so contact forces derived from the corners stay
    /// differentiable. Side effect: clears this body's graph arena, then
    /// pins every node of the new corner subgraph in it.
    pub fn corners(&mut self) -> Result<Vec<GradTensor>, PhysicsError> {
        self.arena_clear();
        let px = self.position.select(0)?;
        let py = self.position.select(1)?;
        let cos_t = self.rotation.cos();
        let sin_t = self.rotation.sin();
        self.arena_extend(&[&px, &py, &cos_t, &sin_t]);
        let half_w = 0.5 * self.width;
        let half_h = 0.5 * self.height;
        let mut out = Vec::with_capacity(8);
        for (sx, sy) in CORNER_SIGNS {
            let lx = sx * half_w;
            let ly = sy * half_h;
            let dx = cos_t.mul_scalar(lx).sub(&sin_t.mul_scalar(ly))?;
            let dy = sin_t.mul_scalar(lx).add(&cos_t.mul_scalar(ly))?;
            let x = px.add(&dx)?;
            let y = py.add(&dy)?;
            self.arena_extend(&[&dx, &dy, &x, &y]);
            out.push(x);
            out.push(y);
        }
        Ok(out)
    }

    /// Radius of the disc circumscribing the body box.
    pub fn bounding_radius(&self) -> f64 {
        0.5 * (self.width * self.width + self.height * self.height).sqrt()
    }

    /// Conservative broadphase box: the disc circumscribing the body box
    /// around the current position. Loose under rotation, but never
    /// misses a true overlap.
    pub fn aabb(&self) -> Aabb {
        let (x, y) = self.position_values();
        Aabb::from_center_radius(Vec2::new(x, y), self.bounding_radius())
    }
}
