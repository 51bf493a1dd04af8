/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use gradsim_tensor::prelude::*;

use crate::errors::PhysicsError;
use crate::types::rigid_body::RigidBody;

impl RigidBody {
    /// One semi-implicit Euler substep, entirely as graph operations:
    ///
    /// a = F / m, alpha = tau / I
    /// v <- v + a dt, pos <- pos + v dt
    /// omega <- omega + alpha dt, theta <- theta + omega dt
    ///
    /// The updated velocity feeds the position update, which is what
    /// keeps stiff penalty contacts stable. Static bodies skip the state
    /// update but still reset their accumulators.
    pub fn step(&mut self, dt: f64) -> Result<(), PhysicsError> {
        if self.is_static() {
            self.reset_forces();
            return Ok(());
        }
        let accel = self.force.div(&self.mass)?;
        let ang_accel = self.torque.div(&self.inertia)?;
        self.velocity = self.velocity.add(&accel.mul_scalar(dt))?;
        self.position = self.position.add(&self.velocity.mul_scalar(dt))?;
        self.angular_velocity = self.angular_velocity.add(&ang_accel.mul_scalar(dt))?;
        self.rotation = self.rotation.add(&self.angular_velocity.mul_scalar(dt))?;
        self.reset_forces();
        Ok(())
    }

    /// Replaces both accumulators with fresh zero tensors and clears the
    /// graph arena.
    pub fn reset_forces(&mut self) {
        self.arena_clear();
        self.force = GradTensor::zeros(2, 1);
        self.torque = GradTensor::zeros(1, 1);
    }
}
