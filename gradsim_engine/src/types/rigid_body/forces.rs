/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use gradsim_tensor::prelude::*;

use crate::errors::PhysicsError;
use crate::types::motor::Motor;
use crate::types::rigid_body::RigidBody;

impl RigidBody {
    /// Adds a (2, 1) force into the accumulator as a graph operation.
    pub fn apply_force(&mut self, force: &GradTensor) -> Result<(), PhysicsError> {
        self.force = self.force.add(force)?;
        Ok(())
    }

    /// Adds a (1, 1) torque into the accumulator as a graph operation.
    pub fn apply_torque(&mut self, torque: &GradTensor) -> Result<(), PhysicsError> {
        self.torque = self.torque.add(torque)?;
        Ok(())
    }

    /// Applies a (2, 1) force at a world-space point given as two scalar
    /// tensors, adding the induced torque
    /// (px - posx) * fy - (py - posy) * fx.
    ///
    /// Every quantity is a tensor, so gradients flow through the point of
    /// application as well as the force.
    pub fn apply_force_at_point(
        &mut self,
        force: &GradTensor,
        px: &GradTensor,
        py: &GradTensor,
    ) -> Result<(), PhysicsError> {
        let pos_x = self.position.select(0)?;
        let pos_y = self.position.select(1)?;
        let rx = px.sub(&pos_x)?;
        let ry = py.sub(&pos_y)?;
        let fx = force.select(0)?;
        let fy = force.select(1)?;
        let torque = rx.mul(&fy)?.sub(&ry.mul(&fx)?)?;
        self.arena_extend(&[&pos_x, &pos_y, &rx, &ry, &fx, &fy, &torque]);
        self.apply_force(force)?;
        self.apply_torque(&torque)?;
        Ok(())
    }

    /// Applies the thrust of every motor whose command is positive.
    ///
    /// The local thrust vector (cos a, sin a) * thrust is rotated by the
    /// body rotation and applied at the motor's world position. Thrust
    /// magnitudes are constants today, but the application path is a
    /// tensor graph so gradients already flow through rotation and
    /// position.
    pub fn apply_motor_forces(&mut self) -> Result<(), PhysicsError> {
        let active: Vec<Motor> = self
            .motors
            .iter()
            .filter(|m| m.thrust() > 0.0)
            .copied()
            .collect();
        if active.is_empty() {
            return Ok(());
        }
        let cos_t = self.rotation.cos();
        let sin_t = self.rotation.sin();
        let px = self.position.select(0)?;
        let py = self.position.select(1)?;
        self.arena_extend(&[&cos_t, &sin_t, &px, &py]);
        for motor in active {
            let (ox, oy) = motor.offset();
            let local_fx = motor.angle().cos() * motor.thrust();
            let local_fy = motor.angle().sin() * motor.thrust();
            let fx = cos_t.mul_scalar(local_fx).sub(&sin_t.mul_scalar(local_fy))?;
            let fy = sin_t.mul_scalar(local_fx).add(&cos_t.mul_scalar(local_fy))?;
            let wx = px.add(&cos_t.mul_scalar(ox).sub(&sin_t.mul_scalar(oy))?)?;
            let wy = py.add(&sin_t.mul_scalar(ox).add(&cos_t.mul_scalar(oy))?)?;
            let force = GradTensor::stack(&[fx.clone(), fy.clone()])?;
            self.arena_extend(&[&fx, &fy, &wx, &wy, &force]);
            self.apply_force_at_point(&force, &wx, &wy)?;
        }
        Ok(())
    }
}
