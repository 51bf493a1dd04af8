/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use gradsim_tensor::prelude::*;

use crate::errors::PhysicsError;
use crate::types::motor::Motor;
use crate::types::shape::BodyShape;
use crate::types::vec2::Vec2;

mod corners;
mod forces;
mod integrator;

/// Default friction coefficient of a dynamic body.
pub const DYNAMIC_FRICTION: f64 = 0.5;
/// Default friction coefficient of a static body.
pub const STATIC_FRICTION: f64 = 0.8;

/// Planar rigid body whose state flows through the autograd graph.
///
/// Position (2,1), velocity (2,1), rotation (1,1), angular velocity (1,1),
/// mass (1,1) and inertia (1,1) are gradient-requiring tensors; every
/// integrator step and contact force is a graph operation, so a scalar
/// computed from any later state differentiates back to these leaves.
///
/// The body owns a [`GraphArena`] pinning the transient interior tensors
/// of the current substep. The arena is cleared at the start of each
/// corner computation and of each [`RigidBody::reset_forces`].
pub struct RigidBody {
    position: GradTensor,
    velocity: GradTensor,
    rotation: GradTensor,
    angular_velocity: GradTensor,
    mass: GradTensor,
    inertia: GradTensor,
    force: GradTensor,
    torque: GradTensor,
    width: f64,
    height: f64,
    shapes: Vec<BodyShape>,
    motors: Vec<Motor>,
    friction: f64,
    restitution: f64,
    is_static: bool,
    arena: GraphArena,
}

impl RigidBody {
    /// Dynamic body with a box shape. Box inertia is m (w^2 + h^2) / 12.
    pub fn new(
        x: f64,
        y: f64,
        mass: f64,
        width: f64,
        height: f64,
    ) -> Result<Self, PhysicsError> {
        if mass <= 0.0 {
            return Err(PhysicsError::InvalidParameter(format!(
                "mass must be positive, got {mass}"
            )));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(PhysicsError::InvalidParameter(format!(
                "box dimensions must be positive, got ({width}, {height})"
            )));
        }
        let inertia = mass * (width * width + height * height) / 12.0;
        Ok(Self::with_state(
            x, y, 0.0, mass, inertia, width, height, false, DYNAMIC_FRICTION,
        ))
    }

    /// Static body: immovable during integration, infinite-mass during
    /// contact, higher default friction and zero restitution.
    pub fn new_static(x: f64, y: f64, width: f64, height: f64, rotation: f64) -> Self {
        let inertia = (width * width + height * height) / 12.0;
        Self::with_state(
            x,
            y,
            rotation,
            1.0,
            inertia,
            width,
            height,
            true,
            STATIC_FRICTION,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn with_state(
        x: f64,
        y: f64,
        rotation: f64,
        mass: f64,
        inertia: f64,
        width: f64,
        height: f64,
        is_static: bool,
        friction: f64,
    ) -> Self {
        let position = GradTensor::from_vec(vec![x, y]);
        let velocity = GradTensor::zeros(2, 1);
        let rotation = GradTensor::scalar(rotation);
        let angular_velocity = GradTensor::zeros(1, 1);
        let mass = GradTensor::scalar(mass);
        let inertia = GradTensor::scalar(inertia);
        for tensor in [
            &position,
            &velocity,
            &rotation,
            &angular_velocity,
            &mass,
            &inertia,
        ] {
            tensor.set_requires_grad(true);
        }
        Self {
            position,
            velocity,
            rotation,
            angular_velocity,
            mass,
            inertia,
            force: GradTensor::zeros(2, 1),
            torque: GradTensor::zeros(1, 1),
            width,
            height,
            shapes: vec![BodyShape::Box {
                width,
                height,
                offset: Vec2::ZERO,
            }],
            motors: Vec::new(),
            friction,
            restitution: 0.0,
            is_static,
            arena: GraphArena::new(),
        }
    }

    #[inline(always)]
    pub fn position(&self) -> &GradTensor {
        &self.position
    }

    #[inline(always)]
    pub fn velocity(&self) -> &GradTensor {
        &self.velocity
    }

    #[inline(always)]
    pub fn rotation(&self) -> &GradTensor {
        &self.rotation
    }

    #[inline(always)]
    pub fn angular_velocity(&self) -> &GradTensor {
        &self.angular_velocity
    }

    #[inline(always)]
    pub fn mass(&self) -> &GradTensor {
        &self.mass
    }

    #[inline(always)]
    pub fn inertia(&self) -> &GradTensor {
        &self.inertia
    }

    #[inline(always)]
    pub fn force(&self) -> &GradTensor {
        &self.force
    }

    #[inline(always)]
    pub fn torque(&self) -> &GradTensor {
        &self.torque
    }

    /// Current (x, y) as plain values.
    pub fn position_values(&self) -> (f64, f64) {
        let data = self.position.to_vec();
        (data[0], data[1])
    }

    /// Current (vx, vy) as plain values.
    pub fn velocity_values(&self) -> (f64, f64) {
        let data = self.velocity.to_vec();
        (data[0], data[1])
    }

    pub fn rotation_value(&self) -> f64 {
        self.rotation.to_vec()[0]
    }

    pub fn angular_velocity_value(&self) -> f64 {
        self.angular_velocity.to_vec()[0]
    }

    pub fn mass_value(&self) -> f64 {
        self.mass.to_vec()[0]
    }

    pub fn inertia_value(&self) -> f64 {
        self.inertia.to_vec()[0]
    }

    /// Inverse mass; zero for a static body.
    pub fn inv_mass(&self) -> f64 {
        if self.is_static {
            0.0
        } else {
            1.0 / self.mass_value()
        }
    }

    /// Inverse inertia; zero for a static body.
    pub fn inv_inertia(&self) -> f64 {
        if self.is_static {
            0.0
        } else {
            1.0 / self.inertia_value()
        }
    }

    /// Resets the position to a fresh gradient-requiring leaf.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = GradTensor::from_vec(vec![x, y]);
        self.position.set_requires_grad(true);
    }

    /// Resets the velocity to a fresh gradient-requiring leaf.
    pub fn set_velocity(&mut self, vx: f64, vy: f64) {
        self.velocity = GradTensor::from_vec(vec![vx, vy]);
        self.velocity.set_requires_grad(true);
    }

    /// Resets the rotation to a fresh gradient-requiring leaf.
    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = GradTensor::scalar(rotation);
        self.rotation.set_requires_grad(true);
    }

    /// Resets the angular velocity to a fresh gradient-requiring leaf.
    pub fn set_angular_velocity(&mut self, omega: f64) {
        self.angular_velocity = GradTensor::scalar(omega);
        self.angular_velocity.set_requires_grad(true);
    }

    #[inline(always)]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline(always)]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    #[inline(always)]
    pub fn friction(&self) -> f64 {
        self.friction
    }

    #[inline(always)]
    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    pub fn set_friction(&mut self, friction: f64) {
        self.friction = friction.clamp(0.0, 1.0);
    }

    pub fn set_restitution(&mut self, restitution: f64) {
        self.restitution = restitution.clamp(0.0, 1.0);
    }

    #[inline(always)]
    pub fn shapes(&self) -> &[BodyShape] {
        &self.shapes
    }

    pub fn add_shape(&mut self, shape: BodyShape) {
        self.shapes.push(shape);
    }

    #[inline(always)]
    pub fn motors(&self) -> &[Motor] {
        &self.motors
    }

    /// Mutable motor access, for thrust commands.
    pub fn motor_mut(&mut self, index: usize) -> Option<&mut Motor> {
        self.motors.get_mut(index)
    }

    #[inline(always)]
    pub fn arena(&self) -> &GraphArena {
        &self.arena
    }

    /// Pins a transient graph node in this body's arena.
    pub fn arena_push(&mut self, tensor: &GradTensor) {
        self.arena.push(tensor);
    }

    /// Pins a batch of transient graph nodes.
    pub fn arena_extend(&mut self, tensors: &[&GradTensor]) {
        self.arena.extend(tensors);
    }

    pub(crate) fn arena_clear(&mut self) {
        self.arena.clear();
    }

    /// Attaches a motor, rejecting local footprints that overlap an
    /// existing motor. The motor's mass joins the body:
    /// mass += m, inertia += m (lx^2 + ly^2).
    pub fn add_motor(&mut self, motor: Motor) -> Result<usize, PhysicsError> {
        if self.motors.iter().any(|m| m.overlaps(&motor)) {
            return Err(PhysicsError::MotorOverlap);
        }
        let (lx, ly) = motor.offset();
        let mass = self.mass_value() + motor.mass();
        let inertia = self.inertia_value() + motor.mass() * (lx * lx + ly * ly);
        self.mass.assign(Matrix::scalar(mass))?;
        self.inertia.assign(Matrix::scalar(inertia))?;
        self.motors.push(motor);
        Ok(self.motors.len() - 1)
    }
}
