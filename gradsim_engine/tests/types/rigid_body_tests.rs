/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use gradsim_engine::prelude::*;
use gradsim_tensor::prelude::*;

const EPS: f64 = 1e-9;

#[test]
fn test_constructor_validates_mass() {
    assert!(RigidBody::new(0.0, 0.0, 0.0, 1.0, 1.0).is_err());
    assert!(RigidBody::new(0.0, 0.0, -1.0, 1.0, 1.0).is_err());
    assert!(RigidBody::new(0.0, 0.0, 1.0, 0.0, 1.0).is_err());
    assert!(RigidBody::new(0.0, 0.0, 1.0, 1.0, 1.0).is_ok());
}

#[test]
fn test_box_inertia() {
    let body = RigidBody::new(0.0, 0.0, 3.0, 2.0, 4.0).unwrap();
    // m (w^2 + h^2) / 12 = 3 * 20 / 12 = 5
    assert!((body.inertia_value() - 5.0).abs() < EPS);
}

#[test]
fn test_state_tensors_require_grad() {
    let body = RigidBody::new(1.0, 2.0, 1.5, 1.0, 1.0).unwrap();
    assert!(body.position().requires_grad());
    assert!(body.velocity().requires_grad());
    assert!(body.rotation().requires_grad());
    assert!(body.angular_velocity().requires_grad());
    assert!(body.mass().requires_grad());
    assert!(body.inertia().requires_grad());
    assert_eq!(body.position_values(), (1.0, 2.0));
    assert_eq!(body.mass_value(), 1.5);
}

#[test]
fn test_static_factory_defaults() {
    let body = RigidBody::new_static(0.0, -1.0, 10.0, 1.0, 0.25);
    assert!(body.is_static());
    assert_eq!(body.friction(), 0.8);
    assert_eq!(body.restitution(), 0.0);
    assert_eq!(body.rotation_value(), 0.25);
    assert_eq!(body.inv_mass(), 0.0);
    assert_eq!(body.inv_inertia(), 0.0);
}

#[test]
fn test_material_setters_clamp() {
    let mut body = RigidBody::new(0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
    body.set_friction(2.0);
    assert_eq!(body.friction(), 1.0);
    body.set_restitution(-0.5);
    assert_eq!(body.restitution(), 0.0);
}

#[test]
fn test_step_from_rest_without_forces_is_identity() {
    let mut body = RigidBody::new(1.0, 2.0, 1.0, 1.0, 1.0).unwrap();
    body.step(0.1).unwrap();
    assert_eq!(body.position_values(), (1.0, 2.0));
    assert_eq!(body.velocity_values(), (0.0, 0.0));
    assert_eq!(body.rotation_value(), 0.0);
    assert_eq!(body.angular_velocity_value(), 0.0);
}

#[test]
fn test_constant_force_recurrence() {
    // unit mass, f = (2, 0), dt = 0.1: v += 0.2, pos += v * 0.1
    let mut body = RigidBody::new(0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
    let f = GradTensor::from_vec(vec![2.0, 0.0]);
    body.apply_force(&f).unwrap();
    body.step(0.1).unwrap();

    let (vx, _) = body.velocity_values();
    let (x, _) = body.position_values();
    assert!((vx - 0.2).abs() < EPS);
    // semi-implicit Euler uses the updated velocity
    assert!((x - 0.02).abs() < EPS);
}

#[test]
fn test_static_body_ignores_forces() {
    let mut body = RigidBody::new_static(0.0, 0.0, 1.0, 1.0, 0.0);
    let f = GradTensor::from_vec(vec![100.0, 0.0]);
    body.apply_force(&f).unwrap();
    body.step(0.1).unwrap();
    assert_eq!(body.position_values(), (0.0, 0.0));
    assert_eq!(body.velocity_values(), (0.0, 0.0));
    // accumulators still reset
    assert_eq!(body.force().to_vec(), vec![0.0, 0.0]);
}

#[test]
fn test_torque_integrates_rotation() {
    let mut body = RigidBody::new(0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
    let inertia = body.inertia_value();
    let tau = GradTensor::scalar(inertia); // alpha = 1
    body.apply_torque(&tau).unwrap();
    body.step(0.5).unwrap();
    assert!((body.angular_velocity_value() - 0.5).abs() < EPS);
    assert!((body.rotation_value() - 0.25).abs() < EPS);
}

#[test]
fn test_apply_force_at_point_induces_torque() {
    // +y force at (1, 0) on a body at the origin: torque = +1 per unit force
    let mut body = RigidBody::new(0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
    let f = GradTensor::from_vec(vec![0.0, 3.0]);
    let px = GradTensor::scalar(1.0);
    let py = GradTensor::scalar(0.0);
    body.apply_force_at_point(&f, &px, &py).unwrap();

    assert_eq!(body.force().to_vec(), vec![0.0, 3.0]);
    assert!((body.torque().value().unwrap() - 3.0).abs() < EPS);
}

#[test]
fn test_force_through_center_has_no_torque() {
    let mut body = RigidBody::new(2.0, 3.0, 1.0, 1.0, 1.0).unwrap();
    let f = GradTensor::from_vec(vec![0.0, 5.0]);
    let px = GradTensor::scalar(2.0);
    let py = GradTensor::scalar(3.0);
    body.apply_force_at_point(&f, &px, &py).unwrap();
    assert!(body.torque().value().unwrap().abs() < EPS);
}

#[test]
fn test_corners_order_unrotated() {
    let mut body = RigidBody::new(0.0, 0.0, 1.0, 2.0, 1.0).unwrap();
    let corners = body.corners().unwrap();
    assert_eq!(corners.len(), 8);
    let values: Vec<f64> = corners.iter().map(|c| c.value().unwrap()).collect();
    // TR, TL, BL, BR
    assert_eq!(
        values,
        vec![1.0, 0.5, -1.0, 0.5, -1.0, -0.5, 1.0, -0.5]
    );
}

#[test]
fn test_corners_quarter_turn() {
    let mut body = RigidBody::new(0.0, 0.0, 1.0, 2.0, 1.0).unwrap();
    body.set_rotation(std::f64::consts::FRAC_PI_2);
    let corners = body.corners().unwrap();
    let values: Vec<f64> = corners.iter().map(|c| c.value().unwrap()).collect();
    // R(pi/2) maps (1, 0.5) to (-0.5, 1)
    assert!((values[0] + 0.5).abs() < EPS);
    assert!((values[1] - 1.0).abs() < EPS);
}

#[test]
fn test_corners_repopulate_arena() {
    let mut body = RigidBody::new(0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
    assert!(body.arena().is_empty());
    body.corners().unwrap();
    let first_len = body.arena().len();
    assert!(first_len > 0);

    // the next call clears before repopulating
    body.corners().unwrap();
    assert_eq!(body.arena().len(), first_len);
}

#[test]
fn test_corners_differentiate_to_position() {
    let mut body = RigidBody::new(0.0, 0.0, 1.0, 2.0, 1.0).unwrap();
    let corners = body.corners().unwrap();
    corners[0].backward();
    // d(corner x) / d(pos) = (1, 0)
    let grad = body.position().grad().unwrap();
    assert_eq!(grad.as_slice(), &[1.0, 0.0]);
}

#[test]
fn test_aabb_is_circumscribing_disc() {
    let body = RigidBody::new(1.0, 1.0, 1.0, 3.0, 4.0).unwrap();
    let aabb = body.aabb();
    // radius = 2.5
    assert_eq!(aabb.min(), Vec2::new(-1.5, -1.5));
    assert_eq!(aabb.max(), Vec2::new(3.5, 3.5));
}

#[test]
fn test_add_motor_updates_mass_and_inertia() {
    let mut body = RigidBody::new(0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
    let base_inertia = body.inertia_value();
    let motor = Motor::new(1.0, 2.0, 0.2, 0.2, 0.5, 0.0, 1.0);
    body.add_motor(motor).unwrap();

    assert!((body.mass_value() - 1.5).abs() < EPS);
    // inertia += m (lx^2 + ly^2) = 0.5 * 5
    assert!((body.inertia_value() - (base_inertia + 2.5)).abs() < EPS);
    assert_eq!(body.motors().len(), 1);
}

#[test]
fn test_add_motor_rejects_overlap() {
    let mut body = RigidBody::new(0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
    let motor = Motor::new(0.5, 0.0, 0.4, 0.2, 0.0, 0.0, 1.0);
    body.add_motor(motor).unwrap();

    let duplicate = Motor::new(0.5, 0.0, 0.4, 0.2, 0.0, 0.0, 1.0);
    assert_eq!(
        body.add_motor(duplicate).unwrap_err(),
        PhysicsError::MotorOverlap
    );
    assert_eq!(body.motors().len(), 1);
}

#[test]
fn test_motor_thrust_command() {
    let mut body = RigidBody::new(0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
    let idx = body
        .add_motor(Motor::new(0.0, 0.0, 0.2, 0.2, 0.0, 0.0, 2.0))
        .unwrap();
    body.motor_mut(idx).unwrap().set_thrust(5.0);
    assert_eq!(body.motors()[idx].thrust(), 2.0);
}

#[test]
fn test_reset_forces_clears_arena_and_accumulators() {
    let mut body = RigidBody::new(0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
    let f = GradTensor::from_vec(vec![1.0, 1.0]);
    body.apply_force(&f).unwrap();
    body.corners().unwrap();
    assert!(!body.arena().is_empty());

    body.reset_forces();
    assert!(body.arena().is_empty());
    assert_eq!(body.force().to_vec(), vec![0.0, 0.0]);
    assert_eq!(body.torque().to_vec(), vec![0.0]);
}
