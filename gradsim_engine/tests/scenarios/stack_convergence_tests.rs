/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use gradsim_engine::prelude::*;

#[test]
fn test_body_settles_on_segment() {
    // 1x1 unit-mass box dropped on flat ground under gravity (0, -10),
    // dt = 0.016 at 50 substeps: after 60 frames the bottom corners sit
    // on the segment (|y| < 0.01) and the body is at rest (|v| < 0.05)
    let mut engine = PhysicsEngine::new(100, 100, 1.0, 0.016, 50);
    engine.set_gravity(0.0, -10.0);
    engine.add_ground_segment(-10.0, 0.0, 10.0, 0.0, 0.5);
    let body = engine.add_body(RigidBody::new(0.0, 0.6, 1.0, 1.0, 1.0).unwrap());

    for _ in 0..60 {
        engine.update().unwrap();
    }

    let corner_y = body.borrow().position_values().1 - 0.5;
    let (vx, vy) = body.borrow().velocity_values();
    assert!(corner_y.abs() < 0.01, "corner y = {corner_y}");
    assert!(vx.abs() < 0.05, "vx = {vx}");
    assert!(vy.abs() < 0.05, "vy = {vy}");
}

#[test]
fn test_steady_penetration_balances_weight() {
    // at rest the spring force balances gravity: 2 k |d| = g (unit mass),
    // so |d| = 10 / 40000 = 0.00025
    let mut engine = PhysicsEngine::new(100, 100, 1.0, 0.016, 50);
    engine.set_gravity(0.0, -10.0);
    engine.add_ground_segment(-10.0, 0.0, 10.0, 0.0, 0.5);
    let body = engine.add_body(RigidBody::new(0.0, 0.6, 1.0, 1.0, 1.0).unwrap());

    for _ in 0..120 {
        engine.update().unwrap();
    }

    let depth = 0.5 - body.borrow().position_values().1;
    assert!(
        (depth - 0.00025).abs() < 5e-5,
        "steady penetration = {depth}"
    );
}

#[test]
fn test_body_stays_settled() {
    // once settled, further frames do not reintroduce energy
    let mut engine = PhysicsEngine::new(100, 100, 1.0, 0.016, 50);
    engine.set_gravity(0.0, -10.0);
    engine.add_ground_segment(-10.0, 0.0, 10.0, 0.0, 0.5);
    let body = engine.add_body(RigidBody::new(0.0, 0.6, 1.0, 1.0, 1.0).unwrap());

    for _ in 0..60 {
        engine.update().unwrap();
    }
    let settled_y = body.borrow().position_values().1;

    for _ in 0..30 {
        engine.update().unwrap();
    }
    let later_y = body.borrow().position_values().1;
    assert!((settled_y - later_y).abs() < 1e-3);
}
