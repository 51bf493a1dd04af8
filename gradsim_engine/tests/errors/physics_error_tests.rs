/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use gradsim_engine::PhysicsError;
use gradsim_tensor::GradTensorError;

#[test]
fn test_display() {
    assert_eq!(
        PhysicsError::MotorOverlap.to_string(),
        "PhysicsError: Motor footprints overlap"
    );
    assert_eq!(
        PhysicsError::InvalidParameter("mass must be positive, got 0".to_string()).to_string(),
        "PhysicsError: Invalid parameter: mass must be positive, got 0"
    );
    assert_eq!(
        PhysicsError::from(GradTensorError::EmptyTensor).to_string(),
        "PhysicsError: GradTensorError: Empty tensor error"
    );
}

#[test]
fn test_equality() {
    assert_eq!(PhysicsError::MotorOverlap, PhysicsError::MotorOverlap);
    assert_ne!(
        PhysicsError::MotorOverlap,
        PhysicsError::Tensor(GradTensorError::EmptyTensor)
    );
}
