/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use std::error::Error;
use std::fmt;

use gradsim_tensor::GradTensorError;

/// Error type for body construction, motor attachment and the engine loop.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Two motors on the same body have overlapping local footprints.
    MotorOverlap,
    /// A constructor argument violates a body invariant (mass > 0, ...).
    InvalidParameter(String),
    /// A tensor operation failed inside the dynamics graph.
    Tensor(GradTensorError),
}

impl Error for PhysicsError {}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PhysicsError::MotorOverlap => {
                write!(f, "PhysicsError: Motor footprints overlap")
            }
            PhysicsError::InvalidParameter(msg) => {
                write!(f, "PhysicsError: Invalid parameter: {msg}")
            }
            PhysicsError::Tensor(err) => write!(f, "PhysicsError: {err}"),
        }
    }
}

impl From<GradTensorError> for PhysicsError {
    fn from(err: GradTensorError) -> Self {
        PhysicsError::Tensor(err)
    }
}
