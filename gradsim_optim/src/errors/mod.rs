/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use std::error::Error;
use std::fmt;

use gradsim_tensor::GradTensorError;

/// Error type for optimizer construction and updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimError {
    /// A tensor operation failed during an update.
    Tensor(GradTensorError),
}

impl Error for OptimError {}

impl fmt::Display for OptimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OptimError::Tensor(err) => write!(f, "OptimError: {err}"),
        }
    }
}

impl From<GradTensorError> for OptimError {
    fn from(err: GradTensorError) -> Self {
        OptimError::Tensor(err)
    }
}
