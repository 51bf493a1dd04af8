/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use crate::errors::OptimError;

/// Update policy over a registered, ordered parameter set.
///
/// Parameters whose gradient is unallocated or whose requires-grad flag is
/// false are skipped silently by `step`.
pub trait Optimizer {
    /// Applies one update using each parameter's current gradient.
    fn step(&mut self) -> Result<(), OptimError>;

    /// Clears the gradients of all registered parameters.
    fn zero_grad(&mut self);
}
