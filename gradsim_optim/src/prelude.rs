/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

// Errors
pub use crate::errors::OptimError;
// Optimizer trait
pub use crate::traits::optimizer::Optimizer;
// Optimizers
pub use crate::types::adam::Adam;
pub use crate::types::adam_w::AdamW;
pub use crate::types::sgd::Sgd;
