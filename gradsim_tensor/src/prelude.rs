/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

// Errors
pub use crate::errors::GradTensorError;
// Matrix storage
pub use crate::types::matrix::Matrix;
// Autograd tensor
pub use crate::types::grad_tensor::GradTensor;
// Graph arena
pub use crate::types::graph_arena::GraphArena;
