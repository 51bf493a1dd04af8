/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use gradsim_tensor::prelude::*;

use crate::errors::OptimError;
use crate::traits::optimizer::Optimizer;
use crate::types::adam::Adam;

/// Adam with decoupled weight decay: theta <- theta - lr * wd * theta is
/// applied before the regular Adam update.
pub struct AdamW {
    inner: Adam,
    weight_decay: f64,
}

impl AdamW {
    pub fn new(
        params: Vec<GradTensor>,
        lr: f64,
        beta1: f64,
        beta2: f64,
        epsilon: f64,
        weight_decay: f64,
    ) -> Self {
        Self {
            inner: Adam::new(params, lr, beta1, beta2, epsilon),
            weight_decay,
        }
    }

    /// AdamW with the conventional beta/epsilon defaults.
    pub fn with_defaults(params: Vec<GradTensor>, lr: f64, weight_decay: f64) -> Self {
        Self {
            inner: Adam::with_defaults(params, lr),
            weight_decay,
        }
    }

    #[inline(always)]
    pub fn weight_decay(&self) -> f64 {
        self.weight_decay
    }
}

impl Optimizer for AdamW {
    fn step(&mut self) -> Result<(), OptimError> {
        self.inner.update(self.weight_decay)
    }

    fn zero_grad(&mut self) {
        self.inner.clear_grads();
    }
}
