/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use gradsim_tensor::prelude::*;

use crate::errors::OptimError;
use crate::traits::optimizer::Optimizer;

/// Plain stochastic gradient descent: theta <- theta - lr * g.
pub struct Sgd {
    params: Vec<GradTensor>,
    lr: f64,
}

impl Sgd {
    pub fn new(params: Vec<GradTensor>, lr: f64) -> Self {
        Self { params, lr }
    }

    #[inline(always)]
    pub fn lr(&self) -> f64 {
        self.lr
    }
}

impl Optimizer for Sgd {
    fn step(&mut self) -> Result<(), OptimError> {
        for param in &self.params {
            if !param.requires_grad() {
                continue;
            }
            let Some(grad) = param.grad() else {
                continue;
            };
            let mut data = param.to_matrix();
            data.add_scaled(&grad, -self.lr);
            param.assign(data)?;
        }
        Ok(())
    }

    fn zero_grad(&mut self) {
        for param in &self.params {
            param.zero_grad();
        }
    }
}
