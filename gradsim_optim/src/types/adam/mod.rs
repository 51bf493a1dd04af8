/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use gradsim_tensor::prelude::*;

use crate::errors::OptimError;
use crate::traits::optimizer::Optimizer;

pub(crate) const DEFAULT_BETA1: f64 = 0.9;
pub(crate) const DEFAULT_BETA2: f64 = 0.999;
pub(crate) const DEFAULT_EPSILON: f64 = 1e-8;

/// Adam optimizer with bias-corrected first and second moments.
///
/// Per step, with gradient g for each parameter:
///
/// t <- t + 1
/// m <- beta1 * m + (1 - beta1) * g
/// v <- beta2 * v + (1 - beta2) * g^2
/// theta <- theta - lr * (m / (1 - beta1^t)) / (sqrt(v / (1 - beta2^t)) + eps)
pub struct Adam {
    params: Vec<GradTensor>,
    lr: f64,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    t: u64,
    m: Vec<Matrix>,
    v: Vec<Matrix>,
}

impl Adam {
    pub fn new(params: Vec<GradTensor>, lr: f64, beta1: f64, beta2: f64, epsilon: f64) -> Self {
        let m = params
            .iter()
            .map(|p| Matrix::zeros(p.rows(), p.cols()))
            .collect();
        let v = params
            .iter()
            .map(|p| Matrix::zeros(p.rows(), p.cols()))
            .collect();
        Self {
            params,
            lr,
            beta1,
            beta2,
            epsilon,
            t: 0,
            m,
            v,
        }
    }

    /// Adam with the conventional beta1 = 0.9, beta2 = 0.999, eps = 1e-8.
    pub fn with_defaults(params: Vec<GradTensor>, lr: f64) -> Self {
        Self::new(params, lr, DEFAULT_BETA1, DEFAULT_BETA2, DEFAULT_EPSILON)
    }

    #[inline(always)]
    pub fn step_count(&self) -> u64 {
        self.t
    }

    pub(crate) fn update(&mut self, weight_decay: f64) -> Result<(), OptimError> {
        self.t += 1;
        let bias1 = 1.0 - self.beta1.powi(self.t as i32);
        let bias2 = 1.0 - self.beta2.powi(self.t as i32);
        for (i, param) in self.params.iter().enumerate() {
            if !param.requires_grad() {
                continue;
            }
            let Some(grad) = param.grad() else {
                continue;
            };
            let mut data = param.to_matrix();
            if weight_decay != 0.0 {
                // decoupled weight decay, applied before the moment update
                data = data.scale(1.0 - self.lr * weight_decay);
            }
            let g = grad.as_slice();
            let m = self.m[i].as_mut_slice();
            let v = self.v[i].as_mut_slice();
            let out = data.as_mut_slice();
            for j in 0..g.len() {
                m[j] = self.beta1 * m[j] + (1.0 - self.beta1) * g[j];
                v[j] = self.beta2 * v[j] + (1.0 - self.beta2) * g[j] * g[j];
                let m_hat = m[j] / bias1;
                let v_hat = v[j] / bias2;
                out[j] -= self.lr * m_hat / (v_hat.sqrt() + self.epsilon);
            }
            param.assign(data)?;
        }
        Ok(())
    }

    pub(crate) fn clear_grads(&mut self) {
        for param in &self.params {
            param.zero_grad();
        }
    }
}

impl Optimizer for Adam {
    fn step(&mut self) -> Result<(), OptimError> {
        self.update(0.0)
    }

    fn zero_grad(&mut self) {
        self.clear_grads();
    }
}
