/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use crate::errors::GradTensorError;
use crate::types::grad_tensor::GradTensor;
use crate::types::matrix::Matrix;

const HALF_LN_2PI: f64 = 0.918_938_533_204_672_7;

impl GradTensor {
    /// Log-probability of `action` under a diagonal Gaussian with the given
    /// `mean` and `log_std`, summed over dimensions to a (1, 1) scalar:
    ///
    /// sum_i [ -1/2 ((a_i - mu_i) / sigma_i)^2 - log_std_i - 1/2 ln(2 pi) ]
    ///
    /// Gradient contract: d/dmu_i = (a_i - mu_i) / sigma_i^2 and
    /// d/dlog_std_i = ((a_i - mu_i) / sigma_i)^2 - 1. No gradient flows to
    /// `action`.
    pub fn gaussian_log_prob(
        action: &GradTensor,
        mean: &GradTensor,
        log_std: &GradTensor,
    ) -> Result<GradTensor, GradTensorError> {
        let (out, a_data, mu_data, ls_data) = {
            let a = action.node.data.borrow();
            let mu = mean.node.data.borrow();
            let ls = log_std.node.data.borrow();
            if a.shape() != mu.shape() {
                return Err(GradTensorError::ShapeMismatch {
                    left: a.shape(),
                    right: mu.shape(),
                });
            }
            if a.shape() != ls.shape() {
                return Err(GradTensorError::ShapeMismatch {
                    left: a.shape(),
                    right: ls.shape(),
                });
            }
            let mut total = 0.0;
            for i in 0..a.len() {
                let sigma = ls.as_slice()[i].exp();
                let z = (a.as_slice()[i] - mu.as_slice()[i]) / sigma;
                total += -0.5 * z * z - ls.as_slice()[i] - HALF_LN_2PI;
            }
            (Matrix::scalar(total), a.clone(), mu.clone(), ls.clone())
        };
        let mean_handle = mean.clone();
        let ls_handle = log_std.clone();
        let backward = Box::new(move |grad: &Matrix| {
            let g = grad.as_slice()[0];
            if mean_handle.requires_grad() {
                let mut dmu = Matrix::zeros(mu_data.rows(), mu_data.cols());
                for i in 0..mu_data.len() {
                    let sigma = ls_data.as_slice()[i].exp();
                    let delta = a_data.as_slice()[i] - mu_data.as_slice()[i];
                    dmu.as_mut_slice()[i] = g * delta / (sigma * sigma);
                }
                mean_handle.accumulate_grad(&dmu);
            }
            if ls_handle.requires_grad() {
                let mut dls = Matrix::zeros(ls_data.rows(), ls_data.cols());
                for i in 0..ls_data.len() {
                    let sigma = ls_data.as_slice()[i].exp();
                    let z = (a_data.as_slice()[i] - mu_data.as_slice()[i]) / sigma;
                    dls.as_mut_slice()[i] = g * (z * z - 1.0);
                }
                ls_handle.accumulate_grad(&dls);
            }
        });
        // action is a constant observation; only mean and log_std join the graph
        Ok(GradTensor::from_op(out, &[mean, log_std], backward))
    }
}
