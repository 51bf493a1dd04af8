/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use crate::errors::GradTensorError;
use crate::types::grad_tensor::GradTensor;
use crate::types::matrix::Matrix;

impl GradTensor {
    /// Standard (m, k) x (k, n) -> (m, n) matrix product.
    ///
    /// Gradient contract: dA = dY * B^T, dB = A^T * dY.
    pub fn matmul(&self, other: &GradTensor) -> Result<GradTensor, GradTensorError> {
        let (out, a_data, b_data) = {
            let a = self.node.data.borrow();
            let b = other.node.data.borrow();
            (a.matmul(&b)?, a.clone(), b.clone())
        };
        let lhs = self.clone();
        let rhs = other.clone();
        let backward = Box::new(move |grad: &Matrix| {
            if lhs.requires_grad() {
                // shapes are consistent by construction
                let da = grad
                    .matmul(&b_data.transpose())
                    .expect("matmul backward: dY * B^T");
                lhs.accumulate_grad(&da);
            }
            if rhs.requires_grad() {
                let db = a_data
                    .transpose()
                    .matmul(grad)
                    .expect("matmul backward: A^T * dY");
                rhs.accumulate_grad(&db);
            }
        });
        Ok(GradTensor::from_op(out, &[self, other], backward))
    }

    /// Shape-swapping transpose.
    pub fn transpose(&self) -> GradTensor {
        let out = self.node.data.borrow().transpose();
        let lhs = self.clone();
        let backward = Box::new(move |grad: &Matrix| {
            if lhs.requires_grad() {
                lhs.accumulate_grad(&grad.transpose());
            }
        });
        GradTensor::from_op(out, &[self], backward)
    }
}
