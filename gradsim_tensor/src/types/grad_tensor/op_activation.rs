/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use crate::types::grad_tensor::GradTensor;
use crate::types::matrix::Matrix;

impl GradTensor {
    /// Rectified linear unit: max(0, x).
    ///
    /// Gradient contract: passes the upstream gradient where x > 0.
    pub fn relu(&self) -> GradTensor {
        let (out, x_data) = {
            let data = self.node.data.borrow();
            (data.map(|x| x.max(0.0)), data.clone())
        };
        let lhs = self.clone();
        let backward = Box::new(move |grad: &Matrix| {
            if lhs.requires_grad() {
                lhs.accumulate_grad(&grad.zip_map(&x_data, |g, x| if x > 0.0 { g } else { 0.0 }));
            }
        });
        GradTensor::from_op(out, &[self], backward)
    }

    /// Hyperbolic tangent.
    ///
    /// Gradient contract: d/dx tanh(x) = 1 - tanh(x)^2, computed from the
    /// forward output.
    pub fn tanh(&self) -> GradTensor {
        let out = self.node.data.borrow().map(f64::tanh);
        let y_data = out.clone();
        let lhs = self.clone();
        let backward = Box::new(move |grad: &Matrix| {
            if lhs.requires_grad() {
                lhs.accumulate_grad(&grad.zip_map(&y_data, |g, y| g * (1.0 - y * y)));
            }
        });
        GradTensor::from_op(out, &[self], backward)
    }
}
