/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use crate::types::grad_tensor::GradTensor;
use crate::types::matrix::Matrix;

impl GradTensor {
    /// Shared scaffolding for elementwise unary operations.
    ///
    /// `forward` maps each element; `derivative` maps the same input
    /// element to the local derivative used by the chain rule.
    fn unary_op(
        &self,
        forward: impl Fn(f64) -> f64,
        derivative: impl Fn(f64) -> f64 + 'static,
    ) -> GradTensor {
        let (out, x_data) = {
            let data = self.node.data.borrow();
            (data.map(&forward), data.clone())
        };
        let lhs = self.clone();
        let backward = Box::new(move |grad: &Matrix| {
            if lhs.requires_grad() {
                lhs.accumulate_grad(&grad.zip_map(&x_data, |g, x| g * derivative(x)));
            }
        });
        GradTensor::from_op(out, &[self], backward)
    }

    pub fn exp(&self) -> GradTensor {
        self.unary_op(f64::exp, f64::exp)
    }

    pub fn log(&self) -> GradTensor {
        self.unary_op(f64::ln, |x| 1.0 / x)
    }

    pub fn sqrt(&self) -> GradTensor {
        self.unary_op(f64::sqrt, |x| 0.5 / x.sqrt())
    }

    /// Elementwise absolute value. The derivative at zero is taken as zero.
    pub fn abs(&self) -> GradTensor {
        self.unary_op(f64::abs, |x| {
            if x > 0.0 {
                1.0
            } else if x < 0.0 {
                -1.0
            } else {
                0.0
            }
        })
    }

    pub fn powf(&self, exponent: f64) -> GradTensor {
        self.unary_op(
            move |x| x.powf(exponent),
            move |x| exponent * x.powf(exponent - 1.0),
        )
    }

    pub fn sin(&self) -> GradTensor {
        self.unary_op(f64::sin, f64::cos)
    }

    pub fn cos(&self) -> GradTensor {
        self.unary_op(f64::cos, |x| -x.sin())
    }

    /// Clamps every element into [lo, hi].
    ///
    /// Gradient contract: identity inside the interval, zero outside.
    pub fn clamp(&self, lo: f64, hi: f64) -> GradTensor {
        self.unary_op(
            move |x| x.clamp(lo, hi),
            move |x| if x >= lo && x <= hi { 1.0 } else { 0.0 },
        )
    }
}
