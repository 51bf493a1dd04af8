/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use crate::errors::GradTensorError;
use crate::types::grad_tensor::GradTensor;
use crate::types::matrix::Matrix;

impl GradTensor {
    /// Elementwise sum. Shapes must match.
    ///
    /// Gradient contract: both operands receive the upstream gradient.
    pub fn add(&self, other: &GradTensor) -> Result<GradTensor, GradTensorError> {
        let out = {
            let a = self.node.data.borrow();
            let b = other.node.data.borrow();
            if a.shape() != b.shape() {
                return Err(GradTensorError::ShapeMismatch {
                    left: a.shape(),
                    right: b.shape(),
                });
            }
            a.zip_map(&b, |x, y| x + y)
        };
        let lhs = self.clone();
        let rhs = other.clone();
        let backward = Box::new(move |grad: &Matrix| {
            if lhs.requires_grad() {
                lhs.accumulate_grad(grad);
            }
            if rhs.requires_grad() {
                rhs.accumulate_grad(grad);
            }
        });
        Ok(GradTensor::from_op(out, &[self, other], backward))
    }

    /// Elementwise difference. Shapes must match.
    ///
    /// Gradient contract: negate on the second operand.
    pub fn sub(&self, other: &GradTensor) -> Result<GradTensor, GradTensorError> {
        let out = {
            let a = self.node.data.borrow();
            let b = other.node.data.borrow();
            if a.shape() != b.shape() {
                return Err(GradTensorError::ShapeMismatch {
                    left: a.shape(),
                    right: b.shape(),
                });
            }
            a.zip_map(&b, |x, y| x - y)
        };
        let lhs = self.clone();
        let rhs = other.clone();
        let backward = Box::new(move |grad: &Matrix| {
            if lhs.requires_grad() {
                lhs.accumulate_grad(grad);
            }
            if rhs.requires_grad() {
                let mut g = rhs.node.grad.borrow_mut();
                match g.as_mut() {
                    Some(m) => m.add_scaled(grad, -1.0),
                    None => {
                        let (rows, cols) = rhs.node.data.borrow().shape();
                        let mut m = Matrix::zeros(rows, cols);
                        m.add_scaled(grad, -1.0);
                        *g = Some(m);
                    }
                }
            }
        });
        Ok(GradTensor::from_op(out, &[self, other], backward))
    }

    /// Hadamard product. Shapes must match, except that a (1, 1)
    /// right-hand side broadcasts to the left-hand shape.
    ///
    /// Gradient contract: each operand receives the upstream gradient
    /// scaled by the other; the scalar side reduces by sum.
    pub fn mul(&self, other: &GradTensor) -> Result<GradTensor, GradTensorError> {
        let (out, a_data, b_data, broadcast) = {
            let a = self.node.data.borrow();
            let b = other.node.data.borrow();
            let broadcast = b.is_scalar() && !a.is_scalar();
            if !broadcast && a.shape() != b.shape() {
                return Err(GradTensorError::ShapeMismatch {
                    left: a.shape(),
                    right: b.shape(),
                });
            }
            let out = if broadcast {
                a.scale(b.as_slice()[0])
            } else {
                a.zip_map(&b, |x, y| x * y)
            };
            (out, a.clone(), b.clone(), broadcast)
        };
        let lhs = self.clone();
        let rhs = other.clone();
        let backward = Box::new(move |grad: &Matrix| {
            if lhs.requires_grad() {
                if broadcast {
                    lhs.accumulate_grad(&grad.scale(b_data.as_slice()[0]));
                } else {
                    lhs.accumulate_grad(&grad.zip_map(&b_data, |g, y| g * y));
                }
            }
            if rhs.requires_grad() {
                if broadcast {
                    let reduced = grad.zip_map(&a_data, |g, x| g * x).sum();
                    rhs.accumulate_grad(&Matrix::scalar(reduced));
                } else {
                    rhs.accumulate_grad(&grad.zip_map(&a_data, |g, x| g * x));
                }
            }
        });
        Ok(GradTensor::from_op(out, &[self, other], backward))
    }

    /// Elementwise quotient. Shapes must match, except that a (1, 1)
    /// right-hand side broadcasts to the left-hand shape.
    ///
    /// Division by zero produces infinities; no explicit check is made.
    pub fn div(&self, other: &GradTensor) -> Result<GradTensor, GradTensorError> {
        let (out, a_data, b_data, broadcast) = {
            let a = self.node.data.borrow();
            let b = other.node.data.borrow();
            let broadcast = b.is_scalar() && !a.is_scalar();
            if !broadcast && a.shape() != b.shape() {
                return Err(GradTensorError::ShapeMismatch {
                    left: a.shape(),
                    right: b.shape(),
                });
            }
            let out = if broadcast {
                a.scale(1.0 / b.as_slice()[0])
            } else {
                a.zip_map(&b, |x, y| x / y)
            };
            (out, a.clone(), b.clone(), broadcast)
        };
        let lhs = self.clone();
        let rhs = other.clone();
        let backward = Box::new(move |grad: &Matrix| {
            if lhs.requires_grad() {
                if broadcast {
                    lhs.accumulate_grad(&grad.scale(1.0 / b_data.as_slice()[0]));
                } else {
                    lhs.accumulate_grad(&grad.zip_map(&b_data, |g, y| g / y));
                }
            }
            if rhs.requires_grad() {
                if broadcast {
                    let s = b_data.as_slice()[0];
                    let reduced = grad.zip_map(&a_data, |g, x| -g * x / (s * s)).sum();
                    rhs.accumulate_grad(&Matrix::scalar(reduced));
                } else {
                    let quotient =
                        grad.zip_map(&a_data, |g, x| g * x)
                            .zip_map(&b_data, |gx, y| -gx / (y * y));
                    rhs.accumulate_grad(&quotient);
                }
            }
        });
        Ok(GradTensor::from_op(out, &[self, other], backward))
    }

    /// Scalar multiple.
    pub fn mul_scalar(&self, factor: f64) -> GradTensor {
        let out = self.node.data.borrow().scale(factor);
        let lhs = self.clone();
        let backward = Box::new(move |grad: &Matrix| {
            if lhs.requires_grad() {
                lhs.accumulate_grad(&grad.scale(factor));
            }
        });
        GradTensor::from_op(out, &[self], backward)
    }

    /// Elementwise negation.
    pub fn neg(&self) -> GradTensor {
        self.mul_scalar(-1.0)
    }
}
