/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use crate::errors::GradTensorError;
use crate::types::grad_tensor::GradTensor;
use crate::types::matrix::Matrix;

impl GradTensor {
    /// Sum of all elements to a (1, 1) scalar.
    ///
    /// Gradient contract: broadcasts the incoming scalar to every element.
    pub fn sum(&self) -> GradTensor {
        let out = Matrix::scalar(self.node.data.borrow().sum());
        let lhs = self.clone();
        let backward = Box::new(move |grad: &Matrix| {
            if lhs.requires_grad() {
                let (rows, cols) = lhs.node.data.borrow().shape();
                lhs.accumulate_grad(&Matrix::filled(rows, cols, grad.as_slice()[0]));
            }
        });
        GradTensor::from_op(out, &[self], backward)
    }

    /// Mean of all elements to a (1, 1) scalar.
    pub fn mean(&self) -> GradTensor {
        let (total, count) = {
            let data = self.node.data.borrow();
            (data.sum(), data.len() as f64)
        };
        let out = Matrix::scalar(total / count);
        let lhs = self.clone();
        let backward = Box::new(move |grad: &Matrix| {
            if lhs.requires_grad() {
                let (rows, cols) = lhs.node.data.borrow().shape();
                lhs.accumulate_grad(&Matrix::filled(rows, cols, grad.as_slice()[0] / count));
            }
        });
        GradTensor::from_op(out, &[self], backward)
    }

    /// Maximum element to a (1, 1) scalar.
    ///
    /// Gradient contract: deposits the full upstream gradient into the
    /// first argmax cell.
    pub fn max(&self) -> Result<GradTensor, GradTensorError> {
        self.extremum(f64::lt)
    }

    /// Minimum element to a (1, 1) scalar.
    pub fn min(&self) -> Result<GradTensor, GradTensorError> {
        self.extremum(f64::gt)
    }

    fn extremum(&self, replace: fn(&f64, &f64) -> bool) -> Result<GradTensor, GradTensorError> {
        let (best, arg) = {
            let data = self.node.data.borrow();
            if data.is_empty() {
                return Err(GradTensorError::EmptyTensor);
            }
            let slice = data.as_slice();
            let mut best = slice[0];
            let mut arg = 0usize;
            for (i, v) in slice.iter().enumerate().skip(1) {
                if replace(&best, v) {
                    best = *v;
                    arg = i;
                }
            }
            (best, arg)
        };
        let lhs = self.clone();
        let backward = Box::new(move |grad: &Matrix| {
            if lhs.requires_grad() {
                let (rows, cols) = lhs.node.data.borrow().shape();
                let mut g = Matrix::zeros(rows, cols);
                g.as_mut_slice()[arg] = grad.as_slice()[0];
                lhs.accumulate_grad(&g);
            }
        });
        Ok(GradTensor::from_op(Matrix::scalar(best), &[self], backward))
    }

    /// Sums along one axis: axis 0 collapses rows to (1, cols),
    /// axis 1 collapses columns to (rows, 1).
    pub fn sum_axis(&self, axis: usize) -> Result<GradTensor, GradTensorError> {
        self.reduce_axis(axis, false)
    }

    /// Means along one axis, same shape rules as [`GradTensor::sum_axis`].
    pub fn mean_axis(&self, axis: usize) -> Result<GradTensor, GradTensorError> {
        self.reduce_axis(axis, true)
    }

    fn reduce_axis(&self, axis: usize, mean: bool) -> Result<GradTensor, GradTensorError> {
        if axis > 1 {
            return Err(GradTensorError::AxisOutOfBounds { axis });
        }
        let (out, rows, cols) = {
            let data = self.node.data.borrow();
            let (rows, cols) = data.shape();
            let mut out = if axis == 0 {
                Matrix::zeros(1, cols)
            } else {
                Matrix::zeros(rows, 1)
            };
            for r in 0..rows {
                for c in 0..cols {
                    if axis == 0 {
                        *out.at_mut(0, c) += data.at(r, c);
                    } else {
                        *out.at_mut(r, 0) += data.at(r, c);
                    }
                }
            }
            if mean {
                let count = if axis == 0 { rows } else { cols } as f64;
                out = out.scale(1.0 / count);
            }
            (out, rows, cols)
        };
        let lhs = self.clone();
        let backward = Box::new(move |grad: &Matrix| {
            if lhs.requires_grad() {
                let count = if axis == 0 { rows } else { cols } as f64;
                let factor = if mean { 1.0 / count } else { 1.0 };
                let mut g = Matrix::zeros(rows, cols);
                for r in 0..rows {
                    for c in 0..cols {
                        let upstream = if axis == 0 { grad.at(0, c) } else { grad.at(r, 0) };
                        *g.at_mut(r, c) = upstream * factor;
                    }
                }
                lhs.accumulate_grad(&g);
            }
        });
        Ok(GradTensor::from_op(out, &[self], backward))
    }
}
