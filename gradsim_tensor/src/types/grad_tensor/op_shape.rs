/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use crate::errors::GradTensorError;
use crate::types::grad_tensor::GradTensor;
use crate::types::matrix::Matrix;

impl GradTensor {
    /// Returns the (1, 1) scalar at a column-major flat index.
    ///
    /// With shape (rows, cols) the index addresses row `idx % rows`,
    /// column `idx / rows`. Out-of-range indices are a hard failure.
    pub fn select(&self, idx: usize) -> Result<GradTensor, GradTensorError> {
        let (value, row, col) = {
            let data = self.node.data.borrow();
            let (rows, _) = data.shape();
            if idx >= data.len() {
                return Err(GradTensorError::IndexOutOfBounds {
                    index: idx,
                    len: data.len(),
                });
            }
            let row = idx % rows;
            let col = idx / rows;
            (data.at(row, col), row, col)
        };
        let lhs = self.clone();
        let backward = Box::new(move |grad: &Matrix| {
            if lhs.requires_grad() {
                let (rows, cols) = lhs.node.data.borrow().shape();
                let mut g = Matrix::zeros(rows, cols);
                *g.at_mut(row, col) = grad.as_slice()[0];
                lhs.accumulate_grad(&g);
            }
        });
        Ok(GradTensor::from_op(Matrix::scalar(value), &[self], backward))
    }

    /// Glues n (1, 1) scalars into an (n, 1) column vector.
    pub fn stack(parts: &[GradTensor]) -> Result<GradTensor, GradTensorError> {
        if parts.is_empty() {
            return Err(GradTensorError::EmptyTensor);
        }
        let mut values = Vec::with_capacity(parts.len());
        for part in parts {
            values.push(part.value()?);
        }
        let captured: Vec<GradTensor> = parts.to_vec();
        let backward = Box::new(move |grad: &Matrix| {
            for (i, part) in captured.iter().enumerate() {
                if part.requires_grad() {
                    part.accumulate_grad(&Matrix::scalar(grad.as_slice()[i]));
                }
            }
        });
        let operands: Vec<&GradTensor> = parts.iter().collect();
        Ok(GradTensor::from_op(
            Matrix::from_vec(values),
            &operands,
            backward,
        ))
    }

    /// Concatenates along rows (axis 0) or columns (axis 1).
    pub fn concat(parts: &[GradTensor], axis: usize) -> Result<GradTensor, GradTensorError> {
        if axis > 1 {
            return Err(GradTensorError::AxisOutOfBounds { axis });
        }
        if parts.is_empty() {
            return Err(GradTensorError::EmptyTensor);
        }
        let first_shape = parts[0].shape();
        let mut rows = first_shape.0;
        let mut cols = first_shape.1;
        for part in &parts[1..] {
            let shape = part.shape();
            if axis == 0 {
                if shape.1 != cols {
                    return Err(GradTensorError::ShapeMismatch {
                        left: first_shape,
                        right: shape,
                    });
                }
                rows += shape.0;
            } else {
                if shape.0 != rows {
                    return Err(GradTensorError::ShapeMismatch {
                        left: first_shape,
                        right: shape,
                    });
                }
                cols += shape.1;
            }
        }
        let mut out = Matrix::zeros(rows, cols);
        let mut offset = 0usize;
        for part in parts {
            let data = part.node.data.borrow();
            let (pr, pc) = data.shape();
            for r in 0..pr {
                for c in 0..pc {
                    if axis == 0 {
                        *out.at_mut(offset + r, c) = data.at(r, c);
                    } else {
                        *out.at_mut(r, offset + c) = data.at(r, c);
                    }
                }
            }
            offset += if axis == 0 { pr } else { pc };
        }
        let captured: Vec<GradTensor> = parts.to_vec();
        let backward = Box::new(move |grad: &Matrix| {
            let mut offset = 0usize;
            for part in &captured {
                let (pr, pc) = part.shape();
                if part.requires_grad() {
                    let mut g = Matrix::zeros(pr, pc);
                    for r in 0..pr {
                        for c in 0..pc {
                            *g.at_mut(r, c) = if axis == 0 {
                                grad.at(offset + r, c)
                            } else {
                                grad.at(r, offset + c)
                            };
                        }
                    }
                    part.accumulate_grad(&g);
                }
                offset += if axis == 0 { pr } else { pc };
            }
        });
        let operands: Vec<&GradTensor> = parts.iter().collect();
        Ok(GradTensor::from_op(out, &operands, backward))
    }

    /// Reinterprets the elements under a new shape.
    /// The element count must be preserved.
    pub fn reshape(&self, rows: usize, cols: usize) -> Result<GradTensor, GradTensorError> {
        let out = self.node.data.borrow().reshape(rows, cols)?;
        let lhs = self.clone();
        let backward = Box::new(move |grad: &Matrix| {
            if lhs.requires_grad() {
                let (orig_rows, orig_cols) = lhs.node.data.borrow().shape();
                let g = grad
                    .reshape(orig_rows, orig_cols)
                    .expect("reshape backward: element count is preserved");
                lhs.accumulate_grad(&g);
            }
        });
        Ok(GradTensor::from_op(out, &[self], backward))
    }
}
