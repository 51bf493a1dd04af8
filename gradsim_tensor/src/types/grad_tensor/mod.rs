/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::errors::GradTensorError;
use crate::types::matrix::Matrix;

mod backward;
mod op_activation;
mod op_arith;
mod op_distribution;
mod op_matmul;
mod op_reduce;
mod op_shape;
mod op_unary;

/// Backward closure of an interior node. Receives the node's gradient and
/// accumulates contributions into the gradients of the captured operands.
pub(crate) type BackwardFn = Box<dyn Fn(&Matrix)>;

/// One node of the computation graph.
///
/// Children point strictly upstream (toward the leaves), so the graph is a
/// DAG by construction and reference counting can never cycle.
pub(crate) struct TensorNode {
    pub(crate) data: RefCell<Matrix>,
    pub(crate) grad: RefCell<Option<Matrix>>,
    pub(crate) requires_grad: Cell<bool>,
    pub(crate) children: Vec<GradTensor>,
    pub(crate) backward: Option<BackwardFn>,
}

/// Dense (rows, cols) f64 tensor participating in a reverse-mode
/// differentiation graph.
///
/// A `GradTensor` is a cheap shared handle: cloning it clones the handle,
/// not the storage. Every operation produces a new tensor; if any operand
/// requires a gradient, the result records those operands as children and
/// stores a backward closure, and [`GradTensor::backward`] later replays
/// the graph in reverse topological order.
///
/// # Example
///
/// ```
/// use gradsim_tensor::prelude::*;
///
/// let a = GradTensor::from_vec(vec![1.0, 2.0, 3.0]);
/// a.set_requires_grad(true);
/// let loss = a.mul(&a).unwrap().sum();
/// loss.backward();
///
/// // d(sum(a * a))/da = 2a
/// let grad = a.grad().unwrap();
/// assert_eq!(grad.as_slice(), &[2.0, 4.0, 6.0]);
/// ```
pub struct GradTensor {
    pub(crate) node: Rc<TensorNode>,
}

impl Clone for GradTensor {
    fn clone(&self) -> Self {
        Self {
            node: Rc::clone(&self.node),
        }
    }
}

impl GradTensor {
    fn from_node(node: TensorNode) -> Self {
        Self {
            node: Rc::new(node),
        }
    }

    fn leaf(data: Matrix) -> Self {
        Self::from_node(TensorNode {
            data: RefCell::new(data),
            grad: RefCell::new(None),
            requires_grad: Cell::new(false),
            children: Vec::new(),
            backward: None,
        })
    }

    /// Builds a tensor from flat row-major data and a shape.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self, GradTensorError> {
        Ok(Self::leaf(Matrix::new(data, rows, cols)?))
    }

    /// Zero-filled tensor of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::leaf(Matrix::zeros(rows, cols))
    }

    /// Constant-filled tensor of the given shape.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self::leaf(Matrix::filled(rows, cols, value))
    }

    /// (n, 1) column vector from a value list.
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self::leaf(Matrix::from_vec(values))
    }

    /// (1, 1) scalar.
    pub fn scalar(value: f64) -> Self {
        Self::leaf(Matrix::scalar(value))
    }

    /// Leaf tensor adopting an existing matrix.
    pub fn from_matrix(data: Matrix) -> Self {
        Self::leaf(data)
    }

    /// Interior node constructor shared by all operations.
    ///
    /// Records the gradient-requiring operands as children and keeps the
    /// backward closure only when at least one operand requires a gradient;
    /// otherwise the result degenerates to a plain leaf.
    pub(crate) fn from_op(data: Matrix, operands: &[&GradTensor], backward: BackwardFn) -> Self {
        let requires = operands.iter().any(|t| t.requires_grad());
        if !requires {
            return Self::leaf(data);
        }
        let children = operands
            .iter()
            .filter(|t| t.requires_grad())
            .map(|t| (*t).clone())
            .collect();
        Self::from_node(TensorNode {
            data: RefCell::new(data),
            grad: RefCell::new(None),
            requires_grad: Cell::new(true),
            children,
            backward: Some(backward),
        })
    }

    #[inline(always)]
    pub fn rows(&self) -> usize {
        self.node.data.borrow().rows()
    }

    #[inline(always)]
    pub fn cols(&self) -> usize {
        self.node.data.borrow().cols()
    }

    #[inline(always)]
    pub fn shape(&self) -> (usize, usize) {
        self.node.data.borrow().shape()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.node.data.borrow().len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.node.data.borrow().is_empty()
    }

    #[inline(always)]
    pub fn is_scalar(&self) -> bool {
        self.node.data.borrow().is_scalar()
    }

    /// True when the tensor has no upstream operands.
    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        self.node.children.is_empty()
    }

    #[inline(always)]
    pub fn requires_grad(&self) -> bool {
        self.node.requires_grad.get()
    }

    pub fn set_requires_grad(&self, flag: bool) {
        self.node.requires_grad.set(flag);
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64, GradTensorError> {
        self.node.data.borrow().get(row, col)
    }

    pub fn set(&self, row: usize, col: usize, value: f64) -> Result<(), GradTensorError> {
        self.node.data.borrow_mut().set(row, col, value)
    }

    /// Scalar read-out of a (1, 1) tensor.
    pub fn value(&self) -> Result<f64, GradTensorError> {
        let data = self.node.data.borrow();
        if !data.is_scalar() {
            let (rows, cols) = data.shape();
            return Err(GradTensorError::NonScalar { rows, cols });
        }
        Ok(data.as_slice()[0])
    }

    /// Snapshot of the data matrix.
    pub fn to_matrix(&self) -> Matrix {
        self.node.data.borrow().clone()
    }

    /// Flat row-major copy of the data.
    pub fn to_vec(&self) -> Vec<f64> {
        self.node.data.borrow().as_slice().to_vec()
    }

    /// Replaces the data in place, keeping graph structure and gradient.
    /// Used by the optimizers for parameter updates.
    pub fn assign(&self, values: Matrix) -> Result<(), GradTensorError> {
        let mut data = self.node.data.borrow_mut();
        if data.shape() != values.shape() {
            return Err(GradTensorError::ShapeMismatch {
                left: data.shape(),
                right: values.shape(),
            });
        }
        *data = values;
        Ok(())
    }

    /// Snapshot of the gradient matrix, when allocated.
    pub fn grad(&self) -> Option<Matrix> {
        self.node.grad.borrow().clone()
    }

    /// Zeros the gradient matrix in place; the shape is preserved.
    pub fn zero_grad(&self) {
        let mut grad = self.node.grad.borrow_mut();
        if let Some(g) = grad.as_mut() {
            let (rows, cols) = g.shape();
            *g = Matrix::zeros(rows, cols);
        }
    }

    /// Adds `delta` into the gradient, allocating a zero matrix of the
    /// data's shape on first use.
    pub(crate) fn accumulate_grad(&self, delta: &Matrix) {
        let mut grad = self.node.grad.borrow_mut();
        match grad.as_mut() {
            Some(g) => g.add_assign(delta),
            None => {
                let (rows, cols) = self.node.data.borrow().shape();
                let mut g = Matrix::zeros(rows, cols);
                g.add_assign(delta);
                *grad = Some(g);
            }
        }
    }

    /// Stable identity of the underlying node, used by the backward pass
    /// to de-duplicate visits.
    #[inline(always)]
    pub(crate) fn node_id(&self) -> usize {
        Rc::as_ptr(&self.node) as usize
    }
}

// Deep op chains would otherwise unwind recursively through the children
// vectors when the last handle drops.
impl Drop for GradTensor {
    fn drop(&mut self) {
        let mut stack: Vec<GradTensor> = Vec::new();
        if let Some(node) = Rc::get_mut(&mut self.node) {
            stack.append(&mut node.children);
        }
        while let Some(mut child) = stack.pop() {
            if let Some(node) = Rc::get_mut(&mut child.node) {
                stack.append(&mut node.children);
            }
        }
    }
}

impl fmt::Debug for GradTensor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let data = self.node.data.borrow();
        f.debug_struct("GradTensor")
            .field("shape", &data.shape())
            .field("data", &data.as_slice())
            .field("requires_grad", &self.requires_grad())
            .finish()
    }
}

impl fmt::Display for GradTensor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let data = self.node.data.borrow();
        write!(
            f,
            "GradTensor({}, {}) {:?}",
            data.rows(),
            data.cols(),
            data.as_slice()
        )
    }
}
