/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use std::collections::HashSet;

use crate::types::grad_tensor::GradTensor;
use crate::types::matrix::Matrix;

impl GradTensor {
    /// Reverse-mode gradient propagation from this (typically scalar) root.
    ///
    /// Seeds the root gradient with ones of its shape, orders the reachable
    /// subgraph topologically and invokes every node's backward closure
    /// exactly once, root first. Leaf gradients accumulate across repeated
    /// calls until explicitly zeroed.
    ///
    /// Calling this on a tensor without requires-grad is a no-op.
    pub fn backward(&self) {
        if !self.requires_grad() {
            return;
        }
        {
            let (rows, cols) = self.node.data.borrow().shape();
            *self.node.grad.borrow_mut() = Some(Matrix::ones(rows, cols));
        }
        let order = self.topological_order();
        for tensor in order.iter().rev() {
            if let Some(closure) = &tensor.node.backward {
                let grad = tensor.node.grad.borrow().clone();
                if let Some(grad) = grad {
                    closure(&grad);
                }
            }
        }
    }

    /// Iterative post-order DFS over gradient-requiring children.
    ///
    /// Long trajectories produce graphs far deeper than the call stack
    /// tolerates, so an explicit stack with a two-pass visited/expanded
    /// marker replaces recursion. The returned order lists children before
    /// parents; the backward pass walks it in reverse.
    fn topological_order(&self) -> Vec<GradTensor> {
        let mut order: Vec<GradTensor> = Vec::new();
        let mut visited: HashSet<usize> = HashSet::new();
        let mut stack: Vec<(GradTensor, bool)> = vec![(self.clone(), false)];
        while let Some((tensor, expanded)) = stack.pop() {
            if expanded {
                order.push(tensor);
                continue;
            }
            if !visited.insert(tensor.node_id()) {
                continue;
            }
            stack.push((tensor.clone(), true));
            for child in &tensor.node.children {
                if child.requires_grad() && !visited.contains(&child.node_id()) {
                    stack.push((child.clone(), false));
                }
            }
        }
        order
    }
}
