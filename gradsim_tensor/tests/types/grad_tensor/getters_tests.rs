/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use gradsim_tensor::prelude::*;

#[test]
fn test_shape_getters() {
    let t = GradTensor::zeros(4, 3);
    assert_eq!(t.rows(), 4);
    assert_eq!(t.cols(), 3);
    assert_eq!(t.len(), 12);
    assert!(!t.is_empty());
    assert!(!t.is_scalar());
}

#[test]
fn test_get_set() {
    let t = GradTensor::zeros(2, 2);
    t.set(0, 1, 3.5).unwrap();
    assert_eq!(t.get(0, 1).unwrap(), 3.5);
    assert!(t.get(2, 0).is_err());
    assert!(t.set(0, 2, 1.0).is_err());
}

#[test]
fn test_value_on_non_scalar_fails() {
    let t = GradTensor::zeros(2, 1);
    assert_eq!(
        t.value().unwrap_err(),
        GradTensorError::NonScalar { rows: 2, cols: 1 }
    );
}

#[test]
fn test_requires_grad_toggle() {
    let t = GradTensor::zeros(1, 1);
    assert!(!t.requires_grad());
    t.set_requires_grad(true);
    assert!(t.requires_grad());
    t.set_requires_grad(false);
    assert!(!t.requires_grad());
}

#[test]
fn test_requires_grad_propagates_to_result() {
    let a = GradTensor::scalar(1.0);
    let b = GradTensor::scalar(2.0);
    let plain = a.add(&b).unwrap();
    assert!(!plain.requires_grad());
    assert!(plain.is_leaf());

    a.set_requires_grad(true);
    let tracked = a.add(&b).unwrap();
    assert!(tracked.requires_grad());
    assert!(!tracked.is_leaf());
}

#[test]
fn test_assign_shape_checked() {
    let t = GradTensor::zeros(2, 1);
    assert!(t.assign(Matrix::from_vec(vec![1.0, 2.0])).is_ok());
    assert_eq!(t.to_vec(), vec![1.0, 2.0]);
    assert!(t.assign(Matrix::zeros(1, 2)).is_err());
}

#[test]
fn test_display() {
    let t = GradTensor::from_vec(vec![1.0, 2.0]);
    assert_eq!(format!("{t}"), "GradTensor(2, 1) [1.0, 2.0]");
}
