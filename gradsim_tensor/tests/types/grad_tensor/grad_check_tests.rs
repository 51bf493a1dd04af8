/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The GradSim Authors and Contributors. All Rights Reserved.
 */

use gradsim_tensor::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const STEP: f64 = 1e-5;
const REL_TOL: f64 = 1e-3;
const ABS_TOL: f64 = 1e-6;

fn random_matrix(rng: &mut SmallRng, rows: usize, cols: usize, lo: f64, hi: f64) -> Matrix {
    let data = (0..rows * cols)
        .map(|_| rng.random_range(lo..hi))
        .collect::<Vec<_>>();
    Matrix::new(data, rows, cols).unwrap()
}

/// Central-difference gradient of a scalar-valued function of one matrix.
fn numeric_grad(f: &dyn Fn(&Matrix) -> f64, x: &Matrix) -> Matrix {
    let mut grad = Matrix::zeros(x.rows(), x.cols());
    for r in 0..x.rows() {
        for c in 0..x.cols() {
            let base = x.get(r, c).unwrap();
            let mut plus = x.clone();
            plus.set(r, c, base + STEP).unwrap();
            let mut minus = x.clone();
            minus.set(r, c, base - STEP).unwrap();
            grad.set(r, c, (f(&plus) - f(&minus)) / (2.0 * STEP)).unwrap();
        }
    }
    grad
}

fn assert_grads_match(analytic: &Matrix, numeric: &Matrix) {
    for (a, n) in analytic.as_slice().iter().zip(numeric.as_slice().iter()) {
        let tol = ABS_TOL + REL_TOL * n.abs().max(a.abs());
        assert!(
            (a - n).abs() <= tol,
            "analytic {a} vs numeric {n} beyond tolerance {tol}"
        );
    }
}

#[test]
fn test_grad_check_hadamard_chain() {
    let mut rng = SmallRng::seed_from_u64(7);
    let x0 = random_matrix(&mut rng, 3, 2, -1.0, 1.0);
    let other = random_matrix(&mut rng, 3, 2, 0.5, 1.5);

    let forward = {
        let other = other.clone();
        move |m: &Matrix| {
            let a = GradTensor::from_matrix(m.clone());
            let b = GradTensor::from_matrix(other.clone());
            a.mul(&b).unwrap().sum().value().unwrap()
        }
    };

    let a = GradTensor::from_matrix(x0.clone());
    a.set_requires_grad(true);
    let b = GradTensor::from_matrix(other.clone());
    a.mul(&b).unwrap().sum().backward();

    assert_grads_match(&a.grad().unwrap(), &numeric_grad(&forward, &x0));
}

#[test]
fn test_grad_check_exp_log_mix() {
    let mut rng = SmallRng::seed_from_u64(11);
    let x0 = random_matrix(&mut rng, 4, 1, 0.5, 2.0);

    let forward = |m: &Matrix| {
        let a = GradTensor::from_matrix(m.clone());
        a.exp().add(&a.log()).unwrap().sum().value().unwrap()
    };

    let a = GradTensor::from_matrix(x0.clone());
    a.set_requires_grad(true);
    a.exp().add(&a.log()).unwrap().sum().backward();

    assert_grads_match(&a.grad().unwrap(), &numeric_grad(&forward, &x0));
}

#[test]
fn test_grad_check_matmul() {
    let mut rng = SmallRng::seed_from_u64(13);
    let x0 = random_matrix(&mut rng, 2, 3, -1.0, 1.0);
    let other = random_matrix(&mut rng, 3, 2, -1.0, 1.0);

    let forward = {
        let other = other.clone();
        move |m: &Matrix| {
            let a = GradTensor::from_matrix(m.clone());
            let b = GradTensor::from_matrix(other.clone());
            a.matmul(&b).unwrap().sum().value().unwrap()
        }
    };

    let a = GradTensor::from_matrix(x0.clone());
    a.set_requires_grad(true);
    let b = GradTensor::from_matrix(other.clone());
    a.matmul(&b).unwrap().sum().backward();

    assert_grads_match(&a.grad().unwrap(), &numeric_grad(&forward, &x0));
}

#[test]
fn test_grad_check_tanh_friction_shape() {
    // the friction kernel's tanh(2 v) dampened by a spring-like factor
    let mut rng = SmallRng::seed_from_u64(17);
    let x0 = random_matrix(&mut rng, 3, 1, -0.5, 0.5);

    let forward = |m: &Matrix| {
        let v = GradTensor::from_matrix(m.clone());
        v.mul_scalar(2.0)
            .tanh()
            .mul(&v)
            .unwrap()
            .sum()
            .value()
            .unwrap()
    };

    let v = GradTensor::from_matrix(x0.clone());
    v.set_requires_grad(true);
    v.mul_scalar(2.0).tanh().mul(&v).unwrap().sum().backward();

    assert_grads_match(&v.grad().unwrap(), &numeric_grad(&forward, &x0));
}

#[test]
fn test_grad_check_division() {
    let mut rng = SmallRng::seed_from_u64(19);
    let x0 = random_matrix(&mut rng, 2, 2, 1.0, 3.0);
    let denom = random_matrix(&mut rng, 2, 2, 1.0, 2.0);

    let forward = {
        let denom = denom.clone();
        move |m: &Matrix| {
            let a = GradTensor::from_matrix(m.clone());
            let b = GradTensor::from_matrix(denom.clone());
            a.div(&b).unwrap().sum().value().unwrap()
        }
    };

    let a = GradTensor::from_matrix(x0.clone());
    a.set_requires_grad(true);
    let b = GradTensor::from_matrix(denom.clone());
    a.div(&b).unwrap().sum().backward();

    assert_grads_match(&a.grad().unwrap(), &numeric_grad(&forward, &x0));
}

#[test]
fn test_grad_check_gaussian_log_prob_mean() {
    let mut rng = SmallRng::seed_from_u64(23);
    let mu0 = random_matrix(&mut rng, 3, 1, -1.0, 1.0);
    let action = random_matrix(&mut rng, 3, 1, -1.0, 1.0);
    let log_std = random_matrix(&mut rng, 3, 1, -0.5, 0.5);

    let forward = {
        let action = action.clone();
        let log_std = log_std.clone();
        move |m: &Matrix| {
            let a = GradTensor::from_matrix(action.clone());
            let mu = GradTensor::from_matrix(m.clone());
            let ls = GradTensor::from_matrix(log_std.clone());
            GradTensor::gaussian_log_prob(&a, &mu, &ls)
                .unwrap()
                .value()
                .unwrap()
        }
    };

    let a = GradTensor::from_matrix(action.clone());
    let mu = GradTensor::from_matrix(mu0.clone());
    let ls = GradTensor::from_matrix(log_std.clone());
    mu.set_requires_grad(true);
    GradTensor::gaussian_log_prob(&a, &mu, &ls).unwrap().backward();

    assert_grads_match(&mu.grad().unwrap(), &numeric_grad(&forward, &mu0));
}
