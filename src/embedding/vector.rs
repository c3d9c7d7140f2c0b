// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Small dense-vector kernels.

/// Scale `v` to unit length in place. A zero vector stays zero.
pub fn l2_normalize(v: &mut [f32]) {
    let norm = v
        .iter()
        .map(|x| f64::from(*x) * f64::from(*x))
        .sum::<f64>()
        .sqrt();
    if norm > 0.0 && norm.is_finite() {
        for x in v.iter_mut() {
            *x = (f64::from(*x) / norm) as f32;
        }
    } else {
        v.iter_mut().for_each(|x| *x = 0.0);
    }
}

/// Dot product accumulated in f64. Vectors of different length give 0.0.
pub fn dot(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    a.iter()
        .zip(b)
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum()
}

/// Cosine similarity of two unit vectors, clamped to `[0, 1]`.
///
/// Negative similarity (opposed vectors, or rounding just below zero) floors
/// to 0; rounding just above one caps at 1.
pub fn cosine_unit(a: &[f32], b: &[f32]) -> f64 {
    let value = dot(a, b);
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Element-wise `acc += v`.
pub fn add_assign(acc: &mut [f32], v: &[f32]) {
    for (a, x) in acc.iter_mut().zip(v) {
        *a += *x;
    }
}

/// Euclidean norm.
pub fn norm(v: &[f32]) -> f64 {
    dot(v, v).sqrt()
}
