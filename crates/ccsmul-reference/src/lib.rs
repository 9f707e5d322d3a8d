//! Dense reference multiplication and random inputs for testing ccsmul.
//!
//! Nothing here shares code with the sparse kernels; the triple loop is
//! the oracle their results are compared against.

use rand::Rng;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("incompatible dimensions: {rows_a}x{cols_a} times {rows_b}x{cols_b}")]
    IncompatibleDimensions {
        rows_a: usize,
        cols_a: usize,
        rows_b: usize,
        cols_b: usize,
    },
}

/// Naive row-major `A @ B`.
///
/// # Panics
/// Panics if a buffer is shorter than its stated shape.
pub fn matmul_dense_f64(
    a: &[f64],
    rows_a: usize,
    cols_a: usize,
    b: &[f64],
    rows_b: usize,
    cols_b: usize,
) -> Result<Vec<f64>, ReferenceError> {
    if cols_a != rows_b {
        return Err(ReferenceError::IncompatibleDimensions {
            rows_a,
            cols_a,
            rows_b,
            cols_b,
        });
    }
    let mut out = vec![0.0f64; rows_a * cols_b];
    for i in 0..rows_a {
        for j in 0..cols_b {
            let mut sum = 0.0;
            for k in 0..cols_a {
                sum += a[i * cols_a + k] * b[k * cols_b + j];
            }
            out[i * cols_b + j] = sum;
        }
    }
    Ok(out)
}

/// `len` integers drawn from `0..500`, with everything above 250 zeroed,
/// so roughly half the entries are zero.
pub fn random_dense_f64<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<f64> {
    (0..len)
        .map(|_| {
            let v = f64::from(rng.random_range(0u32..500));
            if v > 250.0 {
                0.0
            } else {
                v
            }
        })
        .collect()
}

/// Like [`random_dense_f64`] but keeps only about `density` of the entries,
/// with signed fractional values.
pub fn random_sparse_dense_f64<R: Rng + ?Sized>(len: usize, density: f64, rng: &mut R) -> Vec<f64> {
    (0..len)
        .map(|_| {
            if rng.random_bool(density.clamp(0.0, 1.0)) {
                rng.random_range(-10.0..10.0)
            } else {
                0.0
            }
        })
        .collect()
}
