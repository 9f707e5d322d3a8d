//! Dense-buffer entry points: validate, sparsify both operands, multiply,
//! densify the product.

use crate::config::MultiplyOptions;
use crate::convert::{ccs_to_dense_f64_i64, dense_to_ccs_f64_i64};
use crate::spmm::spspmm_ccs_with;
use crate::validate::{check_buffer, check_dims};
use ccsmul_core::CcsError;

/// Multiply two row-major dense matrices through the CCS kernels.
///
/// Shapes and buffer lengths are checked before anything is converted.
/// Returns the `rows_a x cols_b` product, row-major.
pub fn multiply_dense_f64(
    rows_a: usize,
    cols_a: usize,
    a: &[f64],
    rows_b: usize,
    cols_b: usize,
    b: &[f64],
    opts: &MultiplyOptions,
) -> Result<Vec<f64>, CcsError> {
    check_dims(rows_a, cols_a, rows_b, cols_b)?;
    multiply_validated(rows_a, cols_a, a, rows_b, cols_b, b, opts)
}

/// Everything after the shape check.
fn multiply_validated(
    rows_a: usize,
    cols_a: usize,
    a: &[f64],
    rows_b: usize,
    cols_b: usize,
    b: &[f64],
    opts: &MultiplyOptions,
) -> Result<Vec<f64>, CcsError> {
    check_buffer(rows_a, cols_a, a.len())?;
    check_buffer(rows_b, cols_b, b.len())?;
    let sa = dense_to_ccs_f64_i64(rows_a, cols_a, a);
    let sb = dense_to_ccs_f64_i64(rows_b, cols_b, b);
    let c = spspmm_ccs_with(&sa, &sb, opts)?;
    Ok(ccs_to_dense_f64_i64(&c))
}

/// Like [`multiply_dense_f64`], writing the product into `out`.
///
/// `out` must hold `rows_a * cols_b` elements; it is left untouched on error.
#[allow(clippy::too_many_arguments, reason = "Mirrors the two (rows, cols, buffer) operands")]
pub fn multiply_dense_into(
    rows_a: usize,
    cols_a: usize,
    a: &[f64],
    rows_b: usize,
    cols_b: usize,
    b: &[f64],
    out: &mut [f64],
    opts: &MultiplyOptions,
) -> Result<(), CcsError> {
    check_dims(rows_a, cols_a, rows_b, cols_b)?;
    check_buffer(rows_a, cols_b, out.len())?;
    let c = multiply_validated(rows_a, cols_a, a, rows_b, cols_b, b, opts)?;
    out.copy_from_slice(&c);
    Ok(())
}
