//! Shape checks run before any buffer is touched

use ccsmul_core::CcsError;

/// Whether an `rows_a x cols_a` matrix can be multiplied by an
/// `rows_b x cols_b` matrix.
#[inline]
#[must_use]
pub const fn validate_dims(_rows_a: usize, cols_a: usize, rows_b: usize, _cols_b: usize) -> bool {
    cols_a == rows_b
}

/// [`validate_dims`] as a `Result`.
pub fn check_dims(
    rows_a: usize,
    cols_a: usize,
    rows_b: usize,
    cols_b: usize,
) -> Result<(), CcsError> {
    if validate_dims(rows_a, cols_a, rows_b, cols_b) {
        Ok(())
    } else {
        Err(CcsError::DimensionMismatch {
            rows_a,
            cols_a,
            rows_b,
            cols_b,
        })
    }
}

/// Check that a flat buffer holds exactly `rows * cols` elements.
pub fn check_buffer(rows: usize, cols: usize, len: usize) -> Result<(), CcsError> {
    let expected = rows
        .checked_mul(cols)
        .ok_or(CcsError::BufferLength { expected: usize::MAX, got: len })?;
    if expected == len {
        Ok(())
    } else {
        Err(CcsError::BufferLength { expected, got: len })
    }
}
