#![allow(
    clippy::many_single_char_names,
    reason = "Math kernels conventionally use i/j/k/p for indices"
)]
//! Sparse x sparse multiplication for CCS operands
//
// The product is built column by column. Output column `j` only reads the
// transposed left operand and column `j` of the right operand, and writes
// to a buffer owned by that column, so columns run independently and are
// merged in index order once all of them are done.

use crate::config::{Execution, MultiplyOptions};
use crate::transform::transpose_ccs_f64_i64;
use crate::util::{i64_to_usize, usize_to_i64};
use ccsmul_core::{Ccs, CcsError, THRESHOLD};
use core::cmp::Ordering as CmpOrdering;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
struct ColumnBuffer {
    rows: Vec<i64>,
    values: Vec<f64>,
}

/// Dot product of two sparse vectors given as index-sorted `(indices, values)`.
///
/// Matching indices are accumulated in ascending index order, which keeps the
/// result identical whichever thread computes it.
#[inline]
fn sorted_dot(a_idx: &[i64], a_val: &[f64], b_idx: &[i64], b_val: &[f64]) -> f64 {
    debug_assert!(a_idx.windows(2).all(|w| w[0] < w[1]));
    let mut sum = 0.0f64;
    let (mut p, mut q) = (0usize, 0usize);
    while p < a_idx.len() && q < b_idx.len() {
        match a_idx[p].cmp(&b_idx[q]) {
            CmpOrdering::Less => p += 1,
            CmpOrdering::Greater => q += 1,
            CmpOrdering::Equal => {
                sum += a_val[p] * b_val[q];
                p += 1;
                q += 1;
            }
        }
    }
    sum
}

/// Compute output column `j` from `at` (the transposed left operand) and `b`.
fn product_column(at: &Ccs<f64, i64>, b: &Ccs<f64, i64>, j: usize) -> ColumnBuffer {
    let (b_rows, b_vals) = b.column(j);
    let mut out = ColumnBuffer::default();
    if b_rows.is_empty() {
        return out;
    }
    // The merge in `sorted_dot` needs strictly increasing in-range rows.
    assert!(
        b_rows.windows(2).all(|w| w[0] < w[1]),
        "row indices of B column {j} are not strictly increasing"
    );
    assert!(
        b_rows[0] >= 0 && i64_to_usize(b_rows[b_rows.len() - 1]) < b.nrows(),
        "row index of B column {j} out of bounds for {} rows",
        b.nrows()
    );
    // Columns of `at` are rows of the left operand, visited in ascending order.
    for i in 0..at.ncols() {
        let (a_cols, a_vals) = at.column(i);
        if a_cols.is_empty() {
            continue;
        }
        let sum = sorted_dot(a_cols, a_vals, b_rows, b_vals);
        if sum.abs() > THRESHOLD {
            out.rows.push(usize_to_i64(i));
            out.values.push(sum);
        }
    }
    out
}

/// Concatenate per-column buffers in column order and prefix-sum their sizes.
fn assemble(nrows: usize, ncols: usize, columns: Vec<ColumnBuffer>) -> Ccs<f64, i64> {
    debug_assert_eq!(columns.len(), ncols);
    let nnz: usize = columns.iter().map(|c| c.values.len()).sum();
    let mut values = Vec::with_capacity(nnz);
    let mut row_indices = Vec::with_capacity(nnz);
    let mut counts = Vec::with_capacity(ncols);
    for col in columns {
        row_indices.extend(col.rows);
        values.extend(col.values);
        counts.push(usize_to_i64(values.len()));
    }
    Ccs::from_parts_unchecked(nrows, ncols, counts, row_indices, values)
}

fn assert_compatible(a: &Ccs<f64, i64>, b: &Ccs<f64, i64>) {
    assert_eq!(
        a.ncols(),
        b.nrows(),
        "A must have as many columns as B has rows"
    );
}

/// C = A @ B on the global rayon pool.
///
/// The result is `A.nrows x B.ncols`; sums with `|s| <= THRESHOLD` are not
/// stored. `C.nnz()` reports how many entries survived.
///
/// # Panics
/// Panics if `A.ncols != B.nrows`, or if either operand has row indices
/// outside its row count or a column of `B` with unsorted rows.
#[must_use]
pub fn spspmm_ccs_f64_i64(a: &Ccs<f64, i64>, b: &Ccs<f64, i64>) -> Ccs<f64, i64> {
    assert_compatible(a, b);
    let at = transpose_ccs_f64_i64(a);
    let columns: Vec<ColumnBuffer> = (0..b.ncols())
        .into_par_iter()
        .map(|j| product_column(&at, b, j))
        .collect();
    let c = assemble(a.nrows(), b.ncols(), columns);
    tracing::debug!(
        a_shape = ?a.shape(),
        b_shape = ?b.shape(),
        nnz = c.nnz(),
        "spspmm (parallel)"
    );
    c
}

/// C = A @ B computed entirely on the calling thread.
///
/// Produces exactly the same matrix as [`spspmm_ccs_f64_i64`].
///
/// # Panics
/// Panics if `A.ncols != B.nrows`, or if either operand has row indices
/// outside its row count or a column of `B` with unsorted rows.
#[must_use]
pub fn spspmm_ccs_serial_f64_i64(a: &Ccs<f64, i64>, b: &Ccs<f64, i64>) -> Ccs<f64, i64> {
    assert_compatible(a, b);
    let at = transpose_ccs_f64_i64(a);
    let columns: Vec<ColumnBuffer> = (0..b.ncols())
        .map(|j| product_column(&at, b, j))
        .collect();
    let c = assemble(a.nrows(), b.ncols(), columns);
    tracing::debug!(
        a_shape = ?a.shape(),
        b_shape = ?b.shape(),
        nnz = c.nnz(),
        "spspmm (serial)"
    );
    c
}

/// C = A @ B with explicit execution settings.
///
/// Unlike the plain kernels this reports incompatible shapes as
/// [`CcsError::DimensionMismatch`]. When a cancellation flag is set and
/// observed before a column starts, no result is produced and
/// [`CcsError::Cancelled`] is returned.
///
/// Setting `num_threads` builds a new rayon pool on every call; callers
/// multiplying in a loop should size the global pool with
/// [`crate::init_parallel`] and leave `num_threads` unset.
///
/// # Panics
/// Panics if a column of `b` has unsorted or out-of-range row indices.
pub fn spspmm_ccs_with(
    a: &Ccs<f64, i64>,
    b: &Ccs<f64, i64>,
    opts: &MultiplyOptions,
) -> Result<Ccs<f64, i64>, CcsError> {
    if a.ncols() != b.nrows() {
        return Err(CcsError::DimensionMismatch {
            rows_a: a.nrows(),
            cols_a: a.ncols(),
            rows_b: b.nrows(),
            cols_b: b.ncols(),
        });
    }
    let at = transpose_ccs_f64_i64(a);
    let done = AtomicUsize::new(0);
    let column = |j: usize| -> Option<ColumnBuffer> {
        if opts.is_cancelled() {
            return None;
        }
        let c = product_column(&at, b, j);
        done.fetch_add(1, Ordering::Relaxed);
        Some(c)
    };

    let slots: Vec<Option<ColumnBuffer>> = match (opts.execution, opts.num_threads) {
        (Execution::Serial, _) => (0..b.ncols()).map(column).collect(),
        (Execution::Parallel, None) => (0..b.ncols()).into_par_iter().map(column).collect(),
        (Execution::Parallel, Some(n)) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| CcsError::ThreadPool(e.to_string()))?;
            pool.install(|| (0..b.ncols()).into_par_iter().map(column).collect())
        }
    };

    let Some(columns) = slots.into_iter().collect::<Option<Vec<_>>>() else {
        let completed_columns = done.load(Ordering::Relaxed);
        tracing::warn!(completed_columns, total = b.ncols(), "spspmm cancelled");
        return Err(CcsError::Cancelled { completed_columns });
    };
    let c = assemble(a.nrows(), b.ncols(), columns);
    tracing::debug!(
        a_shape = ?a.shape(),
        b_shape = ?b.shape(),
        execution = ?opts.execution,
        threads = ?opts.num_threads,
        nnz = c.nnz(),
        "spspmm"
    );
    Ok(c)
}
