#![allow(
    clippy::many_single_char_names,
    reason = "Math kernels conventionally use i/j/k/p for indices"
)]
use crate::util::{count_above, usize_to_i64, SMALL_DENSE_LIMIT};
use ccsmul_core::{Ccs, THRESHOLD};
use rayon::prelude::*;

/// Convert a row-major dense buffer to CCS, dropping entries with `|v| <= THRESHOLD`.
///
/// Columns are visited in order and rows ascend within each column, so the
/// result always has sorted row indices. A zero-sized shape yields a matrix
/// with no stored entries.
///
/// # Panics
/// Panics if `dense.len() != nrows * ncols`.
#[must_use]
pub fn dense_to_ccs_f64_i64(nrows: usize, ncols: usize, dense: &[f64]) -> Ccs<f64, i64> {
    assert_eq!(dense.len(), nrows * ncols, "dense must be nrows x ncols row-major");
    if nrows == 0 || ncols == 0 {
        return Ccs::zeros(nrows, ncols);
    }
    let out = if dense.len() < SMALL_DENSE_LIMIT {
        dense_to_ccs_serial(nrows, ncols, dense)
    } else {
        dense_to_ccs_parallel(nrows, ncols, dense)
    };
    tracing::debug!(nrows, ncols, nnz = out.nnz(), "dense -> ccs");
    out
}

fn dense_to_ccs_serial(nrows: usize, ncols: usize, dense: &[f64]) -> Ccs<f64, i64> {
    let nnz = count_above(dense, THRESHOLD);
    let mut values = Vec::with_capacity(nnz);
    let mut row_indices = Vec::with_capacity(nnz);
    let mut counts = Vec::with_capacity(ncols);
    for j in 0..ncols {
        for i in 0..nrows {
            let v = dense[i * ncols + j];
            if v.abs() > THRESHOLD {
                values.push(v);
                row_indices.push(usize_to_i64(i));
            }
        }
        counts.push(usize_to_i64(values.len()));
    }
    Ccs::from_parts_unchecked(nrows, ncols, counts, row_indices, values)
}

fn dense_to_ccs_parallel(nrows: usize, ncols: usize, dense: &[f64]) -> Ccs<f64, i64> {
    // Each column is gathered independently; concatenation keeps column order.
    let columns: Vec<(Vec<i64>, Vec<f64>)> = (0..ncols)
        .into_par_iter()
        .map(|j| {
            let mut rows = Vec::new();
            let mut vals = Vec::new();
            for i in 0..nrows {
                let v = dense[i * ncols + j];
                if v.abs() > THRESHOLD {
                    rows.push(usize_to_i64(i));
                    vals.push(v);
                }
            }
            (rows, vals)
        })
        .collect();
    let nnz: usize = columns.iter().map(|(r, _)| r.len()).sum();
    let mut values = Vec::with_capacity(nnz);
    let mut row_indices = Vec::with_capacity(nnz);
    let mut counts = Vec::with_capacity(ncols);
    for (rows, vals) in columns {
        row_indices.extend(rows);
        values.extend(vals);
        counts.push(usize_to_i64(values.len()));
    }
    Ccs::from_parts_unchecked(nrows, ncols, counts, row_indices, values)
}

/// Expand a CCS matrix into a zero-filled row-major dense buffer.
///
/// # Panics
/// Panics if a stored row index lies outside `0..nrows`; such a matrix
/// breaks the CCS invariants and cannot be densified meaningfully.
#[must_use]
pub fn ccs_to_dense_f64_i64(a: &Ccs<f64, i64>) -> Vec<f64> {
    let (nrows, ncols) = a.shape();
    let mut dense = vec![0.0f64; nrows * ncols];
    for (i, j, v) in a.entries() {
        assert!(i < nrows, "row index {i} out of bounds for {nrows} rows");
        dense[i * ncols + j] = v;
    }
    tracing::debug!(nrows, ncols, nnz = a.nnz(), "ccs -> dense");
    dense
}
