use crate::util::{count_above, usize_to_i64, SMALL_NNZ_LIMIT};
use ccsmul_core::Ccs;
use rayon::prelude::*;

/// Prune entries with `|v| <= eps` (returns new CCS).
///
/// A negative `eps` keeps everything.
#[must_use]
pub fn prune_eps_ccs_f64_i64(a: &Ccs<f64, i64>, eps: f64) -> Ccs<f64, i64> {
    if eps < 0.0 || a.is_empty() {
        return a.clone();
    }
    let ncols = a.ncols();
    let counts: Vec<usize> = if a.nnz() < SMALL_NNZ_LIMIT {
        (0..ncols).map(|j| count_above(a.column(j).1, eps)).collect()
    } else {
        (0..ncols)
            .into_par_iter()
            .map(|j| count_above(a.column(j).1, eps))
            .collect()
    };
    let nnz: usize = counts.iter().sum();
    if nnz == a.nnz() {
        return a.clone();
    }

    let mut cumulative = Vec::with_capacity(ncols);
    let mut running = 0usize;
    for c in &counts {
        running += c;
        cumulative.push(usize_to_i64(running));
    }
    let mut row_indices = Vec::with_capacity(nnz);
    let mut values = Vec::with_capacity(nnz);
    for j in 0..ncols {
        let (rows, vals) = a.column(j);
        for (&i, &v) in rows.iter().zip(vals) {
            if v.abs() > eps {
                row_indices.push(i);
                values.push(v);
            }
        }
    }
    tracing::debug!(eps, before = a.nnz(), after = nnz, "prune");
    Ccs::from_parts_unchecked(a.nrows(), ncols, cumulative, row_indices, values)
}

/// Drop stored exact zeros.
#[must_use]
pub fn eliminate_zeros_ccs_f64_i64(a: &Ccs<f64, i64>) -> Ccs<f64, i64> {
    prune_eps_ccs_f64_i64(a, 0.0)
}
