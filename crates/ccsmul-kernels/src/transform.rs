use crate::util::{i64_to_usize, usize_to_i64};
use ccsmul_core::Ccs;

/// Transpose CCS -> CCS (two-pass histogram).
///
/// Entries are bucketed by their row index, which becomes the new column.
/// The source is walked in storage order, so original columns arrive in
/// ascending order and every output column comes out sorted.
///
/// # Panics
/// Panics if a stored row index lies outside `0..nrows`.
#[must_use]
pub fn transpose_ccs_f64_i64(a: &Ccs<f64, i64>) -> Ccs<f64, i64> {
    let ncols_t = a.nrows(); // cols of transposed
    let nrows_t = a.ncols(); // rows of transposed
    let nnz = a.nnz();

    // 1) Count entries per target column (original row)
    let mut counts = vec![0usize; ncols_t];
    for &i in a.row_indices() {
        counts[i64_to_usize(i)] += 1;
    }

    // 2) Prefix sums give the transposed cumulative counts and start offsets
    let mut cumulative = Vec::with_capacity(ncols_t);
    let mut next = Vec::with_capacity(ncols_t);
    let mut running = 0usize;
    for &c in &counts {
        next.push(running);
        running += c;
        cumulative.push(usize_to_i64(running));
    }

    // 3) Scatter, recovering each entry's current column from the walk
    let mut row_indices = vec![0i64; nnz];
    let mut values = vec![0.0f64; nnz];
    for (i, j, v) in a.entries() {
        let dst = next[i];
        next[i] = dst + 1;
        row_indices[dst] = usize_to_i64(j);
        values[dst] = v;
    }

    tracing::trace!(nrows = a.nrows(), ncols = a.ncols(), nnz, "transpose");
    Ccs::from_parts_unchecked(nrows_t, ncols_t, cumulative, row_indices, values)
}
