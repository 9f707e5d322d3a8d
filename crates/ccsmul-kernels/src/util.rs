//! Index conversions and size limits shared by the kernels

/// Below this many dense elements, sparsification stays on the calling thread.
pub const SMALL_DENSE_LIMIT: usize = 64 * 1024;
/// Below this many stored entries, pruning stays on the calling thread.
pub const SMALL_NNZ_LIMIT: usize = 16 * 1024;

pub use ccsmul_core::index::{i64_to_usize, usize_to_i64};

/// Count values with `|v| > eps`, four lanes at a time.
#[inline]
#[must_use]
pub fn count_above(values: &[f64], eps: f64) -> usize {
    use wide::f64x4;
    let mut cnt = 0usize;
    let mut k = 0usize;
    let limit4 = values.len() & !3;
    while k < limit4 {
        let v = f64x4::from([values[k], values[k + 1], values[k + 2], values[k + 3]]);
        let arr = v.abs().to_array();
        cnt += arr.iter().filter(|x| **x > eps).count();
        k += 4;
    }
    while k < values.len() {
        if values[k].abs() > eps {
            cnt += 1;
        }
        k += 1;
    }
    cnt
}
