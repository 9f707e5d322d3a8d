//! CCS kernels for ccsmul (pure Rust, parallel ready)

/// Size the global rayon pool once; later calls and a pool that already
/// exists are left alone. Without this call rayon honors `RAYON_NUM_THREADS`.
pub fn init_parallel(num_threads: Option<usize>) {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = num_threads {
        builder = builder.num_threads(n);
    }
    if let Err(e) = builder.build_global() {
        tracing::debug!(error = %e, "global rayon pool already initialised");
    }
}

pub mod cleanup;
pub mod config;
pub mod convert;
pub mod pipeline;
pub mod spmm;
pub mod transform;
pub mod util;
pub mod validate;

pub use cleanup::{eliminate_zeros_ccs_f64_i64, prune_eps_ccs_f64_i64};
pub use config::{Execution, MultiplyOptions};
pub use convert::{ccs_to_dense_f64_i64, dense_to_ccs_f64_i64};
pub use pipeline::{multiply_dense_f64, multiply_dense_into};
pub use spmm::{spspmm_ccs_f64_i64, spspmm_ccs_serial_f64_i64, spspmm_ccs_with};
pub use transform::transpose_ccs_f64_i64;
pub use validate::{check_buffer, check_dims, validate_dims};
