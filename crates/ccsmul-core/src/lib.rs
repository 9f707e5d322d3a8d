//! Core data structures for ccsmul (pure Rust)

pub mod ccs;
pub mod error;
pub mod index;

pub use ccs::{Ccs, Entries};
pub use error::CcsError;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Magnitude at or below which a value is treated as zero, both when
/// sparsifying dense input and when pruning multiplication results.
pub const THRESHOLD: f64 = 1e-6;
