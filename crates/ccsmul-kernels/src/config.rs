//! Execution settings for the multiplication engine
//
// Without an explicit thread count the global rayon pool is used, which
// sizes itself from `RAYON_NUM_THREADS` or the available hardware threads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Environment variable selecting `serial` or `parallel` execution.
pub const ENV_EXECUTION: &str = "CCSMUL_EXECUTION";
/// Environment variable giving the worker count for a dedicated pool.
pub const ENV_NUM_THREADS: &str = "CCSMUL_NUM_THREADS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    /// All columns computed on the calling thread.
    Serial,
    /// Columns distributed over a rayon pool.
    #[default]
    Parallel,
}

impl Execution {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "serial" | "seq" => Some(Self::Serial),
            "parallel" | "par" => Some(Self::Parallel),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MultiplyOptions {
    pub execution: Execution,
    /// Size of a dedicated worker pool; `None` uses the global pool.
    pub num_threads: Option<usize>,
    /// Checked once per output column; when set the product is abandoned.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl MultiplyOptions {
    #[must_use]
    pub fn serial() -> Self {
        Self {
            execution: Execution::Serial,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn parallel() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_num_threads(mut self, n: usize) -> Self {
        self.num_threads = Some(n.max(1));
        self
    }

    #[must_use]
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Read `CCSMUL_EXECUTION` and `CCSMUL_NUM_THREADS`; unset or unparsable
    /// values keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut opts = Self::default();
        if let Some(v) = lookup(ENV_EXECUTION) {
            match Execution::parse(&v) {
                Some(e) => opts.execution = e,
                None => tracing::warn!(value = %v, "ignoring unknown {ENV_EXECUTION}"),
            }
        }
        if let Some(v) = lookup(ENV_NUM_THREADS) {
            match v.trim().parse::<usize>() {
                Ok(n) if n > 0 => opts.num_threads = Some(n),
                _ => tracing::warn!(value = %v, "ignoring invalid {ENV_NUM_THREADS}"),
            }
        }
        opts
    }

    #[inline]
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
