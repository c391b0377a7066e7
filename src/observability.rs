//! Logging setup and load counters

use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber writing to stderr
///
/// `RUST_LOG` wins over `default_filter` when set. Calling this twice is a
/// no-op.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Outcome counters for a loader
#[derive(Debug, Default)]
pub struct LoaderMetrics {
    files_loaded: AtomicU64,
    files_not_found: AtomicU64,
    unsupported_formats: AtomicU64,
    parse_failures: AtomicU64,
}

impl LoaderMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_loaded(&self) {
        self.files_loaded.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "files_loaded", "Metric incremented");
    }

    pub fn file_not_found(&self) {
        self.files_not_found.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "files_not_found", "Metric incremented");
    }

    pub fn unsupported_format(&self) {
        self.unsupported_formats.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "unsupported_formats", "Metric incremented");
    }

    pub fn parse_failed(&self) {
        self.parse_failures.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "parse_failures", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            files_loaded: self.files_loaded.load(Ordering::Relaxed),
            files_not_found: self.files_not_found.load(Ordering::Relaxed),
            unsupported_formats: self.unsupported_formats.load(Ordering::Relaxed),
            parse_failures: self.parse_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub files_loaded: u64,
    pub files_not_found: u64,
    pub unsupported_formats: u64,
    pub parse_failures: u64,
}
