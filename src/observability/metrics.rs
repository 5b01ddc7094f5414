//! Conversion counters
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for edge construction outcomes
///
/// Relaxed ordering: counters are read for reporting, never for control flow.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Edges successfully built
    edges_built: AtomicU64,
    /// Statements rejected with an error
    edges_rejected: AtomicU64,
    /// Variable expansions performed
    expansions: AtomicU64,
    /// Expansions over a variable bound to nothing
    empty_expansions: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Add built edges
    pub fn add_edges_built(&self, count: u64) {
        self.edges_built.fetch_add(count, Ordering::Relaxed);
    }

    /// Increment rejected statements
    pub fn increment_edges_rejected(&self) {
        self.edges_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment expansions
    pub fn increment_expansions(&self) {
        self.expansions.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment empty expansions
    pub fn increment_empty_expansions(&self) {
        self.empty_expansions.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current snapshot of all metrics as JSON
    pub fn to_json(&self) -> String {
        let s = self.snapshot();
        format!(
            r#"{{"edges_built":{},"edges_rejected":{},"expansions":{},"empty_expansions":{}}}"#,
            s.edges_built, s.edges_rejected, s.expansions, s.empty_expansions,
        )
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            edges_built: self.edges_built.load(Ordering::Relaxed),
            edges_rejected: self.edges_rejected.load(Ordering::Relaxed),
            expansions: self.expansions.load(Ordering::Relaxed),
            empty_expansions: self.empty_expansions.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub edges_built: u64,
    pub edges_rejected: u64,
    pub expansions: u64,
    pub empty_expansions: u64,
}
