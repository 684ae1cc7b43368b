//! The submission store boundary.
//!
//! The engine never talks to a backend directly; it consumes whatever a
//! [`SubmissionStore`] hands it. The production backend is a spreadsheet
//! reached over HTTP in the original deployment; here the same contract
//! is filled by a JSON file store, and tests substitute their own.

use crate::model::{RowId, StoreError, Submission, SubmissionPatch};
use std::time::{Duration, Instant};

pub mod json;

pub use json::JsonStore;

/// Record source and mutation sink for contact-form submissions.
///
/// `fetch_all` is polled on an interval and on startup; `update` and
/// `delete` are invoked from the edit and delete flows, and only on
/// success does the caller mirror the mutation into its local collection.
pub trait SubmissionStore {
    /// Fetch the full collection, ids assigned by the backend.
    fn fetch_all(&mut self) -> Result<Vec<Submission>, StoreError>;

    /// Replace the mutable fields of one row.
    fn update(&mut self, id: RowId, patch: &SubmissionPatch) -> Result<(), StoreError>;

    /// Delete one row.
    fn delete(&mut self, id: RowId) -> Result<(), StoreError>;
}

// ===== PollTimer =====

/// Fixed-interval due/mark clock for the background refresh.
///
/// The first check after construction is immediately due, so the view
/// populates on mount without waiting a full interval.
#[derive(Debug, Clone)]
pub struct PollTimer {
    interval: Duration,
    last: Option<Instant>,
}

impl PollTimer {
    /// A timer firing every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// True when a poll should fire at `now`.
    pub fn due(&self, now: Instant) -> bool {
        match self.last {
            None => true,
            Some(last) => now.duration_since(last) >= self.interval,
        }
    }

    /// Record that a poll fired at `now`.
    pub fn mark(&mut self, now: Instant) {
        self.last = Some(now);
    }

    /// The configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

// ===== Tests =====
