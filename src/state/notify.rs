//! Submission-count notification badge.
//!
//! The badge mirrors the dashboard bell: it shows the submission count
//! refreshed by the poll, and highlights growth since the admin last
//! acknowledged it.

/// Poll-refreshed submission counter with unread tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyBadge {
    total: usize,
    seen: usize,
}

impl NotifyBadge {
    /// A badge that has seen nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the collection size from the latest poll.
    ///
    /// A shrinking collection (deletions) lowers the seen watermark so
    /// the unread count never underflows or counts re-additions twice.
    pub fn update(&mut self, total: usize) {
        self.total = total;
        if total < self.seen {
            self.seen = total;
        }
    }

    /// Total submissions as of the latest poll.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Submissions that arrived since the last acknowledgement.
    pub fn unread(&self) -> usize {
        self.total.saturating_sub(self.seen)
    }

    /// Mark everything currently known as seen.
    pub fn acknowledge(&mut self) {
        self.seen = self.total;
    }
}

// ===== Tests =====
