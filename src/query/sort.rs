//! Sort stage: deterministic, stable reordering of the filtered set.

use crate::model::Submission;
use chrono::{DateTime, Utc};

/// The available orderings for the submissions table.
///
/// Name orderings compare code points, not locale collation. Domain
/// ordering compares the text after the first `@`; an address with no `@`
/// has the empty domain and sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most recent first (unparseable timestamps last).
    #[default]
    Newest,
    /// Oldest first (unparseable timestamps first).
    Oldest,
    /// Name ascending.
    NameAsc,
    /// Name descending.
    NameDesc,
    /// Email domain ascending.
    DomainAsc,
}

impl SortKey {
    /// Short label for the status bar.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::NameAsc => "name \u{2191}",
            SortKey::NameDesc => "name \u{2193}",
            SortKey::DomainAsc => "domain",
        }
    }

    /// The next key in the cycle used by the sort hotkey.
    pub fn next(self) -> Self {
        match self {
            SortKey::Newest => SortKey::Oldest,
            SortKey::Oldest => SortKey::NameAsc,
            SortKey::NameAsc => SortKey::NameDesc,
            SortKey::NameDesc => SortKey::DomainAsc,
            SortKey::DomainAsc => SortKey::Newest,
        }
    }
}

/// Produce a new, stably sorted sequence; the input is untouched.
///
/// `Vec::sort_by` is stable, so records with equal keys keep their
/// relative input order, required for reproducible pages.
pub fn sort(records: &[Submission], key: SortKey) -> Vec<Submission> {
    let mut list = records.to_vec();
    match key {
        SortKey::Newest => list.sort_by(|a, b| sort_instant(b).cmp(&sort_instant(a))),
        SortKey::Oldest => list.sort_by(|a, b| sort_instant(a).cmp(&sort_instant(b))),
        SortKey::NameAsc => list.sort_by(|a, b| a.name().cmp(b.name())),
        SortKey::NameDesc => list.sort_by(|a, b| b.name().cmp(a.name())),
        SortKey::DomainAsc => list.sort_by(|a, b| a.email_domain().cmp(b.email_domain())),
    }
    list
}

/// Sortable instant: unparseable timestamps pin to the oldest possible
/// value, one consistent rule for both directions.
fn sort_instant(s: &Submission) -> DateTime<Utc> {
    s.timestamp().parsed().unwrap_or(DateTime::<Utc>::MIN_UTC)
}

// ===== Tests =====
