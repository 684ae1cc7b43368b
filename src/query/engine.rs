//! The query engine: an owned collection plus a [`QueryState`], recomputed
//! into a visible page on demand.
//!
//! The engine holds no hidden state: every derivation runs the pure
//! filter → sort → paginate → summary pipeline over the current
//! collection, so a view is always consistent with what the stages would
//! produce standalone. `set_records` is a full atomic swap; records are
//! never mutated in place while a view is being derived.

use crate::model::{RowId, Submission, SubmissionPatch};
use crate::query::{filter, page, sort, QueryState, SortKey};

/// Everything the table and status bar need for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryView {
    /// Records on the current page, filtered and sorted.
    pub items: Vec<Submission>,
    /// Records that survived filtering (across all pages).
    pub visible_count: usize,
    /// Page count; at least 1.
    pub total_pages: usize,
    /// The clamped current page.
    pub page: usize,
    /// 1-based index of the first visible record (0 when empty).
    pub range_start: usize,
    /// 1-based index of the last visible record (0 when empty).
    pub range_end: usize,
}

/// Owns the record collection and the query state for one view session.
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    records: Vec<Submission>,
    state: QueryState,
}

impl QueryEngine {
    /// Create an empty engine with the given state (page size, defaults).
    pub fn new(state: QueryState) -> Self {
        Self {
            records: Vec::new(),
            state,
        }
    }

    /// Replace the whole collection.
    ///
    /// No deduplication and no ordering requirement: ids are unique by
    /// construction upstream, and the pipeline re-sorts on every view.
    /// The page is intentionally left alone; the next view clamps it.
    pub fn set_records(&mut self, records: Vec<Submission>) {
        self.records = records;
    }

    /// The full, unfiltered collection.
    pub fn records(&self) -> &[Submission] {
        &self.records
    }

    /// Read access to the query state.
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Mutable access to the query state.
    ///
    /// The state's own transition methods enforce the page-reset rule, so
    /// handing out `&mut` cannot bypass it.
    pub fn state_mut(&mut self) -> &mut QueryState {
        &mut self.state
    }

    /// Derive the current page and summary counts.
    pub fn view(&self) -> QueryView {
        let sorted = self.sorted();
        let page = page::paginate(&sorted, self.state.page(), self.state.page_size());
        let summary = page::summary(sorted.len(), self.state.page(), self.state.page_size());
        QueryView {
            items: page.items,
            visible_count: summary.visible_count,
            total_pages: page.total_pages,
            page: page::clamp_page(self.state.page(), sorted.len(), self.state.page_size()),
            range_start: summary.range_start,
            range_end: summary.range_end,
        }
    }

    /// The filtered, sorted, unpaginated collection, as CSV export sees it.
    pub fn sorted(&self) -> Vec<Submission> {
        let filtered = filter::filter(&self.records, &self.state);
        sort::sort(&filtered, self.state.sort())
    }

    /// Page count for the current filter state.
    pub fn total_pages(&self) -> usize {
        let visible = filter::filter(&self.records, &self.state).len();
        page::total_pages(visible, self.state.page_size())
    }

    /// Move forward one page (clamped).
    pub fn next_page(&mut self) {
        let total = self.total_pages();
        let target = self.state.page().saturating_add(1);
        self.state.set_page(target, total);
    }

    /// Move back one page (clamped).
    pub fn prev_page(&mut self) {
        let total = self.total_pages();
        let target = self.state.page().saturating_sub(1).max(1);
        self.state.set_page(target, total);
    }

    /// Cycle to the next sort key (resets to page 1).
    pub fn cycle_sort(&mut self) {
        let next = self.state.sort().next();
        self.state.set_sort(next);
    }

    /// Apply a confirmed edit to the local collection, in place.
    ///
    /// Called only after the store has accepted the mutation; there is no
    /// rollback path because nothing is applied speculatively. Returns
    /// false when the id is not in the collection (a poll replaced it).
    pub fn apply_update(&mut self, id: RowId, patch: &SubmissionPatch) -> bool {
        let mut found = false;
        for record in &mut self.records {
            if record.id() == id {
                record.apply(patch);
                found = true;
            }
        }
        found
    }

    /// Remove a confirmed-deleted row from the local collection.
    ///
    /// Returns false when the id was not present.
    pub fn apply_remove(&mut self, id: RowId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        self.records.len() != before
    }

    /// Current sort key (convenience for the status bar).
    pub fn sort_key(&self) -> SortKey {
        self.state.sort()
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
