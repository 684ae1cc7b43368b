//! Application state and pure interaction transitions.
//!
//! [`AppState`] owns the query engine, the interaction mode, the row
//! selection, the status line, and the notification badge. Every
//! transition is a plain method with no terminal involvement, so the
//! whole interaction surface is testable headlessly; the view layer only
//! translates key events into these calls and renders the result.

use crate::model::{RowId, Submission, SubmissionPatch};
use crate::query::{DomainFilter, PhoneFilter, QueryEngine, QueryState, QueryView};
use crate::state::{EditForm, NotifyBadge};
use chrono::NaiveDate;

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;

/// Domain choices cycled by the domain-filter hotkey, matching the
/// dashboard's select options.
pub const DOMAIN_OPTIONS: [&str; 3] = ["gmail.com", "outlook.com", "yahoo.com"];

/// Which date bound a date-input session edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// Inclusive lower bound.
    From,
    /// Inclusive upper bound.
    Until,
}

/// Severity of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Informational (normal styling).
    Info,
    /// Failure surfaced to the admin (error styling).
    Error,
}

/// One status-line message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Message text.
    pub text: String,
    /// Severity.
    pub level: StatusLevel,
}

/// Interaction mode. Sum type: exactly one mode at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Normal table browsing.
    Browse,
    /// Typing into the search box; every keystroke re-filters live.
    SearchInput {
        /// Current search text.
        buffer: String,
        /// Byte offset into `buffer`, always on a char boundary.
        cursor: usize,
        /// Search text as of opening, restored on cancel.
        prior: String,
    },
    /// Typing a date bound (`YYYY-MM-DD`; empty clears the bound).
    DateInput {
        /// Which bound is being edited.
        bound: DateBound,
        /// Text typed so far.
        buffer: String,
    },
    /// Edit modal open for one row.
    Edit(EditForm),
    /// Delete confirmation pending for one row.
    ConfirmDelete(RowId),
}

/// The whole application state for one admin session.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The query engine owning the collection and query state.
    pub engine: QueryEngine,
    /// Current interaction mode.
    pub mode: Mode,
    /// Selected row index within the current page.
    pub selected: usize,
    /// Transient status line, if any.
    pub status: Option<StatusMessage>,
    /// Submission-count badge.
    pub badge: NotifyBadge,
}

impl AppState {
    /// Fresh state with an empty collection and the given page size.
    pub fn new(page_size: usize) -> Self {
        Self {
            engine: QueryEngine::new(QueryState::new(page_size)),
            mode: Mode::Browse,
            selected: 0,
            status: None,
            badge: NotifyBadge::new(),
        }
    }

    /// Derive the current page for rendering.
    pub fn view(&self) -> QueryView {
        self.engine.view()
    }

    /// The submission under the cursor, if the page has one.
    pub fn selected_submission(&self, view: &QueryView) -> Option<Submission> {
        view.items.get(self.selected.min(view.items.len().saturating_sub(1))).cloned()
    }

    /// Keep the selection inside the current page.
    pub fn clamp_selection(&mut self, page_len: usize) {
        if page_len == 0 {
            self.selected = 0;
        } else if self.selected >= page_len {
            self.selected = page_len - 1;
        }
    }

    // ===== Status line =====

    /// Show an informational status message.
    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level: StatusLevel::Info,
        });
    }

    /// Show an error status message.
    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level: StatusLevel::Error,
        });
    }

    /// Clear the status line.
    pub fn clear_status(&mut self) {
        self.status = None;
    }

    // ===== Data refresh =====

    /// Swap in a freshly fetched collection.
    ///
    /// Updates the badge and keeps the selection inside the new page.
    pub fn records_replaced(&mut self, records: Vec<Submission>) {
        self.badge.update(records.len());
        self.engine.set_records(records);
        let page_len = self.engine.view().items.len();
        self.clamp_selection(page_len);
    }

    /// A refresh attempt failed; the last good collection stays up.
    pub fn poll_failed(&mut self, detail: &str) {
        self.set_error(format!("Refresh failed ({detail}); showing last loaded data"));
    }

    /// Acknowledge the notification badge.
    pub fn acknowledge_badge(&mut self) {
        self.badge.acknowledge();
    }

    // ===== Selection and paging =====

    /// Move the selection up one row.
    pub fn selection_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move the selection down one row (clamped to the page).
    pub fn selection_down(&mut self, page_len: usize) {
        if page_len > 0 && self.selected + 1 < page_len {
            self.selected += 1;
        }
    }

    /// Next page; selection re-clamped against the new page.
    pub fn next_page(&mut self) {
        self.engine.next_page();
        let page_len = self.engine.view().items.len();
        self.clamp_selection(page_len);
    }

    /// Previous page; selection re-clamped against the new page.
    pub fn prev_page(&mut self) {
        self.engine.prev_page();
        let page_len = self.engine.view().items.len();
        self.clamp_selection(page_len);
    }

    // ===== Filter and sort hotkeys =====

    /// Cycle the sort key.
    pub fn cycle_sort(&mut self) {
        self.engine.cycle_sort();
        self.selected = 0;
    }

    /// Cycle the domain filter through [`DOMAIN_OPTIONS`] and back to all.
    pub fn cycle_domain(&mut self) {
        let next = match self.engine.state().domain() {
            DomainFilter::All => DomainFilter::Domain(DOMAIN_OPTIONS[0].to_string()),
            DomainFilter::Domain(current) => {
                match DOMAIN_OPTIONS.iter().position(|d| *d == current.as_str()) {
                    Some(i) if i + 1 < DOMAIN_OPTIONS.len() => {
                        DomainFilter::Domain(DOMAIN_OPTIONS[i + 1].to_string())
                    }
                    _ => DomainFilter::All,
                }
            }
        };
        self.engine.state_mut().set_domain(next);
        self.selected = 0;
    }

    /// Cycle the phone filter: all → with phone → no phone → all.
    pub fn cycle_phone(&mut self) {
        let next = match self.engine.state().phone() {
            PhoneFilter::All => PhoneFilter::WithPhone,
            PhoneFilter::WithPhone => PhoneFilter::NoPhone,
            PhoneFilter::NoPhone => PhoneFilter::All,
        };
        self.engine.state_mut().set_phone(next);
        self.selected = 0;
    }

    // ===== Search input =====

    /// Open the search box seeded with the current search text.
    pub fn open_search(&mut self) {
        let current = self.engine.state().search().to_string();
        self.mode = Mode::SearchInput {
            cursor: current.len(),
            prior: current.clone(),
            buffer: current,
        };
    }

    /// Type a character into the search box; the filter updates live.
    pub fn search_insert(&mut self, ch: char) {
        if let Mode::SearchInput { buffer, cursor, .. } = &mut self.mode {
            buffer.insert(*cursor, ch);
            *cursor += ch.len_utf8();
            let text = buffer.clone();
            self.engine.state_mut().set_search(text);
            self.selected = 0;
        }
    }

    /// Backspace in the search box; the filter updates live.
    pub fn search_backspace(&mut self) {
        if let Mode::SearchInput { buffer, cursor, .. } = &mut self.mode {
            let Some(prev) = buffer[..*cursor].chars().next_back() else {
                return;
            };
            let start = *cursor - prev.len_utf8();
            buffer.remove(start);
            *cursor = start;
            let text = buffer.clone();
            self.engine.state_mut().set_search(text);
            self.selected = 0;
        }
    }

    /// Move the search cursor one character left.
    pub fn search_cursor_left(&mut self) {
        if let Mode::SearchInput { buffer, cursor, .. } = &mut self.mode {
            if let Some(prev) = buffer[..*cursor].chars().next_back() {
                *cursor -= prev.len_utf8();
            }
        }
    }

    /// Move the search cursor one character right.
    pub fn search_cursor_right(&mut self) {
        if let Mode::SearchInput { buffer, cursor, .. } = &mut self.mode {
            if let Some(next) = buffer[*cursor..].chars().next() {
                *cursor += next.len_utf8();
            }
        }
    }

    /// Keep the typed search and return to browsing.
    pub fn commit_search(&mut self) {
        if matches!(self.mode, Mode::SearchInput { .. }) {
            self.mode = Mode::Browse;
        }
    }

    /// Discard the typed search, restoring the text as of opening.
    pub fn cancel_search(&mut self) {
        if let Mode::SearchInput { prior, .. } = &self.mode {
            let prior = prior.clone();
            self.engine.state_mut().set_search(prior);
            self.mode = Mode::Browse;
            self.selected = 0;
        }
    }

    // ===== Date-bound input =====

    /// Open date input for one bound, seeded with its current value.
    pub fn open_date_input(&mut self, bound: DateBound) {
        let current = match bound {
            DateBound::From => self.engine.state().from(),
            DateBound::Until => self.engine.state().until(),
        };
        self.mode = Mode::DateInput {
            bound,
            buffer: current.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
        };
    }

    /// Type a character into the date buffer.
    pub fn date_insert(&mut self, ch: char) {
        if let Mode::DateInput { buffer, .. } = &mut self.mode {
            buffer.push(ch);
        }
    }

    /// Delete the last character of the date buffer.
    pub fn date_backspace(&mut self) {
        if let Mode::DateInput { buffer, .. } = &mut self.mode {
            buffer.pop();
        }
    }

    /// Commit the typed date bound.
    ///
    /// Empty input clears the bound; `YYYY-MM-DD` sets it; anything else
    /// leaves the input open with an error status.
    pub fn commit_date(&mut self) {
        let Mode::DateInput { bound, buffer } = &self.mode else {
            return;
        };
        let bound = *bound;
        let text = buffer.trim().to_string();

        let value = if text.is_empty() {
            None
        } else {
            match NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    self.set_error(format!("Not a date: {text} (expected YYYY-MM-DD)"));
                    return;
                }
            }
        };

        match bound {
            DateBound::From => self.engine.state_mut().set_from(value),
            DateBound::Until => self.engine.state_mut().set_until(value),
        }
        self.mode = Mode::Browse;
        self.selected = 0;
    }

    /// Abandon date input without touching the bound.
    pub fn cancel_date(&mut self) {
        if matches!(self.mode, Mode::DateInput { .. }) {
            self.mode = Mode::Browse;
        }
    }

    // ===== Edit and delete flows =====

    /// Open the edit modal for the selected row, if any.
    pub fn begin_edit(&mut self) {
        let view = self.view();
        if let Some(submission) = self.selected_submission(&view) {
            self.mode = Mode::Edit(EditForm::for_submission(&submission));
        }
    }

    /// The store accepted an edit: mirror it locally and close the modal.
    pub fn edit_saved(&mut self, id: RowId, patch: &SubmissionPatch) {
        self.engine.apply_update(id, patch);
        self.mode = Mode::Browse;
        self.set_info(format!("Row {id} updated"));
    }

    /// The store rejected an edit: keep the modal open, show the error.
    pub fn edit_failed(&mut self, detail: &str) {
        self.set_error(format!("Update failed: {detail}"));
    }

    /// Ask for confirmation before deleting the selected row.
    pub fn begin_delete(&mut self) {
        let view = self.view();
        if let Some(submission) = self.selected_submission(&view) {
            self.mode = Mode::ConfirmDelete(submission.id());
        }
    }

    /// The store deleted the row: mirror it locally.
    pub fn delete_confirmed(&mut self, id: RowId) {
        self.engine.apply_remove(id);
        self.mode = Mode::Browse;
        let page_len = self.engine.view().items.len();
        self.clamp_selection(page_len);
        self.set_info(format!("Row {id} deleted"));
    }

    /// The store refused the delete: nothing changes locally.
    pub fn delete_failed(&mut self, detail: &str) {
        self.mode = Mode::Browse;
        self.set_error(format!("Delete failed: {detail}"));
    }

    /// Close whatever modal is open without acting.
    pub fn cancel_modal(&mut self) {
        self.mode = Mode::Browse;
    }
}
