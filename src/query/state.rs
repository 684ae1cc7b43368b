//! Query view state.
//!
//! [`QueryState`] is a plain value object holding everything the user has
//! asked for: search text, field filters, date bounds, sort key, and the
//! current page. It is not a state machine; the single temporal rule is
//! that changing anything other than the page snaps the page back to 1.

use crate::query::SortKey;
use chrono::NaiveDate;

/// Default rows per page, matching the admin table.
pub const DEFAULT_PAGE_SIZE: usize = 10;

// ===== Field filters =====

/// Email-domain filter: off, or a substring the email must contain.
///
/// The match is a plain substring test on the whole address, which is what
/// the admin dashboard has always done ("gmail.com" matches anywhere in
/// the address, not just after the `@`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DomainFilter {
    /// No domain filtering.
    #[default]
    All,
    /// Email must contain this string.
    Domain(String),
}

/// Phone-presence filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhoneFilter {
    /// No phone filtering.
    #[default]
    All,
    /// Only submissions with a non-blank phone.
    WithPhone,
    /// Only submissions with a blank phone.
    NoPhone,
}

// ===== QueryState =====

/// The transient search/filter/sort/page parameters for one view session.
///
/// All mutators other than [`QueryState::set_page`] reset the page to 1,
/// so a narrowed result set is never viewed from a stale page index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    search: String,
    domain: DomainFilter,
    phone: PhoneFilter,
    from: Option<NaiveDate>,
    until: Option<NaiveDate>,
    sort: SortKey,
    page: usize,
    page_size: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl QueryState {
    /// Create a default state with the given page size.
    ///
    /// A zero page size is bumped to 1; the pipeline is total and never
    /// divides by zero.
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            domain: DomainFilter::All,
            phone: PhoneFilter::All,
            from: None,
            until: None,
            sort: SortKey::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    // ===== Accessors =====

    /// Free-text search; empty means no filtering.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Email-domain filter.
    pub fn domain(&self) -> &DomainFilter {
        &self.domain
    }

    /// Phone-presence filter.
    pub fn phone(&self) -> PhoneFilter {
        self.phone
    }

    /// Inclusive lower date bound.
    pub fn from(&self) -> Option<NaiveDate> {
        self.from
    }

    /// Inclusive upper date bound (whole day).
    pub fn until(&self) -> Option<NaiveDate> {
        self.until
    }

    /// Current sort key.
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Current 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Rows per page; fixed for the session.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    // ===== Transitions (all but set_page reset the page) =====

    /// Replace the search text and reset to page 1.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Replace the domain filter and reset to page 1.
    pub fn set_domain(&mut self, domain: DomainFilter) {
        self.domain = domain;
        self.page = 1;
    }

    /// Replace the phone filter and reset to page 1.
    pub fn set_phone(&mut self, phone: PhoneFilter) {
        self.phone = phone;
        self.page = 1;
    }

    /// Replace the lower date bound and reset to page 1.
    pub fn set_from(&mut self, from: Option<NaiveDate>) {
        self.from = from;
        self.page = 1;
    }

    /// Replace the upper date bound and reset to page 1.
    pub fn set_until(&mut self, until: Option<NaiveDate>) {
        self.until = until;
        self.page = 1;
    }

    /// Replace the sort key and reset to page 1.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 1;
    }

    /// Move to a page, clamped into `[1, max(total_pages, 1)]`.
    ///
    /// The only transition that leaves every other field untouched.
    pub fn set_page(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }
}

// ===== Tests =====
