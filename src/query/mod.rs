//! The query pipeline: filter → sort → paginate → summary.
//!
//! Every stage is a pure function over the in-memory collection; the
//! [`QueryEngine`] composes them over an owned collection and an explicit
//! [`QueryState`]. No stage can fail; malformed data degrades per the
//! documented policies instead of aborting the pipeline.

pub mod engine;
pub mod filter;
pub mod page;
pub mod sort;
pub mod state;

pub use engine::{QueryEngine, QueryView};
pub use filter::filter;
pub use page::{paginate, summary, total_pages, Page, PageSummary};
pub use sort::{sort, SortKey};
pub use state::{DomainFilter, PhoneFilter, QueryState, DEFAULT_PAGE_SIZE};
