//! nexadmin: a terminal admin console for contact-form submissions.
//!
//! The crate splits into a pure core and an impure shell. `model` holds
//! the domain types, `query` the filter → sort → paginate pipeline, and
//! `state` the interaction state machine; none of them touch the
//! terminal or the filesystem. `store` persists submissions, `export`
//! writes CSV, and `view` owns the TUI event loop.

pub mod config;
pub mod export;
pub mod logging;
pub mod model;
pub mod query;
pub mod state;
pub mod store;
pub mod view;
