//! Domain types: submissions, identities, timestamps, and errors.

pub mod error;
pub mod submission;

pub use error::{AppError, StoreError};
pub use submission::{InvalidRowId, RowId, Submission, SubmissionPatch, Timestamp};
