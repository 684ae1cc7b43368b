//! Application state: interaction modes, edit-form buffers, and the
//! notification badge. Everything here is pure and terminal-free.

mod app_state;
mod edit_form;
mod notify;

pub use app_state::{
    AppState, DateBound, Mode, StatusLevel, StatusMessage, DOMAIN_OPTIONS,
};
pub use edit_form::{EditField, EditForm};
pub use notify::NotifyBadge;
