//! TUI rendering and terminal management (impure shell).
//!
//! Everything below the key dispatch is a pure [`AppState`] transition;
//! this module owns the terminal, the event loop, the poll timer, and
//! the store calls that edits and deletes go through.

mod edit_modal;
mod filters;
mod status;
mod table;

pub use edit_modal::{centered_rect, ConfirmDelete, EditModal};
pub use filters::FilterBar;
pub use status::StatusBar;
pub use table::{truncate_to_width, SubmissionTable};

use crate::export;
use crate::model::StoreError;
use crate::state::{AppState, DateBound, Mode, StatusLevel, StatusMessage};
use crate::store::{PollTimer, SubmissionStore};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// Event-poll tick; also bounds how late a data refresh can fire.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Errors that can occur during TUI operations.
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Store error during the initial load
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Main TUI application.
///
/// Generic over the backend so tests can drive it with `TestBackend`,
/// and over the store so tests can substitute an in-memory one.
pub struct TuiApp<B, S>
where
    B: ratatui::backend::Backend,
    S: SubmissionStore,
{
    terminal: Terminal<B>,
    state: AppState,
    store: S,
    timer: PollTimer,
}

impl<S: SubmissionStore> TuiApp<CrosstermBackend<Stdout>, S> {
    /// Create and initialize a TUI application on stdout.
    ///
    /// Sets up the terminal in raw mode with the alternate screen.
    pub fn new(store: S, page_size: usize, poll_interval: Duration) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self::with_terminal(terminal, store, page_size, poll_interval))
    }
}

impl<B, S> TuiApp<B, S>
where
    B: ratatui::backend::Backend,
    S: SubmissionStore,
{
    /// Build an app over an existing terminal (no terminal setup).
    pub fn with_terminal(
        terminal: Terminal<B>,
        store: S,
        page_size: usize,
        poll_interval: Duration,
    ) -> Self {
        Self {
            terminal,
            state: AppState::new(page_size),
            store,
            timer: PollTimer::new(poll_interval),
        }
    }

    /// The application state (for assertions in tests).
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the main event loop. Returns when the user quits.
    ///
    /// Event-driven: redraws on user input and on poll-timer refreshes;
    /// idle ticks that change nothing do not redraw.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.refresh(Instant::now());
        self.draw()?;

        loop {
            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        self.draw()?;
                    }
                    Event::Resize(_, _) => {
                        self.draw()?;
                    }
                    _ => {}
                }
            } else if self.timer.due(Instant::now()) {
                self.refresh(Instant::now());
                self.draw()?;
            }
        }
    }

    /// Fetch the collection and swap it in; failures keep the last good
    /// data on screen.
    fn refresh(&mut self, now: Instant) {
        self.timer.mark(now);
        match self.store.fetch_all() {
            Ok(records) => {
                debug!("Refreshed {} submissions", records.len());
                // A recovered poll clears a stale failure message.
                if matches!(
                    self.state.status,
                    Some(StatusMessage {
                        level: StatusLevel::Error,
                        ..
                    })
                ) {
                    self.state.clear_status();
                }
                self.state.records_replaced(records);
            }
            Err(err) => {
                warn!("Refresh failed: {err}");
                self.state.poll_failed(&err.to_string());
            }
        }
    }

    /// Handle one keyboard event. Returns true if the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, whatever mode is active.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match &self.state.mode {
            Mode::SearchInput { .. } => self.handle_search_key(key),
            Mode::DateInput { .. } => self.handle_date_key(key),
            Mode::Edit(_) => self.handle_edit_key(key),
            Mode::ConfirmDelete(_) => self.handle_confirm_key(key),
            Mode::Browse => return self.handle_browse_key(key),
        }
        false
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('/') => self.state.open_search(),
            KeyCode::Char('s') => self.state.cycle_sort(),
            KeyCode::Char('d') => self.state.cycle_domain(),
            KeyCode::Char('h') => self.state.cycle_phone(),
            KeyCode::Char('f') => self.state.open_date_input(DateBound::From),
            KeyCode::Char('t') => self.state.open_date_input(DateBound::Until),
            KeyCode::Left => self.state.prev_page(),
            KeyCode::Right => self.state.next_page(),
            KeyCode::Up => self.state.selection_up(),
            KeyCode::Down => {
                let page_len = self.state.view().items.len();
                self.state.selection_down(page_len);
            }
            KeyCode::Char('e') => self.state.begin_edit(),
            KeyCode::Char('x') => self.state.begin_delete(),
            KeyCode::Char('r') => self.refresh(Instant::now()),
            KeyCode::Char('c') => self.export_csv(),
            KeyCode::Char('b') => self.state.acknowledge_badge(),
            KeyCode::Esc => self.state.clear_status(),
            _ => {}
        }
        false
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.search_insert(ch);
            }
            KeyCode::Backspace => self.state.search_backspace(),
            KeyCode::Left => self.state.search_cursor_left(),
            KeyCode::Right => self.state.search_cursor_right(),
            KeyCode::Enter => self.state.commit_search(),
            KeyCode::Esc => self.state.cancel_search(),
            _ => {}
        }
    }

    fn handle_date_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.date_insert(ch);
            }
            KeyCode::Backspace => self.state.date_backspace(),
            KeyCode::Enter => self.state.commit_date(),
            KeyCode::Esc => self.state.cancel_date(),
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                if let Mode::Edit(form) = &mut self.state.mode {
                    form.next_field();
                }
            }
            KeyCode::BackTab => {
                if let Mode::Edit(form) = &mut self.state.mode {
                    form.prev_field();
                }
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Mode::Edit(form) = &mut self.state.mode {
                    form.insert_char(ch);
                }
            }
            KeyCode::Backspace => {
                if let Mode::Edit(form) = &mut self.state.mode {
                    form.backspace();
                }
            }
            KeyCode::Left => {
                if let Mode::Edit(form) = &mut self.state.mode {
                    form.cursor_left();
                }
            }
            KeyCode::Right => {
                if let Mode::Edit(form) = &mut self.state.mode {
                    form.cursor_right();
                }
            }
            KeyCode::Enter => self.save_edit(),
            KeyCode::Esc => self.state.cancel_modal(),
            _ => {}
        }
    }

    /// Push the edit to the store; the local collection changes only
    /// after the store has accepted it.
    fn save_edit(&mut self) {
        let Mode::Edit(form) = &self.state.mode else {
            return;
        };
        let id = form.id();
        let patch = form.to_patch();

        match self.store.update(id, &patch) {
            Ok(()) => self.state.edit_saved(id, &patch),
            Err(err) => {
                warn!("Update of row {id} rejected: {err}");
                self.state.edit_failed(&err.to_string());
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        let Mode::ConfirmDelete(id) = self.state.mode else {
            return;
        };
        match key.code {
            KeyCode::Char('y') => match self.store.delete(id) {
                Ok(()) => self.state.delete_confirmed(id),
                Err(err) => {
                    warn!("Delete of row {id} rejected: {err}");
                    self.state.delete_failed(&err.to_string());
                }
            },
            KeyCode::Char('n') | KeyCode::Esc => self.state.cancel_modal(),
            _ => {}
        }
    }

    /// Export the filtered, sorted collection to a timestamped CSV in
    /// the working directory.
    fn export_csv(&mut self) {
        let rows = self.state.engine.sorted();
        let path = PathBuf::from(format!(
            "submissions-{}.csv",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        ));
        match export::write_csv(&rows, &path) {
            Ok(()) => {
                debug!("Exported {} rows to {}", rows.len(), path.display());
                self.state
                    .set_info(format!("Exported {} rows to {}", rows.len(), path.display()));
            }
            Err(err) => {
                warn!("CSV export failed: {err}");
                self.state.set_error(format!("Export failed: {err}"));
            }
        }
    }

    /// Render one frame.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let state = &self.state;
        let view = state.view();

        self.terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(3),
                    Constraint::Length(2),
                ])
                .split(frame.area());

            frame.render_widget(FilterBar::new(state.engine.state(), &state.mode), chunks[0]);
            frame.render_widget(SubmissionTable::new(&view.items, state.selected), chunks[1]);
            frame.render_widget(
                StatusBar::new(&view, &state.badge, state.status.as_ref()),
                chunks[2],
            );

            match &state.mode {
                Mode::Edit(form) => frame.render_widget(EditModal::new(form), frame.area()),
                Mode::ConfirmDelete(id) => {
                    frame.render_widget(ConfirmDelete::new(*id), frame.area());
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}

/// Initialize and run the TUI over a store.
///
/// Handles terminal setup, runs the event loop, and restores the
/// terminal even when the loop errors. Logging must already be
/// initialized by the caller.
pub fn run_with_store<S: SubmissionStore>(
    store: S,
    page_size: usize,
    poll_interval: Duration,
    initial_search: Option<String>,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(store, page_size, poll_interval)?;
    if let Some(search) = initial_search {
        app.state.engine.state_mut().set_search(search);
    }
    let result = app.run();

    restore_terminal()?;

    result
}

/// Restore terminal to normal state.
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

// ===== Tests =====

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
