//! Submission table widget.

use crate::model::Submission;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, StatefulWidget, Table, TableState, Widget},
};
use unicode_width::UnicodeWidthChar;

/// Truncate to a display width, appending an ellipsis when cut.
///
/// Width is measured in terminal columns, not chars, so wide CJK
/// characters count as two.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let full: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if full <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    // Leave one column for the ellipsis.
    let budget = max_width - 1;
    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > budget {
            break;
        }
        width += ch_width;
        out.push(ch);
    }
    out.push('…');
    out
}

/// The main table: one row per submission on the current page.
pub struct SubmissionTable<'a> {
    items: &'a [Submission],
    selected: usize,
}

impl<'a> SubmissionTable<'a> {
    /// Build the table over the current page.
    pub fn new(items: &'a [Submission], selected: usize) -> Self {
        Self { items, selected }
    }
}

impl Widget for SubmissionTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(["Row", "Name", "Email", "Phone", "Timestamp", "Message"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let message_width = (area.width as usize).saturating_sub(64).max(10);
        let rows = self.items.iter().map(|s| {
            Row::new([
                Cell::from(s.id().to_string()),
                Cell::from(truncate_to_width(s.name(), 18)),
                Cell::from(truncate_to_width(s.email(), 26)),
                Cell::from(truncate_to_width(s.phone(), 14)),
                Cell::from(truncate_to_width(s.timestamp().as_str(), 20)),
                Cell::from(truncate_to_width(s.message(), message_width)),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(5),
                Constraint::Length(18),
                Constraint::Length(26),
                Constraint::Length(14),
                Constraint::Length(20),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title("Submissions"));

        let mut state = TableState::default();
        if !self.items.is_empty() {
            state.select(Some(self.selected.min(self.items.len() - 1)));
        }
        StatefulWidget::render(table, area, buf, &mut state);
    }
}
