//! Edit and delete-confirmation overlays, drawn over the table.

use crate::model::RowId;
use crate::state::{EditField, EditForm};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// A centered rect of at most `width`×`height` inside `area`.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn field_line(form: &EditForm, field: EditField) -> Line<'static> {
    let focused = form.active() == field;
    let label_style = if focused {
        Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan)
    } else {
        Style::default()
    };
    let mut spans = vec![Span::styled(format!("{:>8}: ", field.label()), label_style)];

    let value = form.value(field);
    if focused {
        let cursor = form.cursor();
        let cursor_style = Style::default().bg(Color::White).fg(Color::Black);
        spans.push(Span::raw(value[..cursor].to_string()));
        match value[cursor..].chars().next() {
            Some(ch) => {
                spans.push(Span::styled(ch.to_string(), cursor_style));
                spans.push(Span::raw(value[cursor + ch.len_utf8()..].to_string()));
            }
            None => spans.push(Span::styled(" ".to_string(), cursor_style)),
        }
    } else {
        spans.push(Span::raw(value.to_string()));
    }

    Line::from(spans)
}

/// The edit modal for one submission.
pub struct EditModal<'a> {
    form: &'a EditForm,
}

impl<'a> EditModal<'a> {
    /// Build the modal over an in-progress form.
    pub fn new(form: &'a EditForm) -> Self {
        Self { form }
    }
}

impl Widget for EditModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(area, 70, 9);
        Clear.render(popup, buf);

        let mut lines: Vec<Line> = EditField::all()
            .into_iter()
            .map(|field| field_line(self.form, field))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Tab next field  Enter save  Esc cancel",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Edit row {}", self.form.id())),
            )
            .render(popup, buf);
    }
}

/// The delete confirmation overlay.
pub struct ConfirmDelete {
    id: RowId,
}

impl ConfirmDelete {
    /// Confirmation for one row.
    pub fn new(id: RowId) -> Self {
        Self { id }
    }
}

impl Widget for ConfirmDelete {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(area, 44, 4);
        Clear.render(popup, buf);

        let lines = vec![
            Line::from(format!("Delete row {}?", self.id)),
            Line::from(Span::styled(
                "y confirm  n/Esc cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Confirm")
                    .border_style(Style::default().fg(Color::Red)),
            )
            .render(popup, buf);
    }
}
