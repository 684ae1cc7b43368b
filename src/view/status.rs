//! Status bar: result counts, page position, the notification badge,
//! transient messages, and key hints.

use crate::query::QueryView;
use crate::state::{NotifyBadge, StatusLevel, StatusMessage};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const KEY_HINTS: &str =
    "/ search  s sort  d domain  h phone  f/t dates  ←/→ page  e edit  x delete  c export  r refresh  b seen  q quit";

/// Status bar widget, two lines tall.
pub struct StatusBar<'a> {
    view: &'a QueryView,
    badge: &'a NotifyBadge,
    status: Option<&'a StatusMessage>,
}

impl<'a> StatusBar<'a> {
    /// Build the bar for one render.
    pub fn new(
        view: &'a QueryView,
        badge: &'a NotifyBadge,
        status: Option<&'a StatusMessage>,
    ) -> Self {
        Self {
            view,
            badge,
            status,
        }
    }

    fn summary(&self) -> Line<'static> {
        let mut spans = vec![Span::raw(format!(
            "Showing {}-{} of {}  page {}/{}",
            self.view.range_start,
            self.view.range_end,
            self.view.visible_count,
            self.view.page,
            self.view.total_pages,
        ))];

        if self.badge.unread() > 0 {
            spans.push(Span::styled(
                format!("  ● {} new", self.badge.unread()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        if let Some(status) = self.status {
            let style = match status.level {
                StatusLevel::Info => Style::default().fg(Color::Green),
                StatusLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            };
            spans.push(Span::styled(format!("  {}", status.text), style));
        }

        Line::from(spans)
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            self.summary(),
            Line::from(Span::styled(
                KEY_HINTS,
                Style::default().fg(Color::DarkGray),
            )),
        ];
        Paragraph::new(lines).render(area, buf);
    }
}
