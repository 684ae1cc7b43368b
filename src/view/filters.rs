//! Filter bar: the active search, filters, and sort, with an inline
//! input line when the user is typing a search or a date bound.

use crate::query::{DomainFilter, PhoneFilter, QueryState};
use crate::state::{DateBound, Mode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Render a typed buffer with a block cursor at a byte offset.
fn input_line(buffer: &str, cursor: usize) -> Line<'static> {
    let before = buffer[..cursor].to_string();
    let cursor_style = Style::default()
        .bg(Color::White)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD);
    match buffer[cursor..].chars().next() {
        Some(ch) => {
            let after = buffer[cursor + ch.len_utf8()..].to_string();
            Line::from(vec![
                Span::raw(before),
                Span::styled(ch.to_string(), cursor_style),
                Span::raw(after),
            ])
        }
        None => Line::from(vec![
            Span::raw(before),
            Span::styled(" ".to_string(), cursor_style),
        ]),
    }
}

/// One-line description of the active query parameters.
fn summary_line(query: &QueryState) -> Line<'static> {
    let mut spans = Vec::new();

    let search = if query.search().is_empty() {
        "(none)".to_string()
    } else {
        format!("\"{}\"", query.search())
    };
    spans.push(Span::raw(format!("search: {search}")));

    let domain = match query.domain() {
        DomainFilter::All => "all".to_string(),
        DomainFilter::Domain(d) => d.clone(),
    };
    spans.push(Span::raw(format!("  domain: {domain}")));

    let phone = match query.phone() {
        PhoneFilter::All => "all",
        PhoneFilter::WithPhone => "with phone",
        PhoneFilter::NoPhone => "no phone",
    };
    spans.push(Span::raw(format!("  phone: {phone}")));

    let bound = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    spans.push(Span::raw(format!(
        "  dates: {}..{}",
        bound(query.from()),
        bound(query.until())
    )));

    spans.push(Span::styled(
        format!("  sort: {}", query.sort().label()),
        Style::default().add_modifier(Modifier::BOLD),
    ));

    Line::from(spans)
}

/// Filter bar widget.
pub struct FilterBar<'a> {
    query: &'a QueryState,
    mode: &'a Mode,
}

impl<'a> FilterBar<'a> {
    /// Build the bar from the query state and interaction mode.
    pub fn new(query: &'a QueryState, mode: &'a Mode) -> Self {
        Self { query, mode }
    }
}

impl Widget for FilterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (title, line) = match self.mode {
            Mode::SearchInput { buffer, cursor, .. } => {
                ("Search (Enter apply, Esc cancel)", input_line(buffer, *cursor))
            }
            Mode::DateInput { bound, buffer } => {
                let title = match bound {
                    DateBound::From => "From date YYYY-MM-DD (Enter apply, Esc cancel)",
                    DateBound::Until => "Until date YYYY-MM-DD (Enter apply, Esc cancel)",
                };
                (title, input_line(buffer, buffer.len()))
            }
            _ => ("Filters", summary_line(self.query)),
        };

        Paragraph::new(line)
            .block(Block::default().borders(Borders::ALL).title(title))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn browse_mode_renders_filter_summary() {
        let mut terminal = Terminal::new(TestBackend::new(100, 3)).unwrap();
        let mut query = QueryState::default();
        query.set_search("ada");
        query.set_domain(DomainFilter::Domain("gmail.com".to_string()));

        terminal
            .draw(|frame| {
                frame.render_widget(FilterBar::new(&query, &Mode::Browse), frame.area());
            })
            .unwrap();
    }

    #[test]
    fn search_mode_renders_input_with_cursor() {
        let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();
        let query = QueryState::default();
        let mode = Mode::SearchInput {
            buffer: "bob".to_string(),
            cursor: 1,
            prior: String::new(),
        };

        terminal
            .draw(|frame| {
                frame.render_widget(FilterBar::new(&query, &mode), frame.area());
            })
            .unwrap();
    }

    #[test]
    fn date_mode_renders_input() {
        let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();
        let query = QueryState::default();
        let mode = Mode::DateInput {
            bound: DateBound::From,
            buffer: "2025-01".to_string(),
        };

        terminal
            .draw(|frame| {
                frame.render_widget(FilterBar::new(&query, &mode), frame.area());
            })
            .unwrap();
    }

    #[test]
    fn cursor_at_end_renders_block_space() {
        let line = input_line("abc", 3);
        assert_eq!(line.spans.len(), 2);
    }

    #[test]
    fn cursor_mid_buffer_splits_into_three_spans() {
        let line = input_line("abc", 1);
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content, "b");
    }
}
