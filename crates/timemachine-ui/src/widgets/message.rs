//! One-line message area: spinner while loading, otherwise the last error
//! or notice

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Widget};
use timemachine_core::{text, AppState, Theme};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner glyph for an animation frame
pub fn spinner_glyph(frame: usize) -> &'static str {
    SPINNER[frame % SPINNER.len()]
}

pub struct MessageLine<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> MessageLine<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        MessageLine { state, theme }
    }

    pub fn line(&self) -> Line<'a> {
        let colors = &self.theme.colors;

        if let Some(label) = &self.state.loading {
            return Line::from(vec![
                Span::styled(
                    format!(" {} ", spinner_glyph(self.state.spinner_frame)),
                    Style::default().fg(colors.accent),
                ),
                Span::styled(text::LABEL_LOADING, Style::default().fg(colors.muted)),
                Span::styled(label.as_str(), Style::default().fg(colors.foreground)),
            ]);
        }
        if let Some(error) = &self.state.last_error {
            return Line::styled(
                format!(" ✗ {}", error),
                Style::default()
                    .fg(colors.error)
                    .add_modifier(Modifier::BOLD),
            );
        }
        if let Some(notice) = &self.state.notice {
            return Line::styled(format!(" {}", notice), Style::default().fg(colors.success));
        }
        Line::default()
    }
}

impl Widget for MessageLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line()).render(area, buf);
    }
}
