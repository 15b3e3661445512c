//! Description entry: the draft being typed and the numbered suggestions

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Widget, Wrap};
use timemachine_core::{text, Theme};

use super::panel;

/// Suggestions reachable with the digit keys
const MAX_NUMBERED: usize = 9;

pub struct DescriptionPrompt<'a> {
    draft: &'a str,
    suggestions: &'a [String],
    theme: &'a Theme,
}

impl<'a> DescriptionPrompt<'a> {
    pub fn new(draft: &'a str, suggestions: &'a [String], theme: &'a Theme) -> Self {
        DescriptionPrompt {
            draft,
            suggestions,
            theme,
        }
    }

    pub fn lines(&self) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;
        let mut lines = vec![
            Line::styled(text::PROMPT_DESCRIPTION, Style::default().fg(colors.muted)),
            Line::from(vec![
                Span::styled("> ", Style::default().fg(colors.accent)),
                Span::styled(self.draft, Style::default().fg(colors.foreground)),
                Span::styled("█", Style::default().fg(colors.accent)),
            ]),
            Line::default(),
        ];

        if !self.suggestions.is_empty() {
            lines.push(Line::styled(
                text::PROMPT_SUGGESTIONS,
                Style::default().fg(colors.muted),
            ));
        }
        for (index, suggestion) in self.suggestions.iter().take(MAX_NUMBERED).enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}. ", index + 1), Style::default().fg(colors.accent)),
                Span::styled(suggestion.as_str(), Style::default().fg(colors.foreground)),
            ]));
        }
        lines
    }
}

impl Widget for DescriptionPrompt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel(text::TITLE_DESCRIPTION.trim(), self.theme);
        Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
