//! Repository status panel
//!
//! Shows the branch, the last checkpoint and the working-tree state, or
//! guidance when no repository exists yet.

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Widget, Wrap};
use timemachine_core::{text, RepoPresence, StatusSnapshot, Theme};

use super::panel;

/// Paths listed per category before collapsing into a count
const MAX_PATHS: usize = 3;

pub struct StatusPanel<'a> {
    presence: RepoPresence,
    snapshot: Option<&'a StatusSnapshot>,
    theme: &'a Theme,
}

impl<'a> StatusPanel<'a> {
    pub fn new(
        presence: RepoPresence,
        snapshot: Option<&'a StatusSnapshot>,
        theme: &'a Theme,
    ) -> Self {
        StatusPanel {
            presence,
            snapshot,
            theme,
        }
    }

    /// Lines shown inside the panel
    pub fn lines(&self) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;
        let label = Style::default().fg(colors.muted);

        if self.presence == RepoPresence::Missing {
            return vec![
                Line::styled(
                    text::TEXT_NOT_INITIALIZED,
                    Style::default()
                        .fg(colors.warning)
                        .add_modifier(Modifier::BOLD),
                ),
                Line::styled(text::TEXT_NOT_INITIALIZED_HINT, label),
            ];
        }

        let Some(snapshot) = self.snapshot else {
            return Vec::new();
        };

        let mut branch = vec![
            Span::styled(format!("{} ", text::LABEL_BRANCH), label),
            Span::styled(
                snapshot.branch.clone(),
                Style::default()
                    .fg(colors.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some((ahead, behind)) = snapshot.ahead_behind {
            branch.push(Span::styled(format!("  ↑{} ↓{}", ahead, behind), label));
        }

        let last = match &snapshot.last_checkpoint {
            Some(summary) => Span::styled(summary.clone(), Style::default().fg(colors.foreground)),
            None => Span::styled(text::TEXT_NO_CHECKPOINTS, Style::default().fg(colors.warning)),
        };

        let mut lines = vec![
            Line::from(branch),
            Line::from(vec![
                Span::styled(format!("{} ", text::LABEL_LAST_CHECKPOINT), label),
                last,
            ]),
        ];

        if snapshot.is_clean {
            lines.push(Line::styled(text::TEXT_CLEAN, Style::default().fg(colors.success)));
            return lines;
        }

        lines.push(Line::styled(
            text::TEXT_DIRTY,
            Style::default().fg(colors.warning),
        ));
        for (heading, paths) in [
            (text::LABEL_STAGED, &snapshot.staged),
            (text::LABEL_MODIFIED, &snapshot.modified),
            (text::LABEL_UNTRACKED, &snapshot.untracked),
        ] {
            if paths.is_empty() {
                continue;
            }
            let mut shown = paths
                .iter()
                .take(MAX_PATHS)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            if paths.len() > MAX_PATHS {
                shown.push_str(&format!(" +{}", paths.len() - MAX_PATHS));
            }
            lines.push(Line::from(vec![
                Span::styled(format!("  {} {} ", heading, paths.len()), label),
                Span::styled(shown, Style::default().fg(colors.foreground)),
            ]));
        }
        lines
    }

    /// Height the panel needs, borders included
    pub fn height(&self) -> u16 {
        self.lines().len() as u16 + 2
    }
}

impl Widget for StatusPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel(text::LABEL_STATUS, self.theme);
        Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
