//! Checkpoint timeline, most recent first

use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget};
use timemachine_core::{text, Checkpoint, Theme};

use super::panel;

pub struct HistoryList<'a> {
    checkpoints: &'a [Checkpoint],
    selected: usize,
    theme: &'a Theme,
}

impl<'a> HistoryList<'a> {
    pub fn new(checkpoints: &'a [Checkpoint], selected: usize, theme: &'a Theme) -> Self {
        HistoryList {
            checkpoints,
            selected,
            theme,
        }
    }

    fn row(&self, checkpoint: &'a Checkpoint) -> ListItem<'a> {
        let colors = &self.theme.colors;
        let time = checkpoint.time.with_timezone(&Local).format("%Y-%m-%d %H:%M");

        let mut spans = vec![
            Span::styled(
                format!("{} ", checkpoint.short_id()),
                Style::default().fg(colors.warning),
            ),
            Span::styled(format!("{}  ", time), Style::default().fg(colors.muted)),
            Span::styled(checkpoint.summary(), Style::default().fg(colors.foreground)),
        ];
        if checkpoint.is_current {
            spans.push(Span::styled(
                text::TEXT_CURRENT,
                Style::default()
                    .fg(colors.success)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        spans.push(Span::styled(
            format!("  {}", checkpoint.author),
            Style::default().fg(colors.muted),
        ));
        ListItem::new(Line::from(spans))
    }
}

impl Widget for HistoryList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = panel(text::LABEL_HISTORY, self.theme);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        if self.checkpoints.is_empty() {
            Paragraph::new(Line::styled(
                text::TEXT_NO_CHECKPOINTS,
                Style::default().fg(colors.muted),
            ))
            .render(inner, buf);
            return;
        }

        let list_area = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
        let items: Vec<ListItem> = self
            .checkpoints
            .iter()
            .map(|checkpoint| self.row(checkpoint))
            .collect();
        let list = List::new(items)
            .highlight_symbol("▶ ")
            .highlight_style(Style::default().bg(colors.selection));
        let mut state = ListState::default().with_selected(Some(self.selected));
        StatefulWidget::render(list, list_area, buf, &mut state);

        if inner.height > 1 {
            let hazard_area = Rect::new(inner.x, inner.bottom() - 1, inner.width, 1);
            Paragraph::new(Line::styled(
                text::TEXT_ROLLBACK_HAZARD,
                Style::default().fg(colors.warning),
            ))
            .render(hazard_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn checkpoints(n: usize) -> Vec<Checkpoint> {
        (0..n)
            .map(|i| Checkpoint {
                id: format!("{:07}{}", i, "0".repeat(33)),
                message: format!("step {}\n\ndetails", i),
                author: "Tester".into(),
                time: Utc::now(),
                is_current: i == 0,
            })
            .collect()
    }

    fn rows(list: HistoryList<'_>, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, 80, height);
        let mut buf = Buffer::empty(area);
        list.render(area, &mut buf);
        (0..height)
            .map(|y| (0..80).map(|x| buf[(x, y)].symbol().to_string()).collect())
            .collect()
    }

    #[test]
    fn test_rows_show_summary_and_current_marker() {
        let theme = Theme::default();
        let items = checkpoints(3);
        let rows = rows(HistoryList::new(&items, 1, &theme), 8);

        assert!(rows[1].contains("0000000 "));
        assert!(rows[1].contains("step 0"));
        assert!(rows[1].contains(text::TEXT_CURRENT.trim()));
        assert!(!rows[1].contains("details"));
        assert!(rows[2].contains("▶ 0000001"));
        assert!(!rows[3].contains(text::TEXT_CURRENT.trim()));
        assert!(rows[6].contains(text::TEXT_ROLLBACK_HAZARD));
    }

    #[test]
    fn test_empty_history_guidance() {
        let theme = Theme::default();
        let rows = rows(HistoryList::new(&[], 0, &theme), 5);
        assert!(rows[1].contains(text::TEXT_NO_CHECKPOINTS));
    }
}
