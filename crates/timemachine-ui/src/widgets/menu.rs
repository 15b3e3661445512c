//! Main menu panel

use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget};
use timemachine_core::{text, MenuItem, Theme};

use super::panel;

pub struct MenuPanel<'a> {
    items: &'a [MenuItem],
    selected: usize,
    theme: &'a Theme,
}

impl<'a> MenuPanel<'a> {
    pub fn new(items: &'a [MenuItem], selected: usize, theme: &'a Theme) -> Self {
        MenuPanel {
            items,
            selected,
            theme,
        }
    }

    fn item(&self, index: usize, item: MenuItem) -> ListItem<'a> {
        let colors = &self.theme.colors;
        let is_selected = index == self.selected;
        let marker = if is_selected { "▶ " } else { "  " };
        let label_style = if is_selected {
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.foreground)
        };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(colors.accent)),
            Span::styled(item.label(), label_style),
        ];
        if let Some(key) = item.hotkey() {
            spans.push(Span::styled(
                format!("  [{}]", key.to_ascii_uppercase()),
                Style::default().fg(colors.muted),
            ));
        }
        ListItem::new(Line::from(spans))
    }
}

impl Widget for MenuPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel(text::LABEL_ACTIONS, self.theme);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        // Hotkey hint on the last inner line when the full menu is offered
        let show_hotkeys = self.items.iter().any(|item| item.hotkey().is_some())
            && inner.height > self.items.len() as u16;
        let list_area = if show_hotkeys {
            Rect::new(inner.x, inner.y, inner.width, inner.height - 1)
        } else {
            inner
        };

        let items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| self.item(index, *item))
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().bg(self.theme.colors.selection));
        let mut state = ListState::default().with_selected(Some(self.selected));
        StatefulWidget::render(list, list_area, buf, &mut state);

        if show_hotkeys {
            let hint_area = Rect::new(inner.x, inner.bottom() - 1, inner.width, 1);
            Paragraph::new(Line::styled(
                text::HELP_HOTKEYS,
                Style::default().fg(self.theme.colors.muted),
            ))
            .render(hint_area, buf);
        }
    }
}
