//! Status bar: branch on the left, sync position in the center, key help on
//! the right

use ratatui::prelude::*;
use ratatui::widgets::Widget;
use timemachine_core::Theme;

/// Three-section bar at the bottom of the frame
///
/// ```ignore
/// let bar = StatusBar::new(&theme)
///     .left("main")
///     .center("↑1 ↓0")
///     .right(text::HELP_MAIN);
/// frame.render_widget(bar, area);
/// ```
pub struct StatusBar<'a> {
    left: &'a str,
    center: &'a str,
    right: &'a str,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        StatusBar {
            left: "",
            center: "",
            right: "",
            theme,
        }
    }

    /// Accent-colored, bold
    pub fn left(mut self, text: &'a str) -> Self {
        self.left = text;
        self
    }

    pub fn center(mut self, text: &'a str) -> Self {
        self.center = text;
        self
    }

    /// Muted, right-aligned
    pub fn right(mut self, text: &'a str) -> Self {
        self.right = text;
        self
    }
}

fn width_of(text: &str) -> usize {
    Line::raw(text).width()
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let colors = &self.theme.colors;
        buf.set_style(area, Style::default().bg(colors.selection));

        let width = area.width as usize;
        let mut used_left = 0;

        if !self.left.is_empty() {
            let text = format!(" {} ", self.left);
            let text_width = width_of(&text);
            if text_width <= width {
                let style = Style::default()
                    .fg(colors.accent)
                    .bg(colors.selection)
                    .add_modifier(Modifier::BOLD);
                buf.set_string(area.x, area.y, &text, style);
                used_left = text_width;
            }
        }

        // The right section wins over the center when space is short
        let mut right_start = width;
        if !self.right.is_empty() {
            let text = format!(" {} ", self.right);
            let text_width = width_of(&text);
            if used_left + text_width <= width {
                right_start = width - text_width;
                let style = Style::default().fg(colors.muted).bg(colors.selection);
                buf.set_string(area.x + right_start as u16, area.y, &text, style);
            }
        }

        if !self.center.is_empty() {
            let center_width = width_of(self.center);
            let start = width.saturating_sub(center_width) / 2;
            if start >= used_left && start + center_width <= right_start {
                let style = Style::default().fg(colors.foreground).bg(colors.selection);
                buf.set_string(area.x + start as u16, area.y, self.center, style);
            }
        }
    }
}
