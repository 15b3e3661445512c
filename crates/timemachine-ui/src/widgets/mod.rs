//! Widgets drawn by the renderer
//!
//! - [`StatusPanel`] - branch, last checkpoint and working-tree state
//! - [`MenuPanel`] - main menu with hotkeys
//! - [`HistoryList`] - checkpoint timeline
//! - [`DescriptionPrompt`] - draft input and numbered suggestions
//! - [`MessageLine`] - spinner, notice or error
//! - [`StatusBar`] - branch, sync position and key help

pub mod description;
pub mod history_list;
pub mod menu;
pub mod message;
pub mod status_bar;
pub mod status_panel;

pub use description::DescriptionPrompt;
pub use history_list::HistoryList;
pub use menu::MenuPanel;
pub use message::MessageLine;
pub use status_bar::StatusBar;
pub use status_panel::StatusPanel;

use ratatui::prelude::*;
use ratatui::widgets::Block;
use timemachine_core::Theme;

/// Block framing a panel in the theme's border style
pub(crate) fn panel<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    let block = match theme.borders.border_type() {
        Some(border_type) => Block::bordered()
            .border_type(border_type)
            .border_style(Style::default().fg(theme.colors.muted)),
        None => Block::new(),
    };
    block.title(Span::styled(
        format!(" {} ", title),
        Style::default()
            .fg(theme.colors.accent)
            .add_modifier(Modifier::BOLD),
    ))
}
