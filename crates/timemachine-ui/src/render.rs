//! The view: a pure function from application state to a frame

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use timemachine_core::{text, AppState, Mode, Theme};

use crate::layout::{split_main, AppLayout};
use crate::widgets::{
    DescriptionPrompt, HistoryList, MenuPanel, MessageLine, StatusBar, StatusPanel,
};

/// Draws the whole frame for `state`
pub fn render(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let layout = AppLayout::new(frame.area());

    let title = match state.mode {
        Mode::Main => text::TITLE_MAIN,
        Mode::DescriptionEntry => text::TITLE_DESCRIPTION,
        Mode::History => text::TITLE_HISTORY,
    };
    frame.render_widget(
        Paragraph::new(Line::styled(
            title,
            Style::default()
                .fg(theme.colors.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        layout.title,
    );

    match state.mode {
        Mode::Main => {
            let status = StatusPanel::new(state.presence, state.status.as_ref(), theme);
            let (status_area, menu_area) = split_main(layout.content, status.height());
            frame.render_widget(status, status_area);
            frame.render_widget(
                MenuPanel::new(state.menu_items(), state.menu_selected, theme),
                menu_area,
            );
        }
        Mode::DescriptionEntry => frame.render_widget(
            DescriptionPrompt::new(&state.draft, &state.suggestions, theme),
            layout.content,
        ),
        Mode::History => frame.render_widget(
            HistoryList::new(&state.checkpoints, state.history_selected, theme),
            layout.content,
        ),
    }

    frame.render_widget(MessageLine::new(state, theme), layout.message);

    let branch = state
        .status
        .as_ref()
        .map(|status| status.branch.as_str())
        .unwrap_or("");
    let position = state
        .status
        .as_ref()
        .and_then(|status| status.ahead_behind)
        .map(|(ahead, behind)| format!("↑{} ↓{}", ahead, behind))
        .unwrap_or_default();
    let help = match state.mode {
        Mode::Main => text::HELP_MAIN,
        Mode::DescriptionEntry => text::HELP_DESCRIPTION,
        Mode::History => text::HELP_HISTORY,
    };
    frame.render_widget(
        StatusBar::new(theme).left(branch).center(&position).right(help),
        layout.status_bar,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use timemachine_core::{Checkpoint, RepoPresence, StatusSnapshot};

    fn draw(state: &AppState, width: u16, height: u16) -> String {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal
            .draw(|frame| render(frame, state, &theme))
            .expect("draw");
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn ready_state() -> AppState {
        AppState {
            presence: RepoPresence::Ready,
            status: Some(StatusSnapshot {
                branch: "main".into(),
                is_clean: true,
                last_checkpoint: Some("first abc1234".into()),
                ahead_behind: Some((1, 0)),
                ..StatusSnapshot::default()
            }),
            ..AppState::default()
        }
    }

    #[test]
    fn test_main_screen() {
        let screen = draw(&ready_state(), 80, 24);
        assert!(screen.contains(text::TITLE_MAIN.trim()));
        assert!(screen.contains("Branch: main"));
        assert!(screen.contains("first abc1234"));
        assert!(screen.contains(text::TEXT_CLEAN));
        assert!(screen.contains(&format!("▶ {}", text::MENU_CHECKPOINT)));
        assert!(screen.contains(text::MENU_SYNC));
        assert!(screen.contains(text::HELP_MAIN));
        assert!(screen.contains("↑1 ↓0"));
    }

    #[test]
    fn test_uninitialized_screen() {
        let state = AppState {
            presence: RepoPresence::Missing,
            ..AppState::default()
        };
        let screen = draw(&state, 80, 24);
        assert!(screen.contains(text::TEXT_NOT_INITIALIZED));
        assert!(screen.contains(text::MENU_INIT));
        assert!(!screen.contains(text::MENU_SYNC));
    }

    #[test]
    fn test_loading_shows_spinner_label() {
        let mut state = ready_state();
        state.loading = Some(text::LOADING_SYNC.into());
        let screen = draw(&state, 80, 24);
        assert!(screen.contains(text::LOADING_SYNC));
    }

    #[test]
    fn test_description_screen() {
        let mut state = ready_state();
        state.mode = Mode::DescriptionEntry;
        state.draft = "wip".into();
        state.suggestions = vec!["Tests are green".into()];
        let screen = draw(&state, 80, 24);
        assert!(screen.contains("> wip"));
        assert!(screen.contains("1. Tests are green"));
        assert!(screen.contains(text::HELP_DESCRIPTION));
    }

    #[test]
    fn test_history_screen() {
        let mut state = ready_state();
        state.mode = Mode::History;
        state.checkpoints = vec![Checkpoint {
            id: "abcdef0123456789abcdef0123456789abcdef01".into(),
            message: "first".into(),
            author: "Time Machine".into(),
            time: Utc::now(),
            is_current: true,
        }];
        let screen = draw(&state, 100, 24);
        assert!(screen.contains("abcdef0"));
        assert!(screen.contains(text::TEXT_CURRENT.trim()));
        assert!(screen.contains(text::HELP_HISTORY));
    }

    #[test]
    fn test_error_line() {
        let mut state = ready_state();
        state.last_error = Some("Failed to roll back: unknown checkpoint: zz".into());
        let screen = draw(&state, 80, 24);
        assert!(screen.contains("Failed to roll back"));
    }

    #[test]
    fn test_render_does_not_mutate_state() {
        let state = ready_state();
        let before = state.clone();
        draw(&state, 40, 10);
        draw(&state, 3, 2);
        assert_eq!(state, before);
    }
}
