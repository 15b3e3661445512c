//! Application state
//!
//! [`AppState`] is the single snapshot of UI state. It is owned by the event
//! loop and mutated only by [`crate::reducer::update`]; the renderer reads it.

use crate::menu::MenuItem;
use crate::model::{Checkpoint, StatusReport, StatusSnapshot};

/// Active UI mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Main menu
    #[default]
    Main,
    /// Typing the description of a new checkpoint
    DescriptionEntry,
    /// Browsing the checkpoint history
    History,
}

/// What is known about the repository at the working directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepoPresence {
    /// Status has not been loaded yet
    #[default]
    Unknown,
    /// No repository exists
    Missing,
    /// A repository exists but has no checkpoints
    Empty,
    /// A repository with history
    Ready,
}

impl RepoPresence {
    pub fn from_report(report: &StatusReport) -> Self {
        match report {
            StatusReport::NotInitialized => RepoPresence::Missing,
            StatusReport::Loaded(snapshot) if snapshot.has_checkpoints() => RepoPresence::Ready,
            StatusReport::Loaded(_) => RepoPresence::Empty,
        }
    }
}

/// UI state snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub mode: Mode,
    /// Progress label while an operation is in flight
    pub loading: Option<String>,
    /// Spinner animation frame, advanced by ticks while loading
    pub spinner_frame: usize,
    /// Latest status, absent until loaded or when no repository exists
    pub status: Option<StatusSnapshot>,
    pub presence: RepoPresence,
    /// Checkpoint list; populated only in [`Mode::History`]
    pub checkpoints: Vec<Checkpoint>,
    pub menu_selected: usize,
    pub history_selected: usize,
    /// Description typed so far in [`Mode::DescriptionEntry`]
    pub draft: String,
    pub suggestions: Vec<String>,
    /// Message shown after an operation, cleared on the next key press
    pub notice: Option<String>,
    pub last_error: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        AppState::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// Menu entries currently offered
    pub fn menu_items(&self) -> &'static [MenuItem] {
        MenuItem::items_for(self.presence)
    }

    pub fn selected_menu_item(&self) -> Option<MenuItem> {
        self.menu_items().get(self.menu_selected).copied()
    }

    pub fn selected_checkpoint(&self) -> Option<&Checkpoint> {
        self.checkpoints.get(self.history_selected)
    }

    pub(crate) fn start_loading(&mut self, label: &str) {
        self.loading = Some(label.to_string());
        self.spinner_frame = 0;
    }

    pub(crate) fn finish_loading(&mut self) {
        self.loading = None;
    }

    /// Re-establishes both selection invariants after a list changed
    pub(crate) fn clamp_selections(&mut self) {
        self.menu_selected = clamp_index(self.menu_selected, self.menu_items().len());
        self.history_selected = clamp_index(self.history_selected, self.checkpoints.len());
    }
}

/// Clamps `index` into `[0, len)`, or 0 for an empty list
pub fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        index.min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(0, 0), 0);
        assert_eq!(clamp_index(5, 0), 0);
        assert_eq!(clamp_index(5, 3), 2);
        assert_eq!(clamp_index(1, 3), 1);
    }

    #[test]
    fn test_presence_from_report() {
        assert_eq!(
            RepoPresence::from_report(&StatusReport::NotInitialized),
            RepoPresence::Missing
        );

        let empty = StatusSnapshot::default();
        assert_eq!(
            RepoPresence::from_report(&StatusReport::Loaded(empty)),
            RepoPresence::Empty
        );

        let ready = StatusSnapshot {
            last_checkpoint: Some("first abc1234".into()),
            ..StatusSnapshot::default()
        };
        assert_eq!(
            RepoPresence::from_report(&StatusReport::Loaded(ready)),
            RepoPresence::Ready
        );
    }

    #[test]
    fn test_clamp_selections_after_menu_shrinks() {
        let mut state = AppState::new();
        state.presence = RepoPresence::Ready;
        state.menu_selected = 3;
        state.presence = RepoPresence::Missing;
        state.clamp_selections();
        assert_eq!(state.menu_selected, 0);
        assert_eq!(state.selected_menu_item(), Some(MenuItem::InitRepository));
    }

    #[test]
    fn test_loading_flag() {
        let mut state = AppState::new();
        assert!(!state.is_loading());
        state.start_loading("busy");
        assert!(state.is_loading());
        state.finish_loading();
        assert!(!state.is_loading());
    }
}
