//! Main menu model

use crate::state::RepoPresence;
use crate::text;

/// Entries of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    InitRepository,
    CreateCheckpoint,
    ViewHistory,
    Rollback,
    Sync,
}

const FULL_MENU: &[MenuItem] = &[
    MenuItem::CreateCheckpoint,
    MenuItem::ViewHistory,
    MenuItem::Rollback,
    MenuItem::Sync,
];

const INIT_MENU: &[MenuItem] = &[MenuItem::InitRepository];

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::InitRepository => text::MENU_INIT,
            MenuItem::CreateCheckpoint => text::MENU_CHECKPOINT,
            MenuItem::ViewHistory => text::MENU_HISTORY,
            MenuItem::Rollback => text::MENU_ROLLBACK,
            MenuItem::Sync => text::MENU_SYNC,
        }
    }

    /// Hotkey jumping straight to this entry
    pub fn hotkey(&self) -> Option<char> {
        match self {
            MenuItem::InitRepository => None,
            MenuItem::CreateCheckpoint => Some('c'),
            MenuItem::ViewHistory => Some('h'),
            MenuItem::Rollback => Some('r'),
            MenuItem::Sync => Some('s'),
        }
    }

    /// Menu entries offered for the given repository presence.
    ///
    /// Only initialization is offered when no repository exists.
    pub fn items_for(presence: RepoPresence) -> &'static [MenuItem] {
        match presence {
            RepoPresence::Missing => INIT_MENU,
            _ => FULL_MENU,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_repo_offers_only_init() {
        assert_eq!(
            MenuItem::items_for(RepoPresence::Missing),
            &[MenuItem::InitRepository]
        );
    }

    #[test]
    fn test_full_menu_order() {
        let items = MenuItem::items_for(RepoPresence::Ready);
        assert_eq!(items.len(), 4);
        assert_eq!(items[0], MenuItem::CreateCheckpoint);
        assert_eq!(items[3], MenuItem::Sync);
        assert_eq!(MenuItem::items_for(RepoPresence::Empty), items);
    }

    #[test]
    fn test_hotkeys() {
        let keys: Vec<char> = MenuItem::items_for(RepoPresence::Ready)
            .iter()
            .filter_map(|item| item.hotkey())
            .collect();
        assert_eq!(keys, vec!['c', 'h', 'r', 's']);
        assert!(MenuItem::InitRepository.hotkey().is_none());
    }
}
