//! Static text tables: menu labels, titles, prompts, help lines and notices.

// Menu labels
pub const MENU_INIT: &str = "Start a time machine here";
pub const MENU_CHECKPOINT: &str = "Save a checkpoint";
pub const MENU_HISTORY: &str = "Browse history";
pub const MENU_ROLLBACK: &str = "Roll back to a checkpoint";
pub const MENU_SYNC: &str = "Sync with the cloud";

// Titles, prompts and labels
pub const TITLE_MAIN: &str = " Time Machine ";
pub const TITLE_DESCRIPTION: &str = " Time Machine [new checkpoint] ";
pub const TITLE_HISTORY: &str = " Time Machine [history] ";
pub const PROMPT_DESCRIPTION: &str = "Describe this moment:";
pub const PROMPT_SUGGESTIONS: &str = "Or pick a mood:";
pub const LABEL_STATUS: &str = "Where you are:";
pub const LABEL_ACTIONS: &str = "What's next:";
pub const LABEL_HISTORY: &str = "Your timeline:";
pub const LABEL_BRANCH: &str = "Branch:";
pub const LABEL_LAST_CHECKPOINT: &str = "Last checkpoint:";
pub const LABEL_STAGED: &str = "Ready to save:";
pub const LABEL_MODIFIED: &str = "Changed:";
pub const LABEL_UNTRACKED: &str = "New:";
pub const LABEL_LOADING: &str = "Working: ";

// Help lines
pub const HELP_MAIN: &str = "↑↓ Navigate | Enter Select | q Quit";
pub const HELP_HOTKEYS: &str = "Hotkeys: [C] Save [H] History [R] Rollback [S] Sync";
pub const HELP_DESCRIPTION: &str = "[Enter Save] [Esc Cancel] [1-9 Quick pick]";
pub const HELP_HISTORY: &str = "↑↓ Scroll | Enter Roll back here | Esc Back";

// Guidance
pub const TEXT_NOT_INITIALIZED: &str = "No time machine in this folder yet.";
pub const TEXT_NOT_INITIALIZED_HINT: &str = "Start one to begin saving checkpoints.";
pub const TEXT_NO_CHECKPOINTS: &str = "No checkpoints yet, start creating";
pub const TEXT_CURRENT: &str = " (current)";
pub const TEXT_CLEAN: &str = "✓ All changes are saved.";
pub const TEXT_DIRTY: &str = "⚡ You have unsaved progress";
pub const TEXT_ROLLBACK_HAZARD: &str = "Rolling back discards unsaved changes.";

// Loading labels
pub const LOADING_STATUS: &str = "Looking around...";
pub const LOADING_DESCRIPTION: &str = "Catching inspiration...";
pub const LOADING_CHECKPOINT: &str = "Saving checkpoint...";
pub const LOADING_HISTORY: &str = "Remembering the past...";
pub const LOADING_ROLLBACK: &str = "Travelling back in time...";
pub const LOADING_SYNC: &str = "Syncing with the cloud...";
pub const LOADING_INIT: &str = "Setting up the time machine...";

// Operation notices, followed by a short id
pub const NOTICE_CHECKPOINT_SAVED: &str = "Checkpoint saved: ";
pub const NOTICE_ROLLED_BACK: &str = "Rolled back to: ";

// Sync notices
pub const NOTICE_NO_REMOTE: &str = "No remote found. This is a local-only copy.";
pub const NOTICE_UP_TO_DATE: &str = "Everything is up to date";
pub const NOTICE_CONFLICTS_RESOLVED: &str = "Conflicts resolved automatically";
pub const NOTICE_PULLED: &str = "Pulled remote changes";
pub const NOTICE_PUSHED: &str = "Pushed successfully";
pub const NOTICE_FORCE_PUSHED: &str = "Force pushed local history";
pub const SUFFIX_PUSH_UP_TO_DATE: &str = ", already up to date on push";
pub const SUFFIX_PUSHED: &str = ", pushed successfully";
pub const SUFFIX_FORCE_PUSHED: &str = ", force pushed successfully";

/// Message used when a checkpoint is confirmed with an empty description.
pub const DEFAULT_CHECKPOINT_MESSAGE: &str = "Checkpoint without description";

/// Prefix of the message of an automatic conflict-resolution checkpoint.
pub const CONFLICT_MESSAGE_PREFIX: &str = "Auto-resolve conflicts: ";

/// Built-in description suggestions
pub const DEFAULT_SUGGESTIONS: &[&str] = &[
    "Caught the wave 🌊",
    "Fix on the fly 🐛",
    "New feature ready ✨",
    "Refactoring for the soul 🧹",
    "Experimenting with code 🧪",
    "Just a safety save 🛡️",
    "Made it pretty 🎨",
    "Optimization 🚀",
    "Tests are green ✅",
    "Vibe check 🤙",
    "Unstoppable progress 🔥",
    "Code magic 🪄",
    "Zen code 🧘",
    "One step closer to release 🎯",
];

/// Owned copy of [`DEFAULT_SUGGESTIONS`].
pub fn default_suggestions() -> Vec<String> {
    DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
}
