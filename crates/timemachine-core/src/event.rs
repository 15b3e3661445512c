//! Events consumed by the controller and commands it schedules
//!
//! Every [`Command`] is executed as one unit of work off the UI thread and
//! answered by exactly one completion [`Event`].

use crossterm::event::{KeyEvent, KeyEventKind};
use std::fmt;

use crate::model::{Checkpoint, StatusReport, SyncOutcome};

/// Everything the controller reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // === Input ===
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Periodic tick driving the loading spinner
    Tick,
    /// Terminal input can no longer be read; nothing can quit the loop otherwise
    InputClosed,

    // === Completions ===
    /// Repository status was loaded
    StatusLoaded(StatusReport),
    /// Suggestions for a new checkpoint description are ready
    DescriptionReady(Vec<String>),
    /// A checkpoint was created; carries a short summary
    CheckpointCreated(String),
    /// Checkpoint history was loaded, most recent first
    HistoryLoaded(Vec<Checkpoint>),
    /// The repository was reset to a checkpoint; carries a short summary
    RolledBack(String),
    /// The sync protocol finished
    Synced(SyncOutcome),
    /// A new repository was created
    RepositoryInitialized,
    /// A scheduled operation failed
    OperationFailed(OperationFailure),
}

impl Event {
    /// Converts a terminal event into a controller event.
    ///
    /// Key releases and repeats, mouse, focus and paste events are dropped.
    pub fn from_terminal(event: crossterm::event::Event) -> Option<Self> {
        match event {
            crossterm::event::Event::Key(key) if key.kind == KeyEventKind::Press => {
                Some(Event::Key(key))
            }
            crossterm::event::Event::Resize(w, h) => Some(Event::Resize(w, h)),
            _ => None,
        }
    }

    /// Returns true for events that answer a scheduled command
    pub fn is_completion(&self) -> bool {
        !matches!(
            self,
            Event::Key(_) | Event::Resize(..) | Event::Tick | Event::InputClosed
        )
    }
}

/// Asynchronous work requested by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load the repository status
    LoadStatus,
    /// Produce the suggestion list for description entry
    PrepareDescription,
    /// Stage everything and create a checkpoint
    CreateCheckpoint { message: String },
    /// Load the checkpoint history
    LoadHistory,
    /// Hard-reset to the given checkpoint id
    Rollback { id: String },
    /// Run the sync protocol
    Sync,
    /// Create a repository at the working directory
    InitRepository,
}

impl Command {
    /// The user-facing action this command performs
    pub fn action(&self) -> Action {
        match self {
            Command::LoadStatus => Action::LoadStatus,
            Command::PrepareDescription => Action::PrepareDescription,
            Command::CreateCheckpoint { .. } => Action::CreateCheckpoint,
            Command::LoadHistory => Action::LoadHistory,
            Command::Rollback { .. } => Action::Rollback,
            Command::Sync => Action::Sync,
            Command::InitRepository => Action::InitRepository,
        }
    }
}

/// Operation kinds, used to name the attempted action in failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    LoadStatus,
    PrepareDescription,
    CreateCheckpoint,
    LoadHistory,
    Rollback,
    Sync,
    InitRepository,
}

impl Action {
    /// Short description of what was being attempted
    pub fn describe(&self) -> &'static str {
        match self {
            Action::LoadStatus => "load status",
            Action::PrepareDescription => "prepare suggestions",
            Action::CreateCheckpoint => "save checkpoint",
            Action::LoadHistory => "load history",
            Action::Rollback => "roll back",
            Action::Sync => "sync",
            Action::InitRepository => "start the time machine",
        }
    }
}

/// A failed operation, reported to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationFailure {
    pub action: Action,
    pub message: String,
}

impl OperationFailure {
    pub fn new(action: Action, message: impl Into<String>) -> Self {
        OperationFailure {
            action,
            message: message.into(),
        }
    }
}

impl fmt::Display for OperationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to {}: {}", self.action.describe(), self.message)
    }
}
