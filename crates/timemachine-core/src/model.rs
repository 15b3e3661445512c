//! Values produced by the repository gateway and consumed by the controller

use chrono::{DateTime, Utc};

/// Latest known repository status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Current branch name (read from `HEAD` even before the first commit)
    pub branch: String,
    /// Whether the working tree has no uncommitted differences
    pub is_clean: bool,
    /// Paths with changes recorded in the index
    pub staged: Vec<String>,
    /// Tracked paths changed in the working tree
    pub modified: Vec<String>,
    /// Paths unknown to the repository
    pub untracked: Vec<String>,
    /// `"<first line> <short id>"` of the head checkpoint, `None` before the first one
    pub last_checkpoint: Option<String>,
    /// Commits ahead of / behind the remote-tracking branch, when one exists
    pub ahead_behind: Option<(usize, usize)>,
}

impl StatusSnapshot {
    /// Whether the repository has at least one checkpoint
    pub fn has_checkpoints(&self) -> bool {
        self.last_checkpoint.is_some()
    }
}

/// Result of loading the repository status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusReport {
    /// No repository exists at the working directory
    NotInitialized,
    /// A repository exists; the snapshot tells whether it has history
    Loaded(StatusSnapshot),
}

/// A named point in history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    /// Full commit id (hex)
    pub id: String,
    /// Commit message as recorded
    pub message: String,
    /// Author name
    pub author: String,
    /// Author timestamp
    pub time: DateTime<Utc>,
    /// Whether this checkpoint was the head when the list was loaded
    pub is_current: bool,
}

impl Checkpoint {
    /// Seven-character abbreviation of the id
    pub fn short_id(&self) -> &str {
        let end = self.id.len().min(7);
        &self.id[..end]
    }

    /// First line of the message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

/// Result of one synchronization attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Remote changes were integrated into the local branch
    pub pulled: bool,
    /// Local history was sent to the remote (plain or forced)
    pub pushed: bool,
    /// The pull failed and the local state was committed to win
    pub conflict_auto_resolved: bool,
    /// No remote is configured; nothing was transferred
    pub local_only: bool,
    /// Human-readable summary
    pub summary: String,
}
