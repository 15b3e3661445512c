//! Error types for the timemachine-git crate

use std::path::PathBuf;
use thiserror::Error;

/// Repository gateway errors
#[derive(Error, Debug)]
pub enum GitError {
    /// No repository at the working directory
    #[error("no repository at {0}")]
    NotARepository(PathBuf),

    /// `init` was asked to create a repository where one exists
    #[error("a repository already exists at {0}")]
    AlreadyInitialized(PathBuf),

    /// Adding working-tree changes to the index failed
    #[error("could not stage changes: {0}")]
    Stage(#[source] git2::Error),

    /// Writing the commit failed
    #[error("could not create checkpoint: {0}")]
    Commit(#[source] git2::Error),

    /// The identifier does not name a checkpoint in this repository
    #[error("unknown checkpoint: {0}")]
    UnknownCheckpoint(String),

    /// Hard reset failed
    #[error("could not reset to {id}: {source}")]
    Reset {
        id: String,
        #[source]
        source: git2::Error,
    },

    /// HEAD does not point at a branch
    #[error("HEAD is detached; check out a branch to sync")]
    DetachedHead,

    /// Local and remote history both have commits the other lacks
    #[error("local and remote history have diverged")]
    Diverged,

    /// The remote refused a plain push
    #[error("push rejected: {0}")]
    PushRejected(String),

    /// The forced push was refused too; the one fatal sync failure
    #[error("forced push failed: {0}")]
    ForcePush(String),

    /// Underlying engine failure
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    /// IO operation failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for gateway operations
pub type GitResult<T> = Result<T, GitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failure() {
        let err = GitError::Stage(git2::Error::from_str("index locked"));
        assert_eq!(err.to_string(), "could not stage changes: index locked");

        let err = GitError::UnknownCheckpoint("deadbeef".into());
        assert_eq!(err.to_string(), "unknown checkpoint: deadbeef");

        let err = GitError::ForcePush("denied".into());
        assert_eq!(err.to_string(), "forced push failed: denied");
    }

    #[test]
    fn test_from_git2() {
        let err: GitError = git2::Error::from_str("boom").into();
        assert!(matches!(err, GitError::Git(_)));
    }
}
