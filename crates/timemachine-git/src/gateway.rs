//! Repository gateway
//!
//! The six operations the controller can schedule, each returning a value or
//! a [`GitError`]. [`GitGateway`] opens the repository afresh for every call,
//! so one gateway can be shared by concurrent blocking tasks.

use crate::error::{GitError, GitResult};
use crate::remote::{PullResult, PushResult};
use crate::repo::{short_id, CheckpointRepo, Identity};
use crate::sync::{run_sync, SyncBackend};
use std::path::{Path, PathBuf};
use timemachine_core::{text, Checkpoint, StatusReport, SyncOutcome};

/// Operations against the repository at one working directory
pub trait Gateway: Send + Sync {
    /// Status snapshot, or [`StatusReport::NotInitialized`] when no repository exists
    fn load_status(&self) -> GitResult<StatusReport>;

    /// Stages everything and commits it; returns a short summary
    fn create_checkpoint(&self, message: &str) -> GitResult<String>;

    /// Checkpoints reachable from the head, most recent first
    fn load_history(&self) -> GitResult<Vec<Checkpoint>>;

    /// Hard reset to `id`, discarding uncommitted changes; returns a short summary
    fn rollback(&self, id: &str) -> GitResult<String>;

    /// Runs the sync protocol
    fn sync(&self) -> GitResult<SyncOutcome>;

    /// Creates an empty repository; fails if one exists
    fn init_repository(&self) -> GitResult<()>;
}

/// Settings for [`GitGateway`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Remote used by sync and ahead/behind
    pub remote: String,
    /// Author of user checkpoints
    pub checkpoint_identity: Identity,
    /// Author of automatic conflict-resolution checkpoints
    pub conflict_identity: Identity,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            remote: "origin".to_string(),
            checkpoint_identity: Identity::new("Time Machine", "timemachine@local"),
            conflict_identity: Identity::new("Time Machine TUI", "timemachine@local"),
        }
    }
}

/// [`Gateway`] backed by git2
#[derive(Debug, Clone)]
pub struct GitGateway {
    workdir: PathBuf,
    config: GatewayConfig,
}

impl GitGateway {
    pub fn new(workdir: impl Into<PathBuf>, config: GatewayConfig) -> Self {
        GitGateway {
            workdir: workdir.into(),
            config,
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn open(&self) -> GitResult<CheckpointRepo> {
        CheckpointRepo::open(&self.workdir)
    }
}

impl Gateway for GitGateway {
    fn load_status(&self) -> GitResult<StatusReport> {
        let repo = match self.open() {
            Ok(repo) => repo,
            Err(GitError::NotARepository(_)) => return Ok(StatusReport::NotInitialized),
            Err(e) => return Err(e),
        };
        Ok(StatusReport::Loaded(repo.snapshot(&self.config.remote)?))
    }

    fn create_checkpoint(&self, message: &str) -> GitResult<String> {
        let repo = self.open()?;
        repo.stage_all()?;
        let oid = repo.commit(message, &self.config.checkpoint_identity)?;
        tracing::info!(id = %oid, "checkpoint saved");
        Ok(format!("{}{}", text::NOTICE_CHECKPOINT_SAVED, short_id(oid)))
    }

    fn load_history(&self) -> GitResult<Vec<Checkpoint>> {
        self.open()?.history()
    }

    fn rollback(&self, id: &str) -> GitResult<String> {
        let oid = self.open()?.reset_hard(id)?;
        Ok(format!("{}{}", text::NOTICE_ROLLED_BACK, short_id(oid)))
    }

    fn sync(&self) -> GitResult<SyncOutcome> {
        let repo = self.open()?;
        let backend = RepoSync {
            repo: &repo,
            remote: &self.config.remote,
            conflict_identity: &self.config.conflict_identity,
        };
        let outcome = run_sync(&backend)?;
        tracing::info!(
            pulled = outcome.pulled,
            pushed = outcome.pushed,
            conflict = outcome.conflict_auto_resolved,
            "sync finished"
        );
        Ok(outcome)
    }

    fn init_repository(&self) -> GitResult<()> {
        CheckpointRepo::init(&self.workdir).map(|_| ())
    }
}

/// The sync protocol's view of a repository and its remote
struct RepoSync<'a> {
    repo: &'a CheckpointRepo,
    remote: &'a str,
    conflict_identity: &'a Identity,
}

impl SyncBackend for RepoSync<'_> {
    fn has_remote(&self) -> bool {
        self.repo.has_remote(self.remote)
    }

    fn pull(&self) -> GitResult<PullResult> {
        self.repo.pull(self.remote)
    }

    fn is_clean(&self) -> GitResult<bool> {
        self.repo.is_clean()
    }

    fn stage_all(&self) -> GitResult<()> {
        self.repo.stage_all()
    }

    fn commit_resolution(&self, message: &str) -> GitResult<()> {
        self.repo.commit(message, self.conflict_identity).map(|_| ())
    }

    fn push(&self, force: bool) -> GitResult<PushResult> {
        self.repo.push(self.remote, force)
    }
}
