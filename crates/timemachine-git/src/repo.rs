//! Repository operations
//!
//! A thin wrapper around git2 with the local operations the time machine
//! needs: status, staging everything, checkpoints, history and hard reset.
//! Remote transfer lives in [`crate::remote`].

use crate::error::{GitError, GitResult};
use chrono::{DateTime, TimeZone, Utc};
use git2::{
    Commit, ErrorCode, IndexAddOption, Oid, Repository, ResetType, Signature, Sort, Status,
    StatusOptions,
};
use std::path::{Path, PathBuf};
use timemachine_core::{Checkpoint, StatusSnapshot};

/// Name and email written as author and committer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Identity {
            name: name.into(),
            email: email.into(),
        }
    }

    fn signature(&self) -> Result<Signature<'static>, git2::Error> {
        Signature::now(&self.name, &self.email)
    }
}

/// Working-tree paths grouped the way the status panel shows them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileLists {
    pub staged: Vec<String>,
    pub modified: Vec<String>,
    pub untracked: Vec<String>,
}

impl FileLists {
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty() && self.modified.is_empty() && self.untracked.is_empty()
    }
}

const INDEX_CHANGES: Status = Status::INDEX_NEW
    .union(Status::INDEX_MODIFIED)
    .union(Status::INDEX_DELETED)
    .union(Status::INDEX_RENAMED)
    .union(Status::INDEX_TYPECHANGE);

const WORKTREE_CHANGES: Status = Status::WT_MODIFIED
    .union(Status::WT_DELETED)
    .union(Status::WT_RENAMED)
    .union(Status::WT_TYPECHANGE)
    .union(Status::CONFLICTED);

/// Seven-character abbreviation of a commit id
pub fn short_id(oid: Oid) -> String {
    let mut id = oid.to_string();
    id.truncate(7);
    id
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or("")
}

/// Repository at a fixed working directory
pub struct CheckpointRepo {
    pub(crate) repo: Repository,
    root: PathBuf,
}

impl std::fmt::Debug for CheckpointRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckpointRepo")
            .field("root", &self.root)
            .finish()
    }
}

impl CheckpointRepo {
    /// Opens the repository whose working directory is `workdir`.
    ///
    /// Parent directories are not searched: the time machine belongs to the
    /// folder it was started in.
    pub fn open(workdir: &Path) -> GitResult<Self> {
        let repo = match Repository::open(workdir) {
            Ok(repo) => repo,
            Err(e) if e.code() == ErrorCode::NotFound => {
                return Err(GitError::NotARepository(workdir.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };
        let root = repo
            .workdir()
            .ok_or_else(|| GitError::NotARepository(workdir.to_path_buf()))?
            .to_path_buf();

        Ok(CheckpointRepo { repo, root })
    }

    /// Creates an empty repository at `workdir`
    pub fn init(workdir: &Path) -> GitResult<Self> {
        if Repository::open(workdir).is_ok() {
            return Err(GitError::AlreadyInitialized(workdir.to_path_buf()));
        }
        Repository::init(workdir)?;
        tracing::info!(path = %workdir.display(), "initialized repository");
        Self::open(workdir)
    }

    /// Get the repository root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Current branch name.
    ///
    /// Before the first commit the name comes from `HEAD`'s symbolic target;
    /// a detached head shows its short id.
    pub fn branch_name(&self) -> GitResult<String> {
        match self.repo.head() {
            Ok(head) if head.is_branch() => Ok(head.shorthand().unwrap_or("HEAD").to_string()),
            Ok(head) => Ok(short_id(head.peel_to_commit()?.id())),
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let head = self.repo.find_reference("HEAD")?;
                let target = head.symbolic_target().unwrap_or("HEAD");
                Ok(target.trim_start_matches("refs/heads/").to_string())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Commit at `HEAD`, or `None` before the first checkpoint
    pub fn head_commit(&self) -> GitResult<Option<Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Working-tree paths grouped into staged, modified and untracked
    pub fn file_lists(&self) -> GitResult<FileLists> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true);
        opts.include_ignored(false);
        opts.recurse_untracked_dirs(true);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let mut lists = FileLists::default();

        for entry in statuses.iter() {
            let Some(path) = entry.path() else { continue };
            let status = entry.status();

            if status.intersects(INDEX_CHANGES) {
                lists.staged.push(path.to_string());
            }
            if status.intersects(WORKTREE_CHANGES) {
                lists.modified.push(path.to_string());
            }
            if status.intersects(Status::WT_NEW) {
                lists.untracked.push(path.to_string());
            }
        }

        Ok(lists)
    }

    pub fn is_clean(&self) -> GitResult<bool> {
        Ok(self.file_lists()?.is_clean())
    }

    /// Full status snapshot; `remote` names the remote used for ahead/behind
    pub fn snapshot(&self, remote: &str) -> GitResult<StatusSnapshot> {
        let branch = self.branch_name()?;
        let lists = self.file_lists()?;
        let head = self.head_commit()?;

        let last_checkpoint = head.as_ref().map(|commit| {
            format!(
                "{} {}",
                first_line(commit.message().unwrap_or("")),
                short_id(commit.id())
            )
        });
        let ahead_behind = match head.as_ref() {
            Some(commit) => self.ahead_behind(remote, &branch, commit.id())?,
            None => None,
        };

        Ok(StatusSnapshot {
            branch,
            is_clean: lists.is_clean(),
            staged: lists.staged,
            modified: lists.modified,
            untracked: lists.untracked,
            last_checkpoint,
            ahead_behind,
        })
    }

    /// Commits ahead of / behind `refs/remotes/<remote>/<branch>`, if that ref exists
    fn ahead_behind(
        &self,
        remote: &str,
        branch: &str,
        local: Oid,
    ) -> GitResult<Option<(usize, usize)>> {
        let tracking = format!("refs/remotes/{}/{}", remote, branch);
        let upstream = match self.repo.refname_to_id(&tracking) {
            Ok(oid) => oid,
            Err(_) => return Ok(None),
        };
        Ok(Some(self.repo.graph_ahead_behind(local, upstream)?))
    }

    /// Stages every change in the working tree, including deletions
    pub fn stage_all(&self) -> GitResult<()> {
        let mut index = self.repo.index().map_err(GitError::Stage)?;
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .map_err(GitError::Stage)?;
        index
            .update_all(["*"].iter(), None)
            .map_err(GitError::Stage)?;
        index.write().map_err(GitError::Stage)?;
        Ok(())
    }

    /// Commits the index on top of `HEAD`.
    ///
    /// Empty commits are allowed so a checkpoint can always be saved.
    pub fn commit(&self, message: &str, identity: &Identity) -> GitResult<Oid> {
        let signature = identity.signature().map_err(GitError::Commit)?;
        let mut index = self.repo.index().map_err(GitError::Commit)?;
        let tree_id = index.write_tree().map_err(GitError::Commit)?;
        let tree = self.repo.find_tree(tree_id).map_err(GitError::Commit)?;

        let parent = self.head_commit()?;
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .map_err(GitError::Commit)?;
        tracing::debug!(id = %oid, author = %identity.name, "created commit");
        Ok(oid)
    }

    /// Checkpoints reachable from `HEAD`, most recent first
    pub fn history(&self) -> GitResult<Vec<Checkpoint>> {
        let Some(head) = self.head_commit()? else {
            return Ok(Vec::new());
        };
        let head_id = head.id();

        let mut walk = self.repo.revwalk()?;
        walk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        walk.push(head_id)?;

        let mut checkpoints = Vec::new();
        for oid in walk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            let author = commit.author();
            let time: DateTime<Utc> = Utc
                .timestamp_opt(author.when().seconds(), 0)
                .single()
                .unwrap_or_else(Utc::now);

            checkpoints.push(Checkpoint {
                id: oid.to_string(),
                message: commit
                    .message()
                    .unwrap_or("")
                    .trim_end_matches('\n')
                    .to_string(),
                author: author.name().unwrap_or("Unknown").to_string(),
                time,
                is_current: oid == head_id,
            });
        }

        Ok(checkpoints)
    }

    /// Hard-resets working tree, index and branch to the checkpoint `id`.
    ///
    /// Uncommitted changes are discarded. Identifiers that do not name a
    /// checkpoint in the current history fail without touching anything.
    pub fn reset_hard(&self, id: &str) -> GitResult<Oid> {
        let unknown = || GitError::UnknownCheckpoint(id.to_string());

        let target = self
            .repo
            .revparse_single(id)
            .and_then(|object| object.peel_to_commit())
            .map_err(|_| unknown())?;
        let head = self.head_commit()?.ok_or_else(unknown)?;

        let in_history = target.id() == head.id()
            || self
                .repo
                .graph_descendant_of(head.id(), target.id())
                .unwrap_or(false);
        if !in_history {
            return Err(unknown());
        }

        self.repo
            .reset(target.as_object(), ResetType::Hard, None)
            .map_err(|source| GitError::Reset {
                id: id.to_string(),
                source,
            })?;
        tracing::info!(id = %target.id(), "reset hard");
        Ok(target.id())
    }
}
