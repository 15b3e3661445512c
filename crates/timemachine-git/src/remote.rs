//! Remote transfer: fetch, pull (fast-forward only) and push

use crate::error::{GitError, GitResult};
use crate::repo::CheckpointRepo;
use git2::build::CheckoutBuilder;
use git2::{Cred, FetchOptions, FetchPrune, Oid, PushOptions, RemoteCallbacks, Repository};
use std::cell::{Cell, RefCell};

/// Credential attempts before giving up; libgit2 keeps asking otherwise
const MAX_AUTH_ATTEMPTS: usize = 3;

/// Result of a pull that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullResult {
    /// Nothing new on the remote
    UpToDate,
    /// The local branch moved forward to the remote's tip
    FastForwarded,
}

/// Result of a push that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushResult {
    /// The remote branch already points at the local head
    UpToDate,
    Pushed,
}

/// Callbacks answering credential requests from the ssh agent or the
/// configured credential helper
fn auth_callbacks<'a>(repo: &Repository) -> RemoteCallbacks<'a> {
    let config = repo.config().ok();
    let attempts = Cell::new(0usize);
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(move |url, username_from_url, allowed| {
        attempts.set(attempts.get() + 1);
        if attempts.get() > MAX_AUTH_ATTEMPTS {
            return Err(git2::Error::from_str("authentication failed"));
        }
        if allowed.is_ssh_key() {
            if let Some(user) = username_from_url {
                return Cred::ssh_key_from_agent(user);
            }
        }
        if allowed.is_user_pass_plaintext() {
            if let Some(cfg) = config.as_ref() {
                if let Ok(cred) = Cred::credential_helper(cfg, url, username_from_url) {
                    return Ok(cred);
                }
            }
        }
        Cred::default()
    });
    callbacks
}

impl CheckpointRepo {
    /// Whether a remote with this name is configured
    pub fn has_remote(&self, name: &str) -> bool {
        self.repo.find_remote(name).is_ok()
    }

    /// Branch name for transfers; a detached head cannot be synced
    fn sync_branch(&self) -> GitResult<String> {
        if self.repo.head_detached()? {
            return Err(GitError::DetachedHead);
        }
        self.branch_name()
    }

    /// Fetches the remote's configured refspecs, pruning tracking refs of
    /// deleted branches
    pub fn fetch(&self, remote_name: &str) -> GitResult<()> {
        let mut remote = self.repo.find_remote(remote_name)?;
        let mut options = FetchOptions::new();
        options.remote_callbacks(auth_callbacks(&self.repo));
        options.prune(FetchPrune::On);
        remote.fetch(&[] as &[&str], Some(&mut options), None)?;
        tracing::debug!(remote = remote_name, "fetched");
        Ok(())
    }

    /// Fetches and integrates the remote branch of the same name.
    ///
    /// Only fast-forwards are performed; anything else reports
    /// [`GitError::Diverged`]. A branch the remote does not have yet counts
    /// as up to date.
    pub fn pull(&self, remote_name: &str) -> GitResult<PullResult> {
        let branch = self.sync_branch()?;
        self.fetch(remote_name)?;

        let tracking = format!("refs/remotes/{}/{}", remote_name, branch);
        let upstream = match self.repo.find_reference(&tracking) {
            Ok(reference) => reference,
            Err(_) => return Ok(PullResult::UpToDate),
        };
        let annotated = self.repo.reference_to_annotated_commit(&upstream)?;
        let (analysis, _) = self.repo.merge_analysis(&[&annotated])?;

        if analysis.is_up_to_date() {
            return Ok(PullResult::UpToDate);
        }
        if !(analysis.is_fast_forward() || analysis.is_unborn()) {
            return Err(GitError::Diverged);
        }

        let target = self.repo.find_commit(annotated.id())?;
        let local_ref = format!("refs/heads/{}", branch);
        let mut checkout = CheckoutBuilder::new();
        checkout.safe();
        self.repo
            .checkout_tree(target.as_object(), Some(&mut checkout))?;
        self.repo.reference(
            &local_ref,
            target.id(),
            true,
            &format!("pull: fast-forward to {}", target.id()),
        )?;
        self.repo.set_head(&local_ref)?;
        tracing::info!(branch = %branch, target = %target.id(), "fast-forwarded");
        Ok(PullResult::FastForwarded)
    }

    /// Pushes the current branch to the remote branch of the same name.
    ///
    /// A plain push first fetches and reports [`PushResult::UpToDate`] when
    /// the remote-tracking branch already points at HEAD. Failures
    /// come back as [`GitError::PushRejected`], or [`GitError::ForcePush`]
    /// when `force` is set.
    pub fn push(&self, remote_name: &str, force: bool) -> GitResult<PushResult> {
        let rejected = |message: String| {
            if force {
                GitError::ForcePush(message)
            } else {
                GitError::PushRejected(message)
            }
        };

        let branch = self.sync_branch()?;
        let Some(head) = self.head_commit()? else {
            return Ok(PushResult::UpToDate);
        };
        let head_id = head.id();
        let refname = format!("refs/heads/{}", branch);
        let tracking = format!("refs/remotes/{}/{}", remote_name, branch);
        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|e| rejected(e.message().to_string()))?;

        if !force {
            self.fetch(remote_name).map_err(|e| rejected(e.to_string()))?;
            let current = self.repo.refname_to_id(&tracking).ok();
            if current == Some(head_id) {
                return Ok(PushResult::UpToDate);
            }
        }

        let refspec = if force {
            format!("+{0}:{0}", refname)
        } else {
            format!("{0}:{0}", refname)
        };

        let refusal: RefCell<Option<String>> = RefCell::new(None);
        {
            let mut callbacks = auth_callbacks(&self.repo);
            callbacks.push_update_reference(|_refname, status| {
                if let Some(message) = status {
                    *refusal.borrow_mut() = Some(message.to_string());
                }
                Ok(())
            });
            let mut options = PushOptions::new();
            options.remote_callbacks(callbacks);

            remote
                .push(&[refspec.as_str()], Some(&mut options))
                .map_err(|e| rejected(e.message().to_string()))?;
        }
        if let Some(message) = refusal.into_inner() {
            return Err(rejected(message));
        }

        // Keep the remote-tracking ref in step so ahead/behind stays accurate
        if let Err(e) = self.repo.reference(&tracking, head_id, true, "push") {
            tracing::warn!(error = %e, "could not update {}", tracking);
        }

        tracing::info!(branch = %branch, force, "pushed");
        Ok(PushResult::Pushed)
    }
}
