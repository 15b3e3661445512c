//! Sync protocol: pull, auto-resolve conflicts, push, force push
//!
//! Local history always wins. When the pull fails for any reason the
//! working tree is committed as-is under the conflict identity, and a
//! rejected plain push is retried once with force, which discards
//! remote-only commits. Only a failed forced push (or a failure to stage or
//! commit the resolution) aborts the protocol.
//!
//! Any plain push failure triggers the forced retry, including failures
//! unrelated to history such as a permission denial.

use crate::error::GitResult;
use crate::remote::{PullResult, PushResult};
use chrono::Local;
use timemachine_core::text;
use timemachine_core::SyncOutcome;

/// Repository capabilities the protocol needs
pub trait SyncBackend {
    fn has_remote(&self) -> bool;
    fn pull(&self) -> GitResult<PullResult>;
    fn is_clean(&self) -> GitResult<bool>;
    fn stage_all(&self) -> GitResult<()>;
    /// Commits the index under the fixed conflict-resolution identity
    fn commit_resolution(&self, message: &str) -> GitResult<()>;
    fn push(&self, force: bool) -> GitResult<PushResult>;
}

/// `Auto-resolve conflicts: YYYY-MM-DD HH:MM:SS` in local time
pub fn conflict_message() -> String {
    format!(
        "{}{}",
        text::CONFLICT_MESSAGE_PREFIX,
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )
}

/// Runs one sync attempt against `backend`
pub fn run_sync<B: SyncBackend + ?Sized>(backend: &B) -> GitResult<SyncOutcome> {
    if !backend.has_remote() {
        tracing::info!("no remote configured, skipping sync");
        return Ok(SyncOutcome {
            local_only: true,
            summary: text::NOTICE_NO_REMOTE.to_string(),
            ..SyncOutcome::default()
        });
    }

    let mut outcome = SyncOutcome::default();

    match backend.pull() {
        Ok(PullResult::UpToDate) => {
            tracing::debug!("pull: up to date");
            outcome.summary = text::NOTICE_UP_TO_DATE.to_string();
        }
        Ok(PullResult::FastForwarded) => {
            tracing::info!("pull: integrated remote changes");
            outcome.pulled = true;
            outcome.summary = text::NOTICE_PULLED.to_string();
        }
        Err(e) => {
            tracing::warn!(error = %e, "pull failed, keeping local state");
            resolve_conflict(backend)?;
            outcome.conflict_auto_resolved = true;
            outcome.summary = text::NOTICE_CONFLICTS_RESOLVED.to_string();
        }
    }

    let pull_up_to_date = outcome.summary == text::NOTICE_UP_TO_DATE;

    match backend.push(false) {
        Ok(PushResult::UpToDate) => {
            tracing::debug!("push: up to date");
            if !pull_up_to_date {
                outcome.summary.push_str(text::SUFFIX_PUSH_UP_TO_DATE);
            }
        }
        Ok(PushResult::Pushed) => {
            outcome.pushed = true;
            append_push_notice(&mut outcome, pull_up_to_date, text::NOTICE_PUSHED, text::SUFFIX_PUSHED);
        }
        Err(e) => {
            tracing::warn!(error = %e, "push rejected, retrying with force");
            backend.push(true)?;
            tracing::info!("force pushed local history");
            outcome.pushed = true;
            append_push_notice(
                &mut outcome,
                pull_up_to_date,
                text::NOTICE_FORCE_PUSHED,
                text::SUFFIX_FORCE_PUSHED,
            );
        }
    }

    Ok(outcome)
}

/// Commits whatever is in the working tree so the push can carry it.
///
/// A clean tree needs no commit. Status, staging and commit failures abort.
fn resolve_conflict<B: SyncBackend + ?Sized>(backend: &B) -> GitResult<()> {
    if backend.is_clean()? {
        return Ok(());
    }
    backend.stage_all()?;
    let message = conflict_message();
    backend.commit_resolution(&message)?;
    tracing::info!(%message, "committed conflict resolution");
    Ok(())
}

fn append_push_notice(outcome: &mut SyncOutcome, replace: bool, notice: &str, suffix: &str) {
    if replace {
        outcome.summary = notice.to_string();
    } else {
        outcome.summary.push_str(suffix);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GitError;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Backend answering from scripted results and recording every call
    #[derive(Default)]
    struct ScriptedBackend {
        no_remote: bool,
        pull: RefCell<Option<GitResult<PullResult>>>,
        clean: bool,
        stage_fails: bool,
        pushes: RefCell<VecDeque<GitResult<PushResult>>>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new(pull: GitResult<PullResult>, pushes: Vec<GitResult<PushResult>>) -> Self {
            ScriptedBackend {
                pull: RefCell::new(Some(pull)),
                clean: true,
                pushes: RefCell::new(pushes.into()),
                ..ScriptedBackend::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: &str) {
            self.calls.borrow_mut().push(call.to_string());
        }
    }

    impl SyncBackend for ScriptedBackend {
        fn has_remote(&self) -> bool {
            !self.no_remote
        }

        fn pull(&self) -> GitResult<PullResult> {
            self.record("pull");
            self.pull
                .borrow_mut()
                .take()
                .unwrap_or(Ok(PullResult::UpToDate))
        }

        fn is_clean(&self) -> GitResult<bool> {
            self.record("status");
            Ok(self.clean)
        }

        fn stage_all(&self) -> GitResult<()> {
            self.record("stage");
            if self.stage_fails {
                return Err(GitError::Stage(git2::Error::from_str("index locked")));
            }
            Ok(())
        }

        fn commit_resolution(&self, message: &str) -> GitResult<()> {
            self.record(&format!("commit:{}", message));
            Ok(())
        }

        fn push(&self, force: bool) -> GitResult<PushResult> {
            self.record(if force { "force-push" } else { "push" });
            self.pushes
                .borrow_mut()
                .pop_front()
                .unwrap_or(Ok(PushResult::Pushed))
        }
    }

    fn rejected() -> GitResult<PushResult> {
        Err(GitError::PushRejected("non-fast-forward".into()))
    }

    #[test]
    fn test_no_remote_is_local_only() {
        let backend = ScriptedBackend {
            no_remote: true,
            ..ScriptedBackend::default()
        };
        let outcome = run_sync(&backend).expect("not an error");
        assert!(outcome.local_only);
        assert!(!outcome.pulled);
        assert!(!outcome.pushed);
        assert_eq!(outcome.summary, text::NOTICE_NO_REMOTE);
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_everything_up_to_date() {
        let backend =
            ScriptedBackend::new(Ok(PullResult::UpToDate), vec![Ok(PushResult::UpToDate)]);
        let outcome = run_sync(&backend).expect("sync");
        assert_eq!(outcome.summary, text::NOTICE_UP_TO_DATE);
        assert!(!outcome.pulled && !outcome.pushed && !outcome.conflict_auto_resolved);
    }

    #[test]
    fn test_up_to_date_pull_then_push() {
        let backend = ScriptedBackend::new(Ok(PullResult::UpToDate), vec![Ok(PushResult::Pushed)]);
        let outcome = run_sync(&backend).expect("sync");
        assert!(outcome.pushed);
        assert_eq!(outcome.summary, text::NOTICE_PUSHED);
    }

    #[test]
    fn test_pulled_then_push_up_to_date() {
        let backend =
            ScriptedBackend::new(Ok(PullResult::FastForwarded), vec![Ok(PushResult::UpToDate)]);
        let outcome = run_sync(&backend).expect("sync");
        assert!(outcome.pulled);
        assert!(!outcome.pushed);
        assert_eq!(
            outcome.summary,
            format!("{}{}", text::NOTICE_PULLED, text::SUFFIX_PUSH_UP_TO_DATE)
        );
    }

    #[test]
    fn test_pulled_then_pushed() {
        let backend =
            ScriptedBackend::new(Ok(PullResult::FastForwarded), vec![Ok(PushResult::Pushed)]);
        let outcome = run_sync(&backend).expect("sync");
        assert_eq!(
            outcome.summary,
            format!("{}{}", text::NOTICE_PULLED, text::SUFFIX_PUSHED)
        );
        assert_eq!(backend.calls(), vec!["pull", "push"]);
    }

    #[test]
    fn test_conflict_with_dirty_tree_commits_and_force_pushes() {
        let mut backend =
            ScriptedBackend::new(Err(GitError::Diverged), vec![rejected(), Ok(PushResult::Pushed)]);
        backend.clean = false;

        let outcome = run_sync(&backend).expect("sync");
        assert!(outcome.conflict_auto_resolved);
        assert!(outcome.pushed);
        assert!(!outcome.pulled);
        assert_eq!(
            outcome.summary,
            format!(
                "{}{}",
                text::NOTICE_CONFLICTS_RESOLVED,
                text::SUFFIX_FORCE_PUSHED
            )
        );

        let calls = backend.calls();
        assert_eq!(calls[0], "pull");
        assert_eq!(calls[1], "status");
        assert_eq!(calls[2], "stage");
        assert!(calls[3].starts_with("commit:Auto-resolve conflicts: "));
        assert_eq!(&calls[4..], &["push", "force-push"]);
    }

    #[test]
    fn test_conflict_with_clean_tree_skips_commit() {
        let backend =
            ScriptedBackend::new(Err(GitError::Diverged), vec![Ok(PushResult::Pushed)]);
        let outcome = run_sync(&backend).expect("sync");
        assert!(outcome.conflict_auto_resolved);
        assert_eq!(backend.calls(), vec!["pull", "status", "push"]);
        assert_eq!(
            outcome.summary,
            format!("{}{}", text::NOTICE_CONFLICTS_RESOLVED, text::SUFFIX_PUSHED)
        );
    }

    #[test]
    fn test_stage_failure_is_fatal() {
        let mut backend = ScriptedBackend::new(Err(GitError::Diverged), vec![]);
        backend.clean = false;
        backend.stage_fails = true;
        let err = run_sync(&backend).expect_err("stage failure escalates");
        assert!(matches!(err, GitError::Stage(_)));
        assert!(!backend.calls().iter().any(|c| c.contains("push")));
    }

    #[test]
    fn test_force_push_after_up_to_date_pull() {
        let backend = ScriptedBackend::new(
            Ok(PullResult::UpToDate),
            vec![
                Err(GitError::PushRejected("permission denied".into())),
                Ok(PushResult::Pushed),
            ],
        );
        let outcome = run_sync(&backend).expect("sync");
        assert_eq!(outcome.summary, text::NOTICE_FORCE_PUSHED);
        assert!(outcome.pushed);
    }

    #[test]
    fn test_force_push_failure_is_fatal() {
        let backend = ScriptedBackend::new(
            Ok(PullResult::UpToDate),
            vec![
                rejected(),
                Err(GitError::ForcePush("remote hook declined".into())),
            ],
        );
        let err = run_sync(&backend).expect_err("forced push failure");
        assert!(matches!(err, GitError::ForcePush(ref m) if m == "remote hook declined"));
    }

    #[test]
    fn test_force_push_error_propagates_unchanged() {
        let backend = ScriptedBackend::new(
            Ok(PullResult::UpToDate),
            vec![rejected(), Err(GitError::DetachedHead)],
        );
        let err = run_sync(&backend).expect_err("forced push failure");
        assert!(matches!(err, GitError::DetachedHead));
        assert_eq!(backend.calls(), vec!["pull", "push", "force-push"]);
    }

    #[test]
    fn test_conflict_message_format() {
        let message = conflict_message();
        let stamp = message
            .strip_prefix(text::CONFLICT_MESSAGE_PREFIX)
            .expect("prefix");
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").is_ok());
    }
}
