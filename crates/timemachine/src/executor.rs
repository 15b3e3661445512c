//! Runs one command against the gateway and produces its completion event

use timemachine_core::{Command, Event, OperationFailure};
use timemachine_git::{Gateway, GitError};

/// Executes `command` and returns exactly one completion event.
///
/// Blocking: call from a blocking task. Errors become
/// [`Event::OperationFailed`] naming the attempted action.
pub fn execute(gateway: &dyn Gateway, command: Command, suggestions: &[String]) -> Event {
    let action = command.action();
    tracing::debug!(?command, "executing");

    let result: Result<Event, GitError> = match command {
        Command::LoadStatus => gateway.load_status().map(Event::StatusLoaded),
        Command::PrepareDescription => Ok(Event::DescriptionReady(suggestions.to_vec())),
        Command::CreateCheckpoint { message } => gateway
            .create_checkpoint(&message)
            .map(Event::CheckpointCreated),
        Command::LoadHistory => gateway.load_history().map(Event::HistoryLoaded),
        Command::Rollback { id } => gateway.rollback(&id).map(Event::RolledBack),
        Command::Sync => gateway.sync().map(Event::Synced),
        Command::InitRepository => gateway
            .init_repository()
            .map(|()| Event::RepositoryInitialized),
    };

    match result {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(action = action.describe(), error = %e, "operation failed");
            Event::OperationFailed(OperationFailure::new(action, e.to_string()))
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Utc;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::Mutex;
    use tempfile::TempDir;
    use timemachine_core::{
        reducer, text, Action, AppState, Checkpoint, Mode, StatusReport, StatusSnapshot,
        SyncOutcome,
    };
    use timemachine_git::{GatewayConfig, GitGateway, GitResult};

    /// Gateway returning canned values and recording the calls it receives
    #[derive(Default)]
    pub(crate) struct FakeGateway {
        pub(crate) calls: Mutex<Vec<String>>,
        pub(crate) fail_sync: bool,
    }

    impl FakeGateway {
        fn record(&self, call: &str) {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(call.to_string());
            }
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    impl Gateway for FakeGateway {
        fn load_status(&self) -> GitResult<StatusReport> {
            self.record("status");
            Ok(StatusReport::Loaded(StatusSnapshot {
                branch: "main".into(),
                is_clean: true,
                last_checkpoint: Some("first abc1234".into()),
                ..StatusSnapshot::default()
            }))
        }

        fn create_checkpoint(&self, message: &str) -> GitResult<String> {
            self.record(&format!("checkpoint:{}", message));
            Ok(format!("{}abc1234", text::NOTICE_CHECKPOINT_SAVED))
        }

        fn load_history(&self) -> GitResult<Vec<Checkpoint>> {
            self.record("history");
            Ok(vec![Checkpoint {
                id: "abc1234".into(),
                message: "first".into(),
                author: "Time Machine".into(),
                time: Utc::now(),
                is_current: true,
            }])
        }

        fn rollback(&self, id: &str) -> GitResult<String> {
            self.record(&format!("rollback:{}", id));
            Err(GitError::UnknownCheckpoint(id.to_string()))
        }

        fn sync(&self) -> GitResult<SyncOutcome> {
            self.record("sync");
            if self.fail_sync {
                return Err(GitError::ForcePush("remote hook declined".into()));
            }
            Ok(SyncOutcome {
                pushed: true,
                summary: text::NOTICE_PUSHED.into(),
                ..SyncOutcome::default()
            })
        }

        fn init_repository(&self) -> GitResult<()> {
            self.record("init");
            Ok(())
        }
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn enter() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
    }

    /// Feeds `event` to the reducer and runs every resulting command to completion
    fn drive(state: &mut AppState, gateway: &dyn Gateway, suggestions: &[String], event: Event) {
        let mut next = reducer::update(state, event);
        while let Some(command) = next {
            let completion = execute(gateway, command, suggestions);
            assert!(completion.is_completion());
            next = reducer::update(state, completion);
        }
    }

    #[test]
    fn test_prepare_description_uses_configured_suggestions() {
        let gateway = FakeGateway::default();
        let suggestions = vec!["one".to_string(), "two".to_string()];
        let event = execute(&gateway, Command::PrepareDescription, &suggestions);
        assert_eq!(event, Event::DescriptionReady(suggestions));
        assert!(gateway.calls().is_empty());
    }

    #[test]
    fn test_failure_names_action() {
        let gateway = FakeGateway::default();
        let event = execute(&gateway, Command::Rollback { id: "zz".into() }, &[]);
        match event {
            Event::OperationFailed(failure) => {
                assert_eq!(failure.action, Action::Rollback);
                assert_eq!(failure.message, "unknown checkpoint: zz");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_fatal_sync_reported_as_error() {
        let gateway = FakeGateway {
            fail_sync: true,
            ..FakeGateway::default()
        };
        let mut state = AppState::new();
        let first = reducer::init(&mut state);
        drive(&mut state, &gateway, &[], execute(&gateway, first, &[]));
        drive(&mut state, &gateway, &[], key('s'));

        assert!(!state.is_loading());
        assert_eq!(
            state.last_error.as_deref(),
            Some("Failed to sync: forced push failed: remote hook declined")
        );
        assert_eq!(gateway.calls(), vec!["status", "sync"]);
    }

    #[test]
    fn test_sync_success_refreshes_status() {
        let gateway = FakeGateway::default();
        let mut state = AppState::new();
        let first = reducer::init(&mut state);
        drive(&mut state, &gateway, &[], execute(&gateway, first, &[]));
        drive(&mut state, &gateway, &[], key('s'));

        assert_eq!(state.notice.as_deref(), Some(text::NOTICE_PUSHED));
        assert_eq!(gateway.calls(), vec!["status", "sync", "status"]);
    }

    #[test]
    fn test_picked_suggestion_becomes_checkpoint_message() {
        let dir = TempDir::new().expect("temp dir");
        let gateway = GitGateway::new(dir.path(), GatewayConfig::default());
        let suggestions = text::default_suggestions();
        let mut state = AppState::new();

        let first = reducer::init(&mut state);
        drive(&mut state, &gateway, &suggestions, execute(&gateway, first, &suggestions));
        assert_eq!(state.menu_items().len(), 1);

        // Start the time machine, then save a checkpoint picked with "2"
        drive(&mut state, &gateway, &suggestions, enter());
        assert!(state.last_error.is_none(), "{:?}", state.last_error);
        drive(&mut state, &gateway, &suggestions, key('c'));
        assert_eq!(state.mode, Mode::DescriptionEntry);
        drive(&mut state, &gateway, &suggestions, key('2'));
        drive(&mut state, &gateway, &suggestions, enter());

        assert!(state.last_error.is_none(), "{:?}", state.last_error);
        let history = gateway.load_history().expect("history");
        assert_eq!(history[0].message, suggestions[1]);
        assert!(history[0].is_current);
        assert!(state
            .notice
            .as_deref()
            .is_some_and(|n| n.starts_with(text::NOTICE_CHECKPOINT_SAVED)));
        assert!(state.status.as_ref().is_some_and(|s| s.has_checkpoints()));
    }

    #[test]
    fn test_history_then_rollback_through_real_gateway() {
        let dir = TempDir::new().expect("temp dir");
        let gateway = GitGateway::new(dir.path(), GatewayConfig::default());
        gateway.init_repository().expect("init");
        std::fs::write(dir.path().join("a.txt"), "one").expect("write");
        gateway.create_checkpoint("one").expect("checkpoint");
        std::fs::write(dir.path().join("a.txt"), "two").expect("write");
        gateway.create_checkpoint("two").expect("checkpoint");

        let mut state = AppState::new();
        let first = reducer::init(&mut state);
        drive(&mut state, &gateway, &[], execute(&gateway, first, &[]));
        drive(&mut state, &gateway, &[], key('r'));
        assert_eq!(state.mode, Mode::History);
        assert_eq!(state.checkpoints.len(), 2);

        drive(&mut state, &gateway, &[], key('j'));
        drive(&mut state, &gateway, &[], enter());

        assert_eq!(state.mode, Mode::Main);
        assert!(state
            .notice
            .as_deref()
            .is_some_and(|n| n.starts_with(text::NOTICE_ROLLED_BACK)));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("a.txt")).expect("read"),
            "one"
        );
    }
}
