//! The controller: a reducer from `(state, event)` to an optional command
//!
//! [`update`] is the only place [`AppState`] is mutated. It never performs
//! I/O; asynchronous work is requested by returning a [`Command`], whose
//! completion comes back later as another [`Event`].
//!
//! While an operation is in flight (`loading`), every key is absorbed except
//! the force-quit chord `ctrl+c`, so two repository operations never overlap.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::event::{Command, Event};
use crate::menu::MenuItem;
use crate::state::{AppState, Mode, RepoPresence};
use crate::text;

/// Command issued when the application starts: the initial status load.
pub fn init(state: &mut AppState) -> Command {
    state.start_loading(text::LOADING_STATUS);
    Command::LoadStatus
}

/// Applies one event to the state and returns the follow-up command, if any.
pub fn update(state: &mut AppState, event: Event) -> Option<Command> {
    match event {
        Event::Key(key) => handle_key(state, key),
        Event::Resize(..) => None,
        Event::Tick => {
            if state.is_loading() {
                state.spinner_frame = state.spinner_frame.wrapping_add(1);
            }
            None
        }
        Event::InputClosed => {
            state.should_quit = true;
            None
        }
        completion => handle_completion(state, completion),
    }
}

fn is_force_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Plain character input, i.e. without ctrl/alt chords
fn plain_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            Some(c)
        }
        _ => None,
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Option<Command> {
    if state.is_loading() {
        if is_force_quit(&key) {
            state.should_quit = true;
        }
        return None;
    }

    state.notice = None;

    if is_force_quit(&key) {
        state.should_quit = true;
        return None;
    }

    match state.mode {
        Mode::Main => handle_main_key(state, key),
        Mode::DescriptionEntry => handle_description_key(state, key),
        Mode::History => handle_history_key(state, key),
    }
}

fn handle_main_key(state: &mut AppState, key: KeyEvent) -> Option<Command> {
    let len = state.menu_items().len();

    match key.code {
        KeyCode::Esc => {
            state.should_quit = true;
            None
        }
        KeyCode::Up => {
            state.menu_selected = state.menu_selected.saturating_sub(1);
            None
        }
        KeyCode::Down => {
            if state.menu_selected + 1 < len {
                state.menu_selected += 1;
            }
            None
        }
        KeyCode::Enter => activate_selected(state),
        _ => match plain_char(&key) {
            Some('q') => {
                state.should_quit = true;
                None
            }
            Some('k') => {
                state.menu_selected = state.menu_selected.saturating_sub(1);
                None
            }
            Some('j') => {
                if state.menu_selected + 1 < len {
                    state.menu_selected += 1;
                }
                None
            }
            Some(' ') => activate_selected(state),
            Some(c) => {
                let position = state
                    .menu_items()
                    .iter()
                    .position(|item| item.hotkey() == Some(c))?;
                state.menu_selected = position;
                activate_selected(state)
            }
            None => None,
        },
    }
}

fn activate_selected(state: &mut AppState) -> Option<Command> {
    let item = state.selected_menu_item()?;
    let (label, command) = match item {
        MenuItem::InitRepository => (text::LOADING_INIT, Command::InitRepository),
        MenuItem::CreateCheckpoint => (text::LOADING_DESCRIPTION, Command::PrepareDescription),
        MenuItem::ViewHistory | MenuItem::Rollback => (text::LOADING_HISTORY, Command::LoadHistory),
        MenuItem::Sync => (text::LOADING_SYNC, Command::Sync),
    };
    Some(dispatch(state, label, command))
}

fn handle_description_key(state: &mut AppState, key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Esc => {
            state.mode = Mode::Main;
            state.draft.clear();
            state.suggestions.clear();
            None
        }
        KeyCode::Enter => {
            let message = if state.draft.trim().is_empty() {
                text::DEFAULT_CHECKPOINT_MESSAGE.to_string()
            } else {
                std::mem::take(&mut state.draft)
            };
            state.mode = Mode::Main;
            state.draft.clear();
            state.suggestions.clear();
            Some(dispatch(
                state,
                text::LOADING_CHECKPOINT,
                Command::CreateCheckpoint { message },
            ))
        }
        KeyCode::Backspace => {
            state.draft.pop();
            None
        }
        _ => {
            match plain_char(&key) {
                // Digits pick a suggestion and are never typed into the draft.
                Some(digit @ '1'..='9') => {
                    let index = (digit as usize) - ('1' as usize);
                    if let Some(suggestion) = state.suggestions.get(index) {
                        state.draft = suggestion.clone();
                    }
                }
                Some(c) => state.draft.push(c),
                None => {}
            }
            None
        }
    }
}

fn handle_history_key(state: &mut AppState, key: KeyEvent) -> Option<Command> {
    let len = state.checkpoints.len();

    match key.code {
        KeyCode::Esc | KeyCode::Backspace => {
            leave_history(state);
            None
        }
        KeyCode::Up => {
            state.history_selected = state.history_selected.saturating_sub(1);
            None
        }
        KeyCode::Down => {
            if state.history_selected + 1 < len {
                state.history_selected += 1;
            }
            None
        }
        KeyCode::Enter => rollback_selected(state),
        _ => match plain_char(&key) {
            Some('q') => {
                state.should_quit = true;
                None
            }
            Some('k') => {
                state.history_selected = state.history_selected.saturating_sub(1);
                None
            }
            Some('j') => {
                if state.history_selected + 1 < len {
                    state.history_selected += 1;
                }
                None
            }
            Some(' ') => rollback_selected(state),
            _ => None,
        },
    }
}

fn rollback_selected(state: &mut AppState) -> Option<Command> {
    let id = state.selected_checkpoint()?.id.clone();
    leave_history(state);
    Some(dispatch(state, text::LOADING_ROLLBACK, Command::Rollback { id }))
}

fn leave_history(state: &mut AppState) {
    state.mode = Mode::Main;
    state.checkpoints.clear();
    state.history_selected = 0;
}

fn dispatch(state: &mut AppState, label: &str, command: Command) -> Command {
    state.last_error = None;
    state.start_loading(label);
    command
}

/// Schedules the status refresh that follows every status-affecting success
fn refresh_status(state: &mut AppState) -> Option<Command> {
    Some(dispatch(state, text::LOADING_STATUS, Command::LoadStatus))
}

fn handle_completion(state: &mut AppState, event: Event) -> Option<Command> {
    state.finish_loading();

    match event {
        Event::StatusLoaded(report) => {
            state.presence = RepoPresence::from_report(&report);
            state.status = match report {
                crate::model::StatusReport::NotInitialized => None,
                crate::model::StatusReport::Loaded(snapshot) => Some(snapshot),
            };
            state.last_error = None;
            state.clamp_selections();
            None
        }
        Event::DescriptionReady(suggestions) => {
            state.mode = Mode::DescriptionEntry;
            state.draft.clear();
            state.suggestions = suggestions;
            state.last_error = None;
            None
        }
        Event::CheckpointCreated(summary) => {
            state.notice = Some(summary);
            refresh_status(state)
        }
        Event::HistoryLoaded(checkpoints) => {
            state.mode = Mode::History;
            state.checkpoints = checkpoints;
            state.history_selected = 0;
            state.last_error = None;
            None
        }
        Event::RolledBack(summary) => {
            leave_history(state);
            state.notice = Some(summary);
            refresh_status(state)
        }
        Event::Synced(outcome) => {
            state.notice = Some(outcome.summary);
            refresh_status(state)
        }
        Event::RepositoryInitialized => refresh_status(state),
        Event::OperationFailed(failure) => {
            state.notice = None;
            state.last_error = Some(failure.to_string());
            None
        }
        Event::Key(_) | Event::Resize(..) | Event::Tick | Event::InputClosed => None,
    }
}
