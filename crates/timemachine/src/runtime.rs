//! The event loop
//!
//! One serial queue of [`Event`]s feeds the reducer. Terminal input and ticks
//! come from a dedicated input thread; every [`Command`] the reducer returns
//! runs on a blocking task and answers with exactly one completion event.

use color_eyre::eyre::Result;
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use timemachine_core::{reducer, AppState, Command, Event, Theme};
use timemachine_git::Gateway;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::executor;

/// Submits commands to the blocking pool
pub struct Runtime {
    gateway: Arc<dyn Gateway>,
    suggestions: Arc<[String]>,
    events: UnboundedSender<Event>,
}

impl Runtime {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        suggestions: Vec<String>,
        events: UnboundedSender<Event>,
    ) -> Self {
        Runtime {
            gateway,
            suggestions: suggestions.into(),
            events,
        }
    }

    /// Runs `command` off the loop; its completion arrives on the event queue.
    ///
    /// Must be called from within the tokio runtime.
    pub fn submit(&self, command: Command) {
        let gateway = Arc::clone(&self.gateway);
        let suggestions = Arc::clone(&self.suggestions);
        let events = self.events.clone();

        tracing::debug!(?command, "submitting");
        tokio::task::spawn_blocking(move || {
            let completion = executor::execute(gateway.as_ref(), command, &suggestions);
            if events.send(completion).is_err() {
                tracing::debug!("event loop closed, completion dropped");
            }
        });
    }
}

/// Runs the reducer loop until it asks to quit, rendering after every event.
///
/// Returns the final state.
pub async fn run_loop<B>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    runtime: &Runtime,
    events: &mut UnboundedReceiver<Event>,
) -> Result<AppState>
where
    B: Backend,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let mut state = AppState::new();
    runtime.submit(reducer::init(&mut state));
    terminal.draw(|frame| timemachine_ui::render(frame, &state, theme))?;

    while let Some(event) = events.recv().await {
        let completion = event.is_completion();
        if let Some(command) = reducer::update(&mut state, event) {
            runtime.submit(command);
        }
        if completion {
            tracing::debug!(loading = ?state.loading, error = ?state.last_error, "completion handled");
        }
        if state.should_quit {
            break;
        }
        terminal.draw(|frame| timemachine_ui::render(frame, &state, theme))?;
    }

    Ok(state)
}

/// Starts the thread forwarding terminal input and emitting ticks
pub fn spawn_input(events: UnboundedSender<Event>, tick_rate: Duration) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("timemachine-input".to_string())
        .spawn(move || {
            input_loop(&events, tick_rate, crossterm::event::poll, crossterm::event::read)
        })
}

/// Forwards input; a terminal failure becomes [`Event::InputClosed`]
fn input_loop<P, R>(events: &UnboundedSender<Event>, tick_rate: Duration, poll: P, read: R)
where
    P: FnMut(Duration) -> io::Result<bool>,
    R: FnMut() -> io::Result<crossterm::event::Event>,
{
    if let Err(e) = forward_input(events, tick_rate, poll, read) {
        tracing::warn!(error = %e, "terminal input failed, quitting");
        let _ = events.send(Event::InputClosed);
    }
}

/// Forwards input until the loop goes away (`Ok`) or reading the terminal fails
fn forward_input<P, R>(
    events: &UnboundedSender<Event>,
    tick_rate: Duration,
    mut poll: P,
    mut read: R,
) -> io::Result<()>
where
    P: FnMut(Duration) -> io::Result<bool>,
    R: FnMut() -> io::Result<crossterm::event::Event>,
{
    let mut last_tick = Instant::now();
    loop {
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if poll(timeout)? {
            if let Some(event) = Event::from_terminal(read()?) {
                if events.send(event).is_err() {
                    return Ok(());
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if events.send(Event::Tick).is_err() {
                return Ok(());
            }
            last_tick = Instant::now();
        }
    }
}
