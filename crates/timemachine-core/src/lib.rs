//! # timemachine-core
//!
//! State model, events and controller for the timemachine TUI.
//!
//! The application follows a strict one-way loop:
//!
//! ```text
//! Event ──▶ reducer::update(&mut AppState, Event) ──▶ Option<Command>
//!   ▲                                                      │
//!   └──────────── completion event ◀── executor ◀──────────┘
//! ```
//!
//! - [`AppState`] holds everything the renderer needs
//! - [`reducer::update`] is the only function that mutates it
//! - [`Command`] describes repository work to run off the UI thread
//! - [`Theme`] carries the colors the renderer draws with
//!
//! ## Example
//!
//! ```
//! use timemachine_core::{reducer, AppState, Command, Event, StatusReport};
//!
//! let mut state = AppState::new();
//! assert_eq!(reducer::init(&mut state), Command::LoadStatus);
//! assert!(state.is_loading());
//!
//! reducer::update(&mut state, Event::StatusLoaded(StatusReport::NotInitialized));
//! assert!(!state.is_loading());
//! ```

pub mod event;
pub mod menu;
pub mod model;
pub mod reducer;
pub mod state;
pub mod text;
pub mod theme;

pub use event::{Action, Command, Event, OperationFailure};
pub use menu::MenuItem;
pub use model::{Checkpoint, StatusReport, StatusSnapshot, SyncOutcome};
pub use state::{AppState, Mode, RepoPresence};
pub use theme::{BorderStyle, Theme, ThemeColors, ThemeConfig};
