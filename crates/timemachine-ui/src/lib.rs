//! # timemachine-ui
//!
//! View renderer for the timemachine TUI.
//!
//! [`render`] draws an [`timemachine_core::AppState`] into a ratatui frame.
//! It reads the state and never changes it; everything it shows is derived
//! from the state and the [`timemachine_core::Theme`].
//!
//! ## Layout
//!
//! ```
//! use timemachine_ui::AppLayout;
//! use ratatui::prelude::Rect;
//!
//! let layout = AppLayout::new(Rect::new(0, 0, 80, 24));
//! assert_eq!(layout.title.height, 1);
//! assert_eq!(layout.content.height, 21);
//! assert_eq!(layout.status_bar.y, 23);
//! ```

pub mod layout;
pub mod render;
pub mod widgets;

pub use layout::AppLayout;
pub use render::render;
pub use widgets::{
    DescriptionPrompt, HistoryList, MenuPanel, MessageLine, StatusBar, StatusPanel,
};
