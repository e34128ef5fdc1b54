//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! - **[`app`]**: application state, keyboard event loop, command line input
//! - **[`panes`]**: stateless render functions for the document, command
//!   line, command log and status bar
//! - **[`theme`]**: color palette and the highlight-class to style mapping
//!
//! Construct an [`App`] around an [`Editor`] and call [`App::run`].
//!
//! [`Editor`]: crate::editor::Editor
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
