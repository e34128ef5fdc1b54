//! TUI pane rendering modules
//!
//! - [`document`]: rendered records, line numbers, cursor gap and breadcrumbs
//! - [`command`]: the command line being typed
//! - [`history`]: the command log and pending redo count
//! - [`status`]: status bar with keybindings and the last message
//!
//! Each module exports a stateless `render_*` function; the only state kept
//! between frames is the document scroll offset.

pub mod command;
pub mod document;
pub mod history;
pub mod status;

pub use command::render_command_pane;
pub use document::{render_document_pane, DocumentRenderData, DocumentScrollState};
pub use history::render_history_pane;
pub use status::{render_status_bar, StatusRenderData};
