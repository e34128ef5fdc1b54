//! Command-driven editing
//!
//! Each user action is one textual command. The log of committed commands is
//! the document's persistent form: replaying it from an empty document
//! rebuilds the same records and cursor.

mod command;
mod engine;
mod errors;
mod log;

pub use command::{is_goto, Command, DELETE_LINE, GOTO};
pub use engine::{Editor, Outcome};
pub use errors::EditorError;
pub use log::CommandLog;
