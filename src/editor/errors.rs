//! Error types for applying commands
//!
//! None of these are fatal to the editor. A failed command leaves the
//! document, the cursor and the log exactly as they were; the caller shows the
//! message and carries on.

use crate::document::DocumentError;
use crate::parser::grammar::ParseFailure;
use crate::parser::lexer::LexError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// Unterminated quote; the line could not be tokenized
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The line does not match the grammar governing the cursor
    #[error("Syntax error: {}", .0.message)]
    Syntax(#[from] ParseFailure),

    #[error("#goto needs a line number")]
    MissingGotoTarget,

    #[error("Invalid line number '{0}'")]
    InvalidGotoTarget(String),

    #[error("Unknown instruction '{0}'")]
    UnknownInstruction(String),

    /// The document lost its open/close balance
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}
