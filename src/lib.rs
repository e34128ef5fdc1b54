//! # Introduction
//!
//! strucedit is a structural editor for a small class-based language. Lines
//! are never edited as free text: each one is typed as a command, parsed
//! against the grammar that governs the cursor position, and inserted as a
//! structured record. The log of commands is the saved form of a document;
//! loading replays it and undo replays all but the last entry.
//!
//! ## Pipeline
//!
//! ```text
//! Command → Lexer → Grammar (by cursor context) → Record → Document → Render → TUI
//! ```
//!
//! 1. [`parser`]: tokenizer, grammar combinators and the language grammar.
//! 2. [`document`]: the flat record list, context resolution and block-aware
//!    deletion.
//! 3. [`editor`]: command dispatch, the command log, replay and undo/redo.
//! 4. [`render`]: highlight-tagged fragments shared by the TUI and the
//!    plain-text output.
//! 5. [`storage`] and [`config`]: the saved log file and layered settings.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Language
//!
//! Top level: `class Name`, `struct Name`. Class members are fields
//! (`Type name`) and methods (`Type name(Type a, Type b)`); struct members are
//! fields only. Method bodies hold declarations (`Type name = expr`) and
//! assignments (`a.b = expr`) over numbers, quotes, qualified names, groups
//! and `+ - * /`.

pub mod config;
pub mod document;
pub mod editor;
pub mod parser;
pub mod render;
pub mod storage;
pub mod ui;
