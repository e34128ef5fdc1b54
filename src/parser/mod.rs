//! Line parser
//!
//! Every command line is parsed on its own, against whichever grammar governs
//! the line it is inserted at:
//! - [`lexer`]: Tokenization (one line of text → tokens)
//! - [`grammar`]: Composable grammar primitives (parse, render, body lookup)
//! - [`language`]: The fixed language built from those primitives
//! - [`ast`]: Parsed values, rule labels and highlight classes
//!
//! # Parser Implementation
//!
//! Grammars are data, not code: an arena of combinator nodes interpreted by
//! [`grammar::Grammar::parse`]. The same nodes render a parsed value back to
//! styled text, which is what makes the document printable without keeping
//! the original input around.

pub mod ast;
pub mod grammar;
pub mod language;
pub mod lexer;
