//! Document model
//!
//! The whole document is a single `Vec<Record>`; record `i` is display line
//! `i`. A cursor at line `n` sits in the gap *before* record `n`, so inserting
//! at the cursor means inserting at index `n` and the cursor can range over
//! `0..=line_count()`.
//!
//! Which grammar governs a line is never stored. [`Document::resolve_context`]
//! scans from the top, pushing a frame for every record that opens a body and
//! popping one at every close, so the answer always reflects the records as
//! they are now.
//!
//! # Invariant
//!
//! Every record with `opens_body` has exactly one matching [`Record::Close`]
//! at the same depth, and depth never goes negative. Insertion preserves it
//! by adding header and close together; deletion preserves it by removing
//! whole blocks. [`Document::check_balance`] verifies it.

mod record;

pub use record::{Parsed, Record};

use crate::parser::ast::{Highlight, Spacing};
use crate::parser::grammar::GrammarId;
use crate::parser::language::Language;
use crate::render::Styled;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("line {line}: closing brace without an open block")]
    UnmatchedClose { line: usize },

    #[error("line {line}: block is never closed")]
    UnclosedBlock { line: usize },
}

/// Where a line sits in the nesting structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineContext {
    /// Header lines of the enclosing blocks, outermost first
    pub path: Vec<usize>,
    /// Position among the enclosing block's direct children
    pub position: usize,
    /// Record index a new line is inserted at
    pub insert_at: usize,
    /// Grammar a new line here must match
    pub grammar: GrammarId,
}

/// Lines removed by [`Document::delete_line`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Removal {
    /// First removed line; the cursor re-homes here
    pub first: usize,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    records: Vec<Record>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, line: usize) -> Option<&Record> {
        self.records.get(line)
    }

    /// Resolve the nesting context of the gap before `line`.
    ///
    /// Lines past the end clamp to the end of the document.
    pub fn resolve_context(&self, language: &Language, line: usize) -> LineContext {
        let insert_at = line.min(self.records.len());

        // (header line, body grammar, children seen so far)
        let mut frames: Vec<(usize, GrammarId, usize)> = Vec::new();
        let mut root_children = 0;

        for (i, record) in self.records[..insert_at].iter().enumerate() {
            match record {
                Record::Close { .. } => {
                    frames.pop();
                }
                Record::Content {
                    value,
                    grammar,
                    opens_body,
                } => {
                    match frames.last_mut() {
                        Some(frame) => frame.2 += 1,
                        None => root_children += 1,
                    }
                    if *opens_body {
                        if let Some(body) = language.body_grammar(*grammar, value) {
                            frames.push((i, body, 0));
                        }
                    }
                }
                Record::Empty => match frames.last_mut() {
                    Some(frame) => frame.2 += 1,
                    None => root_children += 1,
                },
            }
        }

        let (grammar, position) = match frames.last() {
            Some(&(_, body, children)) => (body, children),
            None => (language.root(), root_children),
        };

        LineContext {
            path: frames.iter().map(|frame| frame.0).collect(),
            position,
            insert_at,
            grammar,
        }
    }

    /// Insert a parsed line before `line`.
    ///
    /// A value whose matched branch declares a body also gets its close
    /// record. Returns the number of display lines added (1 or 2).
    pub fn insert_parsed(&mut self, language: &Language, line: usize, parsed: Parsed) -> usize {
        let at = line.min(self.records.len());
        let body = language.body_grammar(parsed.grammar, &parsed.value);

        self.records.insert(
            at,
            Record::Content {
                value: parsed.value,
                grammar: parsed.grammar,
                opens_body: body.is_some(),
            },
        );

        match body {
            Some(body) => {
                self.records.insert(at + 1, Record::Close { body });
                2
            }
            None => 1,
        }
    }

    pub fn insert_empty(&mut self, line: usize) {
        let at = line.min(self.records.len());
        self.records.insert(at, Record::Empty);
    }

    /// Delete the record before `line`.
    ///
    /// When that record is a block boundary (its header or its close), the
    /// whole block goes with it. At line 0 nothing precedes the cursor and
    /// nothing is removed.
    pub fn delete_line(&mut self, line: usize) -> Result<Removal, DocumentError> {
        let line = line.min(self.records.len());
        if line == 0 {
            return Ok(Removal::default());
        }

        let previous = line - 1;
        let (first, last) = match &self.records[previous] {
            Record::Close { .. } => (self.block_start(previous)?, previous),
            Record::Content {
                opens_body: true, ..
            } => (previous, self.block_end(previous)?),
            _ => (previous, previous),
        };

        self.records.drain(first..=last);
        Ok(Removal {
            first,
            count: last - first + 1,
        })
    }

    /// Header line of the block closed at `close`, by backward balance scan
    fn block_start(&self, close: usize) -> Result<usize, DocumentError> {
        let mut pending = 0usize;
        for i in (0..=close).rev() {
            match &self.records[i] {
                Record::Close { .. } => pending += 1,
                record if record.opens_body() => {
                    pending -= 1;
                    if pending == 0 {
                        return Ok(i);
                    }
                }
                _ => {}
            }
        }
        Err(DocumentError::UnmatchedClose { line: close })
    }

    /// Close line of the block opened at `header`, by forward balance scan
    fn block_end(&self, header: usize) -> Result<usize, DocumentError> {
        let mut depth = 0usize;
        for (i, record) in self.records.iter().enumerate().skip(header) {
            if record.opens_body() {
                depth += 1;
            } else if record.is_close() {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
        }
        Err(DocumentError::UnclosedBlock { line: header })
    }

    /// Display lines of the block opened at `header`, header and close included
    pub fn block_line_count(&self, header: usize) -> Option<usize> {
        match self.records.get(header) {
            Some(record) if record.opens_body() => {
                self.block_end(header).ok().map(|end| end - header + 1)
            }
            _ => None,
        }
    }

    /// Verify that opens and closes pair up
    pub fn check_balance(&self) -> Result<(), DocumentError> {
        let mut open: Vec<usize> = Vec::new();
        for (i, record) in self.records.iter().enumerate() {
            if record.opens_body() {
                open.push(i);
            } else if record.is_close() && open.pop().is_none() {
                return Err(DocumentError::UnmatchedClose { line: i });
            }
        }
        match open.pop() {
            Some(line) => Err(DocumentError::UnclosedBlock { line }),
            None => Ok(()),
        }
    }

    /// Render one content record without indentation or brace
    pub fn render_line(&self, language: &Language, line: usize) -> Styled {
        let mut out = Styled::new();
        if let Some(Record::Content { value, grammar, .. }) = self.records.get(line) {
            language.render(*grammar, value, &mut out);
        }
        out
    }

    /// Render the whole document, one fragment line per record
    pub fn render(&self, language: &Language) -> Styled {
        let mut out = Styled::new();
        let mut depth = 0usize;

        for record in &self.records {
            match record {
                Record::Content {
                    value,
                    grammar,
                    opens_body,
                } => {
                    out.indent(depth);
                    language.render(*grammar, value, &mut out);
                    if *opens_body {
                        out.space();
                        out.text("{", Highlight::Punctuation, Spacing::Tight);
                        depth += 1;
                    }
                }
                Record::Close { .. } => {
                    depth = depth.saturating_sub(1);
                    out.indent(depth);
                    out.text("}", Highlight::Punctuation, Spacing::Tight);
                }
                Record::Empty => {}
            }
            out.newline();
        }

        out
    }
}
