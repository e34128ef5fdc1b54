//! Line records
//!
//! A document is a flat list of records, one per display line. Nesting is
//! encoded with a content record that opens a body and a [`Record::Close`]
//! further down at the same depth; nothing points from parent to child.

use crate::parser::ast::Value;
use crate::parser::grammar::GrammarId;

/// A parse result tagged with the grammar that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub grammar: GrammarId,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// A parsed line. `grammar` is the exact grammar that parsed it, kept
    /// because the value alone does not say which alternation it came from.
    Content {
        value: Value,
        grammar: GrammarId,
        opens_body: bool,
    },
    /// End of the body opened by the matching content record
    Close { body: GrammarId },
    Empty,
}

impl Record {
    pub fn opens_body(&self) -> bool {
        matches!(self, Record::Content { opens_body: true, .. })
    }

    pub fn is_close(&self) -> bool {
        matches!(self, Record::Close { .. })
    }
}
