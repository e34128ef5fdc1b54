//! Composable grammar primitives
//!
//! A [`Grammar`] is an arena of nodes addressed by [`GrammarId`]. Each node is
//! one of five primitives:
//!
//! - **Token**: matches one token of a fixed kind
//! - **Sequence**: all elements in order
//! - **Alternation**: labeled branches, first success wins
//! - **Delimited**: `element (delimiter element)*` with a minimum count
//! - **Recursive**: a placeholder filled in after construction
//!
//! The same nodes drive parsing ([`Grammar::parse`]), rendering
//! ([`Grammar::render`]) and nesting ([`Grammar::body_grammar`]): any node may
//! declare the grammar that governs the lines nested inside it.

use super::ast::{Highlight, Rule, Spacing, Value};
use super::lexer::{Token, TokenKind};
use crate::render::Styled;
use thiserror::Error;

/// Recursive references a single parse may follow before giving up
pub const MAX_NESTING: usize = 64;

/// Handle to a node in a [`Grammar`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GrammarId(usize);

/// A recursive reference that has not been resolved yet.
///
/// Not `Clone`: [`Grammar::resolve`] consumes it, so every placeholder is
/// assigned exactly once.
#[derive(Debug)]
pub struct Placeholder(GrammarId);

impl Placeholder {
    pub fn id(&self) -> GrammarId {
        self.0
    }
}

#[derive(Debug, Clone)]
pub enum Node {
    Token {
        kind: TokenKind,
        highlight: Highlight,
        spacing: Spacing,
    },
    Sequence(Vec<GrammarId>),
    Alternation(Vec<(Rule, GrammarId)>),
    Delimited {
        element: GrammarId,
        delimiter: GrammarId,
        min: usize,
        no_trailing: bool,
    },
    Recursive(Option<GrammarId>),
}

#[derive(Debug, Clone)]
struct Entry {
    node: Node,
    body: Option<GrammarId>,
}

/// Parse failure with the token position reached
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (at token {position})")]
pub struct ParseFailure {
    pub message: String,
    pub position: usize,
}

impl ParseFailure {
    fn new(message: impl Into<String>, position: usize) -> Self {
        ParseFailure {
            message: message.into(),
            position,
        }
    }
}

/// Cursor over a token slice
#[derive(Debug)]
pub struct TokenReader<'a> {
    tokens: &'a [Token],
    pub index: usize,
    /// Recursive references currently being followed
    depth: usize,
}

impl<'a> TokenReader<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            index: 0,
            depth: 0,
        }
    }

    pub fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.index)
    }

    pub fn is_at_end(&self) -> bool {
        self.index >= self.tokens.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Grammar {
    entries: Vec<Entry>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, node: Node) -> GrammarId {
        self.entries.push(Entry { node, body: None });
        GrammarId(self.entries.len() - 1)
    }

    pub fn token(&mut self, kind: TokenKind, highlight: Highlight, spacing: Spacing) -> GrammarId {
        self.push(Node::Token {
            kind,
            highlight,
            spacing,
        })
    }

    pub fn sequence(&mut self, items: Vec<GrammarId>) -> GrammarId {
        self.push(Node::Sequence(items))
    }

    pub fn alternation(&mut self, branches: Vec<(Rule, GrammarId)>) -> GrammarId {
        debug_assert!(
            branches
                .iter()
                .enumerate()
                .all(|(i, (rule, _))| branches[..i].iter().all(|(r, _)| r != rule)),
            "alternation labels must be unique"
        );
        self.push(Node::Alternation(branches))
    }

    /// `element (delimiter element)*`, at least `min` elements.
    ///
    /// With `no_trailing` the matched units must be odd, so a dangling
    /// delimiter is a failure instead of part of the value.
    pub fn delimited(
        &mut self,
        element: GrammarId,
        delimiter: GrammarId,
        min: usize,
        no_trailing: bool,
    ) -> GrammarId {
        self.push(Node::Delimited {
            element,
            delimiter,
            min,
            no_trailing,
        })
    }

    pub fn placeholder(&mut self) -> Placeholder {
        Placeholder(self.push(Node::Recursive(None)))
    }

    pub fn resolve(&mut self, placeholder: Placeholder, target: GrammarId) {
        self.entries[placeholder.0 .0].node = Node::Recursive(Some(target));
    }

    /// Declare the grammar governing lines nested inside `id`
    pub fn set_body(&mut self, id: GrammarId, body: GrammarId) {
        self.entries[id.0].body = Some(body);
    }

    /// Parse starting at the reader position.
    ///
    /// On failure the reader is left wherever the failing element stopped;
    /// callers that retry must reset `reader.index` themselves.
    pub fn parse(&self, id: GrammarId, reader: &mut TokenReader<'_>) -> Result<Value, ParseFailure> {
        match &self.entries[id.0].node {
            Node::Token { kind, .. } => {
                let Some(token) = reader.current() else {
                    return Err(ParseFailure::new(
                        format!("Expected {}, found end of line", kind),
                        reader.index,
                    ));
                };
                if token.kind != *kind {
                    return Err(ParseFailure::new(
                        format!("Expected {}, found {}", kind, token),
                        reader.index,
                    ));
                }
                reader.index += 1;
                Ok(Value::Token(token.clone()))
            }
            Node::Sequence(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.parse(*item, reader)?);
                }
                Ok(Value::Sequence(values))
            }
            Node::Alternation(branches) => {
                let start = reader.index;
                let mut best: Option<ParseFailure> = None;
                for (rule, branch) in branches {
                    reader.index = start;
                    match self.parse(*branch, reader) {
                        Ok(value) => {
                            return Ok(Value::Branch {
                                rule: *rule,
                                value: Box::new(value),
                            })
                        }
                        Err(failure) => {
                            if best.as_ref().map_or(true, |b| failure.position > b.position) {
                                best = Some(failure);
                            }
                        }
                    }
                }
                Err(best.unwrap_or_else(|| ParseFailure::new("No branches match", start)))
            }
            Node::Delimited {
                element,
                delimiter,
                min,
                no_trailing,
            } => self.parse_delimited(*element, *delimiter, *min, *no_trailing, reader),
            Node::Recursive(target) => match target {
                Some(_) if reader.depth >= MAX_NESTING => Err(ParseFailure::new(
                    format!("Nesting deeper than {} levels", MAX_NESTING),
                    reader.index,
                )),
                Some(target) => {
                    reader.depth += 1;
                    let result = self.parse(*target, reader);
                    reader.depth -= 1;
                    result
                }
                None => Err(ParseFailure::new("Unresolved recursive grammar", reader.index)),
            },
        }
    }

    fn parse_delimited(
        &self,
        element: GrammarId,
        delimiter: GrammarId,
        min: usize,
        no_trailing: bool,
        reader: &mut TokenReader<'_>,
    ) -> Result<Value, ParseFailure> {
        let mut items = Vec::new();
        let mut count = 0;
        let mut element_failure = None;

        loop {
            let start = reader.index;
            match self.parse(element, reader) {
                Ok(value) => {
                    items.push(value);
                    count += 1;
                }
                Err(failure) => {
                    reader.index = start;
                    element_failure = Some(failure);
                    break;
                }
            }

            let start = reader.index;
            match self.parse(delimiter, reader) {
                Ok(value) => items.push(value),
                Err(_) => {
                    reader.index = start;
                    break;
                }
            }
        }

        if count < min {
            let detail = element_failure
                .map(|f| format!(": {}", f.message))
                .unwrap_or_default();
            return Err(ParseFailure::new(
                format!("Expected at least {} item(s), found {}{}", min, count, detail),
                reader.index,
            ));
        }

        if no_trailing && !items.is_empty() && items.len() % 2 == 0 {
            return Err(element_failure.unwrap_or_else(|| {
                ParseFailure::new("Trailing delimiter", reader.index)
            }));
        }

        Ok(Value::List(items))
    }

    /// Parse a whole line: the grammar must consume every token
    pub fn parse_line(&self, id: GrammarId, tokens: &[Token]) -> Result<Value, ParseFailure> {
        let mut reader = TokenReader::new(tokens);
        let value = self.parse(id, &mut reader)?;
        match reader.current() {
            None => Ok(value),
            Some(token) => Err(ParseFailure::new(
                format!("Unexpected {}", token),
                reader.index,
            )),
        }
    }

    /// Body grammar of the node that actually matched `value`
    pub fn body_grammar(&self, id: GrammarId, value: &Value) -> Option<GrammarId> {
        let entry = &self.entries[id.0];
        if entry.body.is_some() {
            return entry.body;
        }
        match (&entry.node, value) {
            (Node::Alternation(branches), Value::Branch { rule, value }) => branches
                .iter()
                .find(|(r, _)| r == rule)
                .and_then(|(_, branch)| self.body_grammar(*branch, value)),
            (Node::Recursive(Some(target)), _) => self.body_grammar(*target, value),
            _ => None,
        }
    }

    /// Render `value` as produced by `id`
    pub fn render(&self, id: GrammarId, value: &Value, out: &mut Styled) {
        match (&self.entries[id.0].node, value) {
            (
                Node::Token {
                    highlight, spacing, ..
                },
                Value::Token(token),
            ) => {
                out.text(token.text.clone(), *highlight, *spacing);
            }
            (Node::Sequence(items), Value::Sequence(values)) => {
                for (item, value) in items.iter().zip(values) {
                    self.render(*item, value, out);
                }
            }
            (Node::Alternation(branches), Value::Branch { rule, value }) => {
                if let Some((_, branch)) = branches.iter().find(|(r, _)| r == rule) {
                    self.render(*branch, value, out);
                }
            }
            (
                Node::Delimited {
                    element, delimiter, ..
                },
                Value::List(values),
            ) => {
                for (i, value) in values.iter().enumerate() {
                    let id = if i % 2 == 0 { *element } else { *delimiter };
                    self.render(id, value, out);
                }
            }
            (Node::Recursive(Some(target)), _) => self.render(*target, value, out),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    fn ident(g: &mut Grammar) -> GrammarId {
        g.token(TokenKind::Identifier, Highlight::Name, Spacing::Word)
    }

    fn punct(g: &mut Grammar, c: char) -> GrammarId {
        g.token(TokenKind::Punct(c), Highlight::Punctuation, Spacing::Tight)
    }

    #[test]
    fn test_sequence_reports_deepest_failure() {
        let mut g = Grammar::new();
        let a = ident(&mut g);
        let eq = punct(&mut g, '=');
        let seq = g.sequence(vec![a, eq, a]);

        let tokens = tokenize("x = =").unwrap();
        let failure = g.parse_line(seq, &tokens).unwrap_err();
        assert_eq!(failure.position, 2);
        assert_eq!(failure.message, "Expected identifier, found '='");
    }

    #[test]
    fn test_alternation_resets_and_picks_first_success() {
        let mut g = Grammar::new();
        let a = ident(&mut g);
        let eq = punct(&mut g, '=');
        let pair = g.sequence(vec![a, a]);
        let assign = g.sequence(vec![a, eq, a]);
        let alt = g.alternation(vec![(Rule::Field, pair), (Rule::Assignment, assign)]);

        let tokens = tokenize("x = y").unwrap();
        let value = g.parse_line(alt, &tokens).unwrap();
        assert_eq!(value.rule(), Some(Rule::Assignment));
    }

    #[test]
    fn test_alternation_reports_furthest_branch() {
        let mut g = Grammar::new();
        let a = ident(&mut g);
        let eq = punct(&mut g, '=');
        let semi = punct(&mut g, ';');
        let short = g.sequence(vec![a, semi]);
        let long = g.sequence(vec![a, eq, a]);
        let alt = g.alternation(vec![(Rule::Field, short), (Rule::Assignment, long)]);

        let tokens = tokenize("x = 1").unwrap();
        let failure = g.parse_line(alt, &tokens).unwrap_err();
        assert_eq!(failure.position, 2);
        assert!(failure.message.contains("identifier"));
    }

    #[test]
    fn test_delimited_counts_and_trailing() {
        let mut g = Grammar::new();
        let a = ident(&mut g);
        let dot = punct(&mut g, '.');
        let dotted = g.delimited(a, dot, 1, true);

        let value = g.parse_line(dotted, &tokenize("a.b.c").unwrap()).unwrap();
        assert!(matches!(value, Value::List(ref items) if items.len() == 5));

        let failure = g.parse_line(dotted, &tokenize("a.b.").unwrap()).unwrap_err();
        assert_eq!(failure.message, "Expected identifier, found end of line");

        let failure = g.parse_line(dotted, &tokenize("").unwrap()).unwrap_err();
        assert!(failure.message.starts_with("Expected at least 1 item(s), found 0"));
    }

    #[test]
    fn test_delimited_allows_empty_with_zero_minimum() {
        let mut g = Grammar::new();
        let a = ident(&mut g);
        let comma = punct(&mut g, ',');
        let list = g.delimited(a, comma, 0, true);
        let open = punct(&mut g, '(');
        let close = punct(&mut g, ')');
        let call = g.sequence(vec![open, list, close]);

        assert!(g.parse_line(call, &tokenize("()").unwrap()).is_ok());
        assert!(g.parse_line(call, &tokenize("(a, b)").unwrap()).is_ok());
        assert!(g.parse_line(call, &tokenize("(a,)").unwrap()).is_err());
    }

    #[test]
    fn test_trailing_delimiter_kept_when_allowed() {
        let mut g = Grammar::new();
        let a = ident(&mut g);
        let comma = punct(&mut g, ',');
        let list = g.delimited(a, comma, 1, false);

        let value = g.parse_line(list, &tokenize("a, b,").unwrap()).unwrap();
        assert!(matches!(value, Value::List(ref items) if items.len() == 4));
    }

    #[test]
    fn test_recursive_placeholder() {
        let mut g = Grammar::new();
        let expr = g.placeholder();
        let a = ident(&mut g);
        let open = punct(&mut g, '(');
        let close = punct(&mut g, ')');
        let group = g.sequence(vec![open, expr.id(), close]);
        let atom = g.alternation(vec![(Rule::Name, a), (Rule::Group, group)]);
        let expr_id = expr.id();
        g.resolve(expr, atom);

        let value = g.parse_line(expr_id, &tokenize("((x))").unwrap()).unwrap();
        assert_eq!(value.rule(), Some(Rule::Group));

        let mut out = Styled::new();
        g.render(expr_id, &value, &mut out);
        assert_eq!(out.to_plain_text(4), "((x))");
    }

    #[test]
    fn test_nesting_is_capped() {
        let mut g = Grammar::new();
        let expr = g.placeholder();
        let a = ident(&mut g);
        let open = punct(&mut g, '(');
        let close = punct(&mut g, ')');
        let group = g.sequence(vec![open, expr.id(), close]);
        let atom = g.alternation(vec![(Rule::Name, a), (Rule::Group, group)]);
        let expr_id = expr.id();
        g.resolve(expr, atom);

        let deep = format!("{}x{}", "(".repeat(10_000), ")".repeat(10_000));
        let failure = g.parse_line(expr_id, &tokenize(&deep).unwrap()).unwrap_err();
        assert_eq!(failure.message, format!("Nesting deeper than {} levels", MAX_NESTING));
        assert_eq!(failure.position, MAX_NESTING);

        let shallow = format!("{}x{}", "(".repeat(30), ")".repeat(30));
        assert!(g.parse_line(expr_id, &tokenize(&shallow).unwrap()).is_ok());
    }

    #[test]
    fn test_unresolved_placeholder_fails() {
        let mut g = Grammar::new();
        let expr = g.placeholder();
        let failure = g.parse_line(expr.id(), &tokenize("x").unwrap()).unwrap_err();
        assert!(failure.message.contains("Unresolved"));
    }

    #[test]
    fn test_leftover_tokens_fail_the_line() {
        let mut g = Grammar::new();
        let a = ident(&mut g);
        let failure = g.parse_line(a, &tokenize("x y").unwrap()).unwrap_err();
        assert_eq!(failure.message, "Unexpected identifier 'y'");
        assert_eq!(failure.position, 1);
    }

    #[test]
    fn test_body_grammar_follows_matched_branch() {
        let mut g = Grammar::new();
        let a = ident(&mut g);
        let kw = g.token(
            TokenKind::Keyword(crate::parser::lexer::Keyword::Class),
            Highlight::Keyword,
            Spacing::Word,
        );
        let header = g.sequence(vec![kw, a]);
        let plain = g.sequence(vec![a]);
        g.set_body(header, plain);
        let alt = g.alternation(vec![(Rule::Class, header), (Rule::Field, plain)]);

        let class = g.parse_line(alt, &tokenize("class Foo").unwrap()).unwrap();
        assert_eq!(g.body_grammar(alt, &class), Some(plain));

        let field = g.parse_line(alt, &tokenize("x").unwrap()).unwrap();
        assert_eq!(g.body_grammar(alt, &field), None);
    }
}
