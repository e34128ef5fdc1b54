//! The editor's language
//!
//! ```text
//! root        := class | struct
//! class       := 'class' Identifier              { member* }
//! struct      := 'struct' Identifier             { field* }
//! member      := method | field
//! method      := type Identifier '(' params ')'  { statement* }
//! params      := (type Identifier) (',' type Identifier)*   -- may be empty
//! field       := type Identifier
//! statement   := declaration | assignment
//! declaration := type Identifier '=' expression
//! assignment  := qualified '=' expression
//! type        := qualified
//! qualified   := Identifier ('.' Identifier)*
//! expression  := operand (operator operand)*
//! operand     := Number | Quote | qualified | '(' expression ')'
//! operator    := '+' | '-' | '*' | '/'
//! ```
//!
//! The bracketed parts are body grammars: the lines nested inside a class are
//! parsed as `member`, inside a method as `statement`.

use super::ast::{Highlight, Rule, Spacing, Value};
use super::grammar::{Grammar, GrammarId, ParseFailure};
use super::lexer::{Keyword, Token, TokenKind};
use crate::render::Styled;

/// The grammar arena plus the entry points the editor needs.
#[derive(Debug, Clone)]
pub struct Language {
    grammar: Grammar,
    root: GrammarId,
}

impl Language {
    pub fn new() -> Self {
        let mut g = Grammar::new();

        let type_name = g.token(TokenKind::Identifier, Highlight::Type, Spacing::Word);
        let name = g.token(TokenKind::Identifier, Highlight::Name, Spacing::Word);
        let dot = g.token(TokenKind::Punct('.'), Highlight::Punctuation, Spacing::Tight);
        let comma = g.token(TokenKind::Punct(','), Highlight::Punctuation, Spacing::Trailing);
        let open = g.token(TokenKind::Punct('('), Highlight::Punctuation, Spacing::Tight);
        let close = g.token(TokenKind::Punct(')'), Highlight::Punctuation, Spacing::Tight);
        let assign = g.token(TokenKind::Punct('='), Highlight::Operator, Spacing::Padded);

        let qualified_type = g.delimited(type_name, dot, 1, true);
        let qualified_name = g.delimited(name, dot, 1, true);

        // Expressions
        let expression = g.placeholder();
        let number = g.token(TokenKind::Number, Highlight::Number, Spacing::Word);
        let text = g.token(TokenKind::Quote, Highlight::Text, Spacing::Word);
        let group = g.sequence(vec![open, expression.id(), close]);
        let operand = g.alternation(vec![
            (Rule::Number, number),
            (Rule::Text, text),
            (Rule::Name, qualified_name),
            (Rule::Group, group),
        ]);
        let operators: Vec<(Rule, GrammarId)> = [
            (Rule::Add, '+'),
            (Rule::Subtract, '-'),
            (Rule::Multiply, '*'),
            (Rule::Divide, '/'),
        ]
        .into_iter()
        .map(|(rule, c)| {
            let op = g.token(TokenKind::Punct(c), Highlight::Operator, Spacing::Padded);
            (rule, op)
        })
        .collect();
        let operator = g.alternation(operators);
        let expression_body = g.delimited(operand, operator, 1, true);
        let expression_id = expression.id();
        g.resolve(expression, expression_body);

        // Statements
        let declaration = g.sequence(vec![qualified_type, name, assign, expression_id]);
        let assignment = g.sequence(vec![qualified_name, assign, expression_id]);
        let statement = g.alternation(vec![
            (Rule::Declaration, declaration),
            (Rule::Assignment, assignment),
        ]);

        // Members
        let param = g.sequence(vec![qualified_type, name]);
        let params = g.delimited(param, comma, 0, true);
        let method = g.sequence(vec![qualified_type, name, open, params, close]);
        g.set_body(method, statement);
        let field = g.sequence(vec![qualified_type, name]);
        let member = g.alternation(vec![(Rule::Method, method), (Rule::Field, field)]);
        let struct_member = g.alternation(vec![(Rule::Field, field)]);

        // Top level
        let class_kw = g.token(
            TokenKind::Keyword(Keyword::Class),
            Highlight::Keyword,
            Spacing::Word,
        );
        let struct_kw = g.token(
            TokenKind::Keyword(Keyword::Struct),
            Highlight::Keyword,
            Spacing::Word,
        );
        let class = g.sequence(vec![class_kw, type_name]);
        g.set_body(class, member);
        let struct_decl = g.sequence(vec![struct_kw, type_name]);
        g.set_body(struct_decl, struct_member);
        let root = g.alternation(vec![(Rule::Class, class), (Rule::Struct, struct_decl)]);

        Language { grammar: g, root }
    }

    /// Grammar for top-level lines
    pub fn root(&self) -> GrammarId {
        self.root
    }

    pub fn parse_line(&self, id: GrammarId, tokens: &[Token]) -> Result<Value, ParseFailure> {
        self.grammar.parse_line(id, tokens)
    }

    pub fn body_grammar(&self, id: GrammarId, value: &Value) -> Option<GrammarId> {
        self.grammar.body_grammar(id, value)
    }

    pub fn render(&self, id: GrammarId, value: &Value, out: &mut Styled) {
        self.grammar.render(id, value, out);
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::new()
    }
}
