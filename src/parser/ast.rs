// Parsed values produced by the grammar engine

use super::lexer::Token;

/// Labels for alternation branches.
///
/// Every branch of every alternation in the language carries one of these, so
/// a parsed value always records which rule matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    // Declarations
    Class,
    Struct,
    Field,
    Method,

    // Statements
    Declaration,
    Assignment,

    // Expression operands
    Number,
    Text,
    Name,
    Group,

    // Operators
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Rule {
    pub fn name(self) -> &'static str {
        match self {
            Rule::Class => "class",
            Rule::Struct => "struct",
            Rule::Field => "field",
            Rule::Method => "method",
            Rule::Declaration => "declaration",
            Rule::Assignment => "assignment",
            Rule::Number => "number",
            Rule::Text => "text",
            Rule::Name => "name",
            Rule::Group => "group",
            Rule::Add => "add",
            Rule::Subtract => "subtract",
            Rule::Multiply => "multiply",
            Rule::Divide => "divide",
        }
    }
}

/// Highlight class attached to every rendered fragment.
///
/// The core only knows these classes; the UI theme decides the colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Highlight {
    Keyword,
    Type,
    Name,
    Number,
    Text,
    Operator,
    Punctuation,
}

/// How a rendered token separates itself from its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spacing {
    /// One space between two adjacent words
    Word,
    /// Never adds a space
    Tight,
    /// Space on both sides
    Padded,
    /// Space after only
    Trailing,
}

/// The structured value of a successful parse.
///
/// The shape mirrors the grammar that produced it: a fixed token yields
/// `Token`, a sequence yields `Sequence` with one entry per element, an
/// alternation wraps the winning branch in `Branch`, and a delimited
/// repetition yields `List` with elements and delimiters interleaved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Token(Token),
    Sequence(Vec<Value>),
    Branch { rule: Rule, value: Box<Value> },
    List(Vec<Value>),
}

impl Value {
    /// Rule of the outermost branch, if this value came from an alternation
    pub fn rule(&self) -> Option<Rule> {
        match self {
            Value::Branch { rule, .. } => Some(*rule),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::TokenKind;

    #[test]
    fn test_rule_of_branch() {
        let value = Value::Branch {
            rule: Rule::Field,
            value: Box::new(Value::Sequence(vec![
                Value::List(vec![Value::Token(Token::new(TokenKind::Identifier, "int"))]),
                Value::Token(Token::new(TokenKind::Identifier, "x")),
            ])),
        };

        assert_eq!(value.rule(), Some(Rule::Field));
        assert_eq!(Rule::Field.name(), "field");
        assert_eq!(Value::Token(Token::new(TokenKind::Number, "1")).rule(), None);
    }
}
