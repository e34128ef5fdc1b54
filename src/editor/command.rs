//! Command classification
//!
//! A command is one line of text. Its first token decides what it does:
//! nothing at all inserts an empty line, `#goto` and `#delete_line` are
//! instructions, and anything else is content for the grammar.

use super::errors::EditorError;
use crate::parser::lexer::{tokenize, Token, TokenKind};

pub const GOTO: &str = "#goto";
pub const DELETE_LINE: &str = "#delete_line";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    /// Unclamped target line; negative targets are already floored to 0
    Goto(usize),
    DeleteLine,
    Content(Vec<Token>),
}

impl Command {
    pub fn parse(text: &str) -> Result<Self, EditorError> {
        let tokens = tokenize(text)?;
        let Some(first) = tokens.first() else {
            return Ok(Command::Empty);
        };

        match &first.kind {
            TokenKind::Instruction(name) if name == DELETE_LINE => Ok(Command::DeleteLine),
            TokenKind::Instruction(name) if name == GOTO => goto_target(&tokens[1..]),
            TokenKind::Instruction(name) => Err(EditorError::UnknownInstruction(name.clone())),
            _ => Ok(Command::Content(tokens)),
        }
    }
}

/// Whether `text` is a `#goto` instruction, without validating its target
pub fn is_goto(text: &str) -> bool {
    tokenize(text)
        .ok()
        .and_then(|tokens| tokens.into_iter().next())
        .is_some_and(|token| token.is_instruction(GOTO))
}

/// Accepts `N`, `-N` and fractional numbers (truncated)
fn goto_target(args: &[Token]) -> Result<Command, EditorError> {
    let (negative, number) = match args {
        [] => return Err(EditorError::MissingGotoTarget),
        [sign, number] if sign.kind == TokenKind::Punct('-') => (true, number),
        [number] => (false, number),
        _ => {
            let text: Vec<&str> = args.iter().map(|t| t.text.as_str()).collect();
            return Err(EditorError::InvalidGotoTarget(text.join(" ")));
        }
    };

    if number.kind != TokenKind::Number {
        return Err(EditorError::InvalidGotoTarget(number.text.clone()));
    }
    let value: f64 = number
        .text
        .parse()
        .map_err(|_| EditorError::InvalidGotoTarget(number.text.clone()))?;

    if negative {
        Ok(Command::Goto(0))
    } else {
        Ok(Command::Goto(value as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Command::parse("").unwrap(), Command::Empty);
        assert_eq!(Command::parse("   ").unwrap(), Command::Empty);
        assert_eq!(Command::parse("#delete_line").unwrap(), Command::DeleteLine);
        assert_eq!(Command::parse("#goto 4").unwrap(), Command::Goto(4));
        assert!(matches!(Command::parse("class Foo").unwrap(), Command::Content(ref t) if t.len() == 2));
    }

    #[test]
    fn test_goto_targets() {
        assert_eq!(Command::parse("#goto -1").unwrap(), Command::Goto(0));
        assert_eq!(Command::parse("#goto 2.7").unwrap(), Command::Goto(2));
        assert_eq!(Command::parse("#goto").unwrap_err(), EditorError::MissingGotoTarget);
        assert_eq!(
            Command::parse("#goto x").unwrap_err(),
            EditorError::InvalidGotoTarget("x".to_string())
        );
        assert_eq!(
            Command::parse("#goto 1.2.3").unwrap_err(),
            EditorError::InvalidGotoTarget("1.2.3".to_string())
        );
    }

    #[test]
    fn test_unknown_instruction() {
        assert_eq!(
            Command::parse("#undo").unwrap_err(),
            EditorError::UnknownInstruction("#undo".to_string())
        );
    }

    #[test]
    fn test_lex_errors_surface() {
        assert!(matches!(Command::parse("x = 'a").unwrap_err(), EditorError::Lex(_)));
    }

    #[test]
    fn test_is_goto() {
        assert!(is_goto("#goto 3"));
        assert!(is_goto("  #goto"));
        assert!(!is_goto("#delete_line"));
        assert!(!is_goto("goto 3"));
        assert!(!is_goto(""));
    }
}
