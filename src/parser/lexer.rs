//! Lexer (tokenizer) for a single command line
//!
//! Converts one line of raw text into a flat [`Token`] stream. The lexer never
//! rejects a character: anything it does not recognise becomes a one-character
//! punctuation token, and the grammar decides whether it belongs there. The only
//! fatal condition is a quoted string that is never closed.

use std::fmt;
use thiserror::Error;

/// Bareword literals the grammar recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Class,
    Struct,
    Enum,
    If,
    For,
}

impl Keyword {
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "class" => Some(Keyword::Class),
            "struct" => Some(Keyword::Struct),
            "enum" => Some(Keyword::Enum),
            "if" => Some(Keyword::If),
            "for" => Some(Keyword::For),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Class => "class",
            Keyword::Struct => "struct",
            Keyword::Enum => "enum",
            Keyword::If => "if",
            Keyword::For => "for",
        }
    }
}

/// The kind a grammar matches against.
///
/// Punctuation carries its own character and instructions carry their full
/// `#name` text, so two tokens have the same kind exactly when a fixed-token
/// grammar would accept both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Number,
    Quote,
    Keyword(Keyword),
    Instruction(String),
    Punct(char),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::Quote => write!(f, "quoted string"),
            TokenKind::Keyword(k) => write!(f, "'{}'", k.as_str()),
            TokenKind::Instruction(name) => write!(f, "'{}'", name),
            TokenKind::Punct(c) => write!(f, "'{}'", c),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }

    pub fn is_instruction(&self, name: &str) -> bool {
        matches!(&self.kind, TokenKind::Instruction(n) if n == name)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::Number => write!(f, "number {}", self.text),
            TokenKind::Quote => write!(f, "string {}", self.text),
            _ => write!(f, "{}", self.kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at column {column}: {message}")]
pub struct LexError {
    pub message: String,
    pub column: usize,
}

/// Lexer for one command line
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the entire line
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            while self.peek() == Some(' ') {
                self.advance();
            }

            let Some(ch) = self.peek() else {
                break;
            };

            let token = match ch {
                '#' => self.instruction(),
                'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(),
                '0'..='9' => self.number_literal(),
                '\'' | '"' => self.quote(ch)?,
                _ => {
                    self.advance();
                    Token::new(TokenKind::Punct(ch), ch.to_string())
                }
            };
            tokens.push(token);
        }

        Ok(tokens)
    }

    /// `#` followed by alphanumerics; the whole text is the kind
    fn instruction(&mut self) -> Token {
        let start = self.position;
        self.advance();
        self.consume_while(is_word_char);
        let text = self.slice(start);
        Token::new(TokenKind::Instruction(text.clone()), text)
    }

    fn identifier_or_keyword(&mut self) -> Token {
        let start = self.position;
        self.advance();
        self.consume_while(is_word_char);
        let text = self.slice(start);

        match Keyword::from_word(&text) {
            Some(keyword) => Token::new(TokenKind::Keyword(keyword), text),
            None => Token::new(TokenKind::Identifier, text),
        }
    }

    /// Digits and dots; no validation beyond that
    fn number_literal(&mut self) -> Token {
        let start = self.position;
        self.advance();
        self.consume_while(|c| c.is_ascii_digit() || c == '.');
        Token::new(TokenKind::Number, self.slice(start))
    }

    /// Quoted string including both quotes
    fn quote(&mut self, end_quote: char) -> Result<Token, LexError> {
        let start = self.position;
        self.advance();

        // A command is a single line, so a quote never spans a line break
        while let Some(ch) = self.peek() {
            if ch == '\n' || ch == '\r' {
                break;
            }
            self.advance();
            if ch == end_quote {
                return Ok(Token::new(TokenKind::Quote, self.slice(start)));
            }
        }

        Err(LexError {
            message: "Unterminated string literal".to_string(),
            column: start + 1,
        })
    }

    fn consume_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.advance();
        }
    }

    fn slice(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience wrapper for `Lexer::new(line).tokenize()`.
pub fn tokenize(line: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(line).tokenize()
}
