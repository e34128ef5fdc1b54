//! The editing engine
//!
//! [`Editor`] owns the language, the document, the cursor and the command
//! log. Every change goes through [`Editor::apply`]; undo pops the last
//! logged command and rebuilds the document by replaying what is left, so
//! there is no inverse operation to keep in sync with each command.

use super::command::{Command, DELETE_LINE, GOTO};
use super::errors::EditorError;
use super::log::CommandLog;
use crate::document::{Document, LineContext, Parsed, Removal};
use crate::parser::ast::Rule;
use crate::parser::language::Language;
use crate::render::Styled;
use tracing::{debug, info, warn};

/// What a successfully applied command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A content line was inserted, together with its close if it opens a body
    Inserted { rule: Option<Rule>, lines: usize },
    EmptyLine,
    Moved { line: usize },
    Deleted(Removal),
}

#[derive(Debug, Clone)]
pub struct Editor {
    language: Language,
    document: Document,
    cursor: usize,
    log: CommandLog,
    redo: Vec<String>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::with_language(Language::new())
    }

    pub fn with_language(language: Language) -> Self {
        Editor {
            language,
            document: Document::new(),
            cursor: 0,
            log: CommandLog::new(),
            redo: Vec::new(),
        }
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn log(&self) -> &CommandLog {
        &self.log
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Apply one command line at the cursor.
    ///
    /// On success the command is appended to the log when `persist` is set
    /// (and the redo stack is dropped). On failure nothing changes.
    pub fn apply(&mut self, text: &str, persist: bool) -> Result<Outcome, EditorError> {
        let command = Command::parse(text)?;
        let outcome = self.execute(command)?;

        if persist {
            self.log.record(text);
            self.redo.clear();
        }
        debug!(
            command = text,
            cursor = self.cursor,
            lines = self.document.line_count(),
            "applied command"
        );
        Ok(outcome)
    }

    fn execute(&mut self, command: Command) -> Result<Outcome, EditorError> {
        match command {
            Command::Empty => {
                self.document.insert_empty(self.cursor);
                self.cursor += 1;
                Ok(Outcome::EmptyLine)
            }
            Command::Goto(target) => {
                self.cursor = target.min(self.document.line_count());
                Ok(Outcome::Moved { line: self.cursor })
            }
            Command::DeleteLine => {
                let removal = self.document.delete_line(self.cursor)?;
                if removal.count > 0 {
                    self.cursor = removal.first;
                }
                Ok(Outcome::Deleted(removal))
            }
            Command::Content(tokens) => {
                let context = self.document.resolve_context(&self.language, self.cursor);
                let value = self.language.parse_line(context.grammar, &tokens)?;
                let rule = value.rule();
                let lines = self.document.insert_parsed(
                    &self.language,
                    context.insert_at,
                    Parsed {
                        grammar: context.grammar,
                        value,
                    },
                );
                self.cursor = context.insert_at + 1;
                Ok(Outcome::Inserted { rule, lines })
            }
        }
    }

    /// Rebuild from scratch by replaying `commands`, which become the log.
    ///
    /// A command that fails during replay is skipped with a warning and stays
    /// in the log; the redo stack is left alone.
    pub fn replay_all(&mut self, commands: Vec<String>) {
        self.document = Document::new();
        self.cursor = 0;

        for (index, command) in commands.iter().enumerate() {
            if let Err(error) = self.apply(command, false) {
                warn!(index, command = command.as_str(), %error, "skipping command during replay");
            }
        }
        self.log = CommandLog::from(commands);
    }

    pub fn move_up(&mut self) -> Result<Outcome, EditorError> {
        let target = self.cursor.saturating_sub(1);
        self.apply(&format!("{GOTO} {target}"), true)
    }

    pub fn move_down(&mut self) -> Result<Outcome, EditorError> {
        let target = (self.cursor + 1).min(self.document.line_count());
        self.apply(&format!("{GOTO} {target}"), true)
    }

    /// Delete the line above the cursor. At the top this is a no-op and
    /// nothing is logged.
    pub fn delete_line(&mut self) -> Result<Outcome, EditorError> {
        if self.cursor == 0 {
            return Ok(Outcome::Deleted(Removal::default()));
        }
        self.apply(DELETE_LINE, true)
    }

    pub fn undo(&mut self) -> Result<(), EditorError> {
        let command = self.log.pop().ok_or(EditorError::NothingToUndo)?;
        let remaining = self.log.entries().to_vec();
        self.replay_all(remaining);
        debug!(command = command.as_str(), "undid command");
        self.redo.push(command);
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), EditorError> {
        let command = self.redo.pop().ok_or(EditorError::NothingToRedo)?;
        if let Err(error) = self.apply(&command, false) {
            self.redo.push(command);
            return Err(error);
        }
        debug!(command = command.as_str(), "redid command");
        self.log.push(command);
        Ok(())
    }

    /// Replace the whole session with the commands in `text`
    pub fn load_text(&mut self, text: &str) {
        let log = CommandLog::from_text(text);
        info!(commands = log.len(), "loading command log");
        self.redo.clear();
        self.replay_all(log.entries().to_vec());
    }

    pub fn save_text(&self) -> String {
        self.log.to_text()
    }

    pub fn context(&self) -> LineContext {
        self.document.resolve_context(&self.language, self.cursor)
    }

    /// Plain-text headers of the blocks enclosing the cursor, outermost first
    pub fn breadcrumbs(&self) -> Vec<String> {
        self.context()
            .path
            .iter()
            .map(|&line| self.document.render_line(&self.language, line).to_plain_text(0))
            .collect()
    }

    pub fn render(&self) -> Styled {
        self.document.render(&self.language)
    }
}
