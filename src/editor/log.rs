//! The command log
//!
//! The log is the only durable state. It grows by appending, except that a
//! `#goto` following another `#goto` replaces it: cursor roaming collapses
//! into a single entry while every content edit and deletion stays its own
//! step.

use super::command::is_goto;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLog {
    entries: Vec<String>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split saved text into commands, one per line.
    ///
    /// Exactly one final line terminator is dropped, so `""` is an empty log
    /// and `"\n"` is a single empty command.
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::new();
        }
        let entries = text
            .strip_suffix('\n')
            .unwrap_or(text)
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        CommandLog { entries }
    }

    /// Every command is written with its own `\n` terminator
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .flat_map(|entry| [entry.as_str(), "\n"])
            .collect()
    }

    /// Record a committed command, coalescing consecutive `#goto`s
    pub fn record(&mut self, command: &str) {
        if is_goto(command) {
            if let Some(last) = self.entries.last_mut() {
                if is_goto(last) {
                    *last = command.to_string();
                    return;
                }
            }
        }
        self.entries.push(command.to_string());
    }

    /// Append without coalescing
    pub fn push(&mut self, command: String) {
        self.entries.push(command);
    }

    pub fn pop(&mut self) -> Option<String> {
        self.entries.pop()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<String>> for CommandLog {
    fn from(entries: Vec<String>) -> Self {
        CommandLog { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goto_coalescing() {
        let mut log = CommandLog::new();
        log.record("class Foo");
        log.record("#goto 0");
        log.record("#goto 1");
        log.record("#goto 2");
        assert_eq!(log.entries(), ["class Foo", "#goto 2"]);

        log.record("#delete_line");
        log.record("#goto 0");
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn test_text_round_trip() {
        let mut log = CommandLog::new();
        log.record("class Foo");
        log.record("");
        log.record("int x");
        let text = log.to_text();
        assert_eq!(text, "class Foo\n\nint x\n");
        assert_eq!(CommandLog::from_text(&text), log);
    }

    #[test]
    fn test_empty_and_blank_logs_stay_distinct() {
        let empty = CommandLog::new();
        assert_eq!(empty.to_text(), "");
        assert_eq!(CommandLog::from_text(&empty.to_text()), empty);

        let blank = CommandLog::from(vec![String::new()]);
        assert_eq!(blank.to_text(), "\n");
        assert_eq!(CommandLog::from_text(&blank.to_text()), blank);

        let two_blank = CommandLog::from(vec![String::new(), String::new()]);
        assert_eq!(CommandLog::from_text(&two_blank.to_text()), two_blank);
    }

    #[test]
    fn test_from_text_edges() {
        assert!(CommandLog::from_text("").is_empty());
        assert_eq!(CommandLog::from_text("a\r\nb\r\n").entries(), ["a", "b"]);
        assert_eq!(CommandLog::from_text("a\n").entries(), ["a"]);
        assert_eq!(CommandLog::from_text("a\n\n").entries(), ["a", ""]);
        // Text without a final terminator is still accepted
        assert_eq!(CommandLog::from_text("a\nb").entries(), ["a", "b"]);
    }
}
