//! Main TUI application state and logic

use crate::editor::{Editor, EditorError, Outcome};
use crate::storage::LogFile;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tracing::{error, info};

use super::panes::{
    render_command_pane, render_document_pane, render_history_pane, render_status_bar,
    DocumentRenderData, DocumentScrollState, StatusRenderData,
};

/// The main application state
pub struct App {
    pub editor: Editor,

    /// Where Ctrl+S writes and Ctrl+L reads
    pub file: LogFile,

    /// Command line being typed
    pub input: String,

    pub indent_width: usize,

    pub document_scroll: DocumentScrollState,

    /// Log text as last loaded or saved, for the unsaved marker
    pub saved_text: String,

    pub should_quit: bool,

    pub status_message: String,

    /// Whether `status_message` reports a failure
    pub is_error: bool,
}

impl App {
    pub fn new(editor: Editor, file: LogFile, indent_width: usize) -> Self {
        let saved_text = editor.save_text();
        App {
            editor,
            file,
            input: String::new(),
            indent_width,
            document_scroll: DocumentScrollState::default(),
            saved_text,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_error: false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.editor.save_text() != self.saved_text
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, command line, then status bar
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(rows[0]);

        let rendered = self.editor.render();
        let breadcrumbs = self.editor.breadcrumbs();
        render_document_pane(
            frame,
            columns[0],
            DocumentRenderData {
                rendered: &rendered,
                cursor: self.editor.cursor(),
                breadcrumbs: &breadcrumbs,
                indent_width: self.indent_width,
            },
            &mut self.document_scroll,
        );

        render_history_pane(
            frame,
            columns[1],
            self.editor.log().entries(),
            self.editor.redo_len(),
        );

        render_command_pane(frame, rows[1], &self.input, self.is_error);

        let file_name = self.file.path().display().to_string();
        render_status_bar(
            frame,
            rows[2],
            StatusRenderData {
                message: &self.status_message,
                is_error: self.is_error,
                cursor: self.editor.cursor(),
                line_count: self.editor.document().line_count(),
                file_name: &file_name,
                is_dirty: self.is_dirty(),
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let delete_modifier = key
            .modifiers
            .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT);

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('s') if ctrl => self.save(),
            KeyCode::Char('l') if ctrl => self.reload(),
            KeyCode::Char('z') if ctrl => {
                let result = self.editor.undo();
                self.report(result.map(|()| "Undone".to_string()));
            }
            KeyCode::Char('y') if ctrl => {
                let result = self.editor.redo();
                self.report(result.map(|()| "Redone".to_string()));
            }
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
            }
            KeyCode::Char(c) if !ctrl => {
                self.input.push(c);
            }
            KeyCode::Up => {
                let result = self.editor.move_up();
                self.report(result.map(describe));
            }
            KeyCode::Down => {
                let result = self.editor.move_down();
                self.report(result.map(describe));
            }
            KeyCode::Backspace if delete_modifier => self.delete_line(),
            KeyCode::Delete => self.delete_line(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => self.submit(),
            _ => {}
        }
    }

    /// Apply the command line; on failure it is kept for editing
    fn submit(&mut self) {
        match self.editor.apply(&self.input, true) {
            Ok(outcome) => {
                self.input.clear();
                self.set_status(describe(outcome), false);
            }
            Err(err) => self.set_status(err.to_string(), true),
        }
    }

    fn delete_line(&mut self) {
        let result = self.editor.delete_line();
        self.report(result.map(describe));
    }

    fn save(&mut self) {
        let text = self.editor.save_text();
        match self.file.save(&text) {
            Ok(()) => {
                info!(path = %self.file.path().display(), commands = self.editor.log().len(), "saved log");
                self.saved_text = text;
                self.set_status(format!("Saved {}", self.file.path().display()), false);
            }
            Err(err) => {
                error!(%err, "save failed");
                self.set_status(err.to_string(), true);
            }
        }
    }

    fn reload(&mut self) {
        match self.file.load() {
            Ok(text) => {
                self.editor.load_text(&text);
                self.saved_text = self.editor.save_text();
                self.set_status(
                    format!("Loaded {} command(s)", self.editor.log().len()),
                    false,
                );
            }
            Err(err) => {
                error!(%err, "reload failed");
                self.set_status(err.to_string(), true);
            }
        }
    }

    fn report(&mut self, result: Result<String, EditorError>) {
        match result {
            Ok(message) => self.set_status(message, false),
            Err(err) => self.set_status(err.to_string(), true),
        }
    }

    fn set_status(&mut self, message: String, is_error: bool) {
        self.status_message = message;
        self.is_error = is_error;
    }
}

fn describe(outcome: Outcome) -> String {
    match outcome {
        Outcome::Inserted {
            rule: Some(rule),
            lines,
        } => format!("Inserted {} ({} line(s))", rule.name(), lines),
        Outcome::Inserted { lines, .. } => format!("Inserted {} line(s)", lines),
        Outcome::EmptyLine => "Inserted empty line".to_string(),
        Outcome::Moved { line } => format!("Line {}", line),
        Outcome::Deleted(removal) if removal.count == 0 => "Nothing to delete".to_string(),
        Outcome::Deleted(removal) => format!("Deleted {} line(s)", removal.count),
    }
}
