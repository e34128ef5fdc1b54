//! Styled output stream
//!
//! Rendering never produces pixels or terminal spans directly. The grammar and
//! the document emit [`Fragment`]s into a [`Styled`] buffer; the UI maps the
//! highlight classes to colors and the plain-text view joins them back into
//! source text. Spacing between tokens is resolved here, so consumers only
//! ever see explicit [`Fragment::Space`]s.

use crate::parser::ast::{Highlight, Spacing};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Leading indentation, in nesting levels
    Indent(usize),
    Text { text: String, highlight: Highlight },
    Space,
    Newline,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Styled {
    fragments: Vec<Fragment>,
    /// Spacing of the previous text fragment on the current line
    previous: Option<Spacing>,
}

impl Styled {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, text: impl Into<String>, highlight: Highlight, spacing: Spacing) {
        let needs_space = match (self.previous, spacing) {
            (None, _) => false,
            (Some(Spacing::Padded | Spacing::Trailing), _) => true,
            (Some(_), Spacing::Padded) => true,
            (Some(Spacing::Word), Spacing::Word) => true,
            _ => false,
        };
        if needs_space {
            self.fragments.push(Fragment::Space);
        }
        self.fragments.push(Fragment::Text {
            text: text.into(),
            highlight,
        });
        self.previous = Some(spacing);
    }

    pub fn space(&mut self) {
        self.fragments.push(Fragment::Space);
        self.previous = None;
    }

    pub fn indent(&mut self, depth: usize) {
        if depth > 0 {
            self.fragments.push(Fragment::Indent(depth));
        }
        self.previous = None;
    }

    pub fn newline(&mut self) {
        self.fragments.push(Fragment::Newline);
        self.previous = None;
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Fragments grouped per display line, newlines dropped
    pub fn lines(&self) -> Vec<&[Fragment]> {
        let mut lines = Vec::new();
        let mut start = 0;
        for (i, fragment) in self.fragments.iter().enumerate() {
            if *fragment == Fragment::Newline {
                lines.push(&self.fragments[start..i]);
                start = i + 1;
            }
        }
        if start < self.fragments.len() {
            lines.push(&self.fragments[start..]);
        }
        lines
    }

    /// Unstyled text, `indent_width` spaces per nesting level
    pub fn to_plain_text(&self, indent_width: usize) -> String {
        let mut out = String::new();
        for fragment in &self.fragments {
            match fragment {
                Fragment::Indent(depth) => out.push_str(&" ".repeat(depth * indent_width)),
                Fragment::Text { text, .. } => out.push_str(text),
                Fragment::Space => out.push(' '),
                Fragment::Newline => out.push('\n'),
            }
        }
        out
    }
}
