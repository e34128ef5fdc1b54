use crate::parser::ast::Highlight;
use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub name: Color,
    pub type_name: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(203, 166, 247),        // Mauve for keywords
    string: Color::Rgb(166, 227, 161),         // Green for quotes
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),
    current_line_bg: Color::Rgb(50, 50, 70),
    name: Color::Rgb(205, 214, 244),
    type_name: Color::Rgb(148, 226, 213), // Cyan/teal for type names
};

impl Theme {
    pub fn highlight(&self, highlight: Highlight) -> Style {
        match highlight {
            Highlight::Keyword => Style::default()
                .fg(self.keyword)
                .add_modifier(Modifier::BOLD),
            Highlight::Type => Style::default().fg(self.type_name),
            Highlight::Name => Style::default().fg(self.name),
            Highlight::Number => Style::default().fg(self.number),
            Highlight::Text => Style::default().fg(self.string),
            Highlight::Operator => Style::default().fg(self.fg),
            Highlight::Punctuation => Style::default().fg(self.primary),
        }
    }
}
