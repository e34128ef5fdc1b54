//! Command input pane

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the command line; `error` switches the border to the error color
pub fn render_command_pane(frame: &mut Frame, area: Rect, input: &str, error: bool) {
    let border_color = if error {
        DEFAULT_THEME.error
    } else {
        DEFAULT_THEME.border_focused
    };

    let block = Block::default()
        .title(" Command ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).add_modifier(Modifier::BOLD));

    let line = Line::from(vec![
        Span::styled("> ", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(input.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);

    // Border (1) + prompt (2)
    let x = area.x + 3 + input.chars().count() as u16;
    let max_x = area.x + area.width.saturating_sub(2);
    frame.set_cursor_position(Position::new(x.min(max_x), area.y + 1));
}
