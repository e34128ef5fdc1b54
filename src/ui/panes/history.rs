//! Command log pane
//!
//! Lists the logged commands, newest at the bottom, followed by the redo
//! count when there is something to redo.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_history_pane(frame: &mut Frame, area: Rect, entries: &[String], redo_count: usize) {
    let block = Block::default()
        .title(format!(" Log ({}) ", entries.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let visible_height = area.height.saturating_sub(2) as usize;
    let reserved = usize::from(redo_count > 0);
    let shown = visible_height.saturating_sub(reserved);
    let skip = entries.len().saturating_sub(shown);

    let mut lines: Vec<Line> = entries
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(idx, entry)| {
            let style = if entry.starts_with('#') {
                Style::default().fg(DEFAULT_THEME.comment)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            let text = if entry.is_empty() { "(empty line)" } else { entry.as_str() };
            Line::from(vec![
                Span::styled(format!("{:3} ", idx), Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(text.to_string(), style),
            ])
        })
        .collect();

    if redo_count > 0 {
        lines.push(Line::from(Span::styled(
            format!("    +{} to redo", redo_count),
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
