//! Document pane
//!
//! Shows the rendered records with line numbers and draws the cursor as a
//! marker row in the gap before record `cursor`. The title carries the
//! breadcrumbs of the blocks enclosing the cursor.

use crate::render::{Fragment, Styled};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Scroll state for the document pane
#[derive(Debug, Default)]
pub struct DocumentScrollState {
    pub offset: usize,
}

pub struct DocumentRenderData<'a> {
    pub rendered: &'a Styled,
    pub cursor: usize,
    pub breadcrumbs: &'a [String],
    pub indent_width: usize,
}

/// Convert one line of fragments into styled spans
pub fn fragment_line(fragments: &[Fragment], indent_width: usize) -> Line<'static> {
    let spans: Vec<Span> = fragments
        .iter()
        .filter_map(|fragment| match fragment {
            Fragment::Indent(depth) => Some(Span::raw(" ".repeat(depth * indent_width))),
            Fragment::Text { text, highlight } => {
                Some(Span::styled(text.clone(), DEFAULT_THEME.highlight(*highlight)))
            }
            Fragment::Space => Some(Span::raw(" ")),
            Fragment::Newline => None,
        })
        .collect();
    Line::from(spans)
}

pub fn render_document_pane(
    frame: &mut Frame,
    area: Rect,
    data: DocumentRenderData<'_>,
    scroll_state: &mut DocumentScrollState,
) {
    let border_style = Style::default()
        .fg(DEFAULT_THEME.border_focused)
        .add_modifier(Modifier::BOLD);

    let title = if data.breadcrumbs.is_empty() {
        " Document ".to_string()
    } else {
        format!(" Document › {} ", data.breadcrumbs.join(" › "))
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut rows: Vec<Line> = Vec::new();
    let records = data.rendered.lines();
    for (idx, fragments) in records.iter().enumerate() {
        if idx == data.cursor {
            rows.push(cursor_row());
        }
        let mut spans = vec![Span::styled(
            format!("{:4} ", idx),
            Style::default().fg(DEFAULT_THEME.comment),
        )];
        spans.extend(fragment_line(fragments, data.indent_width).spans);
        rows.push(Line::from(spans));
    }
    if data.cursor >= records.len() {
        rows.push(cursor_row());
    }

    // Keep the cursor row visible; it sits at row index `cursor`
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if data.cursor < scroll_state.offset {
        scroll_state.offset = data.cursor;
    } else if data.cursor >= scroll_state.offset + visible_height {
        scroll_state.offset = data.cursor + 1 - visible_height;
    }

    let visible: Vec<Line> = rows
        .into_iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .collect();

    let paragraph = Paragraph::new(visible).block(block);
    frame.render_widget(paragraph, area);
}

fn cursor_row() -> Line<'static> {
    Line::from(vec![
        Span::styled(
            "   ▸ ",
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "────────",
            Style::default().fg(DEFAULT_THEME.secondary),
        ),
    ])
    .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
}
