//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows taken by a field box
pub fn field_height(is_multiline: bool) -> u16 {
    if is_multiline {
        5
    } else {
        3
    }
}

/// Draw the field currently being edited
pub fn draw_field(frame: &mut Frame, area: Rect, label: &str, field: &FormField) {
    render_text_box(
        frame,
        area,
        label,
        &field.display_value(),
        true,
        field.is_multiline,
    );
}

/// Draw a read-only view of a stored value
pub fn draw_field_with_value(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    is_active: bool,
    is_multiline: bool,
) {
    render_text_box(frame, area, label, value, is_active, is_multiline);
}

fn render_text_box(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    is_active: bool,
    is_multiline: bool,
) {
    let accent = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };
    let cursor = Span::styled(if is_active { "▌" } else { "" }, accent);

    let content = if is_multiline {
        let mut lines: Vec<Line> = display_value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), accent)))
            .collect();
        if let Some(last) = lines.last_mut() {
            last.spans.push(cursor);
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_value.to_string(), accent),
            cursor,
        ]))
    };

    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(accent);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}
