//! Confirmation dialog for resetting the form

use super::base::{key_span, render_dialog, DialogConfig};
use crate::app::PendingReset;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render the reset confirmation, highlighting the selected choice
pub fn render_confirm_dialog(frame: &mut Frame, pending: &PendingReset) {
    let choices = [(false, "Cancel", Color::White), (true, "Reset", Color::Red)];
    let options = choices
        .iter()
        .map(|&(value, label, color)| {
            let is_selected = pending.selected_option == value;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(format!("{prefix}{label}"), style))
        })
        .collect();

    let hint = vec![
        key_span("↑↓"),
        Span::styled(" select  ", Style::default().fg(Color::DarkGray)),
        key_span("Enter"),
        Span::styled(" confirm  ", Style::default().fg(Color::DarkGray)),
        key_span("Esc"),
        Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: "Reset Form",
            title_color: Color::Red,
            border_color: Color::Red,
            message: "Clear every field, remove uploaded files and delete the saved draft?",
            options,
            hint: Some(hint),
            max_width: 50,
        },
    );
}
