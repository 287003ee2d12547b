//! Layout components (step sidebar, page header, status bar)

use super::components::{render_step_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::notify::NotificationLevel;
use crate::state::{step_warnings, WizardStep};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SIDEBAR_WIDTH: u16 = 26;
const HEADER_HEIGHT: u16 = 3;

/// Split the screen into sidebar, page header and page body. The bottom
/// row is left for the status bar.
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_WIDTH), // Step sidebar
            Constraint::Min(0),                // Page
        ])
        .split(rows[0]);

    let page = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)])
        .split(columns[1]);

    (columns[0], page[0], page[1])
}

/// Draw the step indicator. Steps ahead of the current one are dimmed
/// because they cannot be jumped to yet.
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend([Constraint::Length(BUTTON_HEIGHT); WizardStep::COUNT]);
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let steps = app.wizard.steps();
    for step in WizardStep::ALL {
        let index = step.index();
        render_step_button(
            frame,
            chunks[index + 1],
            &format!("F{}", index + 1),
            step.label(),
            index == steps.index(),
            steps.can_jump_to(index),
        );
    }
}

/// Draw the step title, description and outstanding required fields
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let step = app.current_step();
    let warnings = step_warnings(step, app.wizard.form());

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("Step {} of {}: ", step.index() + 1, WizardStep::COUNT),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            step.label(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ])];
    lines.push(Line::from(step.description()));
    if let Some(first) = warnings.first() {
        let more = match warnings.len() {
            1 => String::new(),
            n => format!(" (+{} more)", n - 1),
        };
        lines.push(Line::from(Span::styled(
            format!("{first}{more}"),
            Style::default().fg(Color::Yellow),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    // Nothing to reset on an untouched form
    let reset_hint = if app.wizard.form().is_blank() {
        ""
    } else {
        "  ^R:reset"
    };
    let mut spans = vec![Span::styled(
        format!(" {}{reset_hint} ", key_hints(app)),
        Style::default().fg(Color::Gray),
    )];

    if let Some(toast) = &app.toast {
        let color = match toast.level {
            NotificationLevel::Success => Color::Green,
            NotificationLevel::Info => Color::White,
            NotificationLevel::Error => Color::Red,
            NotificationLevel::Pending => Color::Yellow,
        };
        spans.push(Span::raw("| "));
        spans.push(Span::styled(&toast.message, Style::default().fg(color)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the current step
fn key_hints(app: &App) -> &'static str {
    let steps = app.wizard.steps();
    match (steps.is_first(), steps.is_last()) {
        (true, _) => "Tab:next field  ^N:next step  ^S:save",
        (_, true) => "Enter:submit  ^P:back  F1-F4:jump  ^S:save",
        _ => "Tab:next field  ^N:next  ^P:back  F1-F4:jump  ^S:save",
    }
}
