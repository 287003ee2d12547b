//! Review & Submit page

use crate::app::App;
use crate::state::{missing_requirements, ApplicantKind, FileRef, FormData, SubmissionState};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.wizard.form();
    let missing = missing_requirements(form);
    let status_height = if missing.is_empty() {
        3
    } else {
        missing.len() as u16 + 3
    };

    let [summary_area, status_area, button_area] = Layout::vertical([
        Constraint::Min(5),
        Constraint::Length(status_height),
        Constraint::Length(BUTTON_HEIGHT),
    ])
    .areas(area);

    let summary = Paragraph::new(summary_lines(form))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Application Summary ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(summary, summary_area);

    draw_status(frame, status_area, app, &missing);

    let label = match app.wizard.submission_state() {
        SubmissionState::Submitting => "Submitting...",
        SubmissionState::Succeeded(_) => "Submitted",
        _ => "Submit Application",
    };
    let is_active = app.focus.index() == 0;
    render_button(frame, button_area, label, is_active, app.wizard.can_submit());
}

fn draw_status(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    missing: &[crate::state::Requirement],
) {
    let mut lines = Vec::new();
    match app.wizard.submission_state() {
        SubmissionState::Succeeded(receipt) => {
            lines.push(Line::from(Span::styled(
                format!(
                    "Submitted as {} on {}",
                    receipt.application_number,
                    receipt.submitted_at.format("%Y-%m-%d %H:%M UTC")
                ),
                Style::default().fg(Color::Green),
            )));
        }
        SubmissionState::Failed(reason) => {
            lines.push(Line::from(Span::styled(
                format!("Last attempt failed: {reason}"),
                Style::default().fg(Color::Red),
            )));
        }
        _ if missing.is_empty() => {
            lines.push(Line::from(Span::styled(
                "Ready to submit.",
                Style::default().fg(Color::Green),
            )));
        }
        _ => {
            for requirement in missing {
                lines.push(Line::from(vec![
                    Span::styled("• ", Style::default().fg(Color::Yellow)),
                    Span::raw(requirement.message()),
                ]));
            }
        }
    }

    let block = Block::default()
        .title(" Before you submit ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn entry(label: &str, value: impl Into<String>) -> Line<'static> {
    let value = value.into();
    let value = if value.trim().is_empty() {
        "Not provided".to_string()
    } else {
        value
    };
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

fn file_entry(label: &str, file: Option<&FileRef>) -> Line<'static> {
    entry(
        label,
        file.map(|f| format!("{} ({})", f.name, f.size_label()))
            .unwrap_or_default(),
    )
}

/// Read-only rendering of the whole application
fn summary_lines(form: &FormData) -> Vec<Line<'static>> {
    let applicant = &form.applicant;
    let invention = &form.invention;
    let filing = &form.filing;
    let date = |d: Option<chrono::NaiveDate>| d.map(|d| d.format("%B %-d, %Y").to_string());

    let mut lines = vec![heading("Applicant Information")];
    lines.push(entry("Applicant Type", applicant.kind.label()));
    if applicant.kind == ApplicantKind::Organization {
        lines.push(entry(
            "Company Name",
            applicant.company_name.clone().unwrap_or_default(),
        ));
    }
    lines.push(entry(
        "Name",
        format!("{} {}", applicant.first_name, applicant.last_name),
    ));
    lines.push(entry("Email", applicant.email.clone()));
    lines.push(entry("Phone", applicant.phone.clone()));
    lines.push(entry("Address", applicant.address.clone()));

    lines.push(Line::from(""));
    lines.push(heading("Inventors"));
    for (i, inventor) in form.inventors.iter().enumerate() {
        lines.push(entry(
            &format!("Inventor {}", i + 1),
            format!("{} <{}>", inventor.full_name(), inventor.email),
        ));
    }

    lines.push(Line::from(""));
    lines.push(heading("Invention Details"));
    lines.push(entry("Title", invention.title.clone()));
    lines.push(entry(
        "Category",
        invention.category.map(|c| c.label()).unwrap_or_default(),
    ));
    lines.push(entry("Abstract", invention.abstract_text.clone()));
    lines.push(entry("Description", invention.description.clone()));
    lines.push(entry("Problem Solved", invention.problem_solved.clone()));
    lines.push(entry("Use Case", invention.use_case.clone()));

    lines.push(Line::from(""));
    lines.push(heading("Filing Information"));
    lines.push(entry(
        "Filing Date",
        date(filing.filing_date).unwrap_or_default(),
    ));
    lines.push(entry(
        "Priority Date",
        date(filing.priority_date).unwrap_or_default(),
    ));
    lines.push(entry("Country of Filing", filing.country_of_filing.label()));
    lines.push(file_entry("Drawings", filing.drawings.as_ref()));
    lines.push(file_entry("Specification", filing.specification.as_ref()));
    lines.push(entry(
        "Additional Documents",
        filing
            .additional_documents
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    ));
    lines
}
