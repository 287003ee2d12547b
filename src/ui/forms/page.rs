//! One wizard page: a column of controls that scrolls to keep focus visible

use super::field_renderer::{draw_field, draw_field_with_value, field_height};
use crate::app::App;
use crate::attachments::AttachmentSlot;
use crate::state::{FieldSlot, FileRef, FormData, TextTarget};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use uuid::Uuid;

const ACKNOWLEDGMENT_HEIGHT: u16 = 4;

/// Draw every control of the current page
pub fn draw_page(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.wizard.form();
    let slots = app.slots();
    let focused = app.focus.index();
    let heights: Vec<u16> = slots.iter().map(slot_height).collect();
    let start = scroll_start(&heights, focused, area.height);

    let bottom = area.y + area.height;
    let mut y = area.y;
    for (index, slot) in slots.iter().enumerate().skip(start) {
        let height = heights[index];
        if y + height > bottom {
            break;
        }
        let rect = Rect {
            x: area.x,
            y,
            width: area.width,
            height,
        };
        draw_slot(frame, rect, app, form, slot, index == focused);
        y += height;
    }
}

fn slot_height(slot: &FieldSlot) -> u16 {
    match slot {
        FieldSlot::Text(target) => field_height(target.is_multiline()),
        FieldSlot::Acknowledgment(_) => ACKNOWLEDGMENT_HEIGHT,
        _ => BUTTON_HEIGHT,
    }
}

/// First slot to draw so that the focused one fits on screen
fn scroll_start(heights: &[u16], focused: usize, available: u16) -> usize {
    let focused = focused.min(heights.len().saturating_sub(1));
    let mut start = 0;
    while start < focused {
        let used: u16 = heights[start..=focused].iter().sum();
        if used <= available {
            break;
        }
        start += 1;
    }
    start
}

/// Field title, numbering inventors by position
fn field_label(target: TextTarget, form: &FormData) -> String {
    match target {
        TextTarget::Inventor(id, field) => {
            let number = inventor_number(form, id);
            let primary = if number == 1 { " (primary)" } else { "" };
            format!("Inventor {number}{primary} · {}", field.label())
        }
        _ => target.label(),
    }
}

fn inventor_number(form: &FormData, id: Uuid) -> usize {
    form.inventors
        .iter()
        .position(|i| i.id == id)
        .map_or(0, |p| p + 1)
}

fn attached_file(form: &FormData, slot: AttachmentSlot, index: usize) -> Option<&FileRef> {
    let filing = &form.filing;
    match slot {
        AttachmentSlot::Drawings => filing.drawings.as_ref(),
        AttachmentSlot::Specification => filing.specification.as_ref(),
        AttachmentSlot::AdditionalDocument => filing.additional_documents.get(index),
    }
}

fn draw_slot(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    form: &FormData,
    slot: &FieldSlot,
    is_active: bool,
) {
    match *slot {
        FieldSlot::Text(target) => {
            let label = field_label(target, form);
            match app.editor.as_ref() {
                Some(editor) if is_active && editor.target == target => {
                    draw_field(frame, area, &label, editor);
                }
                _ => {
                    let value = match target {
                        TextTarget::Attachment(slot) => {
                            let policy = app.wizard.policies().for_slot(slot);
                            format!(
                                "{} up to {}MB",
                                policy.accept_label(),
                                policy.max_size_mb
                            )
                        }
                        _ => target.read(form),
                    };
                    draw_field_with_value(
                        frame,
                        area,
                        &label,
                        &value,
                        is_active,
                        target.is_multiline(),
                    );
                }
            }
        }
        FieldSlot::ApplicantKind => {
            let kind = form.applicant.kind;
            let content = format!(
                "Applicant Type: {}  (Space to switch to {})",
                kind.label(),
                kind.toggle().label()
            );
            render_button(frame, area, &content, is_active, true);
        }
        FieldSlot::Category => {
            let current = form
                .invention
                .category
                .map_or("Select a category", |c| c.label());
            render_button(
                frame,
                area,
                &format!("Category: {current}  ▸"),
                is_active,
                true,
            );
        }
        FieldSlot::Country => {
            let country = form.filing.country_of_filing;
            render_button(
                frame,
                area,
                &format!("Country of Filing: ◂ {} ▸", country.label()),
                is_active,
                true,
            );
        }
        FieldSlot::AddInventor => {
            render_button(frame, area, "+ Add Inventor", is_active, true);
        }
        FieldSlot::RemoveInventor(id) => {
            let content = format!("✕ Remove Inventor {}", inventor_number(form, id));
            render_button(frame, area, &content, is_active, true);
        }
        FieldSlot::Attached { slot, index } => {
            let content = match attached_file(form, slot, index) {
                Some(file) => format!("📎 {} ({})  Del:remove", file.name, file.size_label()),
                None => "No file".to_string(),
            };
            render_button(frame, area, &content, is_active, true);
        }
        FieldSlot::Acknowledgment(key) => {
            let checked = form.filing.acknowledgments.get(key);
            draw_checkbox(frame, area, key.statement(), checked, is_active);
        }
        FieldSlot::Submit => {
            render_button(
                frame,
                area,
                "Submit Application",
                is_active,
                app.wizard.can_submit(),
            );
        }
    }
}

fn draw_checkbox(frame: &mut Frame, area: Rect, statement: &str, checked: bool, is_active: bool) {
    let border = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mark = if checked {
        Span::styled(
            "[x] ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("[ ] ", Style::default().fg(Color::Yellow))
    };

    let paragraph = Paragraph::new(Line::from(vec![mark, Span::raw(statement)]))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(border));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::InventorField;

    #[test]
    fn test_scroll_start_zero_when_everything_fits() {
        assert_eq!(scroll_start(&[3, 3, 3], 2, 20), 0);
    }

    #[test]
    fn test_scroll_start_keeps_focus_visible() {
        let heights = [3, 3, 5, 3, 3];
        let start = scroll_start(&heights, 4, 9);
        assert_eq!(start, 3);
        let used: u16 = heights[start..=4].iter().sum();
        assert!(used <= 9);
    }

    #[test]
    fn test_scroll_start_with_tiny_area_shows_focused_first() {
        assert_eq!(scroll_start(&[3, 3, 3], 2, 1), 2);
    }

    #[test]
    fn test_inventor_labels_are_numbered() {
        let mut form = FormData::default();
        form.inventors.push(crate::state::Inventor::blank());
        let second = form.inventors[1].id;
        let first = form.inventors[0].id;
        assert_eq!(
            field_label(TextTarget::Inventor(second, InventorField::Email), &form),
            "Inventor 2 · Email"
        );
        assert_eq!(
            field_label(TextTarget::Inventor(first, InventorField::FirstName), &form),
            "Inventor 1 (primary) · First Name"
        );
    }
}
