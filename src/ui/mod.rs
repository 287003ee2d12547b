//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod review;

use crate::app::App;
use crate::state::WizardStep;
use components::{render_confirm_dialog, render_error_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (sidebar_area, header_area, page_area) = layout::create_layout(frame.area());

    layout::draw_sidebar(frame, sidebar_area, app);
    layout::draw_header(frame, header_area, app);

    match app.current_step() {
        WizardStep::Review => review::draw(frame, page_area, app),
        _ => forms::draw_page(frame, page_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Modal overlays, error dialog on top
    if let Some(pending) = &app.pending_reset {
        render_confirm_dialog(frame, pending);
    }
    if let Some(error) = app.current_error() {
        render_error_dialog(frame, error);
    }
}
