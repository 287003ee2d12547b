//! Application state and core logic

use crate::config::WizardConfig;
use crate::notify::Notification;
use crate::state::{
    slots_for, toggle_applicant_kind, Commit, FieldSlot, FilingPatch, FocusRing, FormField,
    InventionCategory, InventionPatch, SubmissionState, TextTarget, WizardStep,
};
use crate::wizard::Wizard;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;

/// State of the "reset the whole form?" dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingReset {
    /// true when "Reset" is highlighted, false for "Cancel"
    pub selected_option: bool,
}

/// Main application struct
pub struct App {
    /// Form state for this session
    pub wizard: Wizard,
    /// Focused control on the current page
    pub focus: FocusRing,
    /// Text being edited in the focused field, if it is a text field
    pub editor: Option<FormField>,
    /// Most recent notification, shown in the status bar
    pub toast: Option<Notification>,
    /// Open reset confirmation, if any
    pub pending_reset: Option<PendingReset>,
    /// Errors waiting to be shown in the error dialog
    errors: VecDeque<String>,
    /// Store revision the editor was last synced against
    synced_revision: u64,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance from user configuration
    pub fn new(config: &WizardConfig) -> Self {
        Self::with_wizard(Wizard::from_config(config))
    }

    pub fn with_wizard(wizard: Wizard) -> Self {
        let mut app = Self {
            wizard,
            focus: FocusRing::default(),
            editor: None,
            toast: None,
            pending_reset: None,
            errors: VecDeque::new(),
            synced_revision: 0,
            quit: false,
        };
        app.sync_editor();
        app
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push_back(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    pub fn current_step(&self) -> WizardStep {
        self.wizard.current_step()
    }

    /// Focusable controls on the current page
    pub fn slots(&self) -> Vec<FieldSlot> {
        slots_for(self.current_step(), self.wizard.form())
    }

    pub fn focused_slot(&self) -> Option<FieldSlot> {
        self.focus.focused(&self.slots()).copied()
    }

    /// Drive background work: submission progress and toast expiry
    pub async fn tick(&mut self) {
        let was_submitting = matches!(
            self.wizard.submission_state(),
            SubmissionState::Submitting
        );
        self.wizard.tick().await;
        if was_submitting {
            if let SubmissionState::Failed(reason) = self.wizard.submission_state() {
                let message =
                    format!("Failed to submit application. Please try again.\n\n{reason}");
                self.push_error(message);
            }
        }

        self.absorb_notifications();
        if self.toast.as_ref().is_some_and(Notification::is_expired) {
            self.toast = None;
        }
        self.sync_editor();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }

        // Error dialog is modal
        if self.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.dismiss_error();
            }
            return;
        }

        if self.pending_reset.is_some() {
            self.handle_reset_dialog_key(key);
            self.absorb_notifications();
            return;
        }

        match key.code {
            KeyCode::Char('s') if ctrl => {
                if self.commit_editor() {
                    self.wizard.save_draft();
                }
            }
            KeyCode::Char('r') if ctrl => {
                self.pending_reset = Some(PendingReset::default());
            }
            KeyCode::Char('n') if ctrl => {
                if self.commit_editor() && self.wizard.steps_mut().advance() {
                    self.focus.reset();
                }
            }
            KeyCode::Char('p') if ctrl => {
                if self.commit_editor() && self.wizard.steps_mut().retreat() {
                    self.focus.reset();
                }
            }
            KeyCode::F(n @ 1..=4) => {
                let index = usize::from(n - 1);
                if self.commit_editor() && self.wizard.steps_mut().jump_to(index) {
                    self.focus.reset();
                }
            }
            KeyCode::Tab => {
                if self.commit_editor() {
                    self.focus.next(self.slots().len());
                }
            }
            KeyCode::BackTab => {
                if self.commit_editor() {
                    self.focus.prev(self.slots().len());
                }
            }
            _ if ctrl => {}
            _ => self.handle_field_key(key),
        }

        self.sync_editor();
        self.absorb_notifications();
    }

    fn handle_reset_dialog_key(&mut self, key: KeyEvent) {
        let Some(pending) = self.pending_reset else {
            return;
        };
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Tab | KeyCode::BackTab => {
                self.pending_reset = Some(PendingReset {
                    selected_option: !pending.selected_option,
                });
            }
            KeyCode::Char('y') => self.confirm_reset(),
            KeyCode::Enter if pending.selected_option => self.confirm_reset(),
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('n') => {
                self.pending_reset = None;
            }
            _ => {}
        }
    }

    fn confirm_reset(&mut self) {
        self.pending_reset = None;
        self.editor = None;
        self.wizard.reset();
        self.focus.reset();
        self.sync_editor();
    }

    /// Keys aimed at the focused control
    fn handle_field_key(&mut self, key: KeyEvent) {
        let Some(slot) = self.focused_slot() else {
            return;
        };
        let activate = matches!(key.code, KeyCode::Enter | KeyCode::Char(' '));

        match slot {
            FieldSlot::Text(_) => self.handle_text_key(key),
            FieldSlot::ApplicantKind
                if activate || matches!(key.code, KeyCode::Left | KeyCode::Right) =>
            {
                let form = self.wizard.store().snapshot();
                toggle_applicant_kind(&form, self.wizard.commands());
            }
            FieldSlot::Category if activate || key.code == KeyCode::Right => {
                let next = InventionCategory::cycle(self.wizard.form().invention.category);
                self.wizard
                    .commands()
                    .update_invention(InventionPatch::default().category(Some(next)));
            }
            FieldSlot::Country
                if activate || matches!(key.code, KeyCode::Left | KeyCode::Right) =>
            {
                let current = self.wizard.form().filing.country_of_filing;
                let next = if key.code == KeyCode::Left {
                    current.prev()
                } else {
                    current.next()
                };
                self.wizard
                    .commands()
                    .update_filing(FilingPatch::default().country(next));
            }
            FieldSlot::AddInventor if activate => {
                let id = self.wizard.commands().add_inventor();
                let slots = self.slots();
                if let Some(index) = slots.iter().position(|s| {
                    matches!(s, FieldSlot::Text(TextTarget::Inventor(i, _)) if *i == id)
                }) {
                    self.focus.focus(index);
                }
            }
            FieldSlot::RemoveInventor(id) if activate => {
                self.wizard.commands().remove_inventor(id);
            }
            FieldSlot::Attached { slot, index }
                if activate || matches!(key.code, KeyCode::Delete | KeyCode::Backspace) =>
            {
                self.wizard.detach(slot, index);
            }
            FieldSlot::Acknowledgment(ack) if activate => {
                let value = self.wizard.form().filing.acknowledgments.get(ack);
                self.wizard.commands().update_acknowledgment(ack, !value);
            }
            FieldSlot::Submit if activate => {
                if self.wizard.can_submit() {
                    self.wizard.submit();
                } else if !matches!(
                    self.wizard.submission_state(),
                    SubmissionState::Submitting | SubmissionState::Succeeded(_)
                ) {
                    self.wizard
                        .notifications_mut()
                        .info("Complete all required items before submitting.");
                }
            }
            _ => {}
        }
    }

    fn handle_text_key(&mut self, key: KeyEvent) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => editor.push_char(c),
            KeyCode::Backspace => editor.pop_char(),
            KeyCode::Enter if editor.is_multiline => editor.push_char('\n'),
            KeyCode::Enter => {
                self.commit_editor();
            }
            KeyCode::Esc => {
                // Discard the buffer; sync_editor reopens it from the store
                self.editor = None;
            }
            _ => {}
        }
    }

    /// Write the edit buffer to the store. Returns false when the value was
    /// refused; the buffer then stays open for correction.
    fn commit_editor(&mut self) -> bool {
        let Some(editor) = self.editor.take() else {
            return true;
        };
        if !editor.is_dirty() {
            self.editor = Some(editor);
            return true;
        }

        match editor.target.commit(editor.as_text(), self.wizard.commands()) {
            Ok(Commit::Upload(slot, path)) => {
                if !self.wizard.attach(slot, &path) {
                    self.editor = Some(editor);
                    return false;
                }
            }
            Ok(Commit::Stored | Commit::Skipped) => {}
            Err(e) => {
                self.wizard.notifications_mut().error(e.to_string());
                self.editor = Some(editor);
                return false;
            }
        }
        true
    }

    /// Keep the edit buffer pointed at the focused text field. A clean buffer
    /// is refreshed whenever the store has changed underneath it.
    fn sync_editor(&mut self) {
        let slots = self.slots();
        self.focus.clamp(slots.len());
        let target = self.focus.focused(&slots).and_then(FieldSlot::text_target);
        let revision = self.wizard.store().revision();

        let stale = match (&self.editor, target) {
            (Some(editor), Some(target)) => {
                editor.target != target
                    || (!editor.is_dirty() && revision != self.synced_revision)
            }
            (None, None) => false,
            _ => true,
        };
        if stale {
            self.editor = target.map(|t| FormField::editing(t, t.read(self.wizard.form())));
        }
        self.synced_revision = revision;
    }

    fn absorb_notifications(&mut self) {
        let notifications = self.wizard.notifications();
        if notifications.is_empty() {
            return;
        }
        // Only the newest is shown; the rest are already in the log
        self.toast = notifications.latest().cloned();
        self.wizard.notifications_mut().clear();
    }
}
