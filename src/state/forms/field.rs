//! Form field edit buffer

use super::form_state::TextTarget;

/// Text being typed into one field. Edits stay here until the App commits
/// them to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub target: TextTarget,
    pub is_multiline: bool,
    value: String,
    original: String,
}

impl FormField {
    /// Start editing `target` with its current stored value
    pub fn editing(target: TextTarget, current: String) -> Self {
        Self {
            is_multiline: target.is_multiline(),
            target,
            value: current.clone(),
            original: current,
        }
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    pub fn push_char(&mut self, c: char) {
        if c == '\n' && !self.is_multiline {
            return;
        }
        self.value.push(c);
    }

    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Whether the buffer differs from the value it was opened with
    pub fn is_dirty(&self) -> bool {
        self.value != self.original
    }

    /// Value as shown in the field box
    pub fn display_value(&self) -> String {
        match &self.target {
            TextTarget::Attachment(_) if self.value.is_empty() => {
                "(type a file path, Enter to upload)".to_string()
            }
            _ => self.value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachments::AttachmentSlot;
    use crate::state::forms::form_state::{ApplicantField, InventionField};

    #[test]
    fn test_new_buffer_is_clean() {
        let field = FormField::editing(
            TextTarget::Applicant(ApplicantField::Email),
            "a@b.c".to_string(),
        );
        assert!(!field.is_dirty());
        assert_eq!(field.as_text(), "a@b.c");
    }

    #[test]
    fn test_typing_marks_dirty() {
        let mut field =
            FormField::editing(TextTarget::Invention(InventionField::Title), String::new());
        field.push_char('X');
        assert!(field.is_dirty());
        field.pop_char();
        assert!(!field.is_dirty());
    }

    #[test]
    fn test_single_line_drops_newlines() {
        let mut field = FormField::editing(
            TextTarget::Applicant(ApplicantField::FirstName),
            String::new(),
        );
        field.push_char('\n');
        assert_eq!(field.as_text(), "");

        let mut multi = FormField::editing(
            TextTarget::Invention(InventionField::Description),
            String::new(),
        );
        multi.push_char('\n');
        assert_eq!(multi.as_text(), "\n");
    }

    #[test]
    fn test_attachment_placeholder() {
        let field = FormField::editing(
            TextTarget::Attachment(AttachmentSlot::Drawings),
            String::new(),
        );
        assert!(field.display_value().starts_with("(type a file path"));
    }
}
