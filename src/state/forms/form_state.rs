//! Focusable slots on each wizard page and the focus ring over them

use crate::attachments::AttachmentSlot;
use crate::state::{
    AcknowledgmentKey, ApplicantKind, ApplicantPatch, FilingPatch, FormCommands, FormData,
    InventionPatch, InventorField, WizardStep,
};
use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicantField {
    CompanyName,
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventionField {
    Title,
    Abstract,
    Description,
    ProblemSolved,
    UseCase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Filing,
    Priority,
}

/// A free-text value somewhere in the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTarget {
    Applicant(ApplicantField),
    Inventor(Uuid, InventorField),
    Invention(InventionField),
    Date(DateField),
    /// Path of a file to upload into the slot
    Attachment(AttachmentSlot),
}

/// What committing a text buffer asks of the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    /// The store has been updated
    Stored,
    /// Nothing to store
    Skipped,
    /// The path needs to go through attachment intake
    Upload(AttachmentSlot, PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Invalid date \"{0}\". Use YYYY-MM-DD.")]
    InvalidDate(String),
}

impl TextTarget {
    pub fn label(&self) -> String {
        match self {
            Self::Applicant(field) => match field {
                ApplicantField::CompanyName => "Company Name",
                ApplicantField::FirstName => "First Name",
                ApplicantField::LastName => "Last Name",
                ApplicantField::Email => "Email",
                ApplicantField::Phone => "Phone",
                ApplicantField::Address => "Address",
            }
            .to_string(),
            Self::Inventor(_, field) => field.label().to_string(),
            Self::Invention(field) => match field {
                InventionField::Title => "Invention Title",
                InventionField::Abstract => "Abstract",
                InventionField::Description => "Detailed Description",
                InventionField::ProblemSolved => "Problem Solved",
                InventionField::UseCase => "Use Case",
            }
            .to_string(),
            Self::Date(DateField::Filing) => "Filing Date (YYYY-MM-DD)".to_string(),
            Self::Date(DateField::Priority) => "Priority Date (YYYY-MM-DD)".to_string(),
            Self::Attachment(slot) => format!("Upload {}", slot.label()),
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(
            self,
            Self::Applicant(ApplicantField::Address)
                | Self::Invention(
                    InventionField::Abstract
                        | InventionField::Description
                        | InventionField::ProblemSolved
                        | InventionField::UseCase
                )
        )
    }

    /// Current stored value, as text
    pub fn read(&self, form: &FormData) -> String {
        let applicant = &form.applicant;
        let invention = &form.invention;
        match self {
            Self::Applicant(field) => match field {
                ApplicantField::CompanyName => {
                    applicant.company_name.clone().unwrap_or_default()
                }
                ApplicantField::FirstName => applicant.first_name.clone(),
                ApplicantField::LastName => applicant.last_name.clone(),
                ApplicantField::Email => applicant.email.clone(),
                ApplicantField::Phone => applicant.phone.clone(),
                ApplicantField::Address => applicant.address.clone(),
            },
            Self::Inventor(id, field) => form
                .inventor(*id)
                .map(|inventor| inventor.get(*field).to_string())
                .unwrap_or_default(),
            Self::Invention(field) => match field {
                InventionField::Title => invention.title.clone(),
                InventionField::Abstract => invention.abstract_text.clone(),
                InventionField::Description => invention.description.clone(),
                InventionField::ProblemSolved => invention.problem_solved.clone(),
                InventionField::UseCase => invention.use_case.clone(),
            },
            Self::Date(field) => {
                let date = match field {
                    DateField::Filing => form.filing.filing_date,
                    DateField::Priority => form.filing.priority_date,
                };
                date.map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            }
            Self::Attachment(_) => String::new(),
        }
    }

    /// Push `value` into the store through the command interface
    pub fn commit(
        &self,
        value: &str,
        commands: &mut dyn FormCommands,
    ) -> Result<Commit, FieldError> {
        let text = value.to_string();
        match self {
            Self::Applicant(field) => {
                let patch = ApplicantPatch::default();
                let patch = match field {
                    ApplicantField::CompanyName => {
                        patch.company_name((!text.is_empty()).then_some(text))
                    }
                    ApplicantField::FirstName => patch.first_name(text),
                    ApplicantField::LastName => patch.last_name(text),
                    ApplicantField::Email => patch.email(text),
                    ApplicantField::Phone => patch.phone(text),
                    ApplicantField::Address => patch.address(text),
                };
                commands.update_applicant(patch);
            }
            Self::Inventor(id, field) => {
                if !commands.update_inventor(*id, *field, text) {
                    return Ok(Commit::Skipped);
                }
            }
            Self::Invention(field) => {
                let patch = InventionPatch::default();
                let patch = match field {
                    InventionField::Title => patch.title(text),
                    InventionField::Abstract => patch.abstract_text(text),
                    InventionField::Description => patch.description(text),
                    InventionField::ProblemSolved => patch.problem_solved(text),
                    InventionField::UseCase => patch.use_case(text),
                };
                commands.update_invention(patch);
            }
            Self::Date(field) => {
                let date = parse_optional_date(value)?;
                let patch = match field {
                    DateField::Filing => FilingPatch::default().filing_date(date),
                    DateField::Priority => FilingPatch::default().priority_date(date),
                };
                commands.update_filing(patch);
            }
            Self::Attachment(slot) => {
                let path = value.trim();
                if path.is_empty() {
                    return Ok(Commit::Skipped);
                }
                return Ok(Commit::Upload(*slot, PathBuf::from(path)));
            }
        }
        Ok(Commit::Stored)
    }
}

fn parse_optional_date(value: &str) -> Result<Option<NaiveDate>, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| FieldError::InvalidDate(value.to_string()))
}

/// One focusable control on a wizard page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSlot {
    Text(TextTarget),
    ApplicantKind,
    RemoveInventor(Uuid),
    AddInventor,
    Category,
    Country,
    /// An uploaded file; Delete removes it
    Attached { slot: AttachmentSlot, index: usize },
    Acknowledgment(AcknowledgmentKey),
    Submit,
}

impl FieldSlot {
    pub fn text_target(&self) -> Option<TextTarget> {
        match self {
            Self::Text(target) => Some(*target),
            _ => None,
        }
    }
}

/// Controls on the page for `step`, in focus order
pub fn slots_for(step: WizardStep, form: &FormData) -> Vec<FieldSlot> {
    let mut slots = Vec::new();
    match step {
        WizardStep::Applicant => {
            slots.push(FieldSlot::ApplicantKind);
            if form.applicant.kind == ApplicantKind::Organization {
                slots.push(FieldSlot::Text(TextTarget::Applicant(ApplicantField::CompanyName)));
            }
            for field in [
                ApplicantField::FirstName,
                ApplicantField::LastName,
                ApplicantField::Email,
                ApplicantField::Phone,
                ApplicantField::Address,
            ] {
                slots.push(FieldSlot::Text(TextTarget::Applicant(field)));
            }
            let removable = form.inventors.len() > 1;
            for inventor in &form.inventors {
                for field in InventorField::ALL {
                    slots.push(FieldSlot::Text(TextTarget::Inventor(inventor.id, field)));
                }
                if removable {
                    slots.push(FieldSlot::RemoveInventor(inventor.id));
                }
            }
            slots.push(FieldSlot::AddInventor);
        }
        WizardStep::Invention => {
            slots.push(FieldSlot::Text(TextTarget::Invention(InventionField::Title)));
            slots.push(FieldSlot::Category);
            for field in [
                InventionField::Abstract,
                InventionField::Description,
                InventionField::ProblemSolved,
                InventionField::UseCase,
            ] {
                slots.push(FieldSlot::Text(TextTarget::Invention(field)));
            }
        }
        WizardStep::Filing => {
            let filing = &form.filing;
            slots.push(FieldSlot::Text(TextTarget::Date(DateField::Filing)));
            slots.push(FieldSlot::Text(TextTarget::Date(DateField::Priority)));
            slots.push(FieldSlot::Country);

            slots.push(FieldSlot::Text(TextTarget::Attachment(AttachmentSlot::Drawings)));
            if filing.drawings.is_some() {
                slots.push(FieldSlot::Attached {
                    slot: AttachmentSlot::Drawings,
                    index: 0,
                });
            }
            slots.push(FieldSlot::Text(TextTarget::Attachment(AttachmentSlot::Specification)));
            if filing.specification.is_some() {
                slots.push(FieldSlot::Attached {
                    slot: AttachmentSlot::Specification,
                    index: 0,
                });
            }
            slots.push(FieldSlot::Text(TextTarget::Attachment(
                AttachmentSlot::AdditionalDocument,
            )));
            for index in 0..filing.additional_documents.len() {
                slots.push(FieldSlot::Attached {
                    slot: AttachmentSlot::AdditionalDocument,
                    index,
                });
            }

            for key in AcknowledgmentKey::ALL {
                slots.push(FieldSlot::Acknowledgment(key));
            }
        }
        WizardStep::Review => slots.push(FieldSlot::Submit),
    }
    slots
}

/// Which slot has focus. Wraps around at both ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusRing {
    index: usize,
}

impl FocusRing {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = (self.index + 1) % len;
    }

    pub fn prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = if self.index == 0 {
            len - 1
        } else {
            self.index - 1
        };
    }

    /// Pull the index back inside a page that shrank
    pub fn clamp(&mut self, len: usize) {
        self.index = self.index.min(len.saturating_sub(1));
    }

    pub fn focus(&mut self, index: usize) {
        self.index = index;
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn focused<'a>(&self, slots: &'a [FieldSlot]) -> Option<&'a FieldSlot> {
        slots.get(self.index)
    }
}

/// Flip an applicant between individual and organization. The company name
/// is kept, only hidden, while the applicant is an individual.
pub fn toggle_applicant_kind(form: &FormData, commands: &mut dyn FormCommands) {
    let next = form.applicant.kind.toggle();
    commands.update_applicant(ApplicantPatch::default().kind(next));
}
