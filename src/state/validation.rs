//! Submission eligibility checks
//!
//! Everything here is a pure function of the current [`FormData`] and is
//! recomputed on every call.

use super::model::{AcknowledgmentKey, ApplicantKind, FormData};
use super::steps::WizardStep;

/// Something that blocks submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Acknowledgment(AcknowledgmentKey),
    Drawings,
    Specification,
}

impl Requirement {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Acknowledgment(AcknowledgmentKey::Truthfulness) => {
                "Confirm the truthfulness statement"
            }
            Self::Acknowledgment(AcknowledgmentKey::Ownership) => "Confirm the ownership statement",
            Self::Acknowledgment(AcknowledgmentKey::PriorArt) => {
                "Acknowledge the prior art disclosure duty"
            }
            Self::Drawings => "Upload drawings or figures",
            Self::Specification => "Upload the specification document",
        }
    }
}

/// True iff every acknowledgment is given and both required documents are attached
pub fn can_submit(form: &FormData) -> bool {
    form.filing.acknowledgments.all()
        && form.filing.drawings.is_some()
        && form.filing.specification.is_some()
}

/// Everything currently blocking submission, in display order
pub fn missing_requirements(form: &FormData) -> Vec<Requirement> {
    let acknowledgments = &form.filing.acknowledgments;
    let mut missing: Vec<Requirement> = AcknowledgmentKey::ALL
        .into_iter()
        .filter(|key| !acknowledgments.get(*key))
        .map(Requirement::Acknowledgment)
        .collect();
    if form.filing.drawings.is_none() {
        missing.push(Requirement::Drawings);
    }
    if form.filing.specification.is_none() {
        missing.push(Requirement::Specification);
    }
    missing
}

/// Required fields left blank on a step. Advisory only: neither navigation
/// nor submission is gated on these.
pub fn step_warnings(step: WizardStep, form: &FormData) -> Vec<String> {
    fn require(warnings: &mut Vec<String>, value: &str, label: &str) {
        if value.trim().is_empty() {
            warnings.push(format!("{label} is required"));
        }
    }

    let mut warnings = Vec::new();

    match step {
        WizardStep::Applicant => {
            let applicant = &form.applicant;
            if applicant.kind == ApplicantKind::Organization {
                require(
                    &mut warnings,
                    applicant.company_name.as_deref().unwrap_or_default(),
                    "Company name",
                );
            }
            require(&mut warnings, &applicant.first_name, "First name");
            require(&mut warnings, &applicant.last_name, "Last name");
            require(&mut warnings, &applicant.email, "Email");
            require(&mut warnings, &applicant.phone, "Phone");
            require(&mut warnings, &applicant.address, "Address");
            for (i, inventor) in form.inventors.iter().enumerate() {
                if inventor.has_empty_name() {
                    warnings.push(format!("Inventor {} needs a name", i + 1));
                }
            }
        }
        WizardStep::Invention => {
            let invention = &form.invention;
            require(&mut warnings, &invention.title, "Title");
            if invention.category.is_none() {
                warnings.push("Category is required".to_string());
            }
            require(&mut warnings, &invention.abstract_text, "Abstract");
            require(&mut warnings, &invention.description, "Description");
            require(&mut warnings, &invention.problem_solved, "Problem solved");
            require(&mut warnings, &invention.use_case, "Use case");
        }
        WizardStep::Filing | WizardStep::Review => {
            warnings.extend(
                missing_requirements(form)
                    .iter()
                    .map(|r| r.message().to_string()),
            );
        }
    }
    warnings
}
