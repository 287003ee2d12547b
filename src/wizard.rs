//! Wizard assembly
//!
//! [`Wizard`] owns every piece of form state for one session: the store,
//! the step controller, the draft persistence, the submission workflow and
//! the notification queue. The App constructs exactly one and passes it
//! around by reference.

use crate::attachments::{AttachmentPolicies, AttachmentSlot};
use crate::config::WizardConfig;
use crate::filing::{SimulatedFilingOffice, SubmitEffect};
use crate::notify::Notifications;
use crate::persistence::{FileSlot, MemorySlot, PersistenceAdapter};
use crate::state::{
    can_submit, FilingPatch, FormCommands, FormData, FormStore, StepController, SubmissionEvent,
    SubmissionState, SubmissionWorkflow, WizardStep,
};
use std::path::Path;
use std::sync::Arc;

pub struct Wizard {
    store: FormStore,
    steps: StepController,
    persistence: PersistenceAdapter,
    submission: SubmissionWorkflow,
    notifications: Notifications,
    policies: AttachmentPolicies,
}

impl Wizard {
    /// Build a wizard, restoring the saved draft if one exists
    pub fn new(
        persistence: PersistenceAdapter,
        effect: Arc<dyn SubmitEffect>,
        config: &WizardConfig,
    ) -> Self {
        Self {
            store: FormStore::new(persistence.load()),
            steps: StepController::new(),
            persistence,
            submission: SubmissionWorkflow::new(effect, config.grace_delay()),
            notifications: Notifications::default(),
            policies: AttachmentPolicies::from_config(config),
        }
    }

    /// Production wiring: drafts in the data dir, submissions to the simulated office
    pub fn from_config(config: &WizardConfig) -> Self {
        let persistence = match FileSlot::from_config(config) {
            Ok(slot) => PersistenceAdapter::new(slot),
            Err(e) => {
                tracing::warn!("Drafts will not survive a restart: {e}");
                PersistenceAdapter::new(MemorySlot::default())
            }
        };
        let office = SimulatedFilingOffice::new(config.submit_latency());
        Self::new(persistence, Arc::new(office), config)
    }

    pub fn form(&self) -> &FormData {
        self.store.form()
    }

    pub fn store(&self) -> &FormStore {
        &self.store
    }

    /// Mutation entry point for the UI
    pub fn commands(&mut self) -> &mut dyn FormCommands {
        &mut self.store
    }

    pub fn steps(&self) -> &StepController {
        &self.steps
    }

    pub fn steps_mut(&mut self) -> &mut StepController {
        &mut self.steps
    }

    pub fn current_step(&self) -> WizardStep {
        self.steps.current_step()
    }

    pub fn policies(&self) -> &AttachmentPolicies {
        &self.policies
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub fn submission_state(&self) -> &SubmissionState {
        self.submission.state()
    }

    /// Submit is offered only when the form is complete and nothing is in flight
    pub fn can_submit(&self) -> bool {
        can_submit(self.store.form()) && !self.submission.is_busy()
    }

    /// Write the current form as a draft
    pub fn save_draft(&mut self) -> bool {
        match self.persistence.save(self.store.form()) {
            Ok(()) => {
                self.notifications.success("Form data saved successfully");
                true
            }
            Err(e) => {
                tracing::warn!("Failed to save draft: {e}");
                self.notifications.error(format!("Could not save form data: {e}"));
                false
            }
        }
    }

    /// Discard the draft, restore the default form and go back to the first step
    pub fn reset(&mut self) {
        if let Err(e) = self.persistence.clear() {
            tracing::warn!("Failed to clear saved draft: {e}");
        }
        self.store.reset();
        self.steps.reset();
        tracing::info!("Form reset");
        self.notifications.info("Form data has been reset");
    }

    /// Hand a copy of the form to the submit effect
    pub fn submit(&mut self) -> bool {
        if !can_submit(self.store.form()) {
            tracing::debug!("Submit refused: application incomplete");
            return false;
        }
        let form = FormData::clone(self.store.form());
        if !self.submission.submit(form) {
            return false;
        }
        self.notifications.pending("Submitting your application...");
        true
    }

    /// Pick up submission progress without blocking. Called from the event loop.
    pub async fn tick(&mut self) {
        if let Some(event) = self.submission.poll().await {
            self.handle_submission_event(event);
        }
    }

    /// Wait for the next submission event. Returns false when nothing is outstanding.
    pub async fn settle(&mut self) -> bool {
        match self.submission.settle().await {
            Some(event) => {
                self.handle_submission_event(event);
                true
            }
            None => false,
        }
    }

    fn handle_submission_event(&mut self, event: SubmissionEvent) {
        match event {
            SubmissionEvent::Succeeded(receipt) => {
                self.notifications.success(format!(
                    "Patent application submitted successfully! Application number {}",
                    receipt.application_number
                ));
            }
            SubmissionEvent::Failed(_) => {
                self.notifications
                    .error("Failed to submit application. Please try again.");
            }
            SubmissionEvent::ResetDue => self.reset(),
        }
    }

    /// Check a file against the slot's policy and attach it. Rejections only
    /// produce a notification.
    pub fn attach(&mut self, slot: AttachmentSlot, path: &Path) -> bool {
        let file = match self.policies.for_slot(slot).admit(path) {
            Ok(file) => file,
            Err(e) => {
                tracing::debug!(slot = slot.label(), "Rejected upload: {e}");
                self.notifications.error(e.to_string());
                return false;
            }
        };

        tracing::info!(slot = slot.label(), name = %file.name, size = file.size, "Attached file");
        let patch = match slot {
            AttachmentSlot::Drawings => FilingPatch::default().drawings(Some(file)),
            AttachmentSlot::Specification => FilingPatch::default().specification(Some(file)),
            AttachmentSlot::AdditionalDocument => {
                let mut documents = self.store.form().filing.additional_documents.clone();
                documents.push(file);
                FilingPatch::default().additional_documents(documents)
            }
        };
        self.store.update_filing(patch);
        self.notifications.success("File uploaded successfully.");
        true
    }

    /// Remove an attachment. `index` picks the additional document and is
    /// ignored for the single-file slots.
    pub fn detach(&mut self, slot: AttachmentSlot, index: usize) -> bool {
        let filing = &self.store.form().filing;
        let patch = match slot {
            AttachmentSlot::Drawings if filing.drawings.is_some() => {
                FilingPatch::default().drawings(None)
            }
            AttachmentSlot::Specification if filing.specification.is_some() => {
                FilingPatch::default().specification(None)
            }
            AttachmentSlot::AdditionalDocument if index < filing.additional_documents.len() => {
                let mut documents = filing.additional_documents.clone();
                documents.remove(index);
                FilingPatch::default().additional_documents(documents)
            }
            _ => return false,
        };
        self.store.update_filing(patch);
        self.notifications.info("File removed.");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filing::{MockSubmitEffect, SubmissionReceipt};
    use crate::notify::NotificationLevel;
    use crate::persistence::{DurableSlot, MemorySlot, STORAGE_KEY};
    use crate::state::{AcknowledgmentKey, ApplicantPatch, InventionPatch};
    use chrono::Utc;
    use std::io::Write;
    use tempfile::TempDir;

    fn config() -> WizardConfig {
        WizardConfig {
            grace_delay_ms: Some(2000),
            ..Default::default()
        }
    }

    fn wizard_with(slot: Arc<MemorySlot>, effect: MockSubmitEffect) -> Wizard {
        Wizard::new(PersistenceAdapter::new(slot), Arc::new(effect), &config())
    }

    fn wizard() -> Wizard {
        wizard_with(Arc::new(MemorySlot::default()), MockSubmitEffect::new())
    }

    fn succeeding_effect() -> MockSubmitEffect {
        let mut mock = MockSubmitEffect::new();
        mock.expect_submit().times(1).returning(|_| {
            Ok(SubmissionReceipt {
                application_number: "PA-0000TEST".to_string(),
                submitted_at: Utc::now(),
            })
        });
        mock
    }

    fn write_file(dir: &TempDir, name: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"content").unwrap();
        path
    }

    /// Fill in everything submission needs
    fn complete(wizard: &mut Wizard, dir: &TempDir) {
        for key in AcknowledgmentKey::ALL {
            wizard.commands().update_acknowledgment(key, true);
        }
        assert!(wizard.attach(AttachmentSlot::Drawings, &write_file(dir, "fig.png")));
        assert!(wizard.attach(
            AttachmentSlot::Specification,
            &write_file(dir, "spec.pdf")
        ));
    }

    fn last_message(wizard: &Wizard) -> (NotificationLevel, String) {
        let latest = wizard.notifications().latest().unwrap();
        (latest.level, latest.message.clone())
    }

    mod lifecycle {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_starts_from_default_without_draft() {
            let wizard = wizard();
            assert!(wizard.form().is_blank());
            assert_eq!(wizard.current_step(), WizardStep::Applicant);
        }

        #[test]
        fn test_restores_saved_draft() {
            let slot = Arc::new(MemorySlot::default());
            let mut first = wizard_with(Arc::clone(&slot), MockSubmitEffect::new());
            first
                .commands()
                .update_invention(InventionPatch::default().title("Loom"));
            assert!(first.save_draft());
            assert_eq!(
                last_message(&first),
                (
                    NotificationLevel::Success,
                    "Form data saved successfully".to_string()
                )
            );

            let second = wizard_with(slot, MockSubmitEffect::new());
            assert_eq!(second.form().invention.title, "Loom");
        }

        #[test]
        fn test_corrupt_draft_starts_blank() {
            let slot = Arc::new(MemorySlot::default());
            slot.write(STORAGE_KEY, "][").unwrap();
            let wizard = wizard_with(slot, MockSubmitEffect::new());
            assert!(wizard.form().is_blank());
        }

        #[test]
        fn test_reset_clears_everything() {
            let slot = Arc::new(MemorySlot::default());
            let mut wizard = wizard_with(Arc::clone(&slot), MockSubmitEffect::new());
            wizard
                .commands()
                .update_applicant(ApplicantPatch::default().first_name("Grace"));
            wizard.save_draft();
            wizard.steps_mut().advance();

            wizard.reset();

            assert!(wizard.form().is_blank());
            assert_eq!(wizard.steps().index(), 0);
            assert!(slot.read(STORAGE_KEY).unwrap().is_none());
            assert_eq!(
                last_message(&wizard),
                (
                    NotificationLevel::Info,
                    "Form data has been reset".to_string()
                )
            );
        }
    }

    mod attachments {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_rejected_file_leaves_store_untouched() {
            let dir = TempDir::new().unwrap();
            let mut wizard = wizard();
            let revision = wizard.store().revision();

            let path = write_file(&dir, "notes.txt");
            assert!(!wizard.attach(AttachmentSlot::Specification, &path));

            assert_eq!(wizard.store().revision(), revision);
            assert!(wizard.form().filing.specification.is_none());
            assert_eq!(last_message(&wizard).0, NotificationLevel::Error);
        }

        #[test]
        fn test_additional_documents_append_and_remove() {
            let dir = TempDir::new().unwrap();
            let mut wizard = wizard();
            wizard.attach(
                AttachmentSlot::AdditionalDocument,
                &write_file(&dir, "a.pdf"),
            );
            wizard.attach(
                AttachmentSlot::AdditionalDocument,
                &write_file(&dir, "b.docx"),
            );
            assert_eq!(wizard.form().filing.additional_documents.len(), 2);

            assert!(wizard.detach(AttachmentSlot::AdditionalDocument, 0));
            let names: Vec<_> = wizard
                .form()
                .filing
                .additional_documents
                .iter()
                .map(|f| f.name.as_str())
                .collect();
            assert_eq!(names, vec!["b.docx"]);
            assert!(!wizard.detach(AttachmentSlot::AdditionalDocument, 5));
        }

        #[test]
        fn test_detach_empty_slot_is_refused() {
            let mut wizard = wizard();
            assert!(!wizard.detach(AttachmentSlot::Drawings, 0));
            assert!(wizard.notifications().is_empty());
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test(start_paused = true)]
        async fn test_submit_then_reset_after_grace_delay() {
            let dir = TempDir::new().unwrap();
            let slot = Arc::new(MemorySlot::default());
            let mut wizard = wizard_with(Arc::clone(&slot), succeeding_effect());
            complete(&mut wizard, &dir);
            wizard.save_draft();
            for _ in 0..3 {
                wizard.steps_mut().advance();
            }

            assert!(wizard.can_submit());
            assert!(wizard.submit());
            assert_eq!(wizard.submission_state(), &SubmissionState::Submitting);
            assert_eq!(last_message(&wizard).0, NotificationLevel::Pending);
            assert!(!wizard.can_submit());

            assert!(wizard.settle().await);
            assert!(matches!(
                wizard.submission_state(),
                SubmissionState::Succeeded(_)
            ));
            assert_eq!(wizard.steps().index(), 3);

            assert!(wizard.settle().await);
            assert_eq!(wizard.steps().index(), 0);
            assert!(wizard.form().is_blank());
            assert!(slot.read(STORAGE_KEY).unwrap().is_none());
            assert_eq!(wizard.submission_state(), &SubmissionState::Idle);
        }

        #[tokio::test(start_paused = true)]
        async fn test_failure_preserves_form() {
            let dir = TempDir::new().unwrap();
            let mut mock = MockSubmitEffect::new();
            mock.expect_submit()
                .times(1)
                .returning(|_| Err(anyhow::anyhow!("503")));
            let mut wizard = wizard_with(Arc::new(MemorySlot::default()), mock);
            complete(&mut wizard, &dir);
            let before = wizard.form().clone();

            wizard.submit();
            wizard.settle().await;

            assert!(matches!(wizard.submission_state(), SubmissionState::Failed(_)));
            assert_eq!(wizard.form(), &before);
            assert_eq!(
                last_message(&wizard),
                (
                    NotificationLevel::Error,
                    "Failed to submit application. Please try again.".to_string()
                )
            );
            assert!(wizard.can_submit());
        }

        #[tokio::test]
        async fn test_incomplete_form_is_not_submitted() {
            let mut wizard = wizard();
            wizard.commands().update_acknowledgment(AcknowledgmentKey::Truthfulness, true);
            assert!(!wizard.submit());
            assert_eq!(wizard.submission_state(), &SubmissionState::Idle);
            assert!(!wizard.settle().await);
        }

        #[tokio::test(start_paused = true)]
        async fn test_tick_delivers_events_from_the_loop() {
            let dir = TempDir::new().unwrap();
            let mut wizard = wizard_with(Arc::new(MemorySlot::default()), succeeding_effect());
            complete(&mut wizard, &dir);
            wizard.submit();

            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            wizard.tick().await;
            assert!(matches!(
                wizard.submission_state(),
                SubmissionState::Succeeded(_)
            ));

            tokio::time::sleep(std::time::Duration::from_millis(2000)).await;
            wizard.tick().await;
            assert!(wizard.form().is_blank());
        }
    }
}
