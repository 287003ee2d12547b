//! Form state store
//!
//! Holds the live [`FormData`] behind an `Arc`. Every effective mutation
//! builds a new copy and swaps the `Arc`, so a consumer holding an old
//! snapshot can detect change with `Arc::ptr_eq`.

use super::model::{
    AcknowledgmentKey, ApplicantKind, ApplicantPatch, FilingPatch, FormData, InventionPatch,
    Inventor, InventorField,
};
use std::sync::Arc;
use uuid::Uuid;

/// Named mutations the UI is allowed to perform on the application
pub trait FormCommands {
    /// Merge a partial applicant update
    fn update_applicant(&mut self, patch: ApplicantPatch);

    /// Merge a partial invention update
    fn update_invention(&mut self, patch: InventionPatch);

    /// Merge a partial filing update
    fn update_filing(&mut self, patch: FilingPatch);

    /// Append a blank inventor and return its id
    fn add_inventor(&mut self) -> Uuid;

    /// Remove an inventor. Refused when it is the last one or the id is unknown.
    fn remove_inventor(&mut self, id: Uuid) -> bool;

    /// Set one field on one inventor. Returns false if no inventor matched.
    fn update_inventor(&mut self, id: Uuid, field: InventorField, value: String) -> bool;

    /// Set one acknowledgment flag
    fn update_acknowledgment(&mut self, key: AcknowledgmentKey, value: bool);
}

/// Owner of the canonical application state
#[derive(Debug, Clone)]
pub struct FormStore {
    current: Arc<FormData>,
    pristine: Arc<FormData>,
    revision: u64,
}

impl FormStore {
    /// Create a store seeded with `initial`. The reset target is a fresh default.
    pub fn new(initial: FormData) -> Self {
        Self::with_pristine(initial, FormData::default())
    }

    /// Create a store with an explicit reset target
    pub fn with_pristine(initial: FormData, pristine: FormData) -> Self {
        Self {
            current: Arc::new(initial),
            pristine: Arc::new(pristine),
            revision: 0,
        }
    }

    /// Shared handle to the current state
    pub fn snapshot(&self) -> Arc<FormData> {
        Arc::clone(&self.current)
    }

    pub fn form(&self) -> &FormData {
        &self.current
    }

    /// Number of effective mutations since creation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Restore the default application
    pub fn reset(&mut self) {
        self.current = Arc::clone(&self.pristine);
        self.revision += 1;
    }

    fn commit(&mut self, mutate: impl FnOnce(&mut FormData)) {
        let mut next = FormData::clone(&self.current);
        mutate(&mut next);
        self.current = Arc::new(next);
        self.revision += 1;
    }
}

/// Copy applicant contact details into the primary inventor while the
/// inventor's name is still blank
fn mirror_applicant_into_primary(form: &mut FormData) {
    if form.applicant.kind != ApplicantKind::Individual {
        return;
    }
    let applicant = &form.applicant;
    let Some(primary) = form.inventors.first_mut() else {
        return;
    };
    if !primary.has_empty_name() {
        return;
    }
    primary.first_name = applicant.first_name.clone();
    primary.last_name = applicant.last_name.clone();
    primary.email = applicant.email.clone();
    primary.address = applicant.address.clone();
}

impl FormCommands for FormStore {
    fn update_applicant(&mut self, patch: ApplicantPatch) {
        let mirrored = patch.changes_mirrored_fields(&self.current.applicant);
        self.commit(|form| {
            patch.apply_to(&mut form.applicant);
            if mirrored {
                mirror_applicant_into_primary(form);
            }
        });
    }

    fn update_invention(&mut self, patch: InventionPatch) {
        self.commit(|form| patch.apply_to(&mut form.invention));
    }

    fn update_filing(&mut self, patch: FilingPatch) {
        self.commit(|form| patch.apply_to(&mut form.filing));
    }

    fn add_inventor(&mut self) -> Uuid {
        let inventor = Inventor::blank();
        let id = inventor.id;
        self.commit(|form| form.inventors.push(inventor));
        id
    }

    fn remove_inventor(&mut self, id: Uuid) -> bool {
        let inventors = &self.current.inventors;
        if inventors.len() <= 1 || !inventors.iter().any(|i| i.id == id) {
            tracing::debug!(%id, "Refusing to remove inventor");
            return false;
        }
        self.commit(|form| form.inventors.retain(|i| i.id != id));
        true
    }

    fn update_inventor(&mut self, id: Uuid, field: InventorField, value: String) -> bool {
        if self.current.inventor(id).is_none() {
            return false;
        }
        self.commit(|form| {
            if let Some(inventor) = form.inventors.iter_mut().find(|i| i.id == id) {
                inventor.set(field, value);
            }
        });
        true
    }

    fn update_acknowledgment(&mut self, key: AcknowledgmentKey, value: bool) {
        self.commit(|form| form.filing.acknowledgments.set(key, value));
    }
}
