//! Draft persistence
//!
//! Saves the application to a durable slot and restores it on start-up.
//! Loading never fails: a missing or unreadable draft yields a blank form.

mod shape;
mod slot;

pub use shape::PersistedForm;
pub use slot::{DurableSlot, FileSlot, MemorySlot};

use crate::state::FormData;
use thiserror::Error;

/// Key of the slot holding the draft
pub const STORAGE_KEY: &str = "patent-form-data";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored draft is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored date is not ISO-8601: {0}")]
    InvalidDate(String),
    #[error("no data directory available for drafts")]
    NoDataDir,
}

/// Serializes the application to, and restores it from, a durable slot
pub struct PersistenceAdapter {
    slot: Box<dyn DurableSlot>,
}

impl PersistenceAdapter {
    pub fn new(slot: impl DurableSlot + 'static) -> Self {
        Self {
            slot: Box::new(slot),
        }
    }

    /// Write the draft. File references are not persisted.
    pub fn save(&self, form: &FormData) -> Result<(), PersistError> {
        let json = serde_json::to_string(&PersistedForm::from(form))?;
        self.slot.write(STORAGE_KEY, &json)?;
        tracing::info!(bytes = json.len(), "Saved draft");
        Ok(())
    }

    /// Restore the draft, falling back to a blank form
    pub fn load(&self) -> FormData {
        self.try_load().unwrap_or_default()
    }

    /// Restore the draft if one exists and parses. Failures are logged, not returned.
    pub fn try_load(&self) -> Option<FormData> {
        match self.read_draft() {
            Ok(Some(form)) => {
                tracing::info!("Restored saved draft");
                Some(form)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Error parsing saved form data: {e}");
                None
            }
        }
    }

    fn read_draft(&self) -> Result<Option<FormData>, PersistError> {
        let Some(raw) = self.slot.read(STORAGE_KEY)? else {
            return Ok(None);
        };
        let persisted: PersistedForm = serde_json::from_str(&raw)?;
        persisted.into_form().map(Some)
    }

    /// Delete the draft
    pub fn clear(&self) -> Result<(), PersistError> {
        self.slot.remove(STORAGE_KEY)?;
        tracing::info!("Cleared saved draft");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        ApplicantKind, Country, FileRef, InventionCategory, InventorField,
    };
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn file(name: &str) -> FileRef {
        FileRef {
            name: name.to_string(),
            size: 42,
            path: PathBuf::from(name),
        }
    }

    fn filled_form() -> FormData {
        let mut form = FormData::default();
        form.applicant.kind = ApplicantKind::Organization;
        form.applicant.company_name = Some("Difference Engines Ltd".to_string());
        form.applicant.first_name = "Ada".to_string();
        form.applicant.email = "ada@example.com".to_string();
        form.inventors[0].set(InventorField::FirstName, "Charles".to_string());
        let mut second = crate::state::Inventor::blank();
        second.last_name = "Menabrea".to_string();
        form.inventors.push(second);
        form.invention.title = "Analytical Engine".to_string();
        form.invention.category = Some(InventionCategory::Mechanical);
        form.invention.abstract_text = "A general purpose computer.".to_string();
        form.filing.filing_date = NaiveDate::from_ymd_opt(2024, 5, 1);
        form.filing.priority_date = NaiveDate::from_ymd_opt(2023, 1, 15);
        form.filing.country_of_filing = Country::UnitedKingdom;
        form.filing.acknowledgments.truthfulness = true;
        form.filing.acknowledgments.prior_art = true;
        form.filing.drawings = Some(file("fig1.png"));
        form.filing.specification = Some(file("spec.pdf"));
        form.filing.additional_documents = vec![file("letter.pdf")];
        form
    }

    mod round_trip {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_load_after_save_equals_input_except_files() {
            let adapter = PersistenceAdapter::new(MemorySlot::default());
            let form = filled_form();

            adapter.save(&form).unwrap();
            let restored = adapter.load();

            let mut expected = form.clone();
            expected.filing.drawings = None;
            expected.filing.specification = None;
            expected.filing.additional_documents.clear();
            assert_eq!(restored, expected);
        }

        #[test]
        fn test_files_are_always_empty_after_load() {
            let adapter = PersistenceAdapter::new(MemorySlot::default());
            adapter.save(&filled_form()).unwrap();
            let restored = adapter.load();
            assert!(restored.filing.drawings.is_none());
            assert!(restored.filing.specification.is_none());
            assert!(restored.filing.additional_documents.is_empty());
        }

        #[test]
        fn test_round_trip_through_file_slot() {
            let dir = TempDir::new().unwrap();
            let form = filled_form();

            PersistenceAdapter::new(FileSlot::new(dir.path()))
                .save(&form)
                .unwrap();
            let restored = PersistenceAdapter::new(FileSlot::new(dir.path()))
                .try_load()
                .unwrap();

            assert_eq!(restored.applicant, form.applicant);
            assert_eq!(restored.inventors, form.inventors);
            assert_eq!(restored.filing.filing_date, form.filing.filing_date);
        }
    }

    mod fallback {
        use super::*;
        use pretty_assertions::assert_eq;

        fn adapter_with(raw: &str) -> PersistenceAdapter {
            let slot = Arc::new(MemorySlot::default());
            slot.write(STORAGE_KEY, raw).unwrap();
            PersistenceAdapter::new(slot)
        }

        #[test]
        fn test_missing_slot_gives_default() {
            let adapter = PersistenceAdapter::new(MemorySlot::default());
            assert!(adapter.try_load().is_none());
            let form = adapter.load();
            assert!(form.is_blank());
            assert_eq!(form.applicant, Default::default());
        }

        #[test]
        fn test_corrupt_json_gives_default() {
            let adapter = adapter_with("{not json");
            assert!(adapter.try_load().is_none());
            assert!(adapter.load().is_blank());
        }

        #[test]
        fn test_schema_mismatch_gives_default() {
            let adapter = adapter_with(r#"{"applicantInfo": 7}"#);
            assert!(adapter.try_load().is_none());
        }

        #[test]
        fn test_invalid_date_gives_default() {
            let mut json = serde_json::to_value(PersistedForm::from(&filled_form())).unwrap();
            json["filingInfo"]["filingDate"] = "yesterday".into();
            let adapter = adapter_with(&json.to_string());
            assert!(adapter.try_load().is_none());
        }

        #[test]
        fn test_legacy_document_with_file_fields_loads() {
            let raw = r#"{
                "applicantInfo": {"applicantType": "individual", "firstName": "Ada",
                    "lastName": "", "email": "", "phone": "", "address": ""},
                "inventors": [{"id": "7d444840-9dc0-11d1-b245-5ffdce74fad2",
                    "firstName": "Ada", "lastName": "", "email": "", "address": ""}],
                "inventionInfo": {"title": "", "category": "", "abstract": "",
                    "description": "", "problemSolved": "", "useCase": ""},
                "filingInfo": {"filingDate": "2024-04-30T22:00:00.000Z", "priorityDate": null,
                    "countryOfFiling": "Canada", "drawings": {}, "specification": {},
                    "additionalDocuments": [],
                    "acknowledgments": {"truthfulness": true, "ownership": false, "priorArt": false}}
            }"#;
            let form = adapter_with(raw).try_load().unwrap();
            assert_eq!(form.applicant.first_name, "Ada");
            assert_eq!(form.filing.country_of_filing, Country::Canada);
            assert_eq!(form.filing.filing_date, NaiveDate::from_ymd_opt(2024, 4, 30));
            assert!(form.filing.drawings.is_none());
            assert!(form.filing.acknowledgments.truthfulness);
        }
    }

    #[test]
    fn test_clear_removes_slot() {
        let slot = Arc::new(MemorySlot::default());
        let adapter = PersistenceAdapter::new(Arc::clone(&slot));
        adapter.save(&FormData::default()).unwrap();
        assert!(slot.read(STORAGE_KEY).unwrap().is_some());

        adapter.clear().unwrap();
        assert!(slot.read(STORAGE_KEY).unwrap().is_none());
        assert!(adapter.try_load().is_none());
    }
}
