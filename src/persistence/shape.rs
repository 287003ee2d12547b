//! Persisted form shape
//!
//! The projection `FormData -> PersistedForm` drops every file reference and
//! renders dates as ISO-8601 text. The reverse direction parses dates back
//! and leaves files empty. Files cannot leak into storage because this
//! shape has nowhere to put them.

use super::PersistError;
use crate::state::{
    Acknowledgments, ApplicantInfo, Country, FilingInfo, FormData, InventionInfo, Inventor,
};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedForm {
    pub applicant_info: ApplicantInfo,
    pub inventors: Vec<Inventor>,
    pub invention_info: InventionInfo,
    pub filing_info: PersistedFiling,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedFiling {
    pub filing_date: Option<String>,
    pub priority_date: Option<String>,
    pub country_of_filing: Country,
    pub acknowledgments: Acknowledgments,
}

impl From<&FormData> for PersistedForm {
    fn from(form: &FormData) -> Self {
        let filing = &form.filing;
        Self {
            applicant_info: form.applicant.clone(),
            inventors: form.inventors.clone(),
            invention_info: form.invention.clone(),
            filing_info: PersistedFiling {
                filing_date: filing.filing_date.map(format_date),
                priority_date: filing.priority_date.map(format_date),
                country_of_filing: filing.country_of_filing,
                acknowledgments: filing.acknowledgments,
            },
        }
    }
}

impl PersistedForm {
    /// Rebuild the live form. File references always come back empty.
    pub fn into_form(self) -> Result<FormData, PersistError> {
        let filing = self.filing_info;
        let mut inventors = self.inventors;
        if inventors.is_empty() {
            inventors.push(Inventor::blank());
        }

        Ok(FormData {
            applicant: self.applicant_info,
            inventors,
            invention: self.invention_info,
            filing: FilingInfo {
                filing_date: filing.filing_date.as_deref().map(parse_date).transpose()?,
                priority_date: filing.priority_date.as_deref().map(parse_date).transpose()?,
                country_of_filing: filing.country_of_filing,
                drawings: None,
                specification: None,
                additional_documents: Vec::new(),
                acknowledgments: filing.acknowledgments,
            },
        })
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Accepts a plain calendar date or a full RFC 3339 timestamp
pub fn parse_date(text: &str) -> Result<NaiveDate, PersistError> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(text).map(|dt| dt.date_naive()))
        .map_err(|_| PersistError::InvalidDate(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FileRef;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_projection_has_no_file_fields() {
        let mut form = FormData::default();
        form.filing.drawings = Some(FileRef {
            name: "fig.png".to_string(),
            size: 3,
            path: PathBuf::from("fig.png"),
        });
        let json = serde_json::to_value(PersistedForm::from(&form)).unwrap();
        let filing = &json["filingInfo"];
        assert!(filing.get("drawings").is_none());
        assert!(filing.get("specification").is_none());
        assert!(filing.get("additionalDocuments").is_none());
    }

    #[test]
    fn test_top_level_keys() {
        let json = serde_json::to_value(PersistedForm::from(&FormData::default())).unwrap();
        for key in ["applicantInfo", "inventors", "inventionInfo", "filingInfo"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_dates_render_as_iso_text() {
        let mut form = FormData::default();
        form.filing.filing_date = Some(date(2024, 5, 1));
        let json = serde_json::to_value(PersistedForm::from(&form)).unwrap();
        assert_eq!(json["filingInfo"]["filingDate"], "2024-05-01");
        assert!(json["filingInfo"]["priorityDate"].is_null());
    }

    #[test]
    fn test_parse_date_accepts_timestamps() {
        assert_eq!(parse_date("2024-05-01").unwrap(), date(2024, 5, 1));
        assert_eq!(
            parse_date("2024-05-01T00:00:00.000Z").unwrap(),
            date(2024, 5, 1)
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(matches!(
            parse_date("next tuesday"),
            Err(PersistError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_empty_inventor_list_gets_a_blank_inventor() {
        let mut persisted = PersistedForm::from(&FormData::default());
        persisted.inventors.clear();
        let form = persisted.into_form().unwrap();
        assert_eq!(form.inventors.len(), 1);
    }

    #[test]
    fn test_round_trip_keeps_everything_but_files() {
        let mut form = FormData::default();
        form.applicant.first_name = "Ada".to_string();
        form.filing.priority_date = Some(date(2023, 12, 31));
        form.filing.country_of_filing = Country::Germany;
        form.filing.acknowledgments.ownership = true;
        form.filing.specification = Some(FileRef {
            name: "spec.pdf".to_string(),
            size: 3,
            path: PathBuf::from("spec.pdf"),
        });

        let restored = PersistedForm::from(&form).into_form().unwrap();

        let mut expected = form.clone();
        expected.filing.specification = None;
        assert_eq!(restored, expected);
    }
}
