//! Patent application entity model
//!
//! `FormData` is the aggregate root. It is owned by the form store and only
//! changes through the patch types defined at the bottom of this module.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::PathBuf;
use uuid::Uuid;

/// Who is applying for the patent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicantKind {
    #[default]
    Individual,
    Organization,
}

impl ApplicantKind {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Individual => Self::Organization,
            Self::Organization => Self::Individual,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Organization => "Organization",
        }
    }
}

/// Applicant identity and contact details
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantInfo {
    #[serde(rename = "applicantType")]
    pub kind: ApplicantKind,
    /// Only meaningful for organizations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// A single inventor. Index 0 of the inventor list is the primary inventor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventor {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
}

impl Inventor {
    /// Create an inventor with a fresh id and empty fields
    pub fn blank() -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            address: String::new(),
        }
    }

    pub fn get(&self, field: InventorField) -> &str {
        match field {
            InventorField::FirstName => &self.first_name,
            InventorField::LastName => &self.last_name,
            InventorField::Email => &self.email,
            InventorField::Address => &self.address,
        }
    }

    pub fn set(&mut self, field: InventorField, value: String) {
        match field {
            InventorField::FirstName => self.first_name = value,
            InventorField::LastName => self.last_name = value,
            InventorField::Email => self.email = value,
            InventorField::Address => self.address = value,
        }
    }

    /// True while neither name field has been filled in
    pub fn has_empty_name(&self) -> bool {
        self.first_name.is_empty() && self.last_name.is_empty()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Editable inventor fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventorField {
    FirstName,
    LastName,
    Email,
    Address,
}

impl InventorField {
    pub const ALL: [InventorField; 4] = [
        InventorField::FirstName,
        InventorField::LastName,
        InventorField::Email,
        InventorField::Address,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Address => "Address",
        }
    }
}

/// Technology category of the invention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventionCategory {
    Mechanical,
    Electrical,
    Chemical,
    Biotech,
    Software,
    Pharmaceutical,
    Other,
}

impl InventionCategory {
    pub const ALL: [InventionCategory; 7] = [
        InventionCategory::Mechanical,
        InventionCategory::Electrical,
        InventionCategory::Chemical,
        InventionCategory::Biotech,
        InventionCategory::Software,
        InventionCategory::Pharmaceutical,
        InventionCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mechanical => "Mechanical",
            Self::Electrical => "Electrical",
            Self::Chemical => "Chemical",
            Self::Biotech => "Biotechnology",
            Self::Software => "Software",
            Self::Pharmaceutical => "Pharmaceutical",
            Self::Other => "Other",
        }
    }

    /// Cycle through the categories; an unset category starts at the first one
    pub fn cycle(current: Option<Self>) -> Self {
        match current {
            None => Self::ALL[0],
            Some(c) => {
                let idx = Self::ALL.iter().position(|x| *x == c).unwrap_or(0);
                Self::ALL[(idx + 1) % Self::ALL.len()]
            }
        }
    }
}

/// Written description of the invention
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventionInfo {
    pub title: String,
    /// Stored as an empty string while unset
    #[serde(with = "blank_category")]
    pub category: Option<InventionCategory>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub description: String,
    pub problem_solved: String,
    pub use_case: String,
}

mod blank_category {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<InventionCategory>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(category) => category.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<InventionCategory>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        serde_json::from_value(serde_json::Value::String(raw))
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

/// Country where the application is filed first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Country {
    #[default]
    #[serde(rename = "United States")]
    UnitedStates,
    #[serde(rename = "Canada")]
    Canada,
    #[serde(rename = "United Kingdom")]
    UnitedKingdom,
    #[serde(rename = "Australia")]
    Australia,
    #[serde(rename = "Japan")]
    Japan,
    #[serde(rename = "Germany")]
    Germany,
    #[serde(rename = "France")]
    France,
    #[serde(rename = "China")]
    China,
    #[serde(rename = "India")]
    India,
    #[serde(rename = "Brazil")]
    Brazil,
}

impl Country {
    pub const ALL: [Country; 10] = [
        Country::UnitedStates,
        Country::Canada,
        Country::UnitedKingdom,
        Country::Australia,
        Country::Japan,
        Country::Germany,
        Country::France,
        Country::China,
        Country::India,
        Country::Brazil,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::UnitedStates => "US",
            Self::Canada => "CA",
            Self::UnitedKingdom => "GB",
            Self::Australia => "AU",
            Self::Japan => "JP",
            Self::Germany => "DE",
            Self::France => "FR",
            Self::China => "CN",
            Self::India => "IN",
            Self::Brazil => "BR",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::UnitedStates => "United States",
            Self::Canada => "Canada",
            Self::UnitedKingdom => "United Kingdom",
            Self::Australia => "Australia",
            Self::Japan => "Japan",
            Self::Germany => "Germany",
            Self::France => "France",
            Self::China => "China",
            Self::India => "India",
            Self::Brazil => "Brazil",
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Handle to an accepted upload. Lives in memory only and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

impl FileRef {
    /// Size in megabytes, formatted like "1.25 MB"
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size as f64 / (1024.0 * 1024.0))
    }
}

/// Statements the applicant must confirm before submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgments {
    pub truthfulness: bool,
    pub ownership: bool,
    pub prior_art: bool,
}

impl Acknowledgments {
    pub fn get(&self, key: AcknowledgmentKey) -> bool {
        match key {
            AcknowledgmentKey::Truthfulness => self.truthfulness,
            AcknowledgmentKey::Ownership => self.ownership,
            AcknowledgmentKey::PriorArt => self.prior_art,
        }
    }

    pub fn set(&mut self, key: AcknowledgmentKey, value: bool) {
        match key {
            AcknowledgmentKey::Truthfulness => self.truthfulness = value,
            AcknowledgmentKey::Ownership => self.ownership = value,
            AcknowledgmentKey::PriorArt => self.prior_art = value,
        }
    }

    pub fn all(&self) -> bool {
        self.truthfulness && self.ownership && self.prior_art
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcknowledgmentKey {
    Truthfulness,
    Ownership,
    PriorArt,
}

impl AcknowledgmentKey {
    pub const ALL: [AcknowledgmentKey; 3] = [
        AcknowledgmentKey::Truthfulness,
        AcknowledgmentKey::Ownership,
        AcknowledgmentKey::PriorArt,
    ];

    pub fn statement(&self) -> &'static str {
        match self {
            Self::Truthfulness => "All information provided is true and correct to the best of my knowledge.",
            Self::Ownership => "I have the right to file this application and own the invention or act for the owner.",
            Self::PriorArt => "I understand the duty to disclose all known prior art relevant to patentability.",
        }
    }
}

/// Filing metadata, documents and acknowledgments
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilingInfo {
    pub filing_date: Option<NaiveDate>,
    pub priority_date: Option<NaiveDate>,
    pub country_of_filing: Country,
    pub drawings: Option<FileRef>,
    pub specification: Option<FileRef>,
    pub additional_documents: Vec<FileRef>,
    pub acknowledgments: Acknowledgments,
}

/// The complete application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormData {
    pub applicant: ApplicantInfo,
    pub inventors: Vec<Inventor>,
    pub invention: InventionInfo,
    pub filing: FilingInfo,
}

impl Default for FormData {
    fn default() -> Self {
        Self {
            applicant: ApplicantInfo::default(),
            inventors: vec![Inventor::blank()],
            invention: InventionInfo::default(),
            filing: FilingInfo::default(),
        }
    }
}

impl FormData {
    /// True when nothing has been entered. Inventor ids are not compared.
    pub fn is_blank(&self) -> bool {
        let [only] = self.inventors.as_slice() else {
            return false;
        };
        let mut blank = FormData::default();
        if let Some(inventor) = blank.inventors.first_mut() {
            inventor.id = only.id;
        }
        *self == blank
    }

    pub fn inventor(&self, id: Uuid) -> Option<&Inventor> {
        self.inventors.iter().find(|i| i.id == id)
    }
}

/// Partial update for [`ApplicantInfo`]; unset fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicantPatch {
    pub kind: Option<ApplicantKind>,
    pub company_name: Option<Option<String>>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ApplicantPatch {
    pub fn kind(mut self, kind: ApplicantKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn company_name(mut self, name: Option<String>) -> Self {
        self.company_name = Some(name);
        self
    }

    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    pub fn phone(mut self, value: impl Into<String>) -> Self {
        self.phone = Some(value.into());
        self
    }

    pub fn address(mut self, value: impl Into<String>) -> Self {
        self.address = Some(value.into());
        self
    }

    /// Whether applying this patch changes a field that is mirrored into the
    /// primary inventor
    pub fn changes_mirrored_fields(&self, current: &ApplicantInfo) -> bool {
        fn differs(new: &Option<String>, old: &str) -> bool {
            new.as_deref().is_some_and(|v| v != old)
        }
        differs(&self.first_name, &current.first_name)
            || differs(&self.last_name, &current.last_name)
            || differs(&self.email, &current.email)
            || differs(&self.address, &current.address)
    }

    pub fn apply_to(self, target: &mut ApplicantInfo) {
        if let Some(kind) = self.kind {
            target.kind = kind;
        }
        if let Some(name) = self.company_name {
            target.company_name = name;
        }
        if let Some(v) = self.first_name {
            target.first_name = v;
        }
        if let Some(v) = self.last_name {
            target.last_name = v;
        }
        if let Some(v) = self.email {
            target.email = v;
        }
        if let Some(v) = self.phone {
            target.phone = v;
        }
        if let Some(v) = self.address {
            target.address = v;
        }
    }
}

/// Partial update for [`InventionInfo`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventionPatch {
    pub title: Option<String>,
    pub category: Option<Option<InventionCategory>>,
    pub abstract_text: Option<String>,
    pub description: Option<String>,
    pub problem_solved: Option<String>,
    pub use_case: Option<String>,
}

impl InventionPatch {
    pub fn title(mut self, value: impl Into<String>) -> Self {
        self.title = Some(value.into());
        self
    }

    pub fn category(mut self, category: Option<InventionCategory>) -> Self {
        self.category = Some(category);
        self
    }

    pub fn abstract_text(mut self, value: impl Into<String>) -> Self {
        self.abstract_text = Some(value.into());
        self
    }

    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.description = Some(value.into());
        self
    }

    pub fn problem_solved(mut self, value: impl Into<String>) -> Self {
        self.problem_solved = Some(value.into());
        self
    }

    pub fn use_case(mut self, value: impl Into<String>) -> Self {
        self.use_case = Some(value.into());
        self
    }

    pub fn apply_to(self, target: &mut InventionInfo) {
        if let Some(v) = self.title {
            target.title = v;
        }
        if let Some(v) = self.category {
            target.category = v;
        }
        if let Some(v) = self.abstract_text {
            target.abstract_text = v;
        }
        if let Some(v) = self.description {
            target.description = v;
        }
        if let Some(v) = self.problem_solved {
            target.problem_solved = v;
        }
        if let Some(v) = self.use_case {
            target.use_case = v;
        }
    }
}

/// Partial update for [`FilingInfo`]. Acknowledgments have their own command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilingPatch {
    pub filing_date: Option<Option<NaiveDate>>,
    pub priority_date: Option<Option<NaiveDate>>,
    pub country_of_filing: Option<Country>,
    pub drawings: Option<Option<FileRef>>,
    pub specification: Option<Option<FileRef>>,
    pub additional_documents: Option<Vec<FileRef>>,
}

impl FilingPatch {
    pub fn filing_date(mut self, date: Option<NaiveDate>) -> Self {
        self.filing_date = Some(date);
        self
    }

    pub fn priority_date(mut self, date: Option<NaiveDate>) -> Self {
        self.priority_date = Some(date);
        self
    }

    pub fn country(mut self, country: Country) -> Self {
        self.country_of_filing = Some(country);
        self
    }

    pub fn drawings(mut self, file: Option<FileRef>) -> Self {
        self.drawings = Some(file);
        self
    }

    pub fn specification(mut self, file: Option<FileRef>) -> Self {
        self.specification = Some(file);
        self
    }

    pub fn additional_documents(mut self, files: Vec<FileRef>) -> Self {
        self.additional_documents = Some(files);
        self
    }

    pub fn apply_to(self, target: &mut FilingInfo) {
        if let Some(v) = self.filing_date {
            target.filing_date = v;
        }
        if let Some(v) = self.priority_date {
            target.priority_date = v;
        }
        if let Some(v) = self.country_of_filing {
            target.country_of_filing = v;
        }
        if let Some(v) = self.drawings {
            target.drawings = v;
        }
        if let Some(v) = self.specification {
            target.specification = v;
        }
        if let Some(v) = self.additional_documents {
            target.additional_documents = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod defaults {
        use super::*;

        #[test]
        fn test_default_form_has_one_blank_inventor() {
            let form = FormData::default();
            assert_eq!(form.inventors.len(), 1);
            assert!(form.inventors[0].has_empty_name());
        }

        #[test]
        fn test_default_applicant_is_individual() {
            let form = FormData::default();
            assert_eq!(form.applicant.kind, ApplicantKind::Individual);
            assert!(form.applicant.company_name.is_none());
        }

        #[test]
        fn test_default_country_is_united_states() {
            assert_eq!(FilingInfo::default().country_of_filing, Country::UnitedStates);
        }

        #[test]
        fn test_blank_inventors_get_distinct_ids() {
            assert_ne!(Inventor::blank().id, Inventor::blank().id);
        }

        #[test]
        fn test_is_blank_ignores_inventor_id() {
            assert!(FormData::default().is_blank());

            let mut form = FormData::default();
            form.invention.title = "Loom".to_string();
            assert!(!form.is_blank());

            let mut form = FormData::default();
            form.inventors.push(Inventor::blank());
            assert!(!form.is_blank());
        }
    }

    mod cycling {
        use super::*;

        #[test]
        fn test_category_cycle_starts_at_first() {
            assert_eq!(InventionCategory::cycle(None), InventionCategory::Mechanical);
        }

        #[test]
        fn test_category_cycle_wraps() {
            assert_eq!(
                InventionCategory::cycle(Some(InventionCategory::Other)),
                InventionCategory::Mechanical
            );
        }

        #[test]
        fn test_country_next_and_prev_wrap() {
            assert_eq!(Country::Brazil.next(), Country::UnitedStates);
            assert_eq!(Country::UnitedStates.prev(), Country::Brazil);
        }

        #[test]
        fn test_applicant_kind_toggle() {
            assert_eq!(
                ApplicantKind::Individual.toggle(),
                ApplicantKind::Organization
            );
        }
    }

    mod patches {
        use super::*;

        #[test]
        fn test_applicant_patch_only_touches_set_fields() {
            let mut info = ApplicantInfo {
                phone: "555-0100".to_string(),
                ..Default::default()
            };
            ApplicantPatch::default().first_name("Ada").apply_to(&mut info);
            assert_eq!(info.first_name, "Ada");
            assert_eq!(info.phone, "555-0100");
        }

        #[test]
        fn test_changes_mirrored_fields_ignores_unchanged_values() {
            let info = ApplicantInfo {
                first_name: "Ada".to_string(),
                ..Default::default()
            };
            assert!(!ApplicantPatch::default()
                .first_name("Ada")
                .changes_mirrored_fields(&info));
            assert!(!ApplicantPatch::default()
                .phone("555")
                .changes_mirrored_fields(&info));
            assert!(ApplicantPatch::default()
                .email("ada@example.com")
                .changes_mirrored_fields(&info));
        }

        #[test]
        fn test_filing_patch_can_clear_a_file() {
            let mut filing = FilingInfo {
                drawings: Some(FileRef {
                    name: "fig1.png".to_string(),
                    size: 10,
                    path: PathBuf::from("/tmp/fig1.png"),
                }),
                ..Default::default()
            };
            FilingPatch::default().drawings(None).apply_to(&mut filing);
            assert!(filing.drawings.is_none());
        }
    }

    mod serde_shape {
        use super::*;

        #[test]
        fn test_applicant_uses_camel_case_keys() {
            let json = serde_json::to_value(ApplicantInfo::default()).unwrap();
            assert_eq!(json["applicantType"], "individual");
            assert!(json.get("firstName").is_some());
            assert!(json.get("companyName").is_none());
        }

        #[test]
        fn test_unset_category_serializes_as_empty_string() {
            let json = serde_json::to_value(InventionInfo::default()).unwrap();
            assert_eq!(json["category"], "");
            assert!(json.get("abstract").is_some());
            assert!(json.get("problemSolved").is_some());
        }

        #[test]
        fn test_category_round_trips_through_lowercase_name() {
            let info = InventionInfo {
                category: Some(InventionCategory::Biotech),
                ..Default::default()
            };
            let json = serde_json::to_string(&info).unwrap();
            assert!(json.contains("\"biotech\""));
            let parsed: InventionInfo = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed.category, Some(InventionCategory::Biotech));
        }

        #[test]
        fn test_unknown_category_is_rejected() {
            let json = r#"{"title":"","category":"astrology","abstract":"","description":"","problemSolved":"","useCase":""}"#;
            assert!(serde_json::from_str::<InventionInfo>(json).is_err());
        }

        #[test]
        fn test_country_serializes_as_label() {
            let json = serde_json::to_string(&Country::UnitedKingdom).unwrap();
            assert_eq!(json, "\"United Kingdom\"");
        }
    }

    #[test]
    fn test_file_size_label() {
        let file = FileRef {
            name: "spec.pdf".to_string(),
            size: 1024 * 1024 * 5 / 2,
            path: PathBuf::from("spec.pdf"),
        };
        assert_eq!(file.size_label(), "2.50 MB");
    }
}
