//! Records of the FCI nomenclature.
//!
//! Groups and sections are shared between the taxonomy listing and every breed
//! that belongs to them, hence the `Arc`s: a breed's group is the very group
//! returned by [`FciSpider::list_groups`](crate::FciSpider::list_groups).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Top level FCI classification (there are ten of them).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub index: u32,
    pub official_name: String,
    pub detail_page_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub group: Arc<Group>,
    pub index: u32,
    pub official_name: String,
    pub sub_sections: Vec<SubSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubSection {
    pub index: u32,
    pub official_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breed {
    pub code: u32,
    pub official_name: String,
    pub official_language: Language,
    pub detail_page_uri: String,
    pub group: Arc<Group>,
    pub section: Arc<Section>,
    pub sub_section: Option<SubSection>,
    pub status: BreedStatus,
    pub working_trial: WorkingTrial,
    pub origin_countries: Vec<String>,
    pub patronage_countries: Vec<String>,
    pub development_countries: Vec<String>,
    pub provisional_acceptance_date: Option<NaiveDate>,
    pub definitive_acceptance_date: Option<NaiveDate>,
    pub standard_publication_date: Option<NaiveDate>,
    pub official_name_translations: BTreeMap<Language, String>,
    pub publications: Vec<Publication>,
    /// International beauty championship eligibility, only known once
    /// the group pages have been read.
    pub cacib: bool,
    pub varieties: Vec<Variety>,
    /// Illustrations, without the generic anatomy picture.
    pub images: Vec<String>,
    pub education_resources: Vec<EducationResource>,
}

/// Official standard of a breed, published in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub language: Language,
    pub date: NaiveDate,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationResource {
    /// With its leading dot, e.g. `.pdf`
    pub extension: String,
    pub file_type: FileType,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Variety {
    pub index_letter: String,
    pub official_name: String,
    pub cacib: bool,
    pub sub_varieties: Vec<SubVariety>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubVariety {
    pub official_names: Vec<String>,
    pub cacib: bool,
}

/// Languages the FCI publishes its nomenclature in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Fr,
    De,
    Es,
}

impl Language {
    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
            Self::De => "de",
            Self::Es => "es",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BreedStatus {
    Definitive,
    Provisional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkingTrial {
    NotSubject,
    Subject,
    SubjectOnlyForApplyingCountries,
    SubjectForSomeCountries,
    SubjectOnlyForNordicCountries,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    #[serde(rename = "flash-video")]
    FlashVideo,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "pdf")]
    Pdf,
    #[serde(rename = "powerpoint")]
    PowerPoint,
}
