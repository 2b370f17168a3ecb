//! Converters for the free text values of the breed pages.

use std::collections::HashMap;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use url::Url;

use crate::labels::UnsupportedValue;
use crate::model::{BreedStatus, FileType, WorkingTrial};

/// Dates are always written month first, without zero padding (`1/5/2010`).
pub const DATE_FORMAT: &str = "%m/%d/%Y";

lazy_static! {
    static ref STATUSES: HashMap<&'static str, BreedStatus> = HashMap::from([
        ("Recognized on a definitive basis", BreedStatus::Definitive),
        ("Recognized on a provisional basis", BreedStatus::Provisional),
    ]);
    static ref WORKING_TRIALS: HashMap<&'static str, WorkingTrial> = HashMap::from([
        (
            "Not subject to a working trial according to the FCI breeds nomenclature",
            WorkingTrial::NotSubject
        ),
        (
            "Subject to a working trial according to the FCI Breeds Nomenclature",
            WorkingTrial::Subject
        ),
        (
            "Subject to a working trial only for the countries having applied for it",
            WorkingTrial::SubjectOnlyForApplyingCountries
        ),
        (
            "Subject to a working trial for some countries",
            WorkingTrial::SubjectForSomeCountries
        ),
        (
            "Subject to a working trial only for the Nordic countries (Finland, Norway, Sweden)",
            WorkingTrial::SubjectOnlyForNordicCountries
        ),
    ]);
    static ref FILE_TYPES: HashMap<&'static str, FileType> = HashMap::from([
        ("flv", FileType::FlashVideo),
        ("mp4", FileType::Video),
        ("mov", FileType::Video),
        ("pdf", FileType::Pdf),
        ("ppt", FileType::PowerPoint),
        ("pptx", FileType::PowerPoint),
        ("pptm", FileType::PowerPoint),
        ("ppsx", FileType::PowerPoint),
    ]);
}

pub fn parse_date(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
}

/// Splits a comma separated list of countries, dropping blank entries.
pub fn split_countries(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|country| !country.is_empty())
        .map(String::from)
        .collect()
}

pub fn parse_status(label: &str) -> Result<BreedStatus, UnsupportedValue> {
    STATUSES
        .get(label)
        .copied()
        .ok_or_else(|| UnsupportedValue::new("breed status", label))
}

pub fn parse_working_trial(label: &str) -> Result<WorkingTrial, UnsupportedValue> {
    WORKING_TRIALS
        .get(label)
        .copied()
        .ok_or_else(|| UnsupportedValue::new("working trial", label))
}

/// Buckets a file extension (without the leading dot), ignoring case.
pub fn classify_extension(extension: &str) -> Result<FileType, UnsupportedValue> {
    FILE_TYPES
        .get(extension.to_lowercase().as_str())
        .copied()
        .ok_or_else(|| UnsupportedValue::new("file extension", extension))
}

/// Extension of the last path segment of `url`, if any.
pub fn file_extension(url: &Url) -> Option<&str> {
    url.path_segments()?
        .last()?
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

/// Makes a site relative link absolute.
///
/// Links of the nomenclature pages are relative to pages one level down the
/// site root, so `../` segments are simply dropped.
pub fn resolve_link(base: &str, href: &str) -> String {
    let href = href.trim();
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    let path = href.replace("../", "");
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
