use fci_crawler::FetchError;

use crate::labels::UnsupportedValue;

pub type Result<T> = std::result::Result<T, SpiderError>;

/// Every extraction either fully succeeds or fails with one of these, nothing
/// is skipped nor retried.
#[derive(Debug, thiserror::Error)]
pub enum SpiderError {
    /// The page couldn't be downloaded.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The page doesn't have the expected shape.
    #[error("Unexpected content in {uri}: {what}")]
    Structure { uri: String, what: String },

    /// A known field holds a value outside of its enumeration.
    #[error("Unsupported value in {uri}")]
    Unsupported {
        uri: String,
        #[source]
        source: UnsupportedValue,
    },

    #[error("Invalid date for '{field}' in {uri}: '{value}'")]
    InvalidDate {
        uri: String,
        field: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A reference doesn't resolve against previously extracted data.
    #[error("Inconsistent data in {uri}: {what}")]
    Integrity { uri: String, what: String },
}

impl SpiderError {
    pub(crate) fn structure(uri: &str, what: impl Into<String>) -> Self {
        Self::Structure {
            uri: uri.to_string(),
            what: what.into(),
        }
    }

    pub(crate) fn integrity(uri: &str, what: impl Into<String>) -> Self {
        Self::Integrity {
            uri: uri.to_string(),
            what: what.into(),
        }
    }

    pub(crate) fn unsupported(uri: &str, source: UnsupportedValue) -> Self {
        Self::Unsupported {
            uri: uri.to_string(),
            source,
        }
    }
}
