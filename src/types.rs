// Core record types and errors for Kirjuri
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// An unvalidated match proposing a person record.
///
/// Offsets are byte offsets into the text the candidate was found in.
/// `match_end` is where the birth-date search starts and `window_end`
/// is the hard limit it never reads past.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub last_name: String,
    pub first_names: String,
    pub city_raw: String,
    pub match_end: usize,
    pub window_end: usize,
}

impl Candidate {
    pub fn new(
        last_name: impl Into<String>,
        first_names: impl Into<String>,
        city_raw: impl Into<String>,
        match_end: usize,
        window_end: usize,
    ) -> Self {
        Self {
            last_name: last_name.into(),
            first_names: first_names.into(),
            city_raw: city_raw.into(),
            match_end,
            window_end,
        }
    }
}

/// Why a candidate was not promoted to a record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SkipReason {
    BlacklistedTerm,
    UnreasonableLastName,
    UnreasonableFirstNames,
    UnreasonableCity,
    CityUnresolved,
}

impl SkipReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            SkipReason::BlacklistedTerm => "BlacklistedTerm",
            SkipReason::UnreasonableLastName => "UnreasonableLastName",
            SkipReason::UnreasonableFirstNames => "UnreasonableFirstNames",
            SkipReason::UnreasonableCity => "UnreasonableCity",
            SkipReason::CityUnresolved => "CityUnresolved",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running a candidate through the validator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Rejected(SkipReason),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted)
    }
}

/// An accepted person record. `city` is always a gazetteer entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub last_name: String,
    pub first_names: String,
    pub city: String,
    pub birth_date: String,
}

/// A rejected candidate together with the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub last_name: String,
    pub first_names: String,
    pub city_raw: String,
    pub birth_date: String,
    pub reason: SkipReason,
}

// Error types
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("cannot open document {}: {reason}", .path.display())]
    Document { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("export error: {0}")]
    Export(#[from] csv::Error),
}

impl From<regex::Error> for ExtractError {
    fn from(err: regex::Error) -> Self {
        ExtractError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for ExtractError {
    fn from(err: toml::de::Error) -> Self {
        ExtractError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
