// Reference data and tuning for the extraction pipeline
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::types::{ExtractError, Result};

// Defaults
pub const DEFAULT_CITY_THRESHOLD: f64 = 0.85;
pub const DEFAULT_DATE_WINDOW: usize = 220;
pub const MAX_DATE_WINDOW: usize = 1000;

/// Everything the pipeline needs besides the text itself.
///
/// Loaded from TOML; any field left out of the file keeps its built-in
/// default, so a file that only lists extra blacklist terms is valid.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ExtractorConfig {
    #[serde(default = "default_blacklist")]
    pub blacklist: Vec<String>,
    #[serde(default = "default_gazetteer")]
    pub gazetteer: Vec<String>,
    #[serde(default = "default_language_codes")]
    pub language_codes: Vec<String>,
    #[serde(default = "default_date_labels")]
    pub date_labels: Vec<String>,
    #[serde(default = "default_city_threshold")]
    pub city_threshold: f64,
    #[serde(default = "default_date_window")]
    pub date_window: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            blacklist: default_blacklist(),
            gazetteer: default_gazetteer(),
            language_codes: default_language_codes(),
            date_labels: default_date_labels(),
            city_threshold: default_city_threshold(),
            date_window: default_date_window(),
        }
    }
}

fn default_city_threshold() -> f64 { DEFAULT_CITY_THRESHOLD }
fn default_date_window() -> usize { DEFAULT_DATE_WINDOW }

// Administrative, medical and linguistic words that show up in the same
// comma-separated shape as a person entry.
fn default_blacklist() -> Vec<String> {
    [
        "barn", "kunta", "kommun", "lääni", "pitäjä", "socken",
        "seurakunta", "församling", "sairaala", "sjukhus", "hospital",
        "osasto", "avdelning", "klinikka", "diagnoosi", "diagnos",
        "tauti", "sjukdom", "kieli", "språk", "svenska", "english",
        "toimisto", "kontor", "yhteensä",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_gazetteer() -> Vec<String> {
    [
        "Helsinki", "Espoo", "Tampere", "Vantaa", "Oulu", "Turku",
        "Jyväskylä", "Lahti", "Kuopio", "Pori", "Kouvola", "Joensuu",
        "Lappeenranta", "Hämeenlinna", "Vaasa", "Seinäjoki", "Rovaniemi",
        "Mikkeli", "Kotka", "Salo", "Porvoo", "Kokkola", "Hyvinkää",
        "Lohja", "Järvenpää", "Rauma", "Kajaani", "Kerava", "Savonlinna",
        "Nokia", "Kemi", "Tornio", "Iisalmi", "Varkaus", "Raahe",
        "Imatra", "Viipuri", "Sortavala", "Käkisalmi", "Maarianhamina",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_language_codes() -> Vec<String> {
    ["en", "fi", "sv", "de", "ru", "et", "fr", "no", "da"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

// "s." / "synt." (syntynyt) and "f." (född) are the usual markers in the scans.
fn default_date_labels() -> Vec<String> {
    ["s", "synt", "syntynyt", "f", "född", "born", "b"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl ExtractorConfig {
    /// Load a config file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ExtractError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ExtractError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.gazetteer.iter().all(|c| c.trim().is_empty()) {
            return Err(ExtractError::Config("gazetteer is empty".into()));
        }
        if !(0.0..=1.0).contains(&self.city_threshold) {
            return Err(ExtractError::Config(format!(
                "city_threshold must be within 0..=1, got {}",
                self.city_threshold
            )));
        }
        if self.date_window == 0 || self.date_window > MAX_DATE_WINDOW {
            return Err(ExtractError::Config(format!(
                "date_window must be within 1..={}, got {}",
                MAX_DATE_WINDOW, self.date_window
            )));
        }
        Ok(())
    }

    /// Freeze the lookup sets used by the validator and the city resolver.
    pub fn reference_data(&self) -> ReferenceData {
        ReferenceData {
            blacklist: self
                .blacklist
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            language_codes: self
                .language_codes
                .iter()
                .map(|c| c.trim().to_lowercase())
                .collect(),
            gazetteer: self
                .gazetteer
                .iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }
}

/// Immutable reference sets, built once and shared read-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    /// Lowercased disqualifying substrings.
    pub blacklist: Vec<String>,
    /// Lowercased codes that are never names on their own.
    pub language_codes: HashSet<String>,
    /// Canonical city names, in priority order.
    pub gazetteer: Vec<String>,
}

impl ReferenceData {
    pub fn is_gazetteer_city(&self, city: &str) -> bool {
        self.gazetteer.iter().any(|c| c == city)
    }
}
