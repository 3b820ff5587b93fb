// Orchestrates candidates through validation, city resolution and dating
use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::birth_date::BirthDateExtractor;
use super::city::CityResolver;
use super::matcher::{CandidateSource, LabeledBlockMatcher, StructuralMatcher};
use super::normalizer::normalize;
use super::validator::Validator;
use crate::config::{ExtractorConfig, ReferenceData};
use crate::types::{Candidate, Outcome, Record, Result, SkipReason, SkippedRecord};

/// Which candidate source to run over a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// `Surname, Given Names, City.` entries in running text
    #[default]
    Structural,
    /// `Sukunimi:` / `Etunimi:` / `Paikkakunta:` blocks
    Labeled,
}

/// Accepted and skipped records, each in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub accepted: Vec<Record>,
    pub skipped: Vec<SkippedRecord>,
}

impl Extraction {
    pub fn candidate_count(&self) -> usize {
        self.accepted.len() + self.skipped.len()
    }

    pub fn summary(&self) -> Summary {
        let mut by_reason = BTreeMap::new();
        for skipped in &self.skipped {
            *by_reason.entry(skipped.reason).or_insert(0) += 1;
        }
        Summary {
            candidates: self.candidate_count(),
            accepted: self.accepted.len(),
            skipped: self.skipped.len(),
            by_reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub candidates: usize,
    pub accepted: usize,
    pub skipped: usize,
    pub by_reason: BTreeMap<SkipReason, usize>,
}

enum Routed {
    Accepted(Record),
    Skipped(SkippedRecord),
}

pub struct Pipeline {
    validator: Validator,
    resolver: CityResolver,
    dates: BirthDateExtractor,
}

impl Pipeline {
    pub fn new(validator: Validator, resolver: CityResolver, dates: BirthDateExtractor) -> Self {
        Self { validator, resolver, dates }
    }

    /// Standard rules over the configured reference data.
    pub fn from_config(config: &ExtractorConfig) -> Result<Self> {
        config.validate()?;
        let reference = Arc::new(config.reference_data());
        Self::with_reference(reference, config)
    }

    pub fn with_reference(reference: Arc<ReferenceData>, config: &ExtractorConfig) -> Result<Self> {
        let resolver = CityResolver::from_reference(&reference, config.city_threshold);
        let dates = BirthDateExtractor::new(&config.date_labels, config.date_window)?;
        let validator = Validator::standard(reference);
        Ok(Self::new(validator, resolver, dates))
    }

    /// Normalize raw document text as the mode requires, then process it.
    pub fn extract(&self, raw: &str, mode: Mode) -> Extraction {
        match mode {
            Mode::Structural => self.process_normalized(&normalize(raw)),
            // Labeled blocks need their line breaks; fields are normalized one by one.
            Mode::Labeled => self.process(&LabeledBlockMatcher::new(), raw),
        }
    }

    /// Run the structural matcher over already-normalized text.
    pub fn process_normalized(&self, normalized: &str) -> Extraction {
        self.process(&StructuralMatcher::new(), normalized)
    }

    /// Route every candidate of `source` into exactly one of the two
    /// output collections.
    pub fn process(&self, source: &dyn CandidateSource, text: &str) -> Extraction {
        let mut extraction = Extraction::default();

        for candidate in source.candidates(text) {
            match self.route(&candidate, text) {
                Routed::Accepted(record) => extraction.accepted.push(record),
                Routed::Skipped(skipped) => {
                    debug!(
                        "skipped {:?} / {:?} / {:?}: {}",
                        skipped.last_name, skipped.first_names, skipped.city_raw, skipped.reason
                    );
                    extraction.skipped.push(skipped);
                }
            }
        }

        info!(
            "{} source: {} candidates, {} accepted, {} skipped",
            source.name(),
            extraction.candidate_count(),
            extraction.accepted.len(),
            extraction.skipped.len()
        );
        extraction
    }

    fn route(&self, candidate: &Candidate, text: &str) -> Routed {
        let birth_date = self
            .dates
            .extract(text, candidate.match_end, candidate.window_end);

        let reason = match self.validator.validate_candidate(candidate) {
            Outcome::Rejected(reason) => reason,
            Outcome::Accepted => match self.resolver.resolve(&candidate.city_raw) {
                Some(city) => {
                    return Routed::Accepted(Record {
                        last_name: candidate.last_name.clone(),
                        first_names: candidate.first_names.clone(),
                        city: city.to_string(),
                        birth_date,
                    });
                }
                None => SkipReason::CityUnresolved,
            },
        };

        Routed::Skipped(SkippedRecord {
            last_name: candidate.last_name.clone(),
            first_names: candidate.first_names.clone(),
            city_raw: candidate.city_raw.clone(),
            birth_date,
            reason,
        })
    }
}
