// Kirjuri - person records from OCR'd registry text
pub mod config;
pub mod document;
pub mod export;
pub mod extraction;
pub mod types;

pub use config::{ExtractorConfig, ReferenceData};
pub use export::Format;
pub use extraction::{Extraction, Mode, Pipeline, Summary};
pub use types::{Candidate, ExtractError, Outcome, Record, Result, SkipReason, SkippedRecord};
