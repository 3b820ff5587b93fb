// Record extraction pipeline
pub mod birth_date;
pub mod city;
pub mod matcher;
pub mod normalizer;
pub mod pipeline;
pub mod validator;

pub use birth_date::BirthDateExtractor;
pub use city::{normalize_city, CityResolver};
pub use matcher::{CandidateSource, LabeledBlockMatcher, StructuralMatcher};
pub use normalizer::normalize;
pub use pipeline::{Extraction, Mode, Pipeline, Summary};
pub use validator::{Field, Fields, Rule, Validator};
