// Plausibility checks that separate person entries from OCR noise
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::config::ReferenceData;
use crate::types::{Candidate, Outcome, SkipReason};

static SURNAME_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-ZÅÄÖÆØ][a-zåäöæø]+(?: [A-ZÅÄÖÆØ][a-zåäöæø]+)*$").unwrap()
});
static GIVEN_NAMES_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\p{L} .\-]+$").unwrap());
static BARE_ABBREVIATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zåäöæø]{2,3}$").unwrap());

const VOWELS: &str = "aeiouyåäöæøAEIOUYÅÄÖÆØ";

/// The three text fields of a candidate, borrowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields<'a> {
    pub last_name: &'a str,
    pub first_names: &'a str,
    pub city: &'a str,
}

impl<'a> Fields<'a> {
    pub fn new(last_name: &'a str, first_names: &'a str, city: &'a str) -> Self {
        Self { last_name, first_names, city }
    }
}

impl<'a> From<&'a Candidate> for Fields<'a> {
    fn from(c: &'a Candidate) -> Self {
        Self::new(&c.last_name, &c.first_names, &c.city_raw)
    }
}

/// Which candidate field a check looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    LastName,
    FirstNames,
    City,
}

impl Field {
    pub fn get<'a>(self, fields: &Fields<'a>) -> &'a str {
        match self {
            Field::LastName => fields.last_name,
            Field::FirstNames => fields.first_names,
            Field::City => fields.city,
        }
    }

    pub fn reason(self) -> SkipReason {
        match self {
            Field::LastName => SkipReason::UnreasonableLastName,
            Field::FirstNames => SkipReason::UnreasonableFirstNames,
            Field::City => SkipReason::UnreasonableCity,
        }
    }
}

/// One validation stage: a predicate paired with the reason it reports.
pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;
    fn reason(&self) -> SkipReason;
    fn passes(&self, fields: &Fields<'_>) -> bool;
}

/// Rejects when any blacklisted term occurs anywhere in the entry.
pub struct BlacklistRule {
    reference: Arc<ReferenceData>,
}

impl BlacklistRule {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self { reference }
    }
}

impl Rule for BlacklistRule {
    fn name(&self) -> &'static str {
        "blacklist"
    }

    fn reason(&self) -> SkipReason {
        SkipReason::BlacklistedTerm
    }

    fn passes(&self, fields: &Fields<'_>) -> bool {
        let haystack = format!("{} {} {}", fields.last_name, fields.first_names, fields.city)
            .to_lowercase();
        !self.reference.blacklist.iter().any(|term| haystack.contains(term.as_str()))
    }
}

/// Surname must be capitalized words: `Virtanen`, `Af Forselles`.
pub struct SurnameShapeRule;

impl Rule for SurnameShapeRule {
    fn name(&self) -> &'static str {
        "surname-shape"
    }

    fn reason(&self) -> SkipReason {
        SkipReason::UnreasonableLastName
    }

    fn passes(&self, fields: &Fields<'_>) -> bool {
        SURNAME_SHAPE.is_match(fields.last_name)
    }
}

/// Given names: letters, spaces, hyphens and periods, at least three
/// characters, and not a bare lowercase abbreviation like `sv`.
pub struct GivenNamesShapeRule;

impl Rule for GivenNamesShapeRule {
    fn name(&self) -> &'static str {
        "given-names-shape"
    }

    fn reason(&self) -> SkipReason {
        SkipReason::UnreasonableFirstNames
    }

    fn passes(&self, fields: &Fields<'_>) -> bool {
        let value = fields.first_names;
        value.chars().count() >= 3
            && !value.chars().any(|c| c.is_ascii_digit())
            && GIVEN_NAMES_CHARS.is_match(value)
            && !BARE_ABBREVIATION.is_match(value)
    }
}

/// General check applied to a single field: long enough, no digits,
/// not a language code, has a vowel, not shouted in capitals.
pub struct ReasonableRule {
    field: Field,
    reference: Arc<ReferenceData>,
}

impl ReasonableRule {
    pub fn new(field: Field, reference: Arc<ReferenceData>) -> Self {
        Self { field, reference }
    }
}

impl Rule for ReasonableRule {
    fn name(&self) -> &'static str {
        match self.field {
            Field::LastName => "reasonable-last-name",
            Field::FirstNames => "reasonable-first-names",
            Field::City => "reasonable-city",
        }
    }

    fn reason(&self) -> SkipReason {
        self.field.reason()
    }

    fn passes(&self, fields: &Fields<'_>) -> bool {
        let value = self.field.get(fields);
        is_reasonable(value, &self.reference)
    }
}

pub fn is_reasonable(value: &str, reference: &ReferenceData) -> bool {
    let value = value.trim();
    if value.chars().count() < 2 || value.chars().any(|c| c.is_numeric()) {
        return false;
    }
    if reference.language_codes.contains(&value.to_lowercase()) {
        return false;
    }
    if !value.chars().any(|c| VOWELS.contains(c)) {
        return false;
    }
    !is_all_caps(value)
}

fn is_all_caps(value: &str) -> bool {
    let letters = value.chars().filter(|c| c.is_alphabetic()).count();
    letters >= 2 && value.chars().all(|c| !c.is_alphabetic() || c.is_uppercase())
}

/// Ordered list of rules; the first failing rule decides the outcome.
pub struct Validator {
    rules: Vec<Box<dyn Rule>>,
}

impl Validator {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Blacklist, surname shape, given-names shape, then the general
    /// check on surname, given names and city, in that order.
    pub fn standard(reference: Arc<ReferenceData>) -> Self {
        Self::new(vec![
            Box::new(BlacklistRule::new(Arc::clone(&reference))),
            Box::new(SurnameShapeRule),
            Box::new(GivenNamesShapeRule),
            Box::new(ReasonableRule::new(Field::LastName, Arc::clone(&reference))),
            Box::new(ReasonableRule::new(Field::FirstNames, Arc::clone(&reference))),
            Box::new(ReasonableRule::new(Field::City, reference)),
        ])
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn validate(&self, fields: &Fields<'_>) -> Outcome {
        self.rules
            .iter()
            .find(|rule| !rule.passes(fields))
            .map_or(Outcome::Accepted, |rule| Outcome::Rejected(rule.reason()))
    }

    pub fn validate_candidate(&self, candidate: &Candidate) -> Outcome {
        self.validate(&Fields::from(candidate))
    }
}
