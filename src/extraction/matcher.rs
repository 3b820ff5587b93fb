// Candidate sources: turn text into unvalidated person candidates
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::normalizer::normalize;
use crate::types::Candidate;

// Surname, given names, city: comma/period separated, the city closed by
// sentence punctuation and whitespace (or end of text). Deliberately loose,
// the validator decides what is a person.
static ENTRY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<last>\p{Lu}[^,.;:\n]*?)\s*[,.]\s*(?P<first>[^,.;:\n]+?)\s*[,.]\s*(?P<city>[^,.;:\n]+?)\s*[.,;:](?:\s|$)",
    )
    .unwrap()
});

static BLOCK_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

static LABELED_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(?P<label>sukunimi|efternamn|etunimet|etunimi|förnamn|paikkakunta|kotipaikka|ort)[ \t]*:[ \t]*(?P<value>.*)$",
    )
    .unwrap()
});

/// Anything that can propose candidates from a text.
///
/// Sources are restartable: every call scans `text` from the start and
/// yields candidates left to right.
pub trait CandidateSource {
    fn name(&self) -> &'static str;

    fn candidates<'t>(&'t self, text: &'t str) -> Box<dyn Iterator<Item = Candidate> + 't>;
}

/// Matches `Surname, Given Names, City.` entries in normalized text.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralMatcher;

impl StructuralMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl CandidateSource for StructuralMatcher {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn candidates<'t>(&'t self, text: &'t str) -> Box<dyn Iterator<Item = Candidate> + 't> {
        Box::new(
            ENTRY_PATTERN
                .captures_iter(text)
                .map(move |caps| entry_candidate(&caps, text.len())),
        )
    }
}

fn entry_candidate(caps: &Captures<'_>, text_len: usize) -> Candidate {
    // Group 0 always participates in a match.
    let match_end = caps.get(0).map_or(text_len, |m| m.end());
    Candidate::new(
        group(caps, "last"),
        group(caps, "first"),
        group(caps, "city"),
        match_end,
        text_len,
    )
}

fn group<'t>(caps: &Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map_or("", |m| m.as_str().trim())
}

/// Reads CV-style blocks with `Sukunimi:` / `Etunimi:` / `Paikkakunta:`
/// lines. Works on raw text, since normalization would fold the lines of
/// a block together.
#[derive(Debug, Default, Clone, Copy)]
pub struct LabeledBlockMatcher;

impl LabeledBlockMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl CandidateSource for LabeledBlockMatcher {
    fn name(&self) -> &'static str {
        "labeled"
    }

    fn candidates<'t>(&'t self, text: &'t str) -> Box<dyn Iterator<Item = Candidate> + 't> {
        Box::new(
            block_ranges(text)
                .filter_map(move |(start, end)| labeled_candidate(&text[start..end], start, end)),
        )
    }
}

/// Byte ranges of the non-blank blocks between blank lines.
fn block_ranges(text: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
    let mut cursor = 0;
    BLOCK_BREAK
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .chain(std::iter::once((text.len(), text.len())))
        .map(move |(sep_start, sep_end)| {
            let range = (cursor, sep_start);
            cursor = sep_end;
            range
        })
        .filter(move |&(start, end)| !text[start..end].trim().is_empty())
}

fn labeled_candidate(block: &str, start: usize, end: usize) -> Option<Candidate> {
    let mut last = None;
    let mut first = None;
    let mut city = None;

    for caps in LABELED_LINE.captures_iter(block) {
        let value = caps.name("value").map_or("", |m| m.as_str());
        let slot = match caps["label"].to_lowercase().as_str() {
            "sukunimi" | "efternamn" => &mut last,
            "etunimi" | "etunimet" | "förnamn" => &mut first,
            _ => &mut city,
        };
        if slot.is_none() {
            *slot = Some(normalize(value.trim()).trim().to_string());
        }
    }

    let last = last?;
    Some(Candidate::new(
        last,
        first.unwrap_or_default(),
        city.unwrap_or_default(),
        start,
        end,
    ))
}
