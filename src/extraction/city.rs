// Fuzzy resolution of OCR'd city names against the gazetteer
use strsim::normalized_levenshtein;

use crate::config::ReferenceData;

/// Lowercase, fold å/ä/ö, drop hyphens, periods and commas, trim.
pub fn normalize_city(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '-' | '.' | ','))
        .map(|c| match c {
            'å' | 'ä' => 'a',
            'ö' => 'o',
            other => other,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Similarity of two already-normalized names, in `[0, 1]`.
pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b)
}

pub struct CityResolver {
    // (canonical, normalized) in gazetteer order
    entries: Vec<(String, String)>,
    threshold: f64,
}

impl CityResolver {
    pub fn new<I, S>(gazetteer: I, threshold: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = gazetteer
            .into_iter()
            .map(|name| {
                let name = name.into();
                let key = normalize_city(&name);
                (name, key)
            })
            .collect();
        Self { entries, threshold }
    }

    pub fn from_reference(reference: &ReferenceData, threshold: f64) -> Self {
        Self::new(reference.gazetteer.iter().cloned(), threshold)
    }

    /// The threshold is exclusive: a score equal to it does not resolve.
    pub fn accepts(&self, score: f64) -> bool {
        score > self.threshold
    }

    /// First gazetteer entry scoring above the threshold, if any.
    pub fn resolve(&self, raw: &str) -> Option<&str> {
        let key = normalize_city(raw);
        if key.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(_, entry)| self.accepts(similarity(&key, entry)))
            .map(|(name, _)| name.as_str())
    }
}
