// Birth-date lookup in the text that follows a candidate
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Result;

const DATE: &str = r"\d{1,2}[.\-]\d{1,2}[.\-]\d{2,4}";

// No trailing boundary: normalization glues the following word onto the year.
static BARE_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?:^|\D)(?P<date>{})", DATE)).unwrap());

/// Finds a date token in a bounded window after a candidate.
///
/// A date introduced by a label (`s.`, `synt:`, `född -`) wins over the
/// first bare date in the window.
#[derive(Debug, Clone)]
pub struct BirthDateExtractor {
    labeled: Option<Regex>,
    window: usize,
}

impl BirthDateExtractor {
    pub fn new(labels: &[String], window: usize) -> Result<Self> {
        let alternatives: Vec<String> = labels
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(regex::escape)
            .collect();

        let labeled = if alternatives.is_empty() {
            None
        } else {
            let pattern = format!(
                r"(?i)(?:^|[^\p{{L}}])(?:{})\.?\s*[:\-]?\s*(?P<date>{})",
                alternatives.join("|"),
                DATE
            );
            Some(Regex::new(&pattern)?)
        };

        Ok(Self { labeled, window })
    }

    /// Search `text[start..limit]`, at most `window` characters of it.
    /// Returns an empty string when no date is found.
    pub fn extract(&self, text: &str, start: usize, limit: usize) -> String {
        let window = window_slice(text, start, limit, self.window);
        self.find(window).unwrap_or_default()
    }

    pub fn find(&self, window: &str) -> Option<String> {
        self.labeled
            .iter()
            .chain(std::iter::once(&*BARE_DATE))
            .find_map(|re| re.captures(window))
            .and_then(|caps| caps.name("date").map(|m| m.as_str().to_string()))
    }
}

/// Up to `max_chars` characters of `text` starting at byte `start`,
/// never past byte `limit`. Out-of-range offsets give an empty slice.
pub fn window_slice(text: &str, start: usize, limit: usize, max_chars: usize) -> &str {
    let limit = limit.min(text.len());
    if start >= limit || !text.is_char_boundary(start) || !text.is_char_boundary(limit) {
        return "";
    }
    let rest = &text[start..limit];
    let end = rest
        .char_indices()
        .nth(max_chars)
        .map_or(rest.len(), |(i, _)| i);
    &rest[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractorConfig;
    use rstest::rstest;

    fn extractor() -> BirthDateExtractor {
        let config = ExtractorConfig::default();
        BirthDateExtractor::new(&config.date_labels, config.date_window).unwrap()
    }

    #[rstest]
    #[case(" s. 12.05.1980, maanviljelijä", Some("12.05.1980"))]
    #[case(" Synt: 3-4-21", Some("3-4-21"))]
    #[case(" född - 1.1.1901", Some("1.1.1901"))]
    #[case(" muutti 1.6.1950, s.12.05.1921", Some("12.05.1921"))]
    #[case(" muutti 1.6.1950", Some("1.6.1950"))]
    #[case(" s. 12.05.1980maanviljelijä", Some("12.05.1980"))]
    #[case(" 12.05.1980Aho, Liisa, Oulu.", Some("12.05.1980"))]
    #[case(" synt12.05.1980", Some("12.05.1980"))]
    #[case(" puh. 123-4567", None)]
    #[case(" ei päivämäärää", None)]
    #[case("", None)]
    fn test_find(#[case] window: &str, #[case] expected: Option<&str>) {
        assert_eq!(extractor().find(window).as_deref(), expected);
    }

    #[test]
    fn test_window_bounds_search() {
        let text = format!("Aho, Liisa, Oulu. {} 12.05.1980", "x".repeat(300));
        let extractor = extractor();
        assert_eq!(extractor.extract(&text, 18, text.len()), "");

        let wide = BirthDateExtractor::new(&[], 400).unwrap();
        assert_eq!(wide.extract(&text, 18, text.len()), "12.05.1980");
    }

    #[test]
    fn test_limit_bounds_search() {
        let text = "Aho, Liisa, Oulu.\n\nBerg, Anna, Vaasa. 1.2.1950";
        assert_eq!(extractor().extract(text, 17, 19), "");
    }

    #[test]
    fn test_window_slice_counts_characters() {
        let text = "ääää1.1.1900";
        assert_eq!(window_slice(text, 0, text.len(), 4), "ääää");
        assert_eq!(window_slice(text, 0, text.len(), 100), text);
        assert_eq!(window_slice(text, 1, text.len(), 4), "");
        assert_eq!(window_slice(text, 50, 60, 4), "");
    }

    #[test]
    fn test_labels_are_escaped() {
        let extractor = BirthDateExtractor::new(&["s.".to_string(), "(b)".to_string()], 50).unwrap();
        assert_eq!(extractor.find(" (b) 2.2.1922").as_deref(), Some("2.2.1922"));
    }
}
