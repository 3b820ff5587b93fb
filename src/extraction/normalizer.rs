// OCR whitespace repair, run before any pattern matching
use once_cell::sync::Lazy;
use regex::Regex;

static NEWLINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());
static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());

// Collapsing runs can leave a fresh single space between two letters,
// so the steps are repeated. Two rounds always reach a fixed point.
const MAX_ROUNDS: usize = 4;

/// Normalize raw OCR text.
///
/// 1. Drop a single whitespace character sitting between two word
///    characters (repairs letters split apart by the scanner).
/// 2. Collapse runs of line breaks into one.
/// 3. Collapse runs of spaces into one.
///
/// The steps are repeated until the text is stable, so
/// `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let mut current = normalize_once(raw);
    for _ in 1..MAX_ROUNDS {
        let next = normalize_once(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn normalize_once(text: &str) -> String {
    let joined = join_split_words(text);
    let lines = NEWLINE_RUNS.replace_all(&joined, "\n");
    SPACE_RUNS.replace_all(&lines, " ").into_owned()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// Neighbours are checked against the original text, so "a b c" becomes "abc".
fn join_split_words(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() && i > 0 && i + 1 < chars.len() {
            if is_word_char(chars[i - 1]) && is_word_char(chars[i + 1]) {
                continue;
            }
        }
        out.push(c);
    }
    out
}
