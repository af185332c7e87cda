//! Text normalization shared by the extractors

use regex::Regex;

/// Case name used when a notice carries none
pub const UNKNOWN_CASE_TITLE: &str = "Unknown Case Title";

// Regex patterns
static VERSUS_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)\s(?:v|vs|versus)\.?\s").unwrap());

static UNITED_STATES_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?i)\bUnited\s+States\s+of\s+America\b|\bU\.S\.A\.|\bUSA\b").unwrap()
});

/// Rejoin lines split by transport soft wraps.
///
/// A line ending in `=` is joined to the next line as-is; every other line
/// boundary becomes a single space. The output has no line breaks left, so a
/// second pass returns it unchanged.
#[must_use]
pub fn join_soft_wraps(text: &str) -> String {
    if !text.contains('\n') {
        return text.to_string();
    }

    let mut combined = String::with_capacity(text.len());
    let mut continues = false;
    for (i, line) in text.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if i > 0 && !continues {
            combined.push(' ');
        }
        match line.strip_suffix('=') {
            Some(head) => {
                combined.push_str(head);
                continues = true;
            }
            None => {
                combined.push_str(line);
                continues = false;
            }
        }
    }
    combined
}

/// Fold residual entities and smart quotes, collapse whitespace and trim
/// stray punctuation from both ends.
#[must_use]
pub fn clean_string(s: &str) -> String {
    let folded = s
        .replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&amp;", "&")
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201c}', '\u{201d}'], "\"");

    folded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c| matches!(c, ';' | ':' | ',' | ' '))
        .to_string()
}

/// Clean a case name and bring it to a canonical title-cased form
#[must_use]
pub fn harmonize_case_name(name: &str) -> String {
    let cleaned = clean_string(name);
    let spaced = format!(" {cleaned} ");
    let versus = VERSUS_REGEX.replace_all(&spaced, " v. ");
    let united = UNITED_STATES_REGEX.replace_all(&versus, "United States");
    clean_string(&titlecase(&united))
}

/// Upper-case the first letter of every word, lower-case the rest.
///
/// Apostrophes inside a word do not start a new one.
fn titlecase(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if in_word {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        in_word = c.is_alphabetic() || (in_word && c == '\'');
    }
    out
}
