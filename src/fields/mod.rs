//! Field extractors
//!
//! Each extractor reads one field from a notice and returns `None` when the
//! layout does not carry it. Deciding whether absence is fatal is left to
//! the docket assembler.
//!
//! Extraction assumes the NEF and NDA templates stay stable. A new layout
//! variant goes in as another strategy in `html` or `plain`.

pub(crate) mod html;
pub(crate) mod plain;

use chrono::NaiveDate;
use regex::Regex;

use crate::normalize::clean_string;

static DOCKET_NUMBER_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?:\d{1,2}:)?\d{2,4}-(?:[A-Za-z]{1,5}-)?\d{1,8}").unwrap()
});

static FILED_ON_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"filed\son\s([\d/]*)").unwrap());

/// Literal used in place of a document number when nothing was filed
const NO_DOCUMENT: &str = "No document attached";

/// A normalized docket number and the case numbers it was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DocketNumber {
    pub(crate) value: String,
    pub(crate) components: Vec<String>,
}

impl DocketNumber {
    /// Use a raw case number as-is
    pub(crate) fn verbatim(raw: &str) -> Option<Self> {
        let value = clean_string(raw);
        if value.is_empty() {
            return None;
        }
        Some(Self {
            components: vec![value.clone()],
            value,
        })
    }
}

/// Parse docket numbers out of candidate strings.
///
/// Distinct case numbers are joined with ", " in the order found.
pub(crate) fn parse_docket_numbers<S: AsRef<str>>(candidates: &[S]) -> Option<DocketNumber> {
    let mut components: Vec<String> = Vec::new();
    for candidate in candidates {
        for found in DOCKET_NUMBER_REGEX.find_iter(candidate.as_ref()) {
            let number = found.as_str().to_string();
            if !components.contains(&number) {
                components.push(number);
            }
        }
    }

    if components.is_empty() {
        return None;
    }
    Some(DocketNumber {
        value: components.join(", "),
        components,
    })
}

/// Whether a whole line is nothing but a case number
pub(crate) fn is_docket_number_line(line: &str) -> bool {
    let line = line.trim();
    DOCKET_NUMBER_REGEX
        .find(line)
        .is_some_and(|m| m.start() == 0 && m.end() == line.len())
}

/// Date from the first "filed on <m/d/y>" in the rendered text
pub(crate) fn filing_date(rendered: &str) -> Option<NaiveDate> {
    let cleaned = clean_string(rendered);
    let raw = FILED_ON_REGEX.captures(&cleaned)?.get(1)?.as_str();
    parse_us_date(raw)
}

/// `m/d/yyyy`, or `m/d/yy` with chrono's century pivot (`99` is 1999)
fn parse_us_date(s: &str) -> Option<NaiveDate> {
    // %Y also accepts two digits, reading them as a first-century year
    let format = match s.rsplit('/').next().map(str::len) {
        Some(2) => "%m/%d/%y",
        _ => "%m/%d/%Y",
    };
    NaiveDate::parse_from_str(s, format).ok()
}

/// Leading number of a "Document Number" value.
///
/// "12(3 pgs)" and "12 (No restrictions)" both give "12".
pub(crate) fn document_number_from_text(text: &str) -> Option<String> {
    let cleaned = clean_string(text);
    if cleaned == NO_DOCUMENT {
        return None;
    }
    cleaned
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .filter(|word| !word.is_empty())
        .map(str::to_string)
}
