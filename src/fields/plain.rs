//! Extractors for plain-text notices

use regex::Regex;

use super::{DocketNumber, document_number_from_text, is_docket_number_line, parse_docket_numbers};
use crate::normalize::clean_string;

// Regex patterns
static CASE_NAME_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"Case Name:(.*)").unwrap());

static CASE_NUMBER_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"Case Number:(.*)").unwrap());

static DOCUMENT_NUMBER_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"Document Number:(.*)").unwrap());

static DOCUMENT_URL_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"view the document:[\r\n]+([^\r\n]+)").unwrap());

static DOCKET_TEXT_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?s)Docket Text:(.*?)electronically mailed to:").unwrap()
});

static ASSOCIATED_DOCUMENTS_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?s)The following document\(s\) are associated with this transaction:(.*)$")
        .unwrap()
});

const RECIPIENTS_MARKER: &str = "Notice has been";
const DOCUMENT_DESCRIPTION_MARKER: &str = "Document description:";

/// Every "Case Name:" line, in order. More than one means a multi-docket
/// notice.
pub(crate) fn case_names(text: &str) -> Vec<String> {
    CASE_NAME_REGEX
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

pub(crate) fn docket_number(text: &str) -> Option<DocketNumber> {
    let candidates: Vec<&str> = CASE_NUMBER_REGEX
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .collect();
    parse_docket_numbers(&candidates)
}

pub(crate) fn document_number(text: &str) -> Option<String> {
    DOCUMENT_NUMBER_REGEX
        .captures(text)
        .and_then(|cap| cap.get(1))
        .and_then(|m| document_number_from_text(m.as_str()))
}

/// The line following "view the document:"
pub(crate) fn document_url(text: &str) -> Option<String> {
    DOCUMENT_URL_REGEX
        .captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|url| !url.is_empty())
}

/// Docket text between "Docket Text:" and the recipients heading.
///
/// The heading line may open with the case number, which is not part of the
/// docket text.
pub(crate) fn description(text: &str) -> Option<String> {
    let block = DOCKET_TEXT_REGEX.captures(text)?.get(1)?.as_str();
    let block = block
        .find(RECIPIENTS_MARKER)
        .map_or(block, |end| &block[..end]);

    let mut lines: Vec<&str> = block.lines().collect();
    while lines
        .last()
        .is_some_and(|line| line.trim().is_empty() || is_docket_number_line(line))
    {
        lines.pop();
    }

    Some(clean_string(&lines.join(" "))).filter(|d| !d.is_empty())
}

/// More than one "Document description:" in the associated documents list
pub(crate) fn contains_attachments(text: &str) -> bool {
    ASSOCIATED_DOCUMENTS_REGEX
        .captures(text)
        .and_then(|cap| cap.get(1))
        .is_some_and(|list| {
            list.as_str()
                .lines()
                .filter(|line| line.contains(DOCUMENT_DESCRIPTION_MARKER))
                .count()
                > 1
        })
}
