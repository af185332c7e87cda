//! Recipient parsing
//!
//! Two algorithms read the "electronically mailed to" block. When recipient
//! addresses are rendered as links the block is read as one token stream.
//! Otherwise every line holds one recipient.

use regex::Regex;
use tracing::debug;

use crate::document::{HtmlDocument, find_element, sibling_elements, sibling_texts, text_content};
use crate::normalize::clean_string;
use crate::types::{NoticeKind, Recipient};

static MAILED_TO_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"mailed\s+to:").unwrap());

const NEF_RECIPIENTS_HEADING: &str = "Notice has been electronically mailed to";
const NDA_RECIPIENTS_HEADING: &str = "Notice will be electronically mailed to";
const OTHER_MEANS_HEADING: &str = "Notice will be delivered";

/// Parse recipients from a run of text, one recipient per line.
///
/// Within a line, comma separated tokens holding an `@` are addresses and
/// the remaining words are the name. A line of bare addresses takes its name
/// from the preceding line.
pub fn parse_recipient_lines<S: AsRef<str>>(lines: &[S]) -> Vec<Recipient> {
    let mut recipients = Vec::new();
    let mut pending_name: Option<String> = None;

    for line in lines.iter().flat_map(|l| l.as_ref().lines()) {
        if line.contains(OTHER_MEANS_HEADING) {
            break;
        }
        let line = clean_string(line);
        if line.is_empty() {
            continue;
        }
        if !line.contains('@') {
            pending_name = Some(line);
            continue;
        }

        let mut name_parts: Vec<String> = Vec::new();
        let mut addresses: Vec<String> = Vec::new();
        for segment in line.split(',') {
            let mut words: Vec<&str> = Vec::new();
            for token in segment.split_whitespace() {
                if token.contains('@') {
                    addresses.extend(clean_address(token));
                } else {
                    words.push(token);
                }
            }
            if !words.is_empty() {
                name_parts.push(words.join(" "));
            }
        }

        let name = if name_parts.is_empty() {
            pending_name.take().unwrap_or_default()
        } else {
            pending_name = None;
            name_parts.join(", ")
        };
        recipients.extend(Recipient::new(clean_string(&name), addresses));
    }

    recipients
}

/// Parse recipients from free-flowing text.
///
/// Everything up to the last "mailed to:" is boilerplate. The block ends at
/// the first of `end_markers`, usually the notice's docket numbers which
/// open the next section. Tokens are then scanned left to right: an address
/// joins the current recipient, a word extends the current name until that
/// recipient has an address and starts a new recipient after.
pub fn parse_recipient_stream<S: AsRef<str>>(text: &str, end_markers: &[S]) -> Vec<Recipient> {
    let start = MAILED_TO_REGEX.find_iter(text).last().map_or(0, |m| m.end());
    let mut block = &text[start..];
    if let Some(end) = end_markers
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|marker| !marker.is_empty())
        .filter_map(|marker| block.find(marker))
        .min()
    {
        block = &block[..end];
    }

    let mut scanned: Vec<(Vec<&str>, Vec<String>)> = Vec::new();
    for token in block.split_whitespace() {
        if !token.chars().any(char::is_alphanumeric) {
            continue;
        }
        if token.contains('@') {
            if scanned.is_empty() {
                scanned.push((Vec::new(), Vec::new()));
            }
            if let Some((_, addresses)) = scanned.last_mut() {
                addresses.extend(clean_address(token));
            }
            continue;
        }

        let extends_name = scanned
            .last()
            .is_some_and(|(_, addresses)| addresses.is_empty());
        if extends_name {
            if let Some((name, _)) = scanned.last_mut() {
                name.push(token);
            }
        } else {
            scanned.push((vec![token], Vec::new()));
        }
    }

    scanned
        .into_iter()
        .filter_map(|(name, addresses)| Recipient::new(clean_string(&name.join(" ")), addresses))
        .collect()
}

/// Recipients of an HTML notice
pub(crate) fn from_html(
    doc: &HtmlDocument,
    kind: NoticeKind,
    docket_numbers: &[String],
) -> Vec<Recipient> {
    let (tag, heading) = match kind {
        NoticeKind::Nda => ("strong", NDA_RECIPIENTS_HEADING),
        NoticeKind::Nef => ("b", NEF_RECIPIENTS_HEADING),
    };
    let Some(marker) = find_element(doc.root(), tag, heading) else {
        debug!("No recipients heading in notice");
        return Vec::new();
    };

    let linked = sibling_elements(marker)
        .iter()
        .any(|e| e.value().name() == "a");
    if linked {
        let block = marker
            .parent()
            .and_then(scraper::ElementRef::wrap)
            .map(text_content)
            .unwrap_or_default();
        debug!("Reading linked recipients as a token stream");
        return parse_recipient_stream(&block, &end_markers(docket_numbers));
    }

    parse_recipient_lines(&sibling_texts(marker))
}

/// Recipients of a plain-text notice
pub(crate) fn from_plain(text: &str, docket_numbers: &[String]) -> Vec<Recipient> {
    if !text.contains(NEF_RECIPIENTS_HEADING) && !text.contains(NDA_RECIPIENTS_HEADING) {
        debug!("No recipients heading in notice");
        return Vec::new();
    }
    parse_recipient_stream(text, &end_markers(docket_numbers))
}

fn end_markers(docket_numbers: &[String]) -> Vec<&str> {
    docket_numbers
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(OTHER_MEANS_HEADING))
        .collect()
}

fn clean_address(token: &str) -> Option<String> {
    let address = token
        .trim_matches(|c: char| matches!(c, ',' | ';' | ':' | '<' | '>' | '(' | ')' | '[' | ']'))
        .trim_start_matches("mailto:");
    (!address.is_empty()).then(|| address.to_string())
}
