//! PACER identifiers carried by court document URLs

use regex::Regex;

use crate::types::{DocumentLink, NoticeKind};

static CASE_ID_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)caseid=(\d+)").unwrap());

static SEQ_NO_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"de_seq_num=(\d+)").unwrap());

static MAGIC_NUM_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"magic_num=(\d+)").unwrap());

static APPELLATE_MAGIC_NUM_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"uid=(\d+)").unwrap());

/// Document id from a doc1 URL, with its fourth digit coerced to zero.
///
/// `https://ecf.almd.uscourts.gov/doc1/01712427473` gives `01702427473`.
#[must_use]
pub fn doc_id_from_doc1_url(url: &str) -> String {
    let last = url.rsplit('/').next().unwrap_or(url);
    let id = last.split('?').next().unwrap_or(last);
    if id.chars().count() < 4 {
        return id.to_string();
    }
    id.chars()
        .enumerate()
        .map(|(i, c)| if i == 3 { '0' } else { c })
        .collect()
}

#[must_use]
pub fn case_id_from_doc1_url(url: &str) -> Option<String> {
    capture(&CASE_ID_REGEX, url)
}

#[must_use]
pub fn seq_no_from_doc1_url(url: &str) -> Option<String> {
    capture(&SEQ_NO_REGEX, url)
}

/// Magic number: `magic_num` on trial-court links, `uid` on appellate ones
#[must_use]
pub fn magic_num_from_doc1_url(url: &str, appellate: bool) -> Option<String> {
    if appellate {
        capture(&APPELLATE_MAGIC_NUM_REGEX, url)
    } else {
        capture(&MAGIC_NUM_REGEX, url)
    }
}

/// Build the document link group for a URL.
///
/// Appellate links carry no case id or sequence number of their own; the
/// case id comes from the notice's case link instead.
pub(crate) fn document_link(
    url: String,
    kind: NoticeKind,
    appellate_case_id: Option<String>,
) -> DocumentLink {
    let appellate = kind.is_appellate();
    let (pacer_case_id, pacer_seq_no) = if appellate {
        (appellate_case_id, None)
    } else {
        (case_id_from_doc1_url(&url), seq_no_from_doc1_url(&url))
    };

    DocumentLink {
        pacer_doc_id: doc_id_from_doc1_url(&url),
        pacer_magic_num: magic_num_from_doc1_url(&url, appellate),
        pacer_case_id,
        pacer_seq_no,
        url,
    }
}

fn capture(regex: &Regex, haystack: &str) -> Option<String> {
    regex
        .captures(haystack)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}
