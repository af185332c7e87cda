//! Extractors for HTML notices

use scraper::ElementRef;

use super::{DocketNumber, document_number_from_text, parse_docket_numbers};
use crate::document::{
    ANCHOR, HtmlDocument, child_elements, contains_text, first_direct_text, label_cell,
    sibling_elements, sibling_texts, text_content,
};
use crate::normalize::clean_string;
use crate::pacer::case_id_from_doc1_url;
use crate::types::NoticeKind;

const DOCKET_TEXT_MARKER: &str = "Docket Text:";
const APPELLATE_RECIPIENTS_SENTINEL: &str = "Notice will be electronically mailed to:";
const DOCUMENT_DESCRIPTION_MARKER: &str = "Document description:";

/// One known DOM arrangement of NEF docket text, read from the marker
type DescriptionShape = fn(ElementRef<'_>) -> String;

/// NEF docket text arrangements, most specific first
const NEF_DESCRIPTION_SHAPES: [DescriptionShape; 3] =
    [font_bold_text, bold_span_text, sibling_text];

/// Raw case name from the cell next to "Case Name", or a paragraph in it
pub(crate) fn case_name(table: ElementRef<'_>) -> Option<String> {
    let cell = label_cell(table, "Case Name")?;
    first_direct_text(cell).or_else(|| {
        child_elements(cell, "p")
            .into_iter()
            .find_map(first_direct_text)
    })
}

/// Docket number from the anchors next to "Case Number"
pub(crate) fn docket_number(table: ElementRef<'_>, kind: NoticeKind) -> Option<DocketNumber> {
    let cell = label_cell(table, "Case Number")?;

    if kind.is_appellate() {
        return child_elements(cell, "a")
            .into_iter()
            .find_map(first_direct_text)
            .and_then(|raw| DocketNumber::verbatim(&raw));
    }

    parse_docket_numbers(&anchor_texts(cell)).or_else(|| {
        let nested: Vec<String> = child_elements(cell, "p")
            .into_iter()
            .flat_map(anchor_texts)
            .collect();
        parse_docket_numbers(&nested)
    })
}

fn anchor_texts(parent: ElementRef<'_>) -> Vec<String> {
    child_elements(parent, "a")
        .into_iter()
        .map(text_content)
        .collect()
}

/// Document number next to "Document Number"
pub(crate) fn document_number(table: ElementRef<'_>) -> Option<String> {
    label_cell(table, "Document Number")
        .map(text_content)
        .and_then(|text| document_number_from_text(&text))
}

/// Absolute URL of the filed document.
///
/// NEFs link it from the "Document Number" cell, NDAs from "Document(s)".
pub(crate) fn document_url(
    doc: &HtmlDocument,
    table: ElementRef<'_>,
    kind: NoticeKind,
) -> Option<String> {
    let label = if kind.is_appellate() {
        "Document(s)"
    } else {
        "Document Number"
    };
    let anchor = label_cell(table, label)?.select(&ANCHOR).next()?;
    doc.href(anchor)
}

/// Trial-court case id carried by the appellate "Case Number" link
pub(crate) fn appellate_case_id(doc: &HtmlDocument) -> Option<String> {
    let anchor = label_cell(doc.root(), "Case Number")?.select(&ANCHOR).next()?;
    case_id_from_doc1_url(&doc.href(anchor)?)
}

/// Docket text following the first "Docket Text:" marker after `table`
pub(crate) fn description(
    doc: &HtmlDocument,
    table: ElementRef<'_>,
    kind: NoticeKind,
) -> Option<String> {
    let marker = doc
        .following_elements(table)
        .into_iter()
        .find(|e| e.value().name() == "strong" && contains_text(*e, DOCKET_TEXT_MARKER))?;

    if kind.is_appellate() {
        let text: String = doc
            .following_texts(marker)
            .into_iter()
            .take_while(|t| t.trim() != APPELLATE_RECIPIENTS_SENTINEL)
            .collect();
        return Some(clean_string(&text)).filter(|d| !d.is_empty());
    }

    NEF_DESCRIPTION_SHAPES
        .iter()
        .map(|shape| clean_string(&shape(marker)))
        .find(|d| !d.is_empty())
}

/// `<strong>Docket Text:</strong> <font><b>...</b></font>`
fn font_bold_text(marker: ElementRef<'_>) -> String {
    sibling_elements(marker)
        .into_iter()
        .find(|e| e.value().name() == "font")
        .map(|font| {
            child_elements(font, "b")
                .into_iter()
                .map(text_content)
                .collect()
        })
        .unwrap_or_default()
}

/// `<strong>Docket Text:</strong> <b><span>...</span></b>`
fn bold_span_text(marker: ElementRef<'_>) -> String {
    sibling_elements(marker)
        .into_iter()
        .find(|e| e.value().name() == "b")
        .map(|bold| {
            child_elements(bold, "span")
                .into_iter()
                .map(text_content)
                .collect()
        })
        .unwrap_or_default()
}

/// `<strong>Docket Text:</strong> bare text`
fn sibling_text(marker: ElementRef<'_>) -> String {
    sibling_texts(marker).concat()
}

/// More than one document is described in the notice
pub(crate) fn contains_attachments(doc: &HtmlDocument) -> bool {
    doc.root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "strong" && contains_text(*e, DOCUMENT_DESCRIPTION_MARKER))
        .count()
        > 1
}
