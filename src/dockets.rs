//! Docket assembly
//!
//! Groups extracted fields into dockets. HTML trial-court notices may list
//! several dockets, one table each. Plain-text and appellate notices have
//! only ever been seen carrying one, so more than one is refused rather than
//! guessed at.

use chrono::NaiveDate;
use scraper::ElementRef;
use tracing::{debug, error, warn};

use crate::document::{HtmlDocument, PlainDocument};
use crate::error::{ParseError, Result};
use crate::fields::{self, DocketNumber, html, plain};
use crate::normalize::{UNKNOWN_CASE_TITLE, harmonize_case_name};
use crate::pacer::document_link;
use crate::types::{Docket, DocketEntry, NoticeKind};

/// Assembles the dockets of one notification.
///
/// Records every docket number it assembles; recipient parsing uses them to
/// find where the recipient block ends.
pub(crate) struct DocketAssembler<'n> {
    court_id: &'n str,
    kind: NoticeKind,
    docket_numbers: Vec<String>,
}

impl<'n> DocketAssembler<'n> {
    pub(crate) const fn new(court_id: &'n str, kind: NoticeKind) -> Self {
        Self {
            court_id,
            kind,
            docket_numbers: Vec::new(),
        }
    }

    /// Case numbers of every docket assembled so far
    pub(crate) fn docket_numbers(&self) -> &[String] {
        &self.docket_numbers
    }

    pub(crate) fn assemble_html(&mut self, doc: &HtmlDocument) -> Result<Vec<Docket>> {
        let tables = doc.docket_tables();
        if self.kind.is_appellate() && tables.len() > 1 {
            return Err(self.multi_docket("NDA", tables.len()));
        }
        if tables.is_empty() {
            warn!(court_id = %self.court_id, "No docket tables in notice");
            return Ok(Vec::new());
        }

        let date_filed = self.date_filed(doc.text())?;
        let mut dockets: Vec<Docket> = Vec::with_capacity(tables.len());
        for table in tables {
            let number = html::docket_number(table, self.kind).ok_or_else(|| {
                ParseError::MissingDocketNumber {
                    court_id: self.court_id.to_string(),
                }
            })?;
            if dockets.iter().any(|d| d.docket_number == number.value) {
                warn!(
                    court_id = %self.court_id,
                    docket_number = %number.value,
                    "Docket listed twice in notice, keeping the first"
                );
                continue;
            }

            let case_name = self.case_name(html::case_name(table));
            let entry = self.html_entry(doc, table, date_filed)?;
            dockets.push(self.record(number, case_name, date_filed, entry));
        }

        debug!(court_id = %self.court_id, dockets = dockets.len(), "Assembled HTML dockets");
        Ok(dockets)
    }

    pub(crate) fn assemble_plain(&mut self, doc: &PlainDocument) -> Result<Vec<Docket>> {
        let text = doc.text();
        let case_names = plain::case_names(text);
        if case_names.len() > 1 {
            return Err(self.multi_docket("text/plain", case_names.len()));
        }

        let number = plain::docket_number(text).ok_or_else(|| ParseError::MissingDocketNumber {
            court_id: self.court_id.to_string(),
        })?;
        let case_name = self.case_name(case_names.into_iter().next());
        let date_filed = self.date_filed(text)?;

        let description = plain::description(text).ok_or_else(|| self.missing_docket_text())?;
        let document = plain::document_url(text)
            .and_then(|url| doc.resolve(&url))
            .map(|url| document_link(url, self.kind, None));
        let entry = DocketEntry {
            date_filed,
            description,
            document_number: plain::document_number(text),
            document,
        };
        self.warn_missing_document(&entry);

        Ok(vec![self.record(number, case_name, date_filed, entry)])
    }

    fn html_entry(
        &self,
        doc: &HtmlDocument,
        table: ElementRef<'_>,
        date_filed: NaiveDate,
    ) -> Result<DocketEntry> {
        let description =
            html::description(doc, table, self.kind).ok_or_else(|| self.missing_docket_text())?;

        let (document_number, appellate_case_id) = if self.kind.is_appellate() {
            (None, html::appellate_case_id(doc))
        } else {
            (html::document_number(table), None)
        };
        let document = html::document_url(doc, table, self.kind)
            .map(|url| document_link(url, self.kind, appellate_case_id));

        let entry = DocketEntry {
            date_filed,
            description,
            document_number,
            document,
        };
        self.warn_missing_document(&entry);
        Ok(entry)
    }

    fn record(
        &mut self,
        number: DocketNumber,
        case_name: String,
        date_filed: NaiveDate,
        entry: DocketEntry,
    ) -> Docket {
        for component in number.components {
            if !self.docket_numbers.contains(&component) {
                self.docket_numbers.push(component);
            }
        }
        Docket {
            case_name,
            docket_number: number.value,
            date_filed,
            docket_entries: vec![entry],
        }
    }

    fn case_name(&self, raw: Option<String>) -> String {
        let name = raw
            .map(|n| harmonize_case_name(&n))
            .filter(|n| !n.is_empty());
        name.unwrap_or_else(|| {
            warn!(court_id = %self.court_id, "No case name in notice, using default title");
            UNKNOWN_CASE_TITLE.to_string()
        })
    }

    fn date_filed(&self, rendered: &str) -> Result<NaiveDate> {
        fields::filing_date(rendered).ok_or_else(|| ParseError::MissingFilingDate {
            court_id: self.court_id.to_string(),
        })
    }

    fn warn_missing_document(&self, entry: &DocketEntry) {
        if entry.document.is_none() {
            warn!(court_id = %self.court_id, "No document link in notice");
        }
        if entry.document_number.is_none() && !self.kind.is_appellate() {
            warn!(court_id = %self.court_id, "No document number in notice");
        }
    }

    fn missing_docket_text(&self) -> ParseError {
        ParseError::MissingDocketText {
            court_id: self.court_id.to_string(),
        }
    }

    fn multi_docket(&self, format: &'static str, found: usize) -> ParseError {
        error!(
            court_id = %self.court_id,
            format,
            found,
            "Potential multi-docket notification, add support for it"
        );
        ParseError::UnsupportedMultiDocketNotification {
            court_id: self.court_id.to_string(),
            format,
        }
    }
}
