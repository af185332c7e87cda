//! Core types for extracted notifications

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Resolved content type of the notification body
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Html,
    Plain,
}

impl ContentType {
    /// Map a MIME type to a supported content type
    #[must_use]
    pub fn from_mime(mimetype: &str) -> Option<Self> {
        match mimetype.trim().to_ascii_lowercase().as_str() {
            "text/html" => Some(Self::Html),
            "text/plain" => Some(Self::Plain),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_mime(self) -> &'static str {
        match self {
            Self::Html => "text/html",
            Self::Plain => "text/plain",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_mime())
    }
}

/// Which court e-filing system produced the notice
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NoticeKind {
    /// Notice of Electronic Filing, sent by trial courts
    Nef,
    /// Notice of Docket Activity, sent by appellate courts
    Nda,
}

impl NoticeKind {
    /// Marker phrase that only appears in appellate notices
    pub const APPELLATE_MARKER: &'static str = "Notice of Docket Activity";

    /// Classify a notice from its rendered text
    #[must_use]
    pub fn classify(rendered_text: &str) -> Self {
        if rendered_text.contains(Self::APPELLATE_MARKER) {
            Self::Nda
        } else {
            Self::Nef
        }
    }

    #[must_use]
    pub const fn is_appellate(self) -> bool {
        matches!(self, Self::Nda)
    }
}

/// A linked court document and the PACER identifiers carried by its URL
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentLink {
    /// Absolute document URL, fragment removed
    pub url: String,

    /// Document id from the last path segment
    pub pacer_doc_id: String,

    /// PACER case id
    pub pacer_case_id: Option<String>,

    /// Docket entry sequence number (trial courts only)
    pub pacer_seq_no: Option<String>,

    /// Free-look magic number
    pub pacer_magic_num: Option<String>,
}

/// One filing event referenced by a notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocketEntry {
    pub date_filed: NaiveDate,

    /// Docket text, whitespace normalized
    pub description: String,

    /// Entry number on the docket, absent when no document is attached
    pub document_number: Option<String>,

    /// Present iff the notification links the filed document
    pub document: Option<DocumentLink>,
}

impl DocketEntry {
    #[must_use]
    pub fn document_url(&self) -> Option<&str> {
        self.document.as_ref().map(|d| d.url.as_str())
    }
}

/// One case referenced by a notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Docket {
    /// Cleaned, title-cased case name
    pub case_name: String,

    pub docket_number: String,

    pub date_filed: NaiveDate,

    pub docket_entries: Vec<DocketEntry>,
}

/// A party the notification was electronically mailed to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recipient {
    pub name: String,

    /// Never empty
    pub email_addresses: Vec<String>,
}

impl Recipient {
    /// Build a recipient, refusing one without any address
    #[must_use]
    pub fn new(name: impl Into<String>, email_addresses: Vec<String>) -> Option<Self> {
        if email_addresses.is_empty() {
            return None;
        }
        Some(Self {
            name: name.into(),
            email_addresses,
        })
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email_addresses.join(", "))
    }
}

/// Everything extracted from one notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationData {
    /// Court identifier, passed through unchanged
    pub court_id: String,

    pub appellate: bool,

    /// More than one document is associated with the filing
    pub contains_attachments: bool,

    pub dockets: Vec<Docket>,

    pub email_recipients: Vec<Recipient>,
}

impl NotificationData {
    /// Serialize for archival consumers
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Look up a docket by its number
    #[must_use]
    pub fn docket(&self, docket_number: &str) -> Option<&Docket> {
        self.dockets
            .iter()
            .find(|d| d.docket_number == docket_number)
    }
}
