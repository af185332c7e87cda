// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Court Notification Extractor
//!
//! Extracts docket metadata from electronic court-filing notification
//! emails: Notices of Electronic Filing (NEF) sent by trial courts and
//! Notices of Docket Activity (NDA) sent by appellate courts.
//!
//! # Features
//!
//! - HTML and plain-text notices, delivered directly or archived with soft
//!   line wraps
//! - Single and multi-docket trial-court notices
//! - PACER document, case, sequence and magic numbers from document links
//! - Recipient names and addresses from the "mailed to" block
//!
//! Extraction is all-or-nothing per message. Known-ambiguous layouts, such
//! as a plain-text notice naming two cases, are refused with an error.
//!
//! # Example
//!
//! ```rust
//! use nef_extract::{ContentType, ExtractorConfig, Notification};
//!
//! let body = "Case Name:Doe v. Roe\n\
//!             Case Number:1:20-cv-12345\n\
//!             Docket Text:Order filed on 01/02/2020 granting motion.\n\
//!             Notice has been electronically mailed to:\n\
//!             John Smith, jsmith@example.com\n";
//! let notification =
//!     Notification::from_body("mad", ContentType::Plain, body, &ExtractorConfig::default())
//!         .unwrap();
//! let data = notification.extract().unwrap();
//!
//! assert_eq!(data.dockets[0].case_name, "Doe V. Roe");
//! assert_eq!(data.email_recipients[0].email_addresses, ["jsmith@example.com"]);
//! ```

mod config;
mod dockets;
mod document;
mod error;
mod fields;
mod normalize;
mod pacer;
mod parser;
mod recipients;
mod transport;
mod types;

pub use config::{ExtractorConfig, MessageSource};
pub use error::{ParseError, Result};
pub use normalize::{UNKNOWN_CASE_TITLE, clean_string, harmonize_case_name, join_soft_wraps};
pub use pacer::{
    case_id_from_doc1_url, doc_id_from_doc1_url, magic_num_from_doc1_url, seq_no_from_doc1_url,
};
pub use parser::{Notification, parse_notification};
pub use recipients::{parse_recipient_lines, parse_recipient_stream};
pub use transport::{DecodedBody, PayloadCharset, decode_message, decode_payload};
pub use types::*;
