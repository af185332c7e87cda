//! Error types for notification extraction

use thiserror::Error;

/// Errors that abort extraction of a notification.
///
/// Extraction is all-or-nothing: once any of these is returned no partial
/// result exists for the message.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Failed to parse the MIME structure
    #[error("Failed to parse email structure: {0}")]
    Structure(String),

    /// No text/html or text/plain body part was found
    #[error("No usable text/html or text/plain part in message")]
    MissingBody,

    /// Payload bytes were neither UTF-8 nor ISO-8859-1
    #[error("Failed to decode content: {0}")]
    Decode(String),

    /// The message is a known notice type that carries no docket activity
    #[error("Unsupported notice type \"{notice}\", court: {court_id}")]
    UnsupportedNotice { court_id: String, notice: String },

    /// A format that only ever carries one docket referenced several
    #[error(
        "Received a potential multi-docket {format} notification, \
         support for it must be added, court: {court_id}"
    )]
    UnsupportedMultiDocketNotification {
        court_id: String,
        format: &'static str,
    },

    /// No docket text could be located for a docket entry
    #[error("Can't get docket entry description, court: {court_id}")]
    MissingDocketText { court_id: String },

    /// No "filed on" date in the notification
    #[error("Can't get filing date, court: {court_id}")]
    MissingFilingDate { court_id: String },

    /// A docket table without a readable case number
    #[error("Can't get docket number, court: {court_id}")]
    MissingDocketNumber { court_id: String },

    /// Extractor configuration is unusable
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Failed to serialize extracted data
    #[error("Failed to serialize notification data: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for notification extraction
pub type Result<T> = std::result::Result<T, ParseError>;
