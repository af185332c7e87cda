//! Notification parsing and extraction

use std::borrow::Cow;

use tracing::debug;

use crate::config::{ExtractorConfig, MessageSource};
use crate::dockets::DocketAssembler;
use crate::document::NotificationBody;
use crate::error::{ParseError, Result};
use crate::fields::{html, plain};
use crate::normalize::join_soft_wraps;
use crate::recipients;
use crate::transport;
use crate::types::{ContentType, NoticeKind, NotificationData};

/// Notices that share the e-filing template but carry no docket activity
const UNSUPPORTED_NOTICES: [&str; 1] = ["Notice of Electronic Claims Filing"];

/// Parse a raw notification email delivered straight from the mail
/// transport and extract its dockets and recipients
pub fn parse_notification(court_id: &str, raw: &[u8]) -> Result<NotificationData> {
    Notification::from_mime(court_id, raw, &ExtractorConfig::default())?.extract()
}

/// A parsed court notification.
///
/// Parsing happens once, at construction: the content type, the document
/// tree and the NEF/NDA classification are fixed for the lifetime of the
/// value and never recomputed. [`Notification::extract`] reads fields from
/// that snapshot.
///
/// The HTML tree is not thread-safe, so a `Notification` stays on the thread
/// that built it. Separate messages can be parsed on separate threads freely.
pub struct Notification {
    court_id: String,
    content_type: ContentType,
    kind: NoticeKind,
    body: NotificationBody,
}

impl Notification {
    /// Parse a raw MIME message
    pub fn from_mime(
        court_id: impl Into<String>,
        raw: &[u8],
        config: &ExtractorConfig,
    ) -> Result<Self> {
        let decoded = transport::decode_message(raw)?;
        Self::from_body(court_id, decoded.content_type, &decoded.text, config)
    }

    /// Parse an already decoded notification body
    pub fn from_body(
        court_id: impl Into<String>,
        content_type: ContentType,
        text: &str,
        config: &ExtractorConfig,
    ) -> Result<Self> {
        let court_id = court_id.into();
        let base = config.base_url_for(&court_id)?;

        // Soft wraps only matter to the tree builder; plain-text extractors
        // depend on the line structure.
        let source = match (config.source, content_type) {
            (MessageSource::Archived, ContentType::Html) => Cow::Owned(join_soft_wraps(text)),
            _ => Cow::Borrowed(text),
        };

        let body = NotificationBody::build(content_type, &source, base);
        let kind = NoticeKind::classify(body.text());
        debug!(
            court_id = %court_id,
            content_type = %content_type,
            kind = ?kind,
            "Parsed notification"
        );

        Ok(Self {
            court_id,
            content_type,
            kind,
            body,
        })
    }

    #[must_use]
    pub fn court_id(&self) -> &str {
        &self.court_id
    }

    #[must_use]
    pub const fn content_type(&self) -> ContentType {
        self.content_type
    }

    #[must_use]
    pub const fn kind(&self) -> NoticeKind {
        self.kind
    }

    #[must_use]
    pub const fn is_appellate(&self) -> bool {
        self.kind.is_appellate()
    }

    /// Extract dockets, recipients and the attachments flag.
    ///
    /// Either everything is extracted or an error is returned.
    pub fn extract(&self) -> Result<NotificationData> {
        if let Some(notice) = UNSUPPORTED_NOTICES
            .iter()
            .find(|notice| self.body.text().contains(*notice))
        {
            return Err(ParseError::UnsupportedNotice {
                court_id: self.court_id.clone(),
                notice: (*notice).to_string(),
            });
        }

        let mut assembler = DocketAssembler::new(&self.court_id, self.kind);
        let (dockets, email_recipients, contains_attachments) = match &self.body {
            NotificationBody::Html(doc) => {
                let dockets = assembler.assemble_html(doc)?;
                let recipients =
                    recipients::from_html(doc, self.kind, assembler.docket_numbers());
                (dockets, recipients, html::contains_attachments(doc))
            }
            NotificationBody::Plain(doc) => {
                let dockets = assembler.assemble_plain(doc)?;
                let recipients = recipients::from_plain(doc.text(), assembler.docket_numbers());
                (dockets, recipients, plain::contains_attachments(doc.text()))
            }
        };

        debug!(
            court_id = %self.court_id,
            dockets = dockets.len(),
            recipients = email_recipients.len(),
            "Extracted notification"
        );

        Ok(NotificationData {
            court_id: self.court_id.clone(),
            appellate: self.is_appellate(),
            contains_attachments,
            dockets,
            email_recipients,
        })
    }
}
