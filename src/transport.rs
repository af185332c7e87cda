//! MIME transport decoding
//!
//! Picks the body part a notification should be read from and turns its
//! payload bytes into text.

use std::borrow::Cow;

use mailparse::{DispositionType, ParsedMail};
use tracing::debug;

use crate::error::{ParseError, Result};
use crate::types::ContentType;

/// Charset a payload was decoded with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadCharset {
    Utf8,
    Latin1,
}

/// Body part selected from a MIME message
#[derive(Debug, Clone)]
pub struct DecodedBody {
    pub content_type: ContentType,
    pub text: String,
    pub charset: PayloadCharset,
}

/// Parse a raw MIME message and decode its notification body.
///
/// An HTML part anywhere in the message wins over plain text. Plain text is
/// only taken from a part not marked as an attachment.
pub fn decode_message(raw: &[u8]) -> Result<DecodedBody> {
    let parsed = mailparse::parse_mail(raw).map_err(|e| ParseError::Structure(e.to_string()))?;

    let (content_type, part) = select_part(&parsed).ok_or(ParseError::MissingBody)?;
    let payload = part
        .get_body_raw()
        .map_err(|e| ParseError::Decode(e.to_string()))?;
    let (text, charset) = decode_payload(&payload)?;

    debug!(
        content_type = %content_type,
        charset = ?charset,
        payload_len = payload.len(),
        "Selected notification body part"
    );

    Ok(DecodedBody {
        content_type,
        text: text.into_owned(),
        charset,
    })
}

/// Decode payload bytes as UTF-8, falling back to ISO-8859-1.
///
/// The fallback is only attempted when the bytes are not valid UTF-8. It
/// decodes with windows-1252, the superset mail clients actually send under
/// an ISO-8859-1 label: bytes 0x80-0x9F become typographic characters such
/// as `“` rather than C1 control codes. Every other byte maps to the same
/// code point as ISO-8859-1.
pub fn decode_payload(bytes: &[u8]) -> Result<(Cow<'_, str>, PayloadCharset)> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok((Cow::Borrowed(text), PayloadCharset::Utf8));
    }

    // encoding_rs serves the iso-8859-1 label with its windows-1252 superset
    encoding_rs::WINDOWS_1252
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| (text, PayloadCharset::Latin1))
        .ok_or_else(|| ParseError::Decode("payload is neither UTF-8 nor ISO-8859-1".into()))
}

fn select_part<'m, 'a>(mail: &'m ParsedMail<'a>) -> Option<(ContentType, &'m ParsedMail<'a>)> {
    find_part(mail, &|part| part_type(part) == Some(ContentType::Html))
        .map(|part| (ContentType::Html, part))
        .or_else(|| {
            find_part(mail, &|part| {
                part_type(part) == Some(ContentType::Plain) && !is_attachment(part)
            })
            .map(|part| (ContentType::Plain, part))
        })
}

fn find_part<'m, 'a>(
    mail: &'m ParsedMail<'a>,
    accept: &dyn Fn(&ParsedMail<'_>) -> bool,
) -> Option<&'m ParsedMail<'a>> {
    if mail.subparts.is_empty() {
        return accept(mail).then_some(mail);
    }
    mail.subparts.iter().find_map(|part| find_part(part, accept))
}

fn part_type(part: &ParsedMail<'_>) -> Option<ContentType> {
    ContentType::from_mime(&part.ctype.mimetype)
}

fn is_attachment(part: &ParsedMail<'_>) -> bool {
    matches!(
        part.get_content_disposition().disposition,
        DispositionType::Attachment
    )
}
