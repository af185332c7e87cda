//! Extractor configuration.
//!
//! Plain serde data so callers can load it from whatever format they
//! already use for their own settings.

use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::error::{ParseError, Result};

/// How the raw message reached us
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageSource {
    /// Delivered straight from the mail transport
    #[default]
    Direct,
    /// Archived to object storage with soft line wraps left in the body
    Archived,
}

/// Extraction settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Transport the message came from.
    pub source: MessageSource,
    /// Base for resolving relative links. Defaults to the court's
    /// e-filing host.
    pub base_url: Option<String>,
}

impl ExtractorConfig {
    /// Config for messages archived in object storage
    #[must_use]
    pub fn archived() -> Self {
        Self {
            source: MessageSource::Archived,
            ..Self::default()
        }
    }

    /// Resolve the link base for a court.
    ///
    /// An explicit `base_url` must parse. The court host default is best
    /// effort: a court id that does not form a valid host yields `None`, and
    /// only absolute links are kept.
    pub fn base_url_for(&self, court_id: &str) -> Result<Option<Url>> {
        if let Some(raw) = &self.base_url {
            return Url::parse(raw)
                .map(Some)
                .map_err(|e| ParseError::Config(format!("base url {raw}: {e}")));
        }

        let derived = format!("https://ecf.{court_id}.uscourts.gov/");
        match Url::parse(&derived) {
            Ok(url) => Ok(Some(url)),
            Err(e) => {
                warn!(
                    court_id = %court_id,
                    error = %e,
                    "No link base for court, keeping absolute links only"
                );
                Ok(None)
            }
        }
    }
}
