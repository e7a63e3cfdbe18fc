//! Path formatter: `/<sig>.<exp>/<data>`.
//!
//! Embeds the signature and expiry as a path prefix, as an alternative to
//! carrying them in query parameters:
//!
//! ```text
//! /foo/bar -> 390830893/foo/bar -> /qrvM.390830893/foo/bar
//! ```

use base64::{engine::general_purpose, Engine};
use chrono::{DateTime, Utc};
use error_stack::{Report, ResultExt};

use super::Formatter;
use crate::error::SignedUrlError;
use crate::settings::FormatterSettings;
use crate::url_parts::UrlParts;

const SIGNATURE_SEPARATOR: char = '.';
const PATH_SEPARATOR: char = '/';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathFormatter {
    /// Query parameters are not part of the signed canonical form.
    skip_query: bool,
}

impl PathFormatter {
    #[must_use]
    pub fn new(skip_query: bool) -> Self {
        Self { skip_query }
    }

    #[must_use]
    pub fn from_settings(settings: &FormatterSettings) -> Self {
        Self::new(settings.skip_query)
    }

    #[must_use]
    pub fn skip_query(&self) -> bool {
        self.skip_query
    }
}

impl Formatter for PathFormatter {
    /// `/foo/bar` -> `390830893/foo/bar`
    fn add_expiry(&self, mut url: UrlParts, expiry: DateTime<Utc>) -> UrlParts {
        url.path = format!("{}{}", expiry.timestamp(), url.path);
        url
    }

    /// `390830893/foo/bar` -> `/qrvM.390830893/foo/bar`
    fn add_signature(&self, mut url: UrlParts, signature: &[u8]) -> UrlParts {
        let encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);
        url.path = format!("{PATH_SEPARATOR}{encoded}{SIGNATURE_SEPARATOR}{}", url.path);
        url
    }

    fn extract_signature(
        &self,
        mut url: UrlParts,
    ) -> Result<(UrlParts, Vec<u8>), Report<SignedUrlError>> {
        let Some((encoded, payload)) = url.path.split_once(SIGNATURE_SEPARATOR) else {
            log::debug!("No signature separator in path: {}", url.path);
            return Err(Report::new(SignedUrlError::InvalidEnvelope {
                message: "missing separator between signature and expiry".into(),
            }));
        };

        // Drop the leading separator; an empty segment stays empty.
        let mut chars = encoded.chars();
        chars.next();
        let encoded = chars.as_str();

        let signature = general_purpose::URL_SAFE_NO_PAD
            .decode(encoded)
            .change_context(SignedUrlError::InvalidSignatureEncoding {
                encoded: encoded.to_string(),
            })?;

        url.path = payload.to_string();

        if self.skip_query {
            // Query parameters were not part of the signed payload
            url.clear_query();
        }

        log::trace!("Extracted {} signature bytes", signature.len());
        Ok((url, signature))
    }

    fn extract_expiry(
        &self,
        mut url: UrlParts,
    ) -> Result<(UrlParts, DateTime<Utc>), Report<SignedUrlError>> {
        let Some((expiry, path)) = url.path.split_once(PATH_SEPARATOR) else {
            log::debug!("No path separator after expiry: {}", url.path);
            return Err(Report::new(SignedUrlError::InvalidEnvelope {
                message: "missing separator between expiry and path".into(),
            }));
        };

        let seconds = expiry
            .parse::<i64>()
            .change_context(SignedUrlError::InvalidExpiry {
                message: format!("{expiry} is not a signed integer"),
            })?;
        let expires_at = DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
            Report::new(SignedUrlError::InvalidExpiry {
                message: format!("{seconds} is out of range"),
            })
        })?;

        url.path = format!("{PATH_SEPARATOR}{path}");

        Ok((url, expires_at))
    }
}
