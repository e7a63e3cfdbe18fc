//! Formatters embed an expiry and a signature into a URL and take them back out.
//!
//! Encoding applies [`Formatter::add_expiry`] before [`Formatter::add_signature`]
//! so the signature covers the expiry. Decoding mirrors that order:
//! [`Formatter::extract_signature`] first, then [`Formatter::extract_expiry`].
//! Calling them out of order corrupts the envelope and is not detected here.

pub mod path;

pub use path::PathFormatter;

use chrono::{DateTime, Utc};
use error_stack::Report;

use crate::error::SignedUrlError;
use crate::url_parts::UrlParts;

pub trait Formatter {
    /// Embeds `expiry` into the URL.
    fn add_expiry(&self, url: UrlParts, expiry: DateTime<Utc>) -> UrlParts;

    /// Embeds the raw signature bytes into a URL that already carries its expiry.
    fn add_signature(&self, url: UrlParts, signature: &[u8]) -> UrlParts;

    /// Splits the signature off a signed URL, leaving the signed payload.
    ///
    /// # Errors
    ///
    /// Returns [`SignedUrlError::InvalidEnvelope`] or
    /// [`SignedUrlError::InvalidSignatureEncoding`] for malformed input.
    fn extract_signature(
        &self,
        url: UrlParts,
    ) -> Result<(UrlParts, Vec<u8>), Report<SignedUrlError>>;

    /// Splits the expiry off a payload, restoring the application URL.
    ///
    /// # Errors
    ///
    /// Returns [`SignedUrlError::InvalidEnvelope`] or
    /// [`SignedUrlError::InvalidExpiry`] for malformed input.
    fn extract_expiry(
        &self,
        url: UrlParts,
    ) -> Result<(UrlParts, DateTime<Utc>), Report<SignedUrlError>>;
}
