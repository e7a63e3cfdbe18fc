//! Error types for signed URL encoding and verification.
//!
//! Errors are reported through [`error_stack::Report`] so that the
//! underlying cause (for example a numeric parse failure) stays attached
//! while callers match on the [`SignedUrlError`] kind.

use chrono::{DateTime, Utc};
use derive_more::{Display, Error};
use http::StatusCode;

#[derive(Debug, Display, Error)]
pub enum SignedUrlError {
    /// A structural separator (`.` or `/`) is missing from the envelope.
    #[display("Invalid signed URL: {message}")]
    InvalidEnvelope { message: String },

    /// The signature segment is not unpadded URL-safe base64.
    #[display("Invalid signature: invalid base64: {encoded}")]
    InvalidSignatureEncoding { encoded: String },

    /// The expiry segment is not a signed base-10 integer.
    #[display("Invalid expiry: {message}")]
    InvalidExpiry { message: String },

    #[display("Invalid URL: {message}")]
    InvalidUrl { message: String },

    /// The signature does not match the canonical form of the URL.
    #[display("Signature mismatch")]
    SignatureMismatch,

    #[display("URL expired at {expired_at}")]
    Expired { expired_at: DateTime<Utc> },

    #[display("Configuration error: {message}")]
    Configuration { message: String },
}

impl SignedUrlError {
    /// HTTP status a request handler should answer with for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidEnvelope { .. }
            | Self::InvalidSignatureEncoding { .. }
            | Self::InvalidExpiry { .. }
            | Self::InvalidUrl { .. } => StatusCode::BAD_REQUEST,
            Self::SignatureMismatch | Self::Expired { .. } => StatusCode::FORBIDDEN,
            Self::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
