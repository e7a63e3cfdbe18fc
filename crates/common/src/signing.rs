//! Signing and verification of URLs through a [`Formatter`].
//!
//! The signature primitive is supplied by the caller through
//! [`SignatureAlgorithm`]; this module only sequences the formatter steps
//! around it and checks the expiry.

use chrono::{DateTime, Duration, Utc};
use error_stack::Report;

use crate::error::SignedUrlError;
use crate::formatter::{Formatter, PathFormatter};
use crate::settings::{Settings, SigningSettings};
use crate::url_parts::UrlParts;

/// Computes and checks signature bytes over a canonical URL.
pub trait SignatureAlgorithm {
    fn sign(&self, payload: &[u8]) -> Vec<u8>;

    fn verify(&self, payload: &[u8], signature: &[u8]) -> bool;
}

/// A URL whose signature and expiry have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedUrl {
    pub url: UrlParts,
    pub expires_at: DateTime<Utc>,
}

pub struct UrlSigner<A, F = PathFormatter> {
    algorithm: A,
    formatter: F,
    skip_query: bool,
    default_ttl: Duration,
}

impl<A: SignatureAlgorithm> UrlSigner<A, PathFormatter> {
    #[must_use]
    pub fn from_settings(algorithm: A, settings: &Settings) -> Self {
        let formatter = PathFormatter::from_settings(&settings.formatter);
        Self::new(algorithm, formatter, settings.formatter.skip_query)
            .with_default_ttl(settings.signing.default_ttl())
    }
}

impl<A: SignatureAlgorithm, F: Formatter> UrlSigner<A, F> {
    pub fn new(algorithm: A, formatter: F, skip_query: bool) -> Self {
        Self {
            algorithm,
            formatter,
            skip_query,
            default_ttl: SigningSettings::default().default_ttl(),
        }
    }

    #[must_use]
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// The representation handed to the signature algorithm.
    fn canonical(&self, url: &UrlParts) -> String {
        if self.skip_query && url.query.is_some() {
            let mut stripped = url.clone();
            stripped.clear_query();
            stripped.to_string()
        } else {
            url.to_string()
        }
    }

    /// Signs `url` so that it is valid until `expiry`.
    pub fn sign(&self, url: UrlParts, expiry: DateTime<Utc>) -> UrlParts {
        let payload = self.formatter.add_expiry(url, expiry);
        let signature = self.algorithm.sign(self.canonical(&payload).as_bytes());
        self.formatter.add_signature(payload, &signature)
    }

    /// Signs `url` so that it is valid for `ttl` from now.
    ///
    /// # Errors
    ///
    /// Returns [`SignedUrlError::InvalidExpiry`] if the expiry overflows.
    pub fn sign_with_ttl(
        &self,
        url: UrlParts,
        ttl: Duration,
    ) -> Result<UrlParts, Report<SignedUrlError>> {
        let expiry = Utc::now().checked_add_signed(ttl).ok_or_else(|| {
            Report::new(SignedUrlError::InvalidExpiry {
                message: format!("now + {ttl} is out of range"),
            })
        })?;
        Ok(self.sign(url, expiry))
    }

    /// Signs `url` with the configured default TTL.
    ///
    /// # Errors
    ///
    /// Returns [`SignedUrlError::InvalidExpiry`] if the expiry overflows.
    pub fn sign_default(&self, url: UrlParts) -> Result<UrlParts, Report<SignedUrlError>> {
        self.sign_with_ttl(url, self.default_ttl)
    }

    /// Verifies a signed URL against the current time.
    ///
    /// # Errors
    ///
    /// Returns the formatter's decode errors for malformed URLs,
    /// [`SignedUrlError::SignatureMismatch`] for a bad signature and
    /// [`SignedUrlError::Expired`] once the expiry has passed.
    pub fn verify(&self, url: UrlParts) -> Result<VerifiedUrl, Report<SignedUrlError>> {
        self.verify_at(url, Utc::now())
    }

    /// Verifies a signed URL as of `now`.
    ///
    /// # Errors
    ///
    /// See [`UrlSigner::verify`].
    pub fn verify_at(
        &self,
        url: UrlParts,
        now: DateTime<Utc>,
    ) -> Result<VerifiedUrl, Report<SignedUrlError>> {
        let (payload, signature) = self.formatter.extract_signature(url)?;

        if !self
            .algorithm
            .verify(self.canonical(&payload).as_bytes(), &signature)
        {
            log::warn!("Signature mismatch for {payload}");
            return Err(Report::new(SignedUrlError::SignatureMismatch));
        }

        let (url, expires_at) = self.formatter.extract_expiry(payload)?;
        if expires_at < now {
            log::warn!("Signed URL {url} expired at {expires_at}");
            return Err(Report::new(SignedUrlError::Expired {
                expired_at: expires_at,
            }));
        }

        Ok(VerifiedUrl { url, expires_at })
    }
}
