//! Signed, time-bounded URLs.
//!
//! A signed URL carries its signature and expiry inside the path:
//!
//! ```text
//! /<base64url(sig)>.<decimal-expiry><original-path>
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error types and HTTP status mapping
//! - [`formatter`]: Envelope formatters, including the path formatter
//! - [`logging`]: Logger initialisation
//! - [`settings`]: Configuration loading with environment overrides
//! - [`signing`]: Signing and verification around a pluggable algorithm
//! - [`test_support`]: Testing utilities
//! - [`url_parts`]: The mutable URL value formatters operate on

pub mod error;
pub mod formatter;
pub mod logging;
pub mod settings;
pub mod signing;
pub mod url_parts;

pub use error::SignedUrlError;
pub use formatter::{Formatter, PathFormatter};
pub use settings::Settings;
pub use signing::{SignatureAlgorithm, UrlSigner, VerifiedUrl};
pub use url_parts::UrlParts;
