//! Mutable URL value used while building and opening envelopes.
//!
//! [`url::Url`] normalises its path on every write (a special scheme always
//! gets a leading `/`), but the envelope passes through intermediate paths
//! like `390830893/foo/bar`. [`UrlParts`] keeps the path as a plain string
//! between formatter steps and only talks to `url` at the edges.

use std::fmt;

use error_stack::{Report, ResultExt};
use url::{Position, Url};

use crate::error::SignedUrlError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlParts {
    /// Scheme and authority, e.g. `https://cdn.example`. Empty for path-only values.
    base: String,
    pub path: String,
    pub query: Option<String>,
    fragment: Option<String>,
}

impl UrlParts {
    /// Creates a path-only value with no scheme, authority or query.
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Parses an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns [`SignedUrlError::InvalidUrl`] if `input` is not an absolute URL.
    pub fn parse(input: &str) -> Result<Self, Report<SignedUrlError>> {
        let url = Url::parse(input).change_context(SignedUrlError::InvalidUrl {
            message: format!("failed to parse {input}"),
        })?;
        Ok(Self::from(&url))
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn clear_query(&mut self) {
        self.query = None;
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Re-assembles the parts into a [`Url`].
    ///
    /// # Errors
    ///
    /// Returns [`SignedUrlError::InvalidUrl`] for path-only values or when the
    /// assembled string does not parse.
    pub fn to_url(&self) -> Result<Url, Report<SignedUrlError>> {
        if self.base.is_empty() {
            return Err(Report::new(SignedUrlError::InvalidUrl {
                message: format!("{} has no scheme or host", self.path),
            }));
        }
        let assembled = self.to_string();
        Url::parse(&assembled).change_context(SignedUrlError::InvalidUrl {
            message: format!("failed to parse {assembled}"),
        })
    }
}

impl From<&Url> for UrlParts {
    fn from(url: &Url) -> Self {
        Self {
            base: url[..Position::BeforePath].to_string(),
            path: url.path().to_string(),
            query: url.query().map(str::to_string),
            fragment: url.fragment().map(str::to_string),
        }
    }
}

/// Canonical form: `base + path [+ "?" query] [+ "#" fragment]`.
///
/// A relative path behind a host is rendered with a `/` in between.
impl fmt::Display for UrlParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        if self.base.contains("://") && !self.path.is_empty() && !self.path.starts_with('/') {
            f.write_str("/")?;
        }
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}
