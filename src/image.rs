//! Structured container image references.
//!
//! An [`ImageRef`] is the identity of a container image as the rest of the
//! controller understands it: optional registry domain, repository path, and
//! optional tag. Tag-less references stay tag-less here; resolving a default
//! tag is the registry's business, not ours.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseRefError {
    #[error("image reference is empty")]
    Empty,

    #[error("unparseable image reference {0:?}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Registry host, empty when the reference carries none.
    pub domain: String,
    /// Repository path, e.g. `bitnami/mariadb`.
    pub image: String,
    /// Tag, empty when the reference carries none.
    pub tag: String,
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.domain.is_empty() {
            write!(f, "{}/", self.domain)?;
        }
        write!(f, "{}", self.image)?;
        if !self.tag.is_empty() {
            write!(f, ":{}", self.tag)?;
        }
        Ok(())
    }
}

/// Parse a bare image string into its domain, repository and tag parts.
///
/// The leading path segment counts as a registry domain only when it looks
/// like a host: contains a `.` or a `:`, or is the literal `localhost`.
/// Anything else is part of the repository (`bitnami/mariadb` has no domain).
pub fn parse_ref(s: &str) -> Result<ImageRef, ParseRefError> {
    if s.is_empty() {
        return Err(ParseRefError::Empty);
    }
    if s.chars().any(char::is_whitespace) {
        return Err(ParseRefError::Invalid(s.to_string()));
    }

    let (domain, rest) = match s.split_once('/') {
        Some((first, rest))
            if first.contains('.') || first.contains(':') || first == "localhost" =>
        {
            (first.to_string(), rest)
        }
        _ => (String::new(), s),
    };

    let (image, tag) = match rest.rsplit_once(':') {
        Some((image, tag)) => {
            if tag.is_empty() {
                return Err(ParseRefError::Invalid(s.to_string()));
            }
            (image.to_string(), tag.to_string())
        }
        None => (rest.to_string(), String::new()),
    };

    if image.is_empty() || image.starts_with('/') || image.ends_with('/') {
        return Err(ParseRefError::Invalid(s.to_string()));
    }

    Ok(ImageRef { domain, image, tag })
}
