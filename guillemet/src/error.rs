//! Error types for template expansion and loading
//!
//! Parsing has no error type: malformed delimiters degrade to literal text.

use std::io;

use thiserror::Error;

use crate::loader::SourceKind;

/// Failure while expanding a template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    /// The resolver returned no value for a placeholder the template references
    #[error("no value for parameter `{name}` from resolver {resolver}")]
    MissingParameter { name: String, resolver: String },
}

impl ExpandError {
    /// Name of the parameter the resolver could not supply
    pub fn name(&self) -> &str {
        match self {
            ExpandError::MissingParameter { name, .. } => name,
        }
    }
}

/// A loader could not produce template text
#[derive(Error, Debug)]
#[error("{kind} source `{location}` is unavailable")]
pub struct SourceUnavailable {
    pub kind: SourceKind,
    pub location: String,
    #[source]
    pub cause: UnavailableCause,
}

impl SourceUnavailable {
    pub(crate) fn new(kind: SourceKind, location: impl Into<String>, cause: impl Into<UnavailableCause>) -> Self {
        Self {
            kind,
            location: location.into(),
            cause: cause.into(),
        }
    }
}

/// Why a source could not be loaded
#[derive(Error, Debug)]
pub enum UnavailableCause {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("no bundled resource with this name")]
    MissingResource,

    #[cfg(feature = "http")]
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("server answered with HTTP status {0}")]
    Status(u16),

    #[error("loading from URLs requires the `http` feature")]
    HttpDisabled,
}

pub type Result<T> = std::result::Result<T, ExpandError>;
