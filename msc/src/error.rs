//! Error type for MSC file access

use msc_core::{ErrorCategory, MscError};
use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A format, consistency or range violation.
    #[error("{0}")]
    Msc(#[from] MscError),

    /// An error originating from the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration document could not be parsed.
    #[cfg(feature = "serde")]
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Convert a stream failure at `offset`, turning a premature end of
    /// data into `TruncatedFile`.
    pub(crate) fn from_io_at(err: std::io::Error, offset: u64) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::Msc(MscError::TruncatedFile { offset })
        } else {
            Error::Io(err)
        }
    }

    /// Classify this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Msc(e) => e.category(),
            Error::Io(_) => ErrorCategory::Io,
            #[cfg(feature = "serde")]
            Error::Config(_) => ErrorCategory::CallerMisuse,
        }
    }

    /// The format-level error, if this is one
    pub fn as_msc(&self) -> Option<&MscError> {
        match self {
            Error::Msc(e) => Some(e),
            _ => None,
        }
    }
}

/// A convenience `Result` type alias using the crate's `Error` type.
pub type Result<T> = std::result::Result<T, Error>;
