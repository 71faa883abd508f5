//! Error types for archive operations.

use thiserror::Error;

/// Result type for archive operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for archive decoding.
///
/// Every primitive decode fails in one of exactly two ways: the source ran
/// out of bytes, or the bytes that were there violate a semantic constraint.
/// Encoding never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The byte source was exhausted before a read could complete.
    #[error("input exhausted before the read completed")]
    EmptyInput,

    /// Bytes were available but violate a semantic constraint.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}

impl Error {
    /// Returns true if the error was caused by an exhausted byte source.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput)
    }

    /// Returns true if the error was caused by semantically invalid bytes.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
