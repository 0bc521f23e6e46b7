//! # Error Types
//!
//! Errors raised while turning wire values into shared types.

use thiserror::Error;

/// An identifier string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    /// The input was empty or whitespace.
    #[error("Identifier is empty")]
    Empty,

    /// The input is not a valid UUID.
    #[error("Malformed identifier: {input}")]
    Malformed { input: String },
}
