//! Core error type.
//!
//! Raised when parsing the core value types (transport modes, clock times)
//! from text.  Sub-crates define their own error enums.

use thiserror::Error;

/// The error type for `hg-core` parsing.
#[derive(Debug, Error)]
pub enum HgError {
    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `hg-core`.
pub type HgResult<T> = Result<T, HgError>;
