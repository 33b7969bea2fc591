//! Network-subsystem error type.

use thiserror::Error;

/// Errors produced by `hg-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// A link that passed the mode and length checks has no road-type
    /// attribute, so the exclusion rule cannot be evaluated.
    #[error("link {link:?} has no road type attribute")]
    MissingRoadType { link: String },

    #[error("link filter configuration error: {0}")]
    Config(String),

    #[error("link {link:?} references unknown node {node:?}")]
    UnknownNode { link: String, node: String },

    #[error("network parse error: {0}")]
    Parse(String),

    #[error("network XML error at byte {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
