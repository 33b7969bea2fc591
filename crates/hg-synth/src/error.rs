use hg_network::NetworkError;
use hg_zones::ZoneError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynthError {
    #[error("synthesis configuration error: {0}")]
    Config(String),

    /// A drawn zone has no candidate home link.
    #[error("zone {zone:?} was drawn but has no suitable home links")]
    EmptyZone { zone: String },

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Zone(#[from] ZoneError),

    #[error("config file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SynthResult<T> = Result<T, SynthError>;
