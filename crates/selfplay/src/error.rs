use std::io;

use cozy_chess::Color;
use feature_planes::EncodeError;
use thiserror::Error;

/// Failures of a single generation or evaluation call.
#[derive(Debug, Error)]
pub enum DatagenError {
    /// The engine failed to start, crashed, or missed a reply deadline.
    #[error("engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The engine reported a forced mate, which has no finite pawn value.
    /// Positive `mate_in` means white mates. A mate already on the board has
    /// `mate_in == 0`, so `winner` carries the side that delivers it.
    #[error("no finite evaluation: mate in {mate_in} for {winner:?}")]
    EvaluationUnavailable { mate_in: i32, winner: Color },

    #[error("invalid position: {0}")]
    InvalidPosition(String),
}

impl From<io::Error> for DatagenError {
    fn from(err: io::Error) -> Self {
        DatagenError::EngineUnavailable(err.to_string())
    }
}

impl From<EncodeError> for DatagenError {
    fn from(err: EncodeError) -> Self {
        DatagenError::InvalidPosition(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DatagenError>;

/// Problems loading a [`crate::DatagenConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
