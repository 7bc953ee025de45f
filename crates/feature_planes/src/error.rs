use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("invalid position '{fen}': {reason}")]
    InvalidPosition { fen: String, reason: String },
}
