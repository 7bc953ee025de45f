//! Feature planes for position-evaluation models
//!
//! Converts a chess position into an (8, 8, 3) byte tensor suitable for a
//! convolutional network. Every plane uses 127 as its neutral background:
//!
//! - Plane 0 (strength): white pieces brighten, black pieces darken, scaled
//!   by material value. Pawns are ramped by how far they have advanced.
//! - Plane 1 (king): only the two king squares, white 255 and black 0.
//! - Plane 2 (contest): net white-minus-black pressure on every square,
//!   counting attackers along unblocked lines with pin awareness.
//!
//! Rows run from rank 8 (row 0) down to rank 1 (row 7), files left to
//! right, the same orientation as the board section of a FEN string.
//!
//! Side to move, castling rights and en passant are not encoded yet. They
//! belong in additional planes once the model needs them.

mod config;
mod contest;
mod error;
mod pawn_ramp;
mod pieces;
mod plane;

pub use config::*;
pub use contest::*;
pub use error::*;
pub use pawn_ramp::*;
pub use pieces::*;
pub use plane::*;

use cozy_chess::Board;

/// Parses a FEN string, rejecting anything that is not a legal board state.
pub fn parse_fen(fen: &str) -> Result<Board, EncodeError> {
    Board::from_fen(fen.trim(), false).map_err(|e| EncodeError::InvalidPosition {
        fen: fen.to_string(),
        reason: format!("{:?}", e),
    })
}

/// Encodes positions with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct FeatureEncoder {
    config: EncoderConfig,
}

impl FeatureEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Parses `fen` and encodes it. Fails only on an invalid position.
    pub fn encode_fen(&self, fen: &str) -> Result<FeatureTensor, EncodeError> {
        let board = parse_fen(fen)?;
        Ok(self.encode_board(&board))
    }

    /// Encodes an already validated board into a fresh tensor.
    pub fn encode_board(&self, board: &Board) -> FeatureTensor {
        let (strength, king) = encode_pieces(board, &self.config.pawn_ramp);
        let contest = encode_contest(board, &self.config.contest);
        FeatureTensor::assemble(&strength, &king, &contest)
    }
}
