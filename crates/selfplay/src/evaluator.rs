//! Position evaluation labels in pawns, positive favoring white.

use cozy_chess::{Board, Color};
use tracing::debug;

use crate::engine::{EngineLauncher, RawScore};
use crate::{DatagenError, Result};

/// Converts a side-to-move relative engine score into white-relative pawns.
///
/// Mate scores have no finite value and come back as
/// [`DatagenError::EvaluationUnavailable`], with `mate_in` flipped to white's
/// point of view as well. `Mate(0)` means the side to move is already mated.
pub fn to_white_pawns(raw: RawScore, side_to_move: Color) -> Result<f32> {
    let sign = match side_to_move {
        Color::White => 1.0,
        Color::Black => -1.0,
    };
    match raw {
        RawScore::Centipawns(cp) => Ok(sign * cp as f32 / 100.0),
        RawScore::Mate(moves) => Err(DatagenError::EvaluationUnavailable {
            mate_in: if side_to_move == Color::White {
                moves
            } else {
                moves.saturating_neg()
            },
            winner: if moves > 0 { side_to_move } else { !side_to_move },
        }),
    }
}

pub struct PositionEvaluator<L> {
    launcher: L,
}

impl<L: EngineLauncher> PositionEvaluator<L> {
    pub fn new(launcher: L) -> Self {
        Self { launcher }
    }

    /// Evaluates `board` with a freshly launched engine.
    pub fn evaluate(&self, board: &Board) -> Result<f32> {
        let mut engine = self.launcher.launch()?;
        let raw = engine.evaluate(board)?;
        debug!(fen = %board, ?raw, "evaluated");
        to_white_pawns(raw, board.side_to_move())
    }

    pub fn evaluate_fen(&self, fen: &str) -> Result<f32> {
        let board = feature_planes::parse_fen(fen)?;
        self.evaluate(&board)
    }
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod evaluator_tests;
