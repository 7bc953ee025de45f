//! The engine collaborator seen by generation and evaluation.

use std::time::Duration;

use cozy_chess::{Board, Move};

use crate::Result;

/// Engine score relative to the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawScore {
    Centipawns(i32),
    /// Moves until mate. Negative when the side to move is getting mated.
    Mate(i32),
}

/// Depth and time budget for a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalLimits {
    pub depth: u8,
    pub time: Duration,
}

impl Default for EvalLimits {
    fn default() -> Self {
        Self {
            depth: 20,
            time: Duration::from_millis(100),
        }
    }
}

/// One live engine handle. Dropping it releases the engine.
pub trait EngineBackend {
    /// Picks a move for the side to move at the given skill level.
    fn best_move(&mut self, board: &Board, skill: u8, time: Duration) -> Result<Move>;

    /// Scores the position with the backend's evaluation limits.
    fn evaluate(&mut self, board: &Board) -> Result<RawScore>;
}

/// Hands out a fresh, exclusively owned engine per call.
pub trait EngineLauncher {
    fn launch(&self) -> Result<Box<dyn EngineBackend>>;
}

impl<L: EngineLauncher + ?Sized> EngineLauncher for &L {
    fn launch(&self) -> Result<Box<dyn EngineBackend>> {
        (**self).launch()
    }
}

impl<L: EngineLauncher + ?Sized> EngineLauncher for Box<L> {
    fn launch(&self) -> Result<Box<dyn EngineBackend>> {
        (**self).launch()
    }
}
