//! In-process backend on top of the classical alpha-beta engine.
//!
//! Needs no external binary, which makes it the default for tests and a
//! fallback for data generation. Skill maps onto search depth and a chance
//! of playing a random legal move.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use classical_engine::{mate_in, ClassicalEngine, SearchLimits};
use cozy_chess::{Board, Move};
use tracing::debug;

use crate::engine::{EngineBackend, EngineLauncher, EvalLimits, RawScore};
use crate::rules::has_legal_moves;
use crate::{DatagenError, Result};

pub struct ClassicalBackend {
    engine: ClassicalEngine,
    eval: EvalLimits,
}

impl ClassicalBackend {
    pub fn new(seed: u64, eval: EvalLimits) -> Self {
        Self {
            engine: ClassicalEngine::with_seed(seed),
            eval,
        }
    }
}

impl EngineBackend for ClassicalBackend {
    fn best_move(&mut self, board: &Board, skill: u8, time: Duration) -> Result<Move> {
        self.engine.play(board, skill, time).best_move.ok_or_else(|| {
            DatagenError::InvalidPosition(format!("no legal moves in {}", board))
        })
    }

    fn evaluate(&mut self, board: &Board) -> Result<RawScore> {
        if !has_legal_moves(board) {
            return Ok(if board.checkers().is_empty() {
                RawScore::Centipawns(0)
            } else {
                RawScore::Mate(0)
            });
        }

        let limits = SearchLimits::depth_and_time(self.eval.depth, self.eval.time);
        let result = self.engine.search(board, &limits);
        Ok(match mate_in(result.score) {
            Some(moves) => RawScore::Mate(moves),
            None => RawScore::Centipawns(result.score),
        })
    }
}

/// Hands out classical engines with consecutive seeds starting at `seed`.
#[derive(Debug)]
pub struct ClassicalLauncher {
    next_seed: AtomicU64,
    eval: EvalLimits,
}

impl ClassicalLauncher {
    pub fn new(seed: u64, eval: EvalLimits) -> Self {
        Self {
            next_seed: AtomicU64::new(seed),
            eval,
        }
    }
}

impl EngineLauncher for ClassicalLauncher {
    fn launch(&self) -> Result<Box<dyn EngineBackend>> {
        let seed = self.next_seed.fetch_add(1, Ordering::Relaxed);
        debug!(seed, "classical engine ready");
        Ok(Box::new(ClassicalBackend::new(seed, self.eval)))
    }
}

#[cfg(test)]
#[path = "builtin_tests.rs"]
mod builtin_tests;
