//! Classical Chess Engine
//!
//! Alpha-beta search with material-based evaluation, plus a skill knob that
//! weakens play for self-play data generation. Skill runs from 0 (shallow
//! search, frequent random moves) to [`MAX_SKILL`] (deepest search, never
//! random).

mod eval;
mod search;
mod time_control;

use std::time::Duration;

use cozy_chess::{Board, Move};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub use eval::{evaluate, is_insufficient_material, piece_value};
pub use search::{legal_moves, mate_in, pick_best_move, SearchOutcome, MATE_SCORE};
pub use time_control::{SearchLimits, TimeControl};

/// Strongest skill level.
pub const MAX_SKILL: u8 = 20;

/// Search depth used at a given skill level.
pub fn skill_depth(skill: u8) -> u8 {
    1 + skill.min(MAX_SKILL) / 5
}

/// Probability of replacing the searched move with a random legal one.
pub fn blunder_chance(skill: u8) -> f64 {
    f64::from(MAX_SKILL - skill.min(MAX_SKILL)) / 50.0
}

/// Result of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// Centipawns from the side to move's perspective, or a mate score
    pub score: i32,
    /// Deepest fully completed iteration
    pub depth: u8,
    pub nodes: u64,
    /// True if the clock cut the search short
    pub stopped: bool,
}

/// Classical chess engine using negamax with alpha-beta pruning.
///
/// This engine uses:
/// - Iterative deepening negamax with alpha-beta pruning
/// - Simple material evaluation
/// - 50-move rule, threefold repetition and dead-position detection
/// - Time control support for move time limits
#[derive(Debug, Clone)]
pub struct ClassicalEngine {
    /// Node counter for statistics
    nodes: u64,
    /// Hashes of positions played before the one being searched
    history: Vec<u64>,
    rng: SmallRng,
}

impl ClassicalEngine {
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_entropy())
    }

    /// Deterministic engine; the seed only affects skill-limited play.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            nodes: 0,
            history: Vec::new(),
            rng,
        }
    }

    /// Sets the game history, oldest position first, for repetition detection.
    pub fn set_history(&mut self, history: Vec<u64>) {
        self.history = history;
    }

    pub fn new_game(&mut self) {
        self.nodes = 0;
        self.history.clear();
    }

    /// Deepens one ply at a time until `limits` run out, keeping the last
    /// fully searched iteration.
    pub fn search(&mut self, board: &Board, limits: &SearchLimits) -> SearchResult {
        self.nodes = 0;
        let tc = TimeControl::start(limits.move_time);

        let mut result = SearchResult {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            stopped: false,
        };

        for depth in 1..=limits.depth.max(1) {
            let outcome = pick_best_move(board, depth, &self.history, &mut self.nodes, &tc);

            match outcome.best_move {
                None => break,
                // A cut-short first iteration is still better than no move
                Some((mv, score)) if !outcome.stopped || result.best_move.is_none() => {
                    result.best_move = Some(mv);
                    // With no root move scored, fall back to the static evaluation
                    result.score = if outcome.scored > 0 { score } else { evaluate(board) };
                    if !outcome.stopped {
                        result.depth = depth;
                    }
                }
                Some(_) => {}
            }

            if outcome.stopped {
                result.stopped = true;
                break;
            }
            if mate_in(result.score).is_some() {
                break;
            }
        }

        result.nodes = self.nodes;
        result
    }

    /// Plays a move at the given skill level within `move_time`.
    pub fn play(&mut self, board: &Board, skill: u8, move_time: Duration) -> SearchResult {
        if self.rng.gen_bool(blunder_chance(skill)) {
            let moves = legal_moves(board);
            if let Some(&mv) = moves.choose(&mut self.rng) {
                return SearchResult {
                    best_move: Some(mv),
                    score: 0,
                    depth: 0,
                    nodes: 1,
                    stopped: false,
                };
            }
        }

        let limits = SearchLimits::depth_and_time(skill_depth(skill), move_time);
        self.search(board, &limits)
    }
}

impl Default for ClassicalEngine {
    fn default() -> Self {
        Self::new()
    }
}
