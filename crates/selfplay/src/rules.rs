//! Board rules the generator needs beyond move choice.
//!
//! Terminal detection uses "game over" semantics: draws a player must claim
//! (fifty moves, threefold repetition) keep the game going, the automatic
//! ones (seventy-five moves, fivefold repetition) end it.
//!
//! Repetition history only spans the positions since the last capture or
//! pawn move, since no earlier position can recur. Its length doubles as the
//! quiet-move count for the seventy-five-move rule.

use std::fmt;

use classical_engine::is_insufficient_material;
use cozy_chess::{Board, Move};

use crate::{DatagenError, Result};

/// Halfmove clock value that ends the game automatically.
pub const SEVENTY_FIVE_MOVE_PLIES: usize = 150;

/// Occurrences of one position that end the game automatically.
pub const FIVEFOLD: usize = 5;

/// Why a game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Termination::Checkmate => "checkmate",
            Termination::Stalemate => "stalemate",
            Termination::InsufficientMaterial => "insufficient material",
            Termination::SeventyFiveMoves => "seventy-five-move rule",
            Termination::FivefoldRepetition => "fivefold repetition",
        };
        f.write_str(reason)
    }
}

/// Plays `mv` on a copy of `board`, rejecting illegal moves.
pub fn apply(board: &Board, mv: Move) -> Result<Board> {
    let mut next = board.clone();
    next.try_play(mv)
        .map_err(|_| DatagenError::InvalidPosition(format!("illegal move {} in {}", mv, board)))?;
    Ok(next)
}

pub fn has_legal_moves(board: &Board) -> bool {
    board.generate_moves(|_| true)
}

/// Reason the game is over at `board`, if it is.
///
/// `history` holds the hashes of the positions reached before `board` since
/// the last capture or pawn move.
pub fn termination(board: &Board, history: &[u64]) -> Option<Termination> {
    if !has_legal_moves(board) {
        return Some(if board.checkers().is_empty() {
            Termination::Stalemate
        } else {
            Termination::Checkmate
        });
    }
    if is_insufficient_material(board) {
        return Some(Termination::InsufficientMaterial);
    }
    let quiet_plies = history.len().max(board.halfmove_clock() as usize);
    if quiet_plies >= SEVENTY_FIVE_MOVE_PLIES {
        return Some(Termination::SeventyFiveMoves);
    }
    let key = board.hash();
    if history.iter().filter(|&&k| k == key).count() + 1 >= FIVEFOLD {
        return Some(Termination::FivefoldRepetition);
    }
    None
}

pub fn is_terminal(board: &Board, history: &[u64]) -> bool {
    termination(board, history).is_some()
}

/// A game in progress: the current board plus its repetition history.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    history: Vec<u64>,
    plies: u32,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            history: Vec::new(),
            plies: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Plies played since the game was created.
    pub fn plies(&self) -> u32 {
        self.plies
    }

    pub fn history(&self) -> &[u64] {
        &self.history
    }

    pub fn play(&mut self, mv: Move) -> Result<()> {
        let next = apply(&self.board, mv)?;
        if next.halfmove_clock() == 0 {
            self.history.clear();
        } else {
            self.history.push(self.board.hash());
        }
        self.board = next;
        self.plies += 1;
        Ok(())
    }

    pub fn termination(&self) -> Option<Termination> {
        termination(&self.board, &self.history)
    }

    pub fn is_terminal(&self) -> bool {
        self.termination().is_some()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Board::default())
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
