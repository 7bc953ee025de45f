//! Skill-randomized self-play position generation.
//!
//! Two engine handles, one per color, play from the starting position until
//! a target ply count is reached. A game that ends on the board first is
//! rolled back one ply, since finished positions have no continuous
//! evaluation.

use std::time::Duration;

use cozy_chess::{Board, Color};
use tracing::{debug, info};

use crate::engine::EngineLauncher;
use crate::rules::{Game, Termination};
use crate::Result;

/// A position produced by self-play.
#[derive(Debug, Clone)]
pub struct GeneratedPosition {
    pub board: Board,
    /// Plies played to reach `board`
    pub plies: u32,
    /// Set when the game ended one ply later and was rolled back
    pub termination: Option<Termination>,
}

impl GeneratedPosition {
    pub fn fen(&self) -> String {
        self.board.to_string()
    }

    pub fn backed_off(&self) -> bool {
        self.termination.is_some()
    }
}

enum GameState {
    Playing,
    Terminal(Termination),
    Backoff(Termination),
    Done(GeneratedPosition),
}

pub struct PositionGenerator<L> {
    launcher: L,
}

impl<L: EngineLauncher> PositionGenerator<L> {
    pub fn new(launcher: L) -> Self {
        Self { launcher }
    }

    /// Plays one self-play game and returns its final non-terminal position.
    ///
    /// Both engine handles are owned by this call and released on return,
    /// including when an engine error aborts the game.
    pub fn generate_position(
        &self,
        time_per_move: Duration,
        skill_white: u8,
        skill_black: u8,
        target_plies: u32,
    ) -> Result<GeneratedPosition> {
        let mut white = self.launcher.launch()?;
        let mut black = self.launcher.launch()?;

        let mut game = Game::default();
        let mut previous = game.board().clone();
        let mut state = GameState::Playing;

        loop {
            state = match state {
                GameState::Playing if game.plies() >= target_plies => {
                    GameState::Done(GeneratedPosition {
                        board: game.board().clone(),
                        plies: game.plies(),
                        termination: None,
                    })
                }
                GameState::Playing => {
                    let (engine, skill) = match game.board().side_to_move() {
                        Color::White => (&mut white, skill_white),
                        Color::Black => (&mut black, skill_black),
                    };
                    let mv = engine.best_move(game.board(), skill, time_per_move)?;

                    previous = game.board().clone();
                    game.play(mv)?;

                    match game.termination() {
                        Some(reason) => GameState::Terminal(reason),
                        None => GameState::Playing,
                    }
                }
                GameState::Terminal(reason) => {
                    debug!(ply = game.plies(), %reason, fen = %game.board(), "game over, backing off");
                    GameState::Backoff(reason)
                }
                GameState::Backoff(reason) => GameState::Done(GeneratedPosition {
                    board: previous.clone(),
                    plies: game.plies().saturating_sub(1),
                    termination: Some(reason),
                }),
                GameState::Done(position) => {
                    info!(
                        skill_white,
                        skill_black,
                        plies = position.plies,
                        backed_off = position.backed_off(),
                        "position generated"
                    );
                    return Ok(position);
                }
            };
        }
    }
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod generator_tests;
