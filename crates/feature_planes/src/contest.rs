//! Square contest plane.
//!
//! For every square, counts the white and black pieces that attack or
//! defend it and maps the net difference onto a byte around 127. Sliding
//! pieces only reach as far as the first occupied square on each line, so a
//! piece standing behind a blocker contributes nothing. Pawns, knights and
//! kings contribute to their fixed capture squares.
//!
//! Pins are handled in two tiers:
//! - A piece pinned to its own king only counts on the pin line (the squares
//!   between king and pinner, plus the pinner).
//! - A piece pinned to a more valuable non-king piece counts at
//!   `relative_pin_weight` off the pin line. With `absolute_pins` off, king
//!   pins are weighted the same way.

use cozy_chess::{
    get_between_rays, get_bishop_moves, get_bishop_rays, get_king_moves, get_knight_moves,
    get_pawn_attacks, get_rook_moves, get_rook_rays, BitBoard, Board, Color, Piece, Square,
};
use serde::{Deserialize, Serialize};

use crate::Plane;

const SQUARES: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContestConfig {
    /// Byte delta per net attacker. Seven net attackers saturate the plane.
    pub step: f32,
    /// Restrict pieces pinned to their king to the pin line. When off, they
    /// are weighted like relative pins.
    pub absolute_pins: bool,
    /// Weight, in `0.0..=1.0`, of a piece pinned to a more valuable piece
    /// on squares off the pin line. 1.0 disables relative pin handling.
    pub relative_pin_weight: f32,
}

impl Default for ContestConfig {
    fn default() -> Self {
        Self {
            step: 127.5 / 7.0,
            absolute_pins: true,
            relative_pin_weight: 0.5,
        }
    }
}

/// How a piece is tied down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pin {
    Free,
    /// Pinned to its own king. Carries the pin line.
    Absolute(BitBoard),
    /// Pinned to a more valuable piece. Carries the pin line.
    Relative(BitBoard),
}

/// Weighted attacker counts per square, before mapping to bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct ContestMap {
    white: [f32; SQUARES],
    black: [f32; SQUARES],
}

impl ContestMap {
    /// Accumulates every piece's weighted attacks.
    pub fn compute(board: &Board, config: &ContestConfig) -> Self {
        let pins = find_pins(board);
        let occupied = board.occupied();
        let relative_weight = config.relative_pin_weight.clamp(0.0, 1.0);

        let mut map = Self {
            white: [0.0; SQUARES],
            black: [0.0; SQUARES],
        };

        for color in Color::ALL {
            for piece in Piece::ALL {
                for from in board.colored_pieces(color, piece) {
                    let pin = pins[from as usize];
                    for target in attacks(piece, color, from, occupied) {
                        let weight = match pin {
                            Pin::Free => 1.0,
                            Pin::Absolute(line) if config.absolute_pins => {
                                if line.has(target) {
                                    1.0
                                } else {
                                    0.0
                                }
                            }
                            Pin::Absolute(line) | Pin::Relative(line) => {
                                if line.has(target) {
                                    1.0
                                } else {
                                    relative_weight
                                }
                            }
                        };
                        map.add(color, target, weight);
                    }
                }
            }
        }

        map
    }

    fn add(&mut self, color: Color, square: Square, weight: f32) {
        match color {
            Color::White => self.white[square as usize] += weight,
            Color::Black => self.black[square as usize] += weight,
        }
    }

    /// Weighted number of `color` pieces covering `square`.
    pub fn count(&self, color: Color, square: Square) -> f32 {
        match color {
            Color::White => self.white[square as usize],
            Color::Black => self.black[square as usize],
        }
    }

    /// Pieces of the color not occupying `square`. Empty squares count both sides.
    pub fn attackers(&self, board: &Board, square: Square) -> f32 {
        match board.color_on(square) {
            Some(owner) => self.count(!owner, square),
            None => self.count(Color::White, square) + self.count(Color::Black, square),
        }
    }

    /// Pieces of the occupying color covering `square`. Zero when empty.
    pub fn defenders(&self, board: &Board, square: Square) -> f32 {
        board
            .color_on(square)
            .map_or(0.0, |owner| self.count(owner, square))
    }

    /// White minus black, the value the plane encodes.
    pub fn net(&self, square: Square) -> f32 {
        self.white[square as usize] - self.black[square as usize]
    }

    /// Maps net pressure onto bytes around the background, clipped to 0..=255.
    pub fn to_plane(&self, config: &ContestConfig) -> Plane {
        let mut plane = Plane::background();
        for square in Square::ALL {
            let shifted = Plane::BACKGROUND as f32 + (self.net(square) * config.step).round();
            plane.set(square, shifted.clamp(0.0, 255.0) as u8);
        }
        plane
    }
}

/// Builds the contest plane for `board`.
pub fn encode_contest(board: &Board, config: &ContestConfig) -> Plane {
    ContestMap::compute(board, config).to_plane(config)
}

/// Squares a piece attacks, with sliders stopping at the first blocker.
pub fn attacks(piece: Piece, color: Color, from: Square, occupied: BitBoard) -> BitBoard {
    match piece {
        Piece::Pawn => get_pawn_attacks(from, color),
        Piece::Knight => get_knight_moves(from),
        Piece::Bishop => get_bishop_moves(from, occupied),
        Piece::Rook => get_rook_moves(from, occupied),
        Piece::Queen => get_bishop_moves(from, occupied) | get_rook_moves(from, occupied),
        Piece::King => get_king_moves(from),
    }
}

/// Material ranking used to decide whether a pin is worth honouring.
fn pin_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 100,
        Piece::Knight => 320,
        Piece::Bishop => 330,
        Piece::Rook => 500,
        Piece::Queen => 900,
        Piece::King => i32::MAX,
    }
}

/// Finds every pinned piece of both colors, indexed by square.
///
/// A piece is pinned when it is the only piece between an enemy slider and
/// a more valuable piece of its own color on that slider's line. King pins
/// take precedence over relative pins.
pub fn find_pins(board: &Board) -> [Pin; SQUARES] {
    let mut pins = [Pin::Free; SQUARES];
    let occupied = board.occupied();

    for color in Color::ALL {
        let enemy = !color;
        let diagonal = board.colored_pieces(enemy, Piece::Bishop)
            | board.colored_pieces(enemy, Piece::Queen);
        let orthogonal = board.colored_pieces(enemy, Piece::Rook)
            | board.colored_pieces(enemy, Piece::Queen);

        for target in board.colors(color) {
            let Some(target_piece) = board.piece_on(target) else {
                continue;
            };
            let target_value = pin_value(target_piece);
            let pinners = (get_bishop_rays(target) & diagonal) | (get_rook_rays(target) & orthogonal);

            for pinner in pinners {
                let between = get_between_rays(pinner, target);
                let blockers = between & occupied;
                if blockers.len() != 1 {
                    continue;
                }
                let Some(pinned) = blockers.into_iter().next() else {
                    continue;
                };
                if board.color_on(pinned) != Some(color) {
                    continue;
                }
                let Some(pinned_piece) = board.piece_on(pinned) else {
                    continue;
                };
                if pinned_piece == Piece::King || pin_value(pinned_piece) >= target_value {
                    continue;
                }

                let line = between | pinner.bitboard();
                let slot = &mut pins[pinned as usize];
                *slot = match (*slot, target_piece) {
                    (_, Piece::King) => Pin::Absolute(line),
                    (Pin::Absolute(existing), _) => Pin::Absolute(existing),
                    (Pin::Relative(existing), _) => Pin::Relative(existing | line),
                    (Pin::Free, _) => Pin::Relative(line),
                };
            }
        }
    }

    pins
}

#[cfg(test)]
#[path = "contest_tests.rs"]
mod contest_tests;
