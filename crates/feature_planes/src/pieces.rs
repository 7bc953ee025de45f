//! Piece strength and king location planes.
//!
//! Each occupied square gets a signed strength: positive for white, negative
//! for black, magnitude on a 0..=255 scale. Bishops sit just above knights,
//! and the king just above a pawn since its real importance lives in the
//! king plane. Strengths are mapped linearly onto bytes, white into
//! `128..=255` and black into `0..=127`, so a white piece and its black
//! counterpart always sum to 255.

use cozy_chess::{Board, Color, Piece, Square};

use crate::{pawn_advance, PawnRamp, Plane};

/// Largest strength magnitude (a queen).
pub const MAX_STRENGTH: f32 = 255.0;

/// Strength of one ramp unit. A pawn on its starting rank is roughly 26.
pub const PAWN_UNIT: f32 = MAX_STRENGTH / 10.0;

/// King plane value for the white king.
pub const WHITE_KING: u8 = 255;
/// King plane value for the black king.
pub const BLACK_KING: u8 = 0;

/// Signed piece strength: positive is white, negative is black.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct PieceStrength(pub f32);

impl PieceStrength {
    /// Strength of `piece` standing on `square`. Pawns go through `ramp`.
    pub fn of(piece: Piece, color: Color, square: Square, ramp: &PawnRamp) -> Self {
        let magnitude = match piece {
            Piece::Pawn => ramp.apply(pawn_advance(color, square) as f32) * PAWN_UNIT,
            other => base_strength(other),
        };
        match color {
            Color::White => Self(magnitude),
            Color::Black => Self(-magnitude),
        }
    }

    pub fn magnitude(self) -> f32 {
        self.0.abs()
    }

    pub fn color(self) -> Color {
        if self.0 >= 0.0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Scales onto a byte. Magnitudes past [`MAX_STRENGTH`] are clipped.
    pub fn to_byte(self) -> u8 {
        let offset = (self.magnitude().clamp(0.0, MAX_STRENGTH) * 127.0 / MAX_STRENGTH).round() as u8;
        match self.color() {
            Color::White => 128 + offset,
            Color::Black => 127 - offset,
        }
    }
}

/// Unramped strength magnitude per piece type.
pub fn base_strength(piece: Piece) -> f32 {
    match piece {
        Piece::Pawn => 26.0,
        Piece::Knight => 77.0,
        Piece::Bishop => 83.0,
        Piece::Rook => 128.0,
        Piece::Queen => MAX_STRENGTH,
        Piece::King => 50.0,
    }
}

/// Builds the strength plane and the king plane.
pub fn encode_pieces(board: &Board, ramp: &PawnRamp) -> (Plane, Plane) {
    let mut strength = Plane::background();
    let mut kings = Plane::background();

    for color in Color::ALL {
        for piece in Piece::ALL {
            for square in board.colored_pieces(color, piece) {
                let value = PieceStrength::of(piece, color, square, ramp);
                strength.set(square, value.to_byte());

                if piece == Piece::King {
                    let marker = match color {
                        Color::White => WHITE_KING,
                        Color::Black => BLACK_KING,
                    };
                    kings.set(square, marker);
                }
            }
        }
    }

    (strength, kings)
}

#[cfg(test)]
#[path = "pieces_tests.rs"]
mod pieces_tests;
