//! Nonlinear pawn danger curve.
//!
//! A pawn's strength grows with the number of ranks it has travelled:
//!
//! ```text
//! y(x) = 0.5 * e^((x - pivot) / scale) + 1
//! ```
//!
//! With the default pivot of 5 and scale of 0.725 the curve is almost flat
//! (y close to 1) until the fifth rank of travel, then climbs steeply to
//! about 8.9 on the seventh, close to a queen once rescaled.

use cozy_chess::{Color, Square};
use serde::{Deserialize, Serialize};

/// Largest advancement the curve is defined for (a pawn on its promotion rank).
pub const MAX_ADVANCE: f32 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PawnRamp {
    /// Advancement at which the curve reaches 1.5
    pub pivot: f32,
    /// Horizontal stretch of the exponential
    pub scale: f32,
}

impl Default for PawnRamp {
    fn default() -> Self {
        Self {
            pivot: 5.0,
            scale: 0.725,
        }
    }
}

impl PawnRamp {
    /// Evaluates the curve at `advance` ranks, clamped to `0..=7`.
    pub fn apply(&self, advance: f32) -> f32 {
        let x = advance.clamp(0.0, MAX_ADVANCE);
        0.5 * ((x - self.pivot) / self.scale).exp() + 1.0
    }
}

/// Ranks a pawn of `color` on `square` has travelled from its own back rank.
///
/// A white pawn on the second rank has advanced 1, on the seventh 6.
pub fn pawn_advance(color: Color, square: Square) -> u8 {
    let rank = square.rank() as u8;
    match color {
        Color::White => rank,
        Color::Black => 7 - rank,
    }
}

#[cfg(test)]
#[path = "pawn_ramp_tests.rs"]
mod pawn_ramp_tests;
