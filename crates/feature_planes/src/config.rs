//! Encoder configuration.
//!
//! Loaded from the `[encoder]` table of the data generation config. Every
//! field has a default, so an empty table is valid.

use serde::{Deserialize, Serialize};

use crate::{ContestConfig, PawnRamp};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Curve applied to pawn strength by advancement
    pub pawn_ramp: PawnRamp,
    /// Contest plane scaling and pin handling
    pub contest: ContestConfig,
}
