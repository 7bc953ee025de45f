//! Data generation settings, loadable from TOML.
//!
//! Every field has a default, so a config file only needs the fields it
//! changes:
//!
//! ```toml
//! time_per_move_ms = 10
//! skill_range = { start = 1, end = 20 }
//! mate_policy = { clamp = 15.0 }
//!
//! [engine]
//! kind = "uci"
//! path = "/usr/bin/stockfish"
//!
//! [encoder.contest]
//! relative_pin_weight = 0.25
//! ```

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use cozy_chess::Color;
use std::time::Duration;

use feature_planes::EncoderConfig;
use serde::{Deserialize, Serialize};

use crate::builtin::ClassicalLauncher;
use crate::engine::{EngineLauncher, EvalLimits};
use crate::uci::UciLauncher;
use crate::ConfigError;

/// Which engine plays and evaluates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EngineConfig {
    /// External UCI engine binary
    Uci {
        path: PathBuf,
        #[serde(default)]
        args: Vec<String>,
    },
    /// In-process classical engine
    #[default]
    Builtin,
}

/// What to do with positions whose evaluation is a forced mate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatePolicy {
    /// Drop the sample
    #[default]
    Discard,
    /// Label with this many pawns, signed toward the mating side
    Clamp(f32),
}

impl MatePolicy {
    /// White-relative label for a mate delivered by `winner`, or `None` to discard.
    pub fn resolve(&self, winner: Color) -> Option<f32> {
        match (*self, winner) {
            (MatePolicy::Discard, _) => None,
            (MatePolicy::Clamp(pawns), Color::White) => Some(pawns.abs()),
            (MatePolicy::Clamp(pawns), Color::Black) => Some(-pawns.abs()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatagenConfig {
    pub engine: EngineConfig,
    pub time_per_move_ms: u64,
    pub eval_time_ms: u64,
    pub eval_depth: u8,
    /// Skills are drawn independently per side from this range
    pub skill_range: RangeInclusive<u8>,
    /// Target game length in plies
    pub plies_range: RangeInclusive<u32>,
    /// Extra time allowed on every engine reply before it counts as hung
    pub response_grace_ms: u64,
    pub mate_policy: MatePolicy,
    pub encoder: EncoderConfig,
}

impl Default for DatagenConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            time_per_move_ms: 5,
            eval_time_ms: 100,
            eval_depth: 20,
            skill_range: 1..=20,
            plies_range: 40..=70,
            response_grace_ms: 2000,
            mate_policy: MatePolicy::default(),
            encoder: EncoderConfig::default(),
        }
    }
}

impl DatagenConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.skill_range.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "skill_range {:?} is empty",
                self.skill_range
            )));
        }
        if self.plies_range.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "plies_range {:?} is empty",
                self.plies_range
            )));
        }
        if self.time_per_move_ms == 0 {
            return Err(ConfigError::Invalid(
                "time_per_move_ms must be positive".to_string(),
            ));
        }
        if self.eval_time_ms == 0 {
            return Err(ConfigError::Invalid(
                "eval_time_ms must be positive".to_string(),
            ));
        }
        let ramp = &self.encoder.pawn_ramp;
        if !(ramp.scale.is_finite() && ramp.scale > 0.0) || !ramp.pivot.is_finite() {
            return Err(ConfigError::Invalid(
                "encoder.pawn_ramp needs a finite pivot and a positive finite scale".to_string(),
            ));
        }
        if !self.encoder.contest.step.is_finite() {
            return Err(ConfigError::Invalid(
                "encoder.contest.step must be finite".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.encoder.contest.relative_pin_weight) {
            return Err(ConfigError::Invalid(
                "encoder.contest.relative_pin_weight must lie in 0..=1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn time_per_move(&self) -> Duration {
        Duration::from_millis(self.time_per_move_ms)
    }

    pub fn eval_limits(&self) -> EvalLimits {
        EvalLimits {
            depth: self.eval_depth,
            time: Duration::from_millis(self.eval_time_ms),
        }
    }

    pub fn response_grace(&self) -> Duration {
        Duration::from_millis(self.response_grace_ms)
    }

    /// Builds the launcher for the configured engine. `seed` only matters
    /// for the built-in engine.
    pub fn launcher(&self, seed: u64) -> Box<dyn EngineLauncher> {
        match &self.engine {
            EngineConfig::Uci { path, args } => Box::new(UciLauncher {
                path: path.clone(),
                args: args.clone(),
                eval: self.eval_limits(),
                grace: self.response_grace(),
            }),
            EngineConfig::Builtin => Box::new(ClassicalLauncher::new(seed, self.eval_limits())),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
