//! Self-play training data
//!
//! Generates chess positions by letting two engines of randomly chosen,
//! usually unequal, skill play each other, labels them with an engine
//! evaluation in pawns and encodes them with [`feature_planes`]. Unequal
//! skills keep the labels away from a pile-up around 0.0.
//!
//! Engines sit behind [`EngineBackend`]/[`EngineLauncher`]: a UCI process
//! adapter for real engines and the in-process classical engine for tests
//! and for running without an engine binary. Every generation or evaluation
//! call launches its own engines and releases them before returning.

mod builtin;
mod config;
mod dataset;
mod engine;
mod error;
mod evaluator;
mod generator;
pub mod rules;
mod sample;
pub mod uci;

pub use builtin::{ClassicalBackend, ClassicalLauncher};
pub use config::{DatagenConfig, EngineConfig, MatePolicy};
pub use dataset::Datagen;
pub use engine::{EngineBackend, EngineLauncher, EvalLimits, RawScore};
pub use error::{ConfigError, DatagenError, Result};
pub use evaluator::{to_white_pawns, PositionEvaluator};
pub use generator::{GeneratedPosition, PositionGenerator};
pub use rules::{Game, Termination};
pub use sample::{DatagenStats, Sample};
pub use uci::{UciEngine, UciLauncher};
