//! The generate, evaluate, encode loop behind `datagen generate`.

use std::ops::RangeInclusive;
use std::time::Duration;

use feature_planes::FeatureEncoder;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::engine::EngineLauncher;
use crate::{
    ConfigError, DatagenConfig, DatagenError, DatagenStats, MatePolicy, PositionEvaluator,
    PositionGenerator, Result, Sample,
};

pub struct Datagen<L> {
    generator: PositionGenerator<L>,
    evaluator: PositionEvaluator<L>,
    encoder: FeatureEncoder,
    time_per_move: Duration,
    skill_range: RangeInclusive<u8>,
    plies_range: RangeInclusive<u32>,
    mate_policy: MatePolicy,
    rng: SmallRng,
    stats: DatagenStats,
}

impl<L: EngineLauncher + Clone> Datagen<L> {
    /// `seed` drives the skill and game-length draws.
    pub fn new(launcher: L, config: &DatagenConfig, seed: u64) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            generator: PositionGenerator::new(launcher.clone()),
            evaluator: PositionEvaluator::new(launcher),
            encoder: FeatureEncoder::new(config.encoder.clone()),
            time_per_move: config.time_per_move(),
            skill_range: config.skill_range.clone(),
            plies_range: config.plies_range.clone(),
            mate_policy: config.mate_policy,
            rng: SmallRng::seed_from_u64(seed),
            stats: DatagenStats::default(),
        })
    }

    pub fn stats(&self) -> DatagenStats {
        self.stats
    }

    /// Draws independent skills for white and black.
    pub fn draw_skills(&mut self) -> [u8; 2] {
        [
            self.rng.gen_range(self.skill_range.clone()),
            self.rng.gen_range(self.skill_range.clone()),
        ]
    }

    pub fn draw_plies(&mut self) -> u32 {
        self.rng.gen_range(self.plies_range.clone())
    }

    /// Plays one game with random skills and length. `Ok(None)` means the
    /// position was discarded under the mate policy.
    pub fn next_sample(&mut self) -> Result<Option<Sample>> {
        let skills = self.draw_skills();
        let plies = self.draw_plies();
        self.sample_with(skills, plies)
    }

    pub fn sample_with(&mut self, skills: [u8; 2], target_plies: u32) -> Result<Option<Sample>> {
        let position = self.generator.generate_position(
            self.time_per_move,
            skills[0],
            skills[1],
            target_plies,
        )?;
        if position.backed_off() {
            self.stats.backed_off += 1;
        }

        let evaluation = match self.evaluator.evaluate(&position.board) {
            Ok(pawns) => pawns,
            Err(DatagenError::EvaluationUnavailable { mate_in, winner }) => {
                match self.mate_policy.resolve(winner) {
                    Some(pawns) => pawns,
                    None => {
                        warn!(fen = %position.fen(), mate_in, "discarding position with mate score");
                        self.stats.discarded += 1;
                        return Ok(None);
                    }
                }
            }
            Err(err) => return Err(err),
        };

        let sample = Sample {
            fen: position.fen(),
            evaluation,
            skills,
            plies: position.plies,
            tensor: self.encoder.encode_board(&position.board),
        };
        self.stats.samples += 1;
        info!(fen = %sample.fen, evaluation, "sample ready");
        Ok(Some(sample))
    }
}

#[cfg(test)]
#[path = "dataset_tests.rs"]
mod dataset_tests;
