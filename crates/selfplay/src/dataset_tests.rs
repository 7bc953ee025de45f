use std::time::Duration;

use cozy_chess::{Board, Move};
use feature_planes::FeatureEncoder;

use super::*;
use crate::engine::{EngineBackend, RawScore};
use crate::rules::is_terminal;

/// Plays the first legal move and reports a fixed score.
struct FirstMove(RawScore);

impl EngineBackend for FirstMove {
    fn best_move(&mut self, board: &Board, _skill: u8, _time: Duration) -> Result<Move> {
        let mut first = None;
        board.generate_moves(|moves| {
            first = moves.into_iter().next();
            first.is_some()
        });
        first.ok_or_else(|| DatagenError::InvalidPosition(board.to_string()))
    }

    fn evaluate(&mut self, _board: &Board) -> Result<RawScore> {
        Ok(self.0)
    }
}

#[derive(Clone, Copy)]
struct FirstMoveLauncher(RawScore);

impl EngineLauncher for FirstMoveLauncher {
    fn launch(&self) -> Result<Box<dyn EngineBackend>> {
        Ok(Box::new(FirstMove(self.0)))
    }
}

fn short_games() -> DatagenConfig {
    DatagenConfig {
        plies_range: 2..=6,
        ..DatagenConfig::default()
    }
}

#[test]
fn test_sample_carries_label_and_planes() {
    let launcher = FirstMoveLauncher(RawScore::Centipawns(-120));
    let mut datagen = Datagen::new(launcher, &short_games(), 1).unwrap();

    let sample = datagen.sample_with([4, 15], 2).unwrap().expect("not discarded");
    let board = feature_planes::parse_fen(&sample.fen).unwrap();

    assert_eq!(sample.skills, [4, 15]);
    assert_eq!(sample.plies, 2);
    // White to move after two plies, so the score is already white-relative
    assert_eq!(board.side_to_move(), cozy_chess::Color::White);
    assert_eq!(sample.evaluation, -1.2);
    assert_eq!(sample.tensor, FeatureEncoder::default().encode_board(&board));
    assert!(!is_terminal(&board, &[]));
    assert_eq!(datagen.stats().samples, 1);
}

#[test]
fn test_mate_scores_are_discarded_by_default() {
    let launcher = FirstMoveLauncher(RawScore::Mate(2));
    let mut datagen = Datagen::new(launcher, &short_games(), 1).unwrap();

    assert_eq!(datagen.sample_with([10, 10], 2).unwrap(), None);
    assert_eq!(datagen.stats().discarded, 1);
    assert_eq!(datagen.stats().samples, 0);
}

#[test]
fn test_mate_scores_clamp_when_configured() {
    let config = DatagenConfig {
        mate_policy: MatePolicy::Clamp(20.0),
        ..short_games()
    };
    // Side to move (white after two plies) is getting mated
    let launcher = FirstMoveLauncher(RawScore::Mate(-1));
    let mut datagen = Datagen::new(launcher, &config, 1).unwrap();

    let sample = datagen.sample_with([1, 1], 2).unwrap().expect("clamped, not discarded");
    assert_eq!(sample.evaluation, -20.0);
}

#[test]
fn test_finished_mate_clamps_against_the_mated_side() {
    let config = DatagenConfig {
        mate_policy: MatePolicy::Clamp(20.0),
        ..short_games()
    };
    // Black to move after three plies, and reported as already mated
    let launcher = FirstMoveLauncher(RawScore::Mate(0));
    let mut datagen = Datagen::new(launcher, &config, 1).unwrap();

    let sample = datagen.sample_with([1, 1], 3).unwrap().expect("clamped, not discarded");
    assert_eq!(sample.evaluation, 20.0);
}

#[test]
fn test_random_draws_stay_in_range_and_follow_seed() {
    let launcher = FirstMoveLauncher(RawScore::Centipawns(0));
    let config = DatagenConfig {
        skill_range: 3..=7,
        ..short_games()
    };

    let mut first = Datagen::new(launcher, &config, 99).unwrap();
    let mut second = Datagen::new(launcher, &config, 99).unwrap();
    for _ in 0..50 {
        let skills = first.draw_skills();
        assert!(skills.iter().all(|s| (3..=7).contains(s)), "{:?}", skills);
        assert_eq!(skills, second.draw_skills());

        let plies = first.draw_plies();
        assert!((2..=6).contains(&plies));
        assert_eq!(plies, second.draw_plies());
    }
}

#[test]
fn test_next_sample_uses_drawn_settings() {
    let launcher = FirstMoveLauncher(RawScore::Centipawns(30));
    let mut datagen = Datagen::new(launcher, &short_games(), 5).unwrap();

    let sample = datagen.next_sample().unwrap().expect("not discarded");
    assert!((2..=6).contains(&sample.plies));
    assert!(sample.skills.iter().all(|s| (1..=20).contains(s)));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = DatagenConfig {
        skill_range: 5..=1,
        ..DatagenConfig::default()
    };
    let result = Datagen::new(FirstMoveLauncher(RawScore::Centipawns(0)), &config, 0);
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}
