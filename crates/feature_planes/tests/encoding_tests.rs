//! End-to-end encoding tests: FEN in, (8, 8, 3) tensor out.

use feature_planes::{
    encode_contest, encode_pieces, parse_fen, ContestConfig, EncodeError, EncoderConfig,
    FeatureEncoder, FeatureTensor, PawnRamp, Plane, CONTEST_PLANE, KING_PLANE, NUM_FEATURES,
    STRENGTH_PLANE,
};

const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

// =============================================================================
// Whole-tensor properties
// =============================================================================

#[test]
fn test_encode_startpos_matches_individual_encoders() {
    let encoder = FeatureEncoder::default();
    let tensor = encoder.encode_fen(STARTPOS).expect("startpos encodes");

    let board = parse_fen(STARTPOS).unwrap();
    let (strength, king) = encode_pieces(&board, &PawnRamp::default());
    let contest = encode_contest(&board, &ContestConfig::default());

    assert_eq!(tensor.channel(STRENGTH_PLANE), strength);
    assert_eq!(tensor.channel(KING_PLANE), king);
    assert_eq!(tensor.channel(CONTEST_PLANE), contest);
    assert_eq!(tensor, FeatureTensor::assemble(&strength, &king, &contest));
    assert_eq!(tensor.to_bytes().len(), NUM_FEATURES);
}

#[test]
fn test_empty_uncontested_squares_stay_background() {
    let fens = [
        STARTPOS,
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
        "8/5k2/8/3Pp3/8/8/6K1/8 w - e6 0 40",
    ];
    let encoder = FeatureEncoder::default();

    for fen in fens {
        let board = parse_fen(fen).unwrap();
        let tensor = encoder.encode_fen(fen).unwrap();
        let [strength, king, contest] = tensor.split();

        for square in cozy_chess::Square::ALL {
            if board.piece_on(square).is_none() {
                assert_eq!(strength.at(square), Plane::BACKGROUND, "{} {:?}", fen, square);
                assert_eq!(king.at(square), Plane::BACKGROUND, "{} {:?}", fen, square);
            }
        }

        let map = feature_planes::ContestMap::compute(&board, &ContestConfig::default());
        for square in cozy_chess::Square::ALL {
            if map.net(square) == 0.0 {
                assert_eq!(contest.at(square), Plane::BACKGROUND, "{} {:?}", fen, square);
            }
        }
    }
}

#[test]
fn test_each_call_produces_a_fresh_equal_tensor() {
    let encoder = FeatureEncoder::default();
    let first = encoder.encode_fen(STARTPOS).unwrap();
    let second = encoder.encode_fen(STARTPOS).unwrap();
    assert_eq!(first, second);
}

// =============================================================================
// Invalid input
// =============================================================================

#[test]
fn test_invalid_fen_is_rejected() {
    let encoder = FeatureEncoder::default();

    for fen in [
        "",
        "not a fen",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
        // No white king
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQ1BNR w kq - 0 1",
    ] {
        match encoder.encode_fen(fen) {
            Err(EncodeError::InvalidPosition { fen: reported, .. }) => assert_eq!(reported, fen),
            Ok(_) => panic!("expected {:?} to be rejected", fen),
        }
    }
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_from_partial_toml() {
    let config: EncoderConfig = toml::from_str(
        r#"
        [contest]
        relative_pin_weight = 0.25
        "#,
    )
    .expect("partial config parses");

    assert_eq!(config.contest.relative_pin_weight, 0.25);
    assert!(config.contest.absolute_pins);
    assert_eq!(config.pawn_ramp, PawnRamp::default());
}

#[test]
fn test_config_changes_flow_into_tensor() {
    // Doubling the step doubles the startpos c3 offset (3 net attackers)
    let config = EncoderConfig {
        contest: ContestConfig {
            step: 2.0 * 127.5 / 7.0,
            ..ContestConfig::default()
        },
        ..EncoderConfig::default()
    };
    let tensor = FeatureEncoder::new(config).encode_fen(STARTPOS).unwrap();
    assert_eq!(tensor.channel(CONTEST_PLANE).at(cozy_chess::Square::C3), 127 + 109);
}
