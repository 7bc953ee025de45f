use super::*;

fn board(fen: &str) -> Board {
    Board::from_fen(fen, false).expect("test FEN should parse")
}

fn fast_limits() -> EvalLimits {
    EvalLimits {
        depth: 2,
        time: Duration::from_secs(5),
    }
}

#[test]
fn test_best_move_is_legal() {
    let mut backend = ClassicalBackend::new(3, fast_limits());
    let start = Board::default();
    let mv = backend
        .best_move(&start, 10, Duration::from_millis(50))
        .unwrap();
    let mut next = start.clone();
    assert!(next.try_play(mv).is_ok());
}

#[test]
fn test_no_move_in_finished_game() {
    let mut backend = ClassicalBackend::new(3, fast_limits());
    let stalemate = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    let result = backend.best_move(&stalemate, 20, Duration::from_millis(20));
    assert!(matches!(result, Err(DatagenError::InvalidPosition(_))));
}

#[test]
fn test_evaluate_reports_material_for_side_to_move() {
    let mut backend = ClassicalBackend::new(3, fast_limits());
    // Bare kings plus a white rook, quiet at depth 2
    let white = board("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
    let black = board("4k3/8/8/8/8/8/8/R3K3 b - - 0 1");

    assert_eq!(backend.evaluate(&white).unwrap(), RawScore::Centipawns(500));
    assert_eq!(backend.evaluate(&black).unwrap(), RawScore::Centipawns(-500));
}

#[test]
fn test_evaluate_reports_mates() {
    let mut backend = ClassicalBackend::new(3, fast_limits());
    let mate_in_one = board("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1");
    assert_eq!(backend.evaluate(&mate_in_one).unwrap(), RawScore::Mate(1));

    let mated = board("4Q1k1/5ppp/8/8/8/8/5PPP/6K1 b - - 1 1");
    assert_eq!(backend.evaluate(&mated).unwrap(), RawScore::Mate(0));
}

#[test]
fn test_evaluate_without_time_is_not_a_mate() {
    let limits = EvalLimits {
        depth: 20,
        time: Duration::ZERO,
    };
    let mut backend = ClassicalBackend::new(3, limits);
    assert_eq!(backend.evaluate(&Board::default()).unwrap(), RawScore::Centipawns(0));
}

#[test]
fn test_launcher_hands_out_fresh_engines() {
    let launcher = ClassicalLauncher::new(10, fast_limits());
    let mut first = launcher.launch().unwrap();
    let mut second = launcher.launch().unwrap();

    let start = Board::default();
    assert!(first.best_move(&start, 20, Duration::from_millis(50)).is_ok());
    assert!(second.best_move(&start, 20, Duration::from_millis(50)).is_ok());
    assert_eq!(launcher.next_seed.load(Ordering::Relaxed), 12);
}
