use super::*;

fn board(fen: &str) -> Board {
    Board::from_fen(fen, false).expect("test FEN should parse")
}

#[test]
fn test_startpos_is_balanced() {
    assert_eq!(evaluate(&Board::default()), 0);
}

#[test]
fn test_evaluation_is_relative_to_side_to_move() {
    // White is a queen up
    assert_eq!(evaluate(&board("4k3/8/8/8/8/8/8/3QK3 w - - 0 1")), 900);
    assert_eq!(evaluate(&board("4k3/8/8/8/8/8/8/3QK3 b - - 0 1")), -900);
}

#[test]
fn test_insufficient_material_king_vs_king() {
    assert!(is_insufficient_material(&board("8/8/8/4k3/8/4K3/8/8 w - - 0 1")));
}

#[test]
fn test_insufficient_material_single_minor() {
    assert!(is_insufficient_material(&board("8/8/8/4k3/8/4KB2/8/8 w - - 0 1")));
    assert!(is_insufficient_material(&board("8/8/8/4k3/8/4KN2/8/8 w - - 0 1")));
    assert!(is_insufficient_material(&board("8/8/4b3/4k3/8/4K3/8/8 w - - 0 1")));
}

#[test]
fn test_same_colored_bishops_are_dead() {
    // c1 and f8 are both dark squares
    assert!(is_insufficient_material(&board("5b2/8/8/4k3/8/4K3/8/2B5 w - - 0 1")));
    // c1 dark, c8 light
    assert!(!is_insufficient_material(&board("2b5/8/8/4k3/8/4K3/8/2B5 w - - 0 1")));
}

#[test]
fn test_mating_material_is_sufficient() {
    assert!(!is_insufficient_material(&Board::default()));
    assert!(!is_insufficient_material(&board("8/8/8/4k3/8/4K3/4P3/8 w - - 0 1")));
    assert!(!is_insufficient_material(&board("8/8/8/4k3/8/4K3/8/R7 w - - 0 1")));
    assert!(!is_insufficient_material(&board("8/8/8/4k3/8/3NKN2/8/8 w - - 0 1")));
}
