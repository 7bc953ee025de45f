use super::*;

fn board(fen: &str) -> Board {
    Board::from_fen(fen, false).expect("test FEN should parse")
}

#[test]
fn test_strength_bytes_per_piece() {
    let ramp = PawnRamp::default();
    let byte = |piece, color, square| PieceStrength::of(piece, color, square, &ramp).to_byte();

    assert_eq!(byte(Piece::Queen, Color::White, Square::D1), 255);
    assert_eq!(byte(Piece::Queen, Color::Black, Square::D8), 0);
    assert_eq!(byte(Piece::Rook, Color::White, Square::A1), 192);
    assert_eq!(byte(Piece::Knight, Color::White, Square::B1), 166);
    assert_eq!(byte(Piece::Bishop, Color::White, Square::C1), 169);
    assert_eq!(byte(Piece::King, Color::White, Square::E1), 153);
    assert_eq!(byte(Piece::Pawn, Color::White, Square::E2), 141);
    assert_eq!(byte(Piece::Pawn, Color::Black, Square::E7), 114);
}

#[test]
fn test_strength_ordering() {
    // pawn < king < knight < bishop < rook < queen
    let order = [
        Piece::Pawn,
        Piece::King,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
    ];
    let ramp = PawnRamp::default();
    let strengths: Vec<f32> = order
        .iter()
        .map(|&p| PieceStrength::of(p, Color::White, Square::E2, &ramp).magnitude())
        .collect();
    for pair in strengths.windows(2) {
        assert!(pair[0] < pair[1], "unexpected ordering: {:?}", strengths);
    }
}

#[test]
fn test_white_and_black_bytes_mirror() {
    let ramp = PawnRamp::default();
    for piece in Piece::ALL {
        let white = PieceStrength::of(piece, Color::White, Square::D4, &ramp).to_byte();
        let black = PieceStrength::of(piece, Color::Black, Square::D5, &ramp).to_byte();
        assert!(white >= 128, "{:?} white byte {}", piece, white);
        assert!(black <= 127, "{:?} black byte {}", piece, black);
        assert_eq!(white as u16 + black as u16, 255, "{:?}", piece);
    }
}

#[test]
fn test_startpos_strength_plane_is_mirrored() {
    let (strength, _) = encode_pieces(&Board::default(), &PawnRamp::default());

    assert_eq!(strength.rows()[0], [63, 89, 86, 0, 102, 86, 89, 63]);
    assert_eq!(strength.rows()[7], [192, 166, 169, 255, 153, 169, 166, 192]);
    assert_eq!(strength.rows()[1], [114; 8]);
    assert_eq!(strength.rows()[6], [141; 8]);

    for row in 2..6 {
        assert_eq!(strength.rows()[row], [Plane::BACKGROUND; 8]);
    }
    for row in 0..2 {
        for col in 0..8 {
            let sum = strength.get(row, col) as u16 + strength.get(7 - row, col) as u16;
            assert_eq!(sum, 255, "row {} col {}", row, col);
        }
    }
}

#[test]
fn test_advanced_pawns_are_brighter() {
    let pos = board("k7/4P3/8/3P4/8/8/2P5/4K3 w - - 0 1");
    let (strength, _) = encode_pieces(&pos, &PawnRamp::default());

    let c2 = strength.at(Square::C2);
    let d5 = strength.at(Square::D5);
    let e7 = strength.at(Square::E7);
    assert!(c2 <= d5 && d5 < e7, "c2 {} d5 {} e7 {}", c2, d5, e7);
    // Near promotion the pawn is worth about a knight
    assert_eq!(e7, 166);
}

#[test]
fn test_black_pawn_ramp_runs_downward() {
    let pos = board("4k3/8/8/8/8/8/4p3/K7 b - - 0 1");
    let (strength, _) = encode_pieces(&pos, &PawnRamp::default());
    assert_eq!(strength.at(Square::E2), 89);
}

#[test]
fn test_king_plane_marks_only_kings() {
    let (_, kings) = encode_pieces(&Board::default(), &PawnRamp::default());

    assert_eq!(kings.at(Square::E1), WHITE_KING);
    assert_eq!(kings.at(Square::E8), BLACK_KING);
    let marked = kings.cells().filter(|&v| v != Plane::BACKGROUND).count();
    assert_eq!(marked, 2);
}
