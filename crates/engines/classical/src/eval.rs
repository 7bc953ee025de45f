//! Material evaluation and dead-position detection.

use cozy_chess::{Board, Color, Piece, Square};

/// Material values in centipawns, indexed by `Piece as usize`.
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 0];

pub fn piece_value(piece: Piece) -> i32 {
    PIECE_VALUES[piece as usize]
}

/// Evaluates the position from the side-to-move's perspective, in centipawns.
pub fn evaluate(board: &Board) -> i32 {
    let mut score = 0i32;

    for piece in Piece::ALL {
        let white = board.colored_pieces(Color::White, piece).len() as i32;
        let black = board.colored_pieces(Color::Black, piece).len() as i32;
        score += piece_value(piece) * (white - black);
    }

    match board.side_to_move() {
        Color::White => score,
        Color::Black => -score,
    }
}

/// Neither side can ever deliver mate: bare kings, a single minor piece,
/// or only bishops that all stand on the same square color.
pub fn is_insufficient_material(board: &Board) -> bool {
    let heavy =
        board.pieces(Piece::Pawn) | board.pieces(Piece::Rook) | board.pieces(Piece::Queen);
    if !heavy.is_empty() {
        return false;
    }

    let knights = board.pieces(Piece::Knight);
    let bishops = board.pieces(Piece::Bishop);
    if knights.len() + bishops.len() <= 1 {
        return true;
    }
    if !knights.is_empty() {
        return false;
    }

    let dark = bishops.into_iter().filter(|&sq| is_dark(sq)).count();
    dark == 0 || dark == bishops.len() as usize
}

fn is_dark(square: Square) -> bool {
    (square.file() as usize + square.rank() as usize) % 2 == 0
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
