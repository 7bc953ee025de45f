//! Negamax search with alpha-beta pruning

use cozy_chess::{Board, Move};

use crate::eval::{evaluate, is_insufficient_material, piece_value};
use crate::TimeControl;

/// Score for delivering mate at the root. Mates further away score lower
/// by one point per ply.
pub const MATE_SCORE: i32 = 100_000;

/// Scores beyond this are mates rather than material.
const MATE_THRESHOLD: i32 = MATE_SCORE - 1_000;

/// Result from pick_best_move indicating whether search completed or was stopped.
pub struct SearchOutcome {
    /// Best move found (if any legal moves exist)
    pub best_move: Option<(Move, i32)>,
    /// True if search was stopped early due to time
    pub stopped: bool,
    /// Root moves searched to completion. The score means nothing when zero.
    pub scored: usize,
}

/// All legal moves, captures first with the most valuable victims leading.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    board.generate_moves(|list| {
        moves.extend(list);
        false
    });

    let enemy = !board.side_to_move();
    moves.sort_by_key(|mv| {
        let victim = match board.color_on(mv.to) {
            Some(color) if color == enemy => board.piece_on(mv.to).map_or(0, piece_value),
            _ => 0,
        };
        -victim
    });
    moves
}

/// Converts a mate score into moves until mate, negative when the side to
/// move is the one being mated.
pub fn mate_in(score: i32) -> Option<i32> {
    if score >= MATE_THRESHOLD {
        Some((MATE_SCORE - score + 1) / 2)
    } else if score <= -MATE_THRESHOLD {
        Some(-((MATE_SCORE + score) / 2))
    } else {
        None
    }
}

/// Searches the position to a fixed depth and returns the best move with its score.
///
/// `history` holds the hashes of positions reached before `board`, oldest
/// first, so repetitions across the game boundary are scored as draws.
pub fn pick_best_move(
    board: &Board,
    depth: u8,
    history: &[u64],
    nodes: &mut u64,
    tc: &TimeControl,
) -> SearchOutcome {
    let moves = legal_moves(board);

    let Some(&first) = moves.first() else {
        return SearchOutcome {
            best_move: None,
            stopped: false,
            scored: 0,
        };
    };

    let mut best = first;
    let mut best_score = -i32::MAX;
    let mut stopped = false;
    let mut scored = 0;

    let mut history = history.to_vec();
    history.push(board.hash());

    for mv in moves {
        if tc.should_check_time(*nodes) && tc.check_time() {
            stopped = true;
            break;
        }

        let mut child = board.clone();
        child.play_unchecked(mv);
        history.push(child.hash());
        *nodes += 1;

        let (score, was_stopped) = negamax(
            &child,
            depth.saturating_sub(1),
            1,
            -MATE_SCORE - 1,
            -best_score.max(-MATE_SCORE - 1),
            &mut history,
            nodes,
            tc,
        );
        let score = -score;

        history.pop();

        if was_stopped {
            stopped = true;
            break;
        }

        scored += 1;
        if score > best_score {
            best_score = score;
            best = mv;
        }
    }

    SearchOutcome {
        best_move: Some((best, best_score)),
        stopped,
        scored,
    }
}

/// Recursive negamax search with alpha-beta pruning.
///
/// Returns (score, stopped) where stopped indicates if search was aborted due to time.
#[allow(clippy::too_many_arguments)]
fn negamax(
    board: &Board,
    depth: u8,
    ply: u32,
    mut alpha: i32,
    beta: i32,
    history: &mut Vec<u64>,
    nodes: &mut u64,
    tc: &TimeControl,
) -> (i32, bool) {
    if tc.should_check_time(*nodes) && tc.check_time() {
        return (0, true);
    }

    // Immediate draw conditions
    if board.halfmove_clock() >= 100 {
        return (0, false);
    }

    let key = board.hash();
    let repeats = history.iter().filter(|&&k| k == key).count();
    if repeats >= 3 {
        return (0, false);
    }

    if is_insufficient_material(board) {
        return (0, false);
    }

    let moves = legal_moves(board);

    if moves.is_empty() {
        if !board.checkers().is_empty() {
            return (-(MATE_SCORE - ply as i32), false);
        }
        return (0, false); // Stalemate
    }

    if depth == 0 {
        return (evaluate(board), false);
    }

    let mut best = -i32::MAX;

    for mv in moves {
        let mut child = board.clone();
        child.play_unchecked(mv);
        history.push(child.hash());
        *nodes += 1;

        let (score, stopped) = negamax(&child, depth - 1, ply + 1, -beta, -alpha, history, nodes, tc);
        let score = -score;

        history.pop();

        if stopped {
            return (best, true);
        }

        if score > best {
            best = score;
        }
        if best > alpha {
            alpha = best;
        }
        if alpha >= beta {
            break; // Beta cutoff
        }
    }

    (best, false)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
