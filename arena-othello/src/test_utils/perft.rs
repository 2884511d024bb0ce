//! Leaf counts of the move tree below the opening, checked against the
//! published reversi perft table at http://www.aartbik.com/MISC/reversi.html.

use crate::{Board, Color};

/// Number of positions exactly `depth` plies after the opening, black to move first.
pub fn run_perft(depth: u64) -> u64 {
    leaves_below(Board::new(), Color::Black, depth, false)
}

/// Tree size under `board` with `to_move` on turn. A forced pass uses up a ply,
/// and a finished game is one leaf however much depth remains.
fn leaves_below(board: Board, to_move: Color, depth: u64, passed: bool) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.legal_moves(to_move);
    match (moves.is_empty(), passed) {
        (true, true) => 1,
        (true, false) => leaves_below(board, !to_move, depth - 1, true),
        (false, _) => moves
            .map(|mv| board.apply_move(mv, to_move))
            .map(|child| leaves_below(child, !to_move, depth - 1, false))
            .sum(),
    }
}

#[test]
fn perft_01() {
    assert_eq!(run_perft(1), 4);
}

#[test]
fn perft_02() {
    assert_eq!(run_perft(2), 12);
}

#[test]
fn perft_03() {
    assert_eq!(run_perft(3), 56);
}

#[test]
fn perft_04() {
    assert_eq!(run_perft(4), 244);
}

#[test]
fn perft_05() {
    assert_eq!(run_perft(5), 1396);
}

#[test]
fn perft_06() {
    assert_eq!(run_perft(6), 8200);
}

#[test]
fn perft_07() {
    assert_eq!(run_perft(7), 55092);
}

#[test]
fn perft_08() {
    assert_eq!(run_perft(8), 390216);
}

// First depth where a pass occurs.
#[test]
#[ignore]
fn perft_09() {
    assert_eq!(run_perft(9), 3005288);
}

#[test]
#[ignore]
fn perft_10() {
    assert_eq!(run_perft(10), 24571284);
}
