//! Heuristic position scoring.
//!
//! The score is always taken from one side's point of view and is not
//! antisymmetric: `score(b, Player)` and `score(b, Ai)` need not cancel out.
use crate::board::{Board, Piece, CENTER_COLUMN, WINDOWS, WINDOW_LEN};

const CENTER_WEIGHT: i64 = 3;
const FOUR: i64 = 100;
const OPEN_THREE: i64 = 5;
const OPEN_TWO: i64 = 2;
const OPPONENT_OPEN_THREE: i64 = -4;

/// Center-column control plus the sum of every four-cell window's score.
pub fn score(board: &Board, piece: Piece) -> i64 {
    let center = board
        .column(CENTER_COLUMN)
        .iter()
        .filter(|&&cell| cell == Some(piece))
        .count() as i64;

    let windows: i64 = WINDOWS
        .iter()
        .map(|cells| score_window(&board.window(cells), piece))
        .sum();

    center * CENTER_WEIGHT + windows
}

fn score_window(window: &[Option<Piece>; WINDOW_LEN], piece: Piece) -> i64 {
    let mine = window.iter().filter(|&&c| c == Some(piece)).count();
    let theirs = window
        .iter()
        .filter(|&&c| c == Some(piece.opponent()))
        .count();
    let empty = WINDOW_LEN - mine - theirs;

    match (mine, theirs, empty) {
        (4, _, _) => FOUR,
        (3, _, 1) => OPEN_THREE,
        (2, _, 2) => OPEN_TWO,
        (_, 3, 1) => OPPONENT_OPEN_THREE,
        _ => 0,
    }
}
