//! Depth-limited minimax with alpha-beta pruning.
//!
//! The AI is always the maximizing side and leaves are scored from its point
//! of view. Every branch explores its own copy of the board.
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, Piece};
use crate::eval::score;
use crate::win::has_win;
use crate::GameError;

/// Magnitude reserved for decided games; dwarfs any heuristic score.
pub const WIN_SCORE: i64 = 1_000_000_000_000;
/// Reference difficulty in plies.
pub const DEFAULT_DEPTH: usize = 4;
pub const MAX_DEPTH: usize = 8;

/// Column picked by a search frame and its minimax value. Leaves carry no
/// column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub column: Option<usize>,
    pub score: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChosenMove {
    pub column: usize,
    pub score: i64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

pub struct Searcher<R: Rng> {
    rng: R,
    pruning: bool,
    stats: SearchStats,
}

impl<R: Rng> Searcher<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            pruning: true,
            stats: SearchStats::default(),
        }
    }

    /// Plain minimax, no cutoffs. Same results, more nodes.
    pub fn exhaustive(rng: R) -> Self {
        Self {
            pruning: false,
            ..Self::new(rng)
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn minimax(
        &mut self,
        board: &Board,
        depth: usize,
        mut alpha: i64,
        mut beta: i64,
        maximizing: bool,
    ) -> SearchResult {
        self.stats.nodes += 1;

        let ai_won = has_win(board, Piece::Ai);
        let player_won = has_win(board, Piece::Player);
        let valid = board.valid_columns();
        if ai_won || player_won || valid.is_empty() || depth == 0 {
            let value = if ai_won {
                WIN_SCORE
            } else if player_won {
                -WIN_SCORE
            } else if valid.is_empty() {
                0
            } else {
                score(board, Piece::Ai)
            };
            return SearchResult {
                column: None,
                score: value,
            };
        }

        let (piece, mut best) = if maximizing {
            (Piece::Ai, i64::MIN)
        } else {
            (Piece::Player, i64::MAX)
        };
        // Fallback when no branch improves on the initial bound.
        let mut column = valid.choose(&mut self.rng).copied();

        for &col in &valid {
            let mut child = *board;
            let Ok(row) = child.next_open_row(col) else {
                continue;
            };
            child.drop_piece(row, col, piece);
            let value = self
                .minimax(&child, depth - 1, alpha, beta, !maximizing)
                .score;

            if maximizing {
                if value > best {
                    best = value;
                    column = Some(col);
                }
                alpha = alpha.max(best);
            } else {
                if value < best {
                    best = value;
                    column = Some(col);
                }
                beta = beta.min(best);
            }

            if self.pruning && alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        SearchResult {
            column,
            score: best,
        }
    }
}

/// Picks the AI's move using the thread-local RNG for the fallback column.
pub fn choose_move(board: &Board, depth: usize) -> Result<ChosenMove, GameError> {
    choose_move_with(board, depth, &mut rand::thread_rng())
}

pub fn choose_move_with<R: Rng + ?Sized>(
    board: &Board,
    depth: usize,
    rng: &mut R,
) -> Result<ChosenMove, GameError> {
    if !(1..=MAX_DEPTH).contains(&depth) {
        return Err(GameError::DepthOutOfRange(depth));
    }
    if has_win(board, Piece::Ai) || has_win(board, Piece::Player) {
        return Err(GameError::GameOver);
    }

    let mut searcher = Searcher::new(rng);
    let result = searcher.minimax(board, depth, i64::MIN, i64::MAX, true);
    let column = result.column.ok_or(GameError::NoMoves)?;
    let stats = searcher.stats();
    debug!(
        column,
        score = result.score,
        nodes = stats.nodes,
        cutoffs = stats.cutoffs,
        depth,
        "search finished"
    );
    Ok(ChosenMove {
        column,
        score: result.score,
    })
}
