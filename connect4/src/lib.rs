//! Connect 4 engine for a human-versus-computer game.
//! Boards are plain 6x7 grids (row 0 at the bottom). The computer's move comes
//! from a depth-limited minimax with alpha-beta pruning over a window-based
//! heuristic. Positions can also be fed as a move history string (e.g.
//! `P3A3P2`), where `P` is the human player and `A` the computer.
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod board;
pub mod eval;
pub mod game;
pub mod search;
pub mod win;

pub use board::{Board, Piece, HEIGHT, WIDTH};
pub use eval::score;
pub use game::{AiMove, Game, MoveOutcome, Outcome};
pub use search::{
    choose_move, choose_move_with, ChosenMove, SearchResult, SearchStats, Searcher,
    DEFAULT_DEPTH, MAX_DEPTH, WIN_SCORE,
};
pub use win::{has_win, is_terminal};

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid move string at position {position}: {reason}")]
    ParseMove { position: usize, reason: String },
    #[error("column {column} is full")]
    ColumnFull { column: usize },
    #[error("column {column} is out of bounds")]
    ColumnOutOfBounds { column: usize },
    #[error("no legal moves remain")]
    NoMoves,
    #[error("depth {0} is out of range (1-{})", MAX_DEPTH)]
    DepthOutOfRange(usize),
    #[error("the game is already over")]
    GameOver,
    #[error("it is not the computer's turn")]
    NotAiTurn,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedMove {
    pub piece: Piece,
    pub column: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub position: String,
    pub level: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub column: usize,
    pub row: usize,
    pub score: i64,
    pub outcome: Option<Outcome>,
}

pub fn parse_history(history: &str) -> Result<Vec<TypedMove>, GameError> {
    let chars: Vec<char> = history.trim().chars().collect();
    let mut moves = Vec::with_capacity(chars.len() / 2);
    let mut idx = 0;
    while idx < chars.len() {
        let side = chars[idx];
        let piece = match side {
            'P' | 'p' => Piece::Player,
            'A' | 'a' => Piece::Ai,
            _ => {
                return Err(GameError::ParseMove {
                    position: idx,
                    reason: format!("expected P or A, found {side}"),
                })
            }
        };
        idx += 1;
        let Some(&column_char) = chars.get(idx) else {
            return Err(GameError::ParseMove {
                position: idx,
                reason: "missing column number".to_string(),
            });
        };
        let Some(column) = column_char.to_digit(10).map(|d| d as usize) else {
            return Err(GameError::ParseMove {
                position: idx,
                reason: format!("expected column digit, found {column_char}"),
            });
        };
        if column >= WIDTH {
            return Err(GameError::ParseMove {
                position: idx,
                reason: format!("column must be 0-{}", WIDTH - 1),
            });
        }
        moves.push(TypedMove { piece, column });
        idx += 1;
    }
    Ok(moves)
}

/// Replays `request.position` and answers with the computer's move.
/// An empty history means the computer opens.
pub fn best_move(request: MoveRequest) -> Result<MoveResponse, GameError> {
    best_move_with(request, &mut rand::thread_rng())
}

pub fn best_move_with<R: Rng + ?Sized>(
    request: MoveRequest,
    rng: &mut R,
) -> Result<MoveResponse, GameError> {
    if !(1..=MAX_DEPTH).contains(&request.level) {
        return Err(GameError::DepthOutOfRange(request.level));
    }
    let moves = parse_history(&request.position)?;
    let mut game = Game::from_history(&moves, Piece::Ai)?;
    let reply = game.play_ai(request.level, rng)?;
    Ok(MoveResponse {
        column: reply.column,
        row: reply.row,
        score: reply.score,
        outcome: reply.outcome,
    })
}
