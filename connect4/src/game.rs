//! Turn-by-turn game flow between a human player and the AI.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Piece};
use crate::search::choose_move_with;
use crate::win::has_win;
use crate::{GameError, TypedMove};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    PlayerWon,
    AiWon,
    Draw,
}

impl Outcome {
    fn won_by(piece: Piece) -> Self {
        match piece {
            Piece::Player => Outcome::PlayerWon,
            Piece::Ai => Outcome::AiWon,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub piece: Piece,
    pub column: usize,
    pub row: usize,
    pub outcome: Option<Outcome>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AiMove {
    pub column: usize,
    pub row: usize,
    pub score: i64,
    pub outcome: Option<Outcome>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    board: Board,
    to_move: Piece,
    outcome: Option<Outcome>,
}

impl Game {
    pub fn new(first: Piece) -> Self {
        Self {
            board: Board::new(),
            to_move: first,
            outcome: None,
        }
    }

    /// Fresh game where either side opens with equal probability.
    pub fn with_random_start<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let first = if rng.gen_bool(0.5) {
            Piece::Player
        } else {
            Piece::Ai
        };
        Self::new(first)
    }

    /// Replays `moves` in order. Turn order is taken from the history itself;
    /// `first` only decides who moves on an empty history.
    pub fn from_history(moves: &[TypedMove], first: Piece) -> Result<Self, GameError> {
        let mut game = Self::new(moves.first().map_or(first, |mv| mv.piece));
        for mv in moves {
            game.apply(mv.piece, mv.column)?;
        }
        Ok(game)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Piece {
        self.to_move
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Drops a piece for the side to move.
    pub fn play(&mut self, column: usize) -> Result<MoveOutcome, GameError> {
        self.apply(self.to_move, column)
    }

    pub fn play_ai<R: Rng + ?Sized>(
        &mut self,
        depth: usize,
        rng: &mut R,
    ) -> Result<AiMove, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if self.to_move != Piece::Ai {
            return Err(GameError::NotAiTurn);
        }
        let chosen = choose_move_with(&self.board, depth, rng)?;
        let played = self.apply(Piece::Ai, chosen.column)?;
        Ok(AiMove {
            column: played.column,
            row: played.row,
            score: chosen.score,
            outcome: played.outcome,
        })
    }

    fn apply(&mut self, piece: Piece, column: usize) -> Result<MoveOutcome, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let row = self.board.play(column, piece)?;
        self.outcome = if has_win(&self.board, piece) {
            Some(Outcome::won_by(piece))
        } else if self.board.is_full() {
            Some(Outcome::Draw)
        } else {
            None
        };
        self.to_move = piece.opponent();
        Ok(MoveOutcome {
            piece,
            column,
            row,
            outcome: self.outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{HEIGHT, WIDTH};
    use crate::parse_history;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn replay(history: &str, first: Piece) -> Result<Game, GameError> {
        Game::from_history(&parse_history(history).unwrap(), first)
    }

    /// Fills the board column by column with a pattern that never lines up four.
    fn drawn_history() -> String {
        let mut history = String::new();
        for col in 0..WIDTH {
            for row in 0..HEIGHT {
                let side = if (row + col / 2) % 2 == 0 { 'P' } else { 'A' };
                history.push(side);
                history.push_str(&col.to_string());
            }
        }
        history
    }

    #[test]
    fn turns_alternate() {
        let mut game = Game::new(Piece::Player);
        let first = game.play(3).unwrap();
        assert_eq!(first.piece, Piece::Player);
        assert_eq!(first.row, 0);
        assert_eq!(game.to_move(), Piece::Ai);

        let second = game.play(3).unwrap();
        assert_eq!(second.piece, Piece::Ai);
        assert_eq!(second.row, 1);
        assert_eq!(game.to_move(), Piece::Player);
        assert!(!game.is_over());
    }

    #[test]
    fn win_ends_the_game() {
        let mut game = replay("P0A6P1A6P2A5", Piece::Player).unwrap();
        let last = game.play(3).unwrap();
        assert_eq!(last.outcome, Some(Outcome::PlayerWon));
        assert_eq!(game.outcome(), Some(Outcome::PlayerWon));
        assert!(matches!(game.play(4), Err(GameError::GameOver)));
    }

    #[test]
    fn full_board_is_a_draw() {
        let game = replay(&drawn_history(), Piece::Player).unwrap();
        assert_eq!(game.outcome(), Some(Outcome::Draw));
        assert!(game.board().is_full());
    }

    #[test]
    fn bad_columns_leave_the_game_untouched() {
        let mut game = replay("P4A4P4A4P4A4", Piece::Player).unwrap();
        let before = game.clone();
        assert!(matches!(game.play(4), Err(GameError::ColumnFull { column: 4 })));
        assert!(matches!(
            game.play(7),
            Err(GameError::ColumnOutOfBounds { column: 7 })
        ));
        assert_eq!(game, before);
    }

    #[test]
    fn history_after_a_win_is_rejected() {
        assert!(matches!(
            replay("A0P1A0P1A0P1A0P2", Piece::Player),
            Err(GameError::GameOver)
        ));
    }

    #[test]
    fn empty_history_uses_given_opener() {
        assert_eq!(replay("", Piece::Ai).unwrap().to_move(), Piece::Ai);
        assert_eq!(replay("", Piece::Player).unwrap().to_move(), Piece::Player);
        assert_eq!(replay("P3", Piece::Ai).unwrap().to_move(), Piece::Ai);
    }

    #[test]
    fn ai_plays_only_on_its_turn() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut game = Game::new(Piece::Player);
        assert!(matches!(
            game.play_ai(4, &mut rng),
            Err(GameError::NotAiTurn)
        ));

        game.play(0).unwrap();
        let reply = game.play_ai(4, &mut rng).unwrap();
        assert!(reply.column < WIDTH);
        assert_eq!(game.to_move(), Piece::Player);
        assert_eq!(game.board().count(Piece::Ai), 1);
    }

    #[test]
    fn ai_finishes_a_won_position() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut game = replay("A3P0A3P0A3P1", Piece::Ai).unwrap();
        let reply = game.play_ai(4, &mut rng).unwrap();
        assert_eq!(reply.column, 3);
        assert_eq!(reply.row, 3);
        assert_eq!(reply.outcome, Some(Outcome::AiWon));
        assert!(matches!(game.play_ai(4, &mut rng), Err(GameError::GameOver)));
    }

    #[test]
    fn random_start_picks_both_sides() {
        let mut rng = StdRng::seed_from_u64(42);
        let openers: Vec<Piece> = (0..64)
            .map(|_| Game::with_random_start(&mut rng).to_move())
            .collect();
        assert!(openers.contains(&Piece::Player));
        assert!(openers.contains(&Piece::Ai));
    }
}
