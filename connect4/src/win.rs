//! Four-in-a-row detection and the terminal-state test.
use crate::board::{Board, Piece, WINDOWS};

/// True if `piece` owns all four cells of any window.
pub fn has_win(board: &Board, piece: Piece) -> bool {
    WINDOWS
        .iter()
        .any(|cells| board.window(cells).iter().all(|&c| c == Some(piece)))
}

/// A win for either side, or no playable column left.
pub fn is_terminal(board: &Board) -> bool {
    has_win(board, Piece::Player) || has_win(board, Piece::Ai) || board.is_full()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{HEIGHT, WIDTH};

    fn place(cells: &[(usize, usize)], piece: Piece) -> Board {
        let mut board = Board::new();
        for &(row, col) in cells {
            board.drop_piece(row, col, piece);
        }
        board
    }

    #[test]
    fn detects_horizontal() {
        let board = place(&[(2, 3), (2, 4), (2, 5), (2, 6)], Piece::Ai);
        assert!(has_win(&board, Piece::Ai));
        assert!(!has_win(&board, Piece::Player));
    }

    #[test]
    fn detects_vertical() {
        let board = place(&[(2, 0), (3, 0), (4, 0), (5, 0)], Piece::Player);
        assert!(has_win(&board, Piece::Player));
    }

    #[test]
    fn detects_ascending_diagonal() {
        let board = place(&[(0, 1), (1, 2), (2, 3), (3, 4)], Piece::Player);
        assert!(has_win(&board, Piece::Player));
    }

    #[test]
    fn detects_descending_diagonal() {
        let board = place(&[(5, 0), (4, 1), (3, 2), (2, 3)], Piece::Ai);
        assert!(has_win(&board, Piece::Ai));
    }

    #[test]
    fn three_in_a_row_is_not_a_win() {
        let lines: [&[(usize, usize)]; 4] = [
            &[(0, 0), (0, 1), (0, 2)],
            &[(0, 6), (1, 6), (2, 6)],
            &[(0, 0), (1, 1), (2, 2)],
            &[(3, 0), (2, 1), (1, 2)],
        ];
        for cells in lines {
            let board = place(cells, Piece::Player);
            assert!(!has_win(&board, Piece::Player), "false win on\n{board}");
        }
    }

    #[test]
    fn broken_line_is_not_a_win() {
        let mut board = place(&[(0, 0), (0, 1), (0, 3), (0, 4)], Piece::Ai);
        board.drop_piece(0, 2, Piece::Player);
        assert!(!has_win(&board, Piece::Ai));
        assert!(!has_win(&board, Piece::Player));
    }

    #[test]
    fn terminal_states() {
        assert!(!is_terminal(&Board::new()));
        assert!(is_terminal(&place(
            &[(0, 2), (1, 2), (2, 2), (3, 2)],
            Piece::Ai
        )));

        // Column pairs alternate owners on every row: no four anywhere.
        let mut full = Board::new();
        for col in 0..WIDTH {
            for row in 0..HEIGHT {
                let piece = if (row + col / 2) % 2 == 0 {
                    Piece::Player
                } else {
                    Piece::Ai
                };
                full.drop_piece(row, col, piece);
            }
        }
        assert!(!has_win(&full, Piece::Player), "{full}");
        assert!(!has_win(&full, Piece::Ai), "{full}");
        assert!(is_terminal(&full));
    }
}
