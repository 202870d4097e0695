//! Fixed 6x7 grid. Row 0 is the bottom row; pieces stack upward.
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::GameError;

pub const WIDTH: usize = 7;
pub const HEIGHT: usize = 6;
pub const WINDOW_LEN: usize = 4;
pub const CENTER_COLUMN: usize = WIDTH / 2;

/// A cell coordinate as `(row, column)`.
pub type Cell = (usize, usize);

/// Every run of four cells on the board, in all four directions.
pub static WINDOWS: Lazy<Vec<[Cell; WINDOW_LEN]>> = Lazy::new(generate_windows);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Piece {
    Player,
    Ai,
}

impl Piece {
    pub fn opponent(self) -> Piece {
        match self {
            Piece::Player => Piece::Ai,
            Piece::Ai => Piece::Player,
        }
    }

    fn symbol(self) -> char {
        match self {
            Piece::Player => 'P',
            Piece::Ai => 'A',
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Board {
    cells: [[Option<Piece>; WIDTH]; HEIGHT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Piece> {
        self.cells[row][col]
    }

    /// True iff `col` is on the board and its top cell is empty.
    pub fn is_valid_column(&self, col: usize) -> bool {
        col < WIDTH && self.cells[HEIGHT - 1][col].is_none()
    }

    /// Lowest empty row in `col`.
    pub fn next_open_row(&self, col: usize) -> Result<usize, GameError> {
        if col >= WIDTH {
            return Err(GameError::ColumnOutOfBounds { column: col });
        }
        (0..HEIGHT)
            .find(|&row| self.cells[row][col].is_none())
            .ok_or(GameError::ColumnFull { column: col })
    }

    /// Writes `piece` into the cell. Callers pick the row with
    /// [`Board::next_open_row`]; nothing is checked here.
    pub fn drop_piece(&mut self, row: usize, col: usize, piece: Piece) {
        self.cells[row][col] = Some(piece);
    }

    /// Checked drop: lands `piece` on top of `col` and returns its row.
    pub fn play(&mut self, col: usize, piece: Piece) -> Result<usize, GameError> {
        let row = self.next_open_row(col)?;
        self.drop_piece(row, col, piece);
        Ok(row)
    }

    /// Playable columns in ascending order.
    pub fn valid_columns(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&col| self.is_valid_column(col)).collect()
    }

    pub fn is_full(&self) -> bool {
        (0..WIDTH).all(|col| !self.is_valid_column(col))
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == Some(piece))
            .count()
    }

    pub fn column(&self, col: usize) -> [Option<Piece>; HEIGHT] {
        let mut out = [None; HEIGHT];
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = self.cells[row][col];
        }
        out
    }

    pub fn window(&self, cells: &[Cell; WINDOW_LEN]) -> [Option<Piece>; WINDOW_LEN] {
        std::array::from_fn(|i| {
            let (row, col) = cells[i];
            self.cells[row][col]
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..HEIGHT).rev() {
            for col in 0..WIDTH {
                let symbol = self.cells[row][col].map_or('.', Piece::symbol);
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn generate_windows() -> Vec<[Cell; WINDOW_LEN]> {
    let mut windows = Vec::new();
    // Horizontal
    for row in 0..HEIGHT {
        for col in 0..=WIDTH - WINDOW_LEN {
            windows.push(std::array::from_fn(|i| (row, col + i)));
        }
    }
    // Vertical
    for col in 0..WIDTH {
        for row in 0..=HEIGHT - WINDOW_LEN {
            windows.push(std::array::from_fn(|i| (row + i, col)));
        }
    }
    // Diagonal /
    for row in 0..=HEIGHT - WINDOW_LEN {
        for col in 0..=WIDTH - WINDOW_LEN {
            windows.push(std::array::from_fn(|i| (row + i, col + i)));
        }
    }
    // Diagonal \
    for row in WINDOW_LEN - 1..HEIGHT {
        for col in 0..=WIDTH - WINDOW_LEN {
            windows.push(std::array::from_fn(|i| (row - i, col + i)));
        }
    }
    windows
}
