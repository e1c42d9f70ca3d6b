use serde::Deserialize;

use crate::error::ClientError;
use crate::types::Square;

pub const BOARD_WIDTH: usize = 8;

/// Row-major 8x8 grid exactly as the engine tagged it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Vec<Square>>")]
pub struct Board {
    squares: [[Square; BOARD_WIDTH]; BOARD_WIDTH],
}

impl Board {
    /// Creates the opening position the engine serves for a fresh game:
    /// d4=white, e4=black, d5=black, e5=white, with black's four hints.
    pub fn new() -> Self {
        Self::empty()
            .with(3, 3, Square::White)
            .with(3, 4, Square::Black)
            .with(4, 3, Square::Black)
            .with(4, 4, Square::White)
            .with(2, 3, Square::Hint)
            .with(3, 2, Square::Hint)
            .with(4, 5, Square::Hint)
            .with(5, 4, Square::Hint)
    }

    pub fn empty() -> Self {
        Self {
            squares: [[Square::Empty; BOARD_WIDTH]; BOARD_WIDTH],
        }
    }

    pub fn from_rows(squares: [[Square; BOARD_WIDTH]; BOARD_WIDTH]) -> Self {
        Self { squares }
    }

    /// Returns a copy with one square replaced. Out-of-range coordinates are ignored.
    pub fn with(mut self, row: usize, col: usize, square: Square) -> Self {
        if let Some(slot) = self.squares.get_mut(row).and_then(|r| r.get_mut(col)) {
            *slot = square;
        }
        self
    }

    pub fn square(&self, row: usize, col: usize) -> Option<Square> {
        self.squares.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Iterates `(row, col, square)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Square)> + '_ {
        self.squares.iter().enumerate().flat_map(|(row, squares)| {
            squares
                .iter()
                .enumerate()
                .map(move |(col, &square)| (row, col, square))
        })
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        self.iter().fold((0, 0), |(black, white), (_, _, square)| match square {
            Square::Black => (black + 1, white),
            Square::White => (black, white + 1),
            _ => (black, white),
        })
    }

    /// Number of discs of either color.
    pub fn piece_count(&self) -> u8 {
        let (black, white) = self.count();
        black + white
    }

    /// Number of squares the engine tagged as legal moves.
    pub fn hint_count(&self) -> usize {
        self.iter()
            .filter(|&(_, _, square)| square == Square::Hint)
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<Vec<Square>>> for Board {
    type Error = ClientError;

    fn try_from(rows: Vec<Vec<Square>>) -> Result<Self, Self::Error> {
        if rows.len() != BOARD_WIDTH {
            return Err(ClientError::InvalidBoard(format!(
                "expected {BOARD_WIDTH} rows, got {}",
                rows.len()
            )));
        }

        let mut squares = [[Square::Empty; BOARD_WIDTH]; BOARD_WIDTH];
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != BOARD_WIDTH {
                return Err(ClientError::InvalidBoard(format!(
                    "row {row} has {} squares, expected {BOARD_WIDTH}",
                    cells.len()
                )));
            }
            squares[row].copy_from_slice(&cells);
        }

        Ok(Self { squares })
    }
}
