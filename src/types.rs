use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{BOARD_WIDTH, Board};
use crate::error::ClientError;

/// A board coordinate. Doubles as the body of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

/// A human move, only ever built from a click on a rendered hint cell.
pub type MoveIntent = Position;

impl Position {
    pub fn new(row: usize, col: usize) -> Result<Self, ClientError> {
        if row >= BOARD_WIDTH || col >= BOARD_WIDTH {
            return Err(ClientError::OffBoard { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }
}

/// One square as tagged by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Square {
    #[default]
    Empty,
    Black,
    White,
    /// Legal move for the active player. Whether it is drawn is decided at render time.
    #[serde(rename = "VALID")]
    Hint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayerColor {
    Black,
    White,
}

/// Who controls the active color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayerType {
    Human,
    Agent,
}

impl PlayerType {
    /// The engine reports `"user"` for a human seat. Everything else, including
    /// the `null` it sends once the game is over, is treated as autonomous.
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some("user") => Self::Human,
            _ => Self::Agent,
        }
    }
}

/// Disc counts as shown in the score labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePair {
    pub black: u8,
    pub white: u8,
}

impl ScorePair {
    pub fn new(black: u8, white: u8) -> Self {
        Self { black, white }
    }

    pub fn black_label(&self) -> String {
        format!("Black: {}", self.black)
    }

    pub fn white_label(&self) -> String {
        format!("White: {}", self.white)
    }
}

impl Default for ScorePair {
    fn default() -> Self {
        Self::new(2, 2)
    }
}

/// One immutable read of the authoritative game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Board,
    pub scores: ScorePair,
    pub active_player_type: PlayerType,
    /// `None` once the engine stops reporting an active side.
    pub active_player_color: Option<PlayerColor>,
    pub is_finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    Black,
    White,
    Draw,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::Black => f.write_str("Black Wins"),
            Winner::White => f.write_str("White Wins"),
            Winner::Draw => f.write_str("Draw"),
        }
    }
}

/// Final result after game over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    pub final_scores: Option<ScorePair>,
}

impl Outcome {
    pub fn winner(&self) -> Option<Winner> {
        let scores = self.final_scores?;
        Some(if scores.black > scores.white {
            Winner::Black
        } else if scores.white > scores.black {
            Winner::White
        } else {
            Winner::Draw
        })
    }
}
