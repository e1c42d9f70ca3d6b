//! Projection of a snapshot onto display cells.

use crate::board::BOARD_WIDTH;
use crate::display::DisplaySurface;
use crate::types::{GameSnapshot, PlayerType, ScorePair, Square};

/// What a single cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Marker {
    #[default]
    Nothing,
    BlackDisc,
    WhiteDisc,
    HintDisc,
}

/// Hint squares are drawn only while the controller shows hints, a human is
/// to move, and the game is still running. The engine keeps tagging hint
/// squares in other situations, so this is checked on every render.
pub fn hints_shown(hints_visible: bool, snapshot: &GameSnapshot) -> bool {
    hints_visible && snapshot.active_player_type == PlayerType::Human && !snapshot.is_finished
}

/// Everything one render writes to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    markers: [[Marker; BOARD_WIDTH]; BOARD_WIDTH],
    scores: ScorePair,
}

impl Projection {
    pub fn project(snapshot: &GameSnapshot, hints_visible: bool) -> Self {
        let show_hints = hints_shown(hints_visible, snapshot);
        let mut markers = [[Marker::Nothing; BOARD_WIDTH]; BOARD_WIDTH];

        for (row, col, square) in snapshot.board.iter() {
            markers[row][col] = match square {
                Square::Black => Marker::BlackDisc,
                Square::White => Marker::WhiteDisc,
                Square::Hint if show_hints => Marker::HintDisc,
                Square::Hint | Square::Empty => Marker::Nothing,
            };
        }

        Self {
            markers,
            scores: snapshot.scores,
        }
    }

    pub fn marker(&self, row: usize, col: usize) -> Option<Marker> {
        self.markers.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn hint_count(&self) -> usize {
        self.markers
            .iter()
            .flatten()
            .filter(|&&m| m == Marker::HintDisc)
            .count()
    }

    /// Writes every cell and both score labels.
    pub fn paint<D: DisplaySurface + ?Sized>(&self, display: &D) {
        for (row, markers) in self.markers.iter().enumerate() {
            for (col, &marker) in markers.iter().enumerate() {
                display.paint_cell(row, col, marker);
            }
        }
        display.set_scores(self.scores);
    }
}
