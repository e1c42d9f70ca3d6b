use crate::render::Marker;
use crate::types::ScorePair;

/// Output side of the page: one addressable grid, two score labels, one message region.
pub trait DisplaySurface {
    fn paint_cell(&self, row: usize, col: usize, marker: Marker);

    fn set_scores(&self, scores: ScorePair);

    fn show_message(&self, text: &str);

    fn hide_message(&self);
}
