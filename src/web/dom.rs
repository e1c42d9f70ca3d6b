use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::display::DisplaySurface;
use crate::render::Marker;
use crate::types::ScorePair;

const MESSAGE_BOX_ID: &str = "message-box";
const BLACK_SCORE_ID: &str = "black-score-display";
const WHITE_SCORE_ID: &str = "white-score-display";
const GAME_STARTED_ID: &str = "game-started";

/// The server-rendered board page.
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn cell(&self, row: usize, col: usize) -> Option<Element> {
        let selector = format!(".cell[data-row=\"{row}\"][data-col=\"{col}\"]");
        self.document.query_selector(&selector).ok().flatten()
    }

    fn message_box(&self) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(MESSAGE_BOX_ID)?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    fn set_visibility(&self, visibility: &str) {
        if let Some(el) = self.message_box() {
            let _ = el.style().set_property("visibility", visibility);
        }
    }
}

fn marker_html(marker: Marker) -> &'static str {
    match marker {
        Marker::Nothing => "",
        Marker::BlackDisc => r#"<div class="black-disc"></div>"#,
        Marker::WhiteDisc => r#"<div class="white-disc"></div>"#,
        Marker::HintDisc => r#"<div class="grey-disc"></div>"#,
    }
}

impl DisplaySurface for DomSurface {
    fn paint_cell(&self, row: usize, col: usize, marker: Marker) {
        if let Some(cell) = self.cell(row, col) {
            cell.set_inner_html(marker_html(marker));
        }
    }

    fn set_scores(&self, scores: ScorePair) {
        for (id, label) in [
            (BLACK_SCORE_ID, scores.black_label()),
            (WHITE_SCORE_ID, scores.white_label()),
        ] {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(&label));
            }
        }
    }

    fn show_message(&self, text: &str) {
        if let Some(el) = self.message_box() {
            el.set_text_content(Some(text));
        }
        self.set_visibility("visible");
    }

    fn hide_message(&self) {
        self.set_visibility("hidden");
    }
}

/// The page template marks a set-up game with `data-game-started="True"`.
pub fn page_reports_game_started(document: &Document) -> bool {
    document
        .get_element_by_id(GAME_STARTED_ID)
        .and_then(|el| el.get_attribute("data-game-started"))
        .is_some_and(|flag| flag == "True")
}

/// Reads a `data-row` / `data-col` style attribute as a board index.
pub fn data_index(el: &Element, attr: &str) -> Option<usize> {
    el.get_attribute(attr)?.parse().ok()
}
