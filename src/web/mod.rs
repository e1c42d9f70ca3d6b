//! Browser bindings: DOM surface, `fetch` service, timers and the JS entry point.

pub mod console;
mod dom;
mod http;
mod timer;

use std::rc::Rc;

use gloo::events::EventListener;
use tracing::{debug, info};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event};

use crate::config::ClientConfig;
use crate::controller::TurnController;
use crate::protocol::{PlayerKind, PlayerSetup};
use crate::telemetry;

pub use dom::DomSurface;
pub use http::HttpGameService;
pub use timer::BrowserTimer;

type BrowserController = TurnController<HttpGameService, DomSurface, BrowserTimer>;

const BOARD_SELECTOR: &str = ".game-board";
const RESET_BUTTON_ID: &str = "reset-game-button";

/// Handle returned to the page. Dropping it detaches the board listeners.
#[wasm_bindgen]
pub struct ReversiClient {
    controller: Rc<BrowserController>,
    _listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl ReversiClient {
    /// Resets the game on the server and reloads the client.
    pub fn reset(&self) {
        let controller = Rc::clone(&self.controller);
        spawn_local(async move { controller.reset().await });
    }

    /// Starts a new game, e.g. `newGame("USER", "MINIMAX_3")`.
    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&self, black: &str, white: &str) -> Result<(), JsValue> {
        let setup = PlayerSetup {
            black: black.parse::<PlayerKind>().map_err(to_js)?,
            white: white.parse::<PlayerKind>().map_err(to_js)?,
        };
        let controller = Rc::clone(&self.controller);
        spawn_local(async move { controller.new_game(setup).await });
        Ok(())
    }
}

/// Entry point called by the page once the module is loaded.
///
/// `config` is an optional plain object matching `ClientConfig` (camelCase).
#[wasm_bindgen]
pub fn boot(config: JsValue) -> Result<ReversiClient, JsValue> {
    let mut config: ClientConfig = if config.is_undefined() || config.is_null() {
        ClientConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document available"))?;
    if !config.game_started {
        config.game_started = dom::page_reports_game_started(&document);
    }
    let config = config.validate().map_err(to_js)?;

    telemetry::init_tracing(&config.log_filter);
    info!(game_started = config.game_started, "booting reversi client");

    let controller = Rc::new(TurnController::new(
        HttpGameService::new(&config),
        DomSurface::new(document.clone()),
        BrowserTimer,
        config,
    ));

    let mut listeners = Vec::new();
    if let Some(board) = document.query_selector(BOARD_SELECTOR)? {
        listeners.push(board_listener(&board, Rc::clone(&controller)));
    }
    if let Some(button) = document.get_element_by_id(RESET_BUTTON_ID) {
        let controller = Rc::clone(&controller);
        listeners.push(EventListener::new(&button, "click", move |_| {
            let controller = Rc::clone(&controller);
            spawn_local(async move { controller.reset().await });
        }));
    }

    let initial = Rc::clone(&controller);
    spawn_local(async move { initial.start().await });

    Ok(ReversiClient {
        controller,
        _listeners: listeners,
    })
}

fn board_listener(board: &Element, controller: Rc<BrowserController>) -> EventListener {
    EventListener::new(board, "click", move |event: &Event| {
        let Some((row, col)) = clicked_cell(event) else {
            debug!("click outside any board cell");
            return;
        };
        let controller = Rc::clone(&controller);
        spawn_local(async move { controller.on_click(row, col).await });
    })
}

fn clicked_cell(event: &Event) -> Option<(usize, usize)> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let cell = target.closest(".cell").ok()??;
    Some((
        dom::data_index(&cell, "data-row")?,
        dom::data_index(&cell, "data-col")?,
    ))
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
