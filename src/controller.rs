use std::cell::{Cell, RefCell};

use tracing::{debug, error, info, warn};
use web_time::Instant;

use crate::config::ClientConfig;
use crate::display::DisplaySurface;
use crate::fetcher::fetch_snapshot;
use crate::message::MessageSlot;
use crate::protocol::MoveVerdict;
use crate::render::{Marker, Projection};
use crate::service::GameService;
use crate::timer::Timer;
use crate::types::{GameSnapshot, PlayerColor, PlayerType, Position};

/// Piece count at or below which an autonomous first player is started on load.
const OPENING_PIECE_COUNT: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    AwaitingHumanInput,
    SubmittingMove,
    AgentCycle,
    GameOver,
    ErrorRecovery,
}

/// Turn state machine. Every turn sequence takes a fresh generation and its
/// continuations stop once a newer one has started.
pub struct TurnController<S, D, T> {
    pub(crate) service: S,
    pub(crate) display: D,
    pub(crate) timer: T,
    pub(crate) config: ClientConfig,
    pub(crate) state: Cell<TurnState>,
    pub(crate) hints_visible: Cell<bool>,
    pub(crate) generation: Cell<u64>,
    pub(crate) game_started: Cell<bool>,
    pub(crate) message: MessageSlot,
    pub(crate) painted: RefCell<Option<Projection>>,
}

impl<S, D, T> TurnController<S, D, T>
where
    S: GameService,
    D: DisplaySurface,
    T: Timer,
{
    pub fn new(service: S, display: D, timer: T, config: ClientConfig) -> Self {
        let game_started = config.game_started;
        Self {
            service,
            display,
            timer,
            config,
            state: Cell::new(TurnState::AwaitingHumanInput),
            hints_visible: Cell::new(true),
            generation: Cell::new(0),
            game_started: Cell::new(game_started),
            message: MessageSlot::default(),
            painted: RefCell::new(None),
        }
    }

    pub fn state(&self) -> TurnState {
        self.state.get()
    }

    pub fn hints_visible(&self) -> bool {
        self.hints_visible.get()
    }

    pub fn message(&self) -> Option<String> {
        self.message.current()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Initial page load: render, then decide who moves first.
    pub async fn start(&self) {
        let generation = self.begin_sequence();

        if !self.game_started.get() {
            debug!("no game started yet, rendering only");
            self.render(generation).await;
            return;
        }

        let Some(snapshot) = self.render(generation).await else {
            return;
        };
        if !self.is_current(generation) {
            return;
        }

        if snapshot.is_finished {
            self.finish_game().await;
            return;
        }

        match snapshot.active_player_type {
            PlayerType::Agent if should_autostart_agent(&snapshot) => {
                info!("autonomous player to move on load, starting agent cycle");
                self.run_agent_cycle(generation).await;
            }
            PlayerType::Agent => {
                debug!(
                    pieces = snapshot.board.piece_count(),
                    "autonomous player mid-game on load, not restarting agent cycle"
                );
                self.hints_visible.set(false);
                self.render(generation).await;
            }
            PlayerType::Human => {
                self.hints_visible.set(true);
                self.state.set(TurnState::AwaitingHumanInput);
                self.render(generation).await;
            }
        }
    }

    /// A click on the board. Only a visible hint cell in `AwaitingHumanInput`
    /// starts a move; anything else is ignored.
    pub async fn on_click(&self, row: usize, col: usize) {
        if self.state.get() != TurnState::AwaitingHumanInput {
            debug!(row, col, state = ?self.state.get(), "click ignored outside human turn");
            return;
        }
        let Some(intent) = self.hint_at(row, col) else {
            debug!(row, col, "click ignored, not a hint cell");
            return;
        };

        let generation = self.begin_sequence();
        self.state.set(TurnState::SubmittingMove);
        self.message.hide(&self.display);
        self.hints_visible.set(false);

        let started = Instant::now();
        let verdict = self.service.submit_move(intent).await;
        if !self.is_current(generation) {
            return;
        }

        match verdict {
            Ok(MoveVerdict::Accepted {
                next_player_is_agent,
            }) => {
                info!(
                    row = intent.row,
                    col = intent.col,
                    next_player_is_agent,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "move accepted"
                );
                self.render(generation).await;
                if !self.is_current(generation) {
                    return;
                }
                if next_player_is_agent {
                    self.run_agent_cycle(generation).await;
                } else {
                    self.hints_visible.set(true);
                    self.state.set(TurnState::AwaitingHumanInput);
                    self.render(generation).await;
                }
            }
            Ok(MoveVerdict::Finished) => {
                info!(row = intent.row, col = intent.col, "move accepted, game finished");
                self.render(generation).await;
                if self.is_current(generation) {
                    self.finish_game().await;
                }
            }
            Ok(MoveVerdict::Rejected { message }) => {
                warn!(row = intent.row, col = intent.col, %message, "move rejected");
                self.message.show(&self.display, &message);
                self.recover(generation).await;
            }
            Err(err) => {
                error!(error = %err, row = intent.row, col = intent.col, "failed to submit move");
                self.recover(generation).await;
            }
        }
    }

    /// Enters `GameOver`, shows the engine's verdict and stops every other chain.
    pub(crate) async fn finish_game(&self) {
        let generation = self.begin_sequence();
        self.state.set(TurnState::GameOver);
        self.hints_visible.set(false);

        match self.service.fetch_outcome().await {
            Ok(outcome) => {
                if !self.is_current(generation) {
                    return;
                }
                match outcome.winner() {
                    Some(winner) => info!(%winner, message = %outcome.message, "game over"),
                    None => info!(message = %outcome.message, "game over"),
                }
                self.message.show(&self.display, &outcome.message);
                if let Some(scores) = outcome.final_scores {
                    self.display.set_scores(scores);
                }
                self.render(generation).await;
            }
            Err(err) => error!(error = %err, "failed to fetch game outcome"),
        }
    }

    /// Fetches a fresh snapshot and paints it with the current hint flag.
    /// A sequence that was superseded while the fetch was in flight paints nothing.
    pub(crate) async fn render(&self, generation: u64) -> Option<GameSnapshot> {
        let snapshot = fetch_snapshot(&self.service, &self.display).await?;
        if !self.is_current(generation) {
            return None;
        }

        let projection = Projection::project(&snapshot, self.hints_visible.get());
        projection.paint(&self.display);
        *self.painted.borrow_mut() = Some(projection);
        Some(snapshot)
    }

    /// Puts the human back in control after a refused or failed move.
    async fn recover(&self, generation: u64) {
        self.state.set(TurnState::ErrorRecovery);
        self.hints_visible.set(true);
        self.render(generation).await;
        if self.is_current(generation) {
            self.state.set(TurnState::AwaitingHumanInput);
        }
    }

    fn hint_at(&self, row: usize, col: usize) -> Option<Position> {
        let painted = self.painted.borrow();
        match painted.as_ref()?.marker(row, col)? {
            Marker::HintDisc => Position::new(row, col).ok(),
            _ => None,
        }
    }

    pub(crate) fn begin_sequence(&self) -> u64 {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        next
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }
}

/// Starts the agent on load only for a fresh board or when black (the first
/// mover) is autonomous. A reload in the middle of an autonomous turn
/// otherwise just renders.
fn should_autostart_agent(snapshot: &GameSnapshot) -> bool {
    snapshot.board.piece_count() <= OPENING_PIECE_COUNT
        || snapshot.active_player_color == Some(PlayerColor::Black)
}
