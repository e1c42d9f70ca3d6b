use tracing::{error, info};

use crate::controller::{TurnController, TurnState};
use crate::display::DisplaySurface;
use crate::protocol::PlayerSetup;
use crate::service::GameService;
use crate::timer::Timer;

impl<S, D, T> TurnController<S, D, T>
where
    S: GameService,
    D: DisplaySurface,
    T: Timer,
{
    /// Asks the engine to drop the game, then reloads the client from scratch.
    ///
    /// Chains in flight are invalidated only once the engine confirms. A
    /// failed request is logged and leaves the running sequence untouched.
    pub async fn reset(&self) {
        if let Err(err) = self.service.reset().await {
            error!(error = %err, "failed to reset game");
            return;
        }

        self.begin_sequence();
        info!("game reset, reloading client");
        self.discard_state(false);
        self.start().await;
    }

    /// Sets up a fresh game with the given players and loads it.
    pub async fn new_game(&self, setup: PlayerSetup) {
        if let Err(err) = self.service.start_game(setup).await {
            error!(error = %err, "failed to start new game");
            self.message
                .show(&self.display, &format!("Could not start a new game: {err}"));
            return;
        }

        self.begin_sequence();
        info!(black = %setup.black, white = %setup.white, "new game started");
        self.discard_state(true);
        self.start().await;
    }

    /// Back to the state of a freshly loaded page.
    fn discard_state(&self, game_started: bool) {
        self.state.set(TurnState::AwaitingHumanInput);
        self.hints_visible.set(true);
        self.game_started.set(game_started);
        self.message.hide(&self.display);
        self.painted.borrow_mut().take();
    }
}
