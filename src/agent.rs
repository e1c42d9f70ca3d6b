use tracing::{debug, error, info, warn};
use web_time::Instant;

use crate::controller::{TurnController, TurnState};
use crate::display::DisplaySurface;
use crate::protocol::AgentTurn;
use crate::service::GameService;
use crate::timer::Timer;

pub const THINKING_MESSAGE: &str = "OthelloAI is analysing...";
pub const PASS_TO_AGENT_MESSAGE: &str = "AI has no moves, passing turn. Other AI is thinking...";
pub const PASS_TO_HUMAN_MESSAGE: &str = "AI has no moves, passing turn. Your turn.";
pub const AGENT_FAILURE_MESSAGE: &str = "Error during AI move. Please try again or reset.";

impl<S, D, T> TurnController<S, D, T>
where
    S: GameService,
    D: DisplaySurface,
    T: Timer,
{
    pub(crate) async fn run_agent_cycle(&self, generation: u64) {
        self.state.set(TurnState::AgentCycle);
        let delay = self.config.deliberation_delay();
        let mut turns = 0u32;

        loop {
            if !self.is_current(generation) || self.state.get() != TurnState::AgentCycle {
                debug!(turns, "agent cycle superseded");
                return;
            }

            self.hints_visible.set(false);
            self.render(generation).await;
            if !self.is_current(generation) {
                return;
            }
            self.message.show(&self.display, THINKING_MESSAGE);

            self.timer.sleep(delay).await;
            if !self.is_current(generation) {
                debug!(turns, "agent cycle superseded during deliberation");
                return;
            }

            let started = Instant::now();
            let reply = self.service.request_agent_move().await;
            if !self.is_current(generation) {
                return;
            }
            turns += 1;

            match reply {
                Err(err) => {
                    error!(error = %err, turns, "agent move request failed");
                    self.halt(generation, AGENT_FAILURE_MESSAGE).await;
                    return;
                }
                Ok(AgentTurn::Rejected { message }) => {
                    warn!(%message, turns, "engine refused agent move");
                    self.halt(generation, &message).await;
                    return;
                }
                Ok(AgentTurn::Finished) => {
                    info!(turns, "agent move finished the game");
                    self.render(generation).await;
                    if self.is_current(generation) {
                        self.finish_game().await;
                    }
                    return;
                }
                Ok(AgentTurn::Continue {
                    next_player_has_moves,
                    next_player_is_agent,
                }) => {
                    debug!(
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        next_player_has_moves, next_player_is_agent, "agent move processed"
                    );
                    self.render(generation).await;
                    if !self.is_current(generation) {
                        return;
                    }

                    match (next_player_has_moves, next_player_is_agent) {
                        (true, false) => {
                            self.hints_visible.set(true);
                            self.message.hide(&self.display);
                            self.state.set(TurnState::AwaitingHumanInput);
                            self.render(generation).await;
                            return;
                        }
                        (true, true) => self.message.show(&self.display, THINKING_MESSAGE),
                        (false, true) => self.message.show(&self.display, PASS_TO_AGENT_MESSAGE),
                        (false, false) => self.message.show(&self.display, PASS_TO_HUMAN_MESSAGE),
                    }
                }
            }

            self.timer.sleep(delay).await;
        }
    }

    /// Stops the chain and leaves the board visible with hints hidden; reset recovers.
    async fn halt(&self, generation: u64, message: &str) {
        self.state.set(TurnState::ErrorRecovery);
        self.message.show(&self.display, message);
        self.render(generation).await;
    }
}
