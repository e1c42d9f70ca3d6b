//! Boundary to the authoritative engine.

use async_trait::async_trait;

use crate::error::ClientError;
use crate::protocol::{AgentTurn, MoveVerdict, PlayerSetup, StateReply};
use crate::types::{MoveIntent, Outcome};

/// Request/response calls the controller makes against the engine.
///
/// Implementations run on a single-threaded executor, so futures are not `Send`.
/// Domain refusals come back as verdicts; `Err` is reserved for transport and
/// decoding failures.
#[async_trait(?Send)]
pub trait GameService {
    async fn fetch_state(&self) -> Result<StateReply, ClientError>;

    async fn submit_move(&self, intent: MoveIntent) -> Result<MoveVerdict, ClientError>;

    async fn request_agent_move(&self) -> Result<AgentTurn, ClientError>;

    async fn fetch_outcome(&self) -> Result<Outcome, ClientError>;

    async fn reset(&self) -> Result<(), ClientError>;

    async fn start_game(&self, setup: PlayerSetup) -> Result<(), ClientError>;
}
