//! Browser client for a server-hosted Reversi engine.

pub mod agent;
pub mod board;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod fetcher;
pub mod message;
pub mod protocol;
pub mod render;
pub mod reset;
pub mod service;
pub mod telemetry;
pub mod timer;
pub mod types;

#[cfg(test)]
mod test_support;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use board::Board;
pub use config::ClientConfig;
pub use controller::{TurnController, TurnState};
pub use display::DisplaySurface;
pub use error::ClientError;
pub use protocol::{AgentTurn, MoveVerdict, PlayerKind, PlayerSetup, StateReply};
pub use render::{Marker, Projection};
pub use service::GameService;
pub use timer::Timer;
pub use types::{GameSnapshot, Outcome, PlayerColor, PlayerType, Position, ScorePair, Square};
