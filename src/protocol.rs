//! Wire shapes of the engine's JSON replies and their mapping onto domain types.

use std::fmt;

use serde::Deserialize;

use crate::board::Board;
use crate::error::ClientError;
use crate::types::{GameSnapshot, Outcome, PlayerColor, PlayerType, ScorePair};

/// Message the engine sends when the session holds no game.
pub const NO_INSTANCE_MESSAGE: &str = "Game instance not found";

#[derive(Debug, Clone, Deserialize)]
pub struct StateResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub game_state: Option<Board>,
    #[serde(default)]
    pub black_score: Option<u8>,
    #[serde(default)]
    pub white_score: Option<u8>,
    #[serde(default)]
    pub active_player_type: Option<String>,
    #[serde(default)]
    pub active_player_color: Option<PlayerColor>,
    #[serde(default)]
    pub is_finished: bool,
}

/// Result of a state fetch that reached the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateReply {
    NoInstance,
    Snapshot(GameSnapshot),
}

impl TryFrom<StateResponse> for StateReply {
    type Error = ClientError;

    fn try_from(resp: StateResponse) -> Result<Self, Self::Error> {
        if resp.message.as_deref() == Some(NO_INSTANCE_MESSAGE) {
            return Ok(Self::NoInstance);
        }

        let board = resp
            .game_state
            .ok_or_else(|| ClientError::Decode("state reply has no game_state".to_string()))?;
        let (black_score, white_score) = resp
            .black_score
            .zip(resp.white_score)
            .ok_or_else(|| ClientError::Decode("state reply has no scores".to_string()))?;

        Ok(Self::Snapshot(GameSnapshot {
            board,
            scores: ScorePair::new(black_score, white_score),
            active_player_type: PlayerType::from_wire(resp.active_player_type.as_deref()),
            active_player_color: resp.active_player_color,
            is_finished: resp.is_finished,
        }))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoveResponse {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub next_player_is_ai: bool,
}

/// How the engine answered a human move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveVerdict {
    Accepted { next_player_is_agent: bool },
    Finished,
    Rejected { message: String },
}

impl From<MoveResponse> for MoveVerdict {
    fn from(resp: MoveResponse) -> Self {
        if resp.error {
            Self::Rejected {
                message: resp.message.unwrap_or_default(),
            }
        } else if resp.game_over {
            Self::Finished
        } else {
            Self::Accepted {
                next_player_is_agent: resp.next_player_is_ai,
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentMoveResponse {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub agent_moved_this_turn: bool,
    #[serde(default)]
    pub current_player_has_moves: bool,
    #[serde(default)]
    pub current_player_is_ai: bool,
}

/// How the engine answered a request for the next autonomous move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentTurn {
    Rejected {
        message: String,
    },
    Finished,
    /// The game goes on; the fields describe the player now to move.
    Continue {
        next_player_has_moves: bool,
        next_player_is_agent: bool,
    },
}

impl From<AgentMoveResponse> for AgentTurn {
    fn from(resp: AgentMoveResponse) -> Self {
        if resp.error {
            Self::Rejected {
                message: resp.message.unwrap_or_default(),
            }
        } else if resp.game_over {
            Self::Finished
        } else {
            Self::Continue {
                next_player_has_moves: resp.current_player_has_moves,
                next_player_is_agent: resp.current_player_is_ai,
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutcomeResponse {
    pub outcome_message: String,
    #[serde(default)]
    pub black_score: Option<u8>,
    #[serde(default)]
    pub white_score: Option<u8>,
}

impl From<OutcomeResponse> for Outcome {
    fn from(resp: OutcomeResponse) -> Self {
        Outcome {
            message: resp.outcome_message,
            final_scores: resp
                .black_score
                .zip(resp.white_score)
                .map(|(black, white)| ScorePair::new(black, white)),
        }
    }
}

/// Who sits on one side of a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    User,
    Random,
    Minimax { depth: u8 },
    Lstm,
    Gpt2,
    RandomForest,
    XgBoost,
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::User => f.write_str("USER"),
            PlayerKind::Random => f.write_str("RANDOM"),
            PlayerKind::Minimax { depth } => write!(f, "MINIMAX_{depth}"),
            PlayerKind::Lstm => f.write_str("LSTM"),
            PlayerKind::Gpt2 => f.write_str("GPT2"),
            PlayerKind::RandomForest => f.write_str("RF_MODEL"),
            PlayerKind::XgBoost => f.write_str("XGB_MODEL"),
        }
    }
}

impl std::str::FromStr for PlayerKind {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "USER" => PlayerKind::User,
            "RANDOM" => PlayerKind::Random,
            "LSTM" => PlayerKind::Lstm,
            "GPT2" => PlayerKind::Gpt2,
            "RF_MODEL" => PlayerKind::RandomForest,
            "XGB_MODEL" => PlayerKind::XgBoost,
            other => {
                let depth = other
                    .strip_prefix("MINIMAX_")
                    .and_then(|d| d.parse::<u8>().ok())
                    .ok_or_else(|| ClientError::Config(format!("unknown player kind {other:?}")))?;
                PlayerKind::Minimax { depth }
            }
        };
        Ok(kind)
    }
}

/// Body of the new-game form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSetup {
    pub black: PlayerKind,
    pub white: PlayerKind,
}

impl PlayerSetup {
    /// `application/x-www-form-urlencoded` body. Kind names are plain ASCII.
    pub fn form_body(&self) -> String {
        format!(
            "player_black_type={}&player_white_type={}",
            self.black, self.white
        )
    }
}
