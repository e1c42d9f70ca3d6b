use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

const DEFAULT_DELIBERATION_DELAY_MS: u64 = 1000;
const MAX_DELIBERATION_DELAY_MS: u64 = 60_000;

/// Paths of the engine endpoints, relative to `base_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Endpoints {
    pub state: String,
    pub user_move: String,
    pub agent_move: String,
    pub outcome: String,
    pub reset: String,
    pub new_game: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            state: "/get_game_state".to_string(),
            user_move: "/user_move".to_string(),
            agent_move: "/agent_move".to_string(),
            outcome: "/get_game_outcome".to_string(),
            reset: "/reset_game".to_string(),
            new_game: "/play_game".to_string(),
        }
    }
}

impl Endpoints {
    fn all(&self) -> [&str; 6] {
        [
            &self.state,
            &self.user_move,
            &self.agent_move,
            &self.outcome,
            &self.reset,
            &self.new_game,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Prefix for every endpoint. Empty means same origin.
    pub base_url: String,
    pub endpoints: Endpoints,
    /// Pause before each autonomous move request and between chained turns.
    pub deliberation_delay_ms: u64,
    /// Whether the page was served for a game that has already been set up.
    pub game_started: bool,
    /// `tracing` filter directive, e.g. `"info"` or `"reversi_sync=debug"`.
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            endpoints: Endpoints::default(),
            deliberation_delay_ms: DEFAULT_DELIBERATION_DELAY_MS,
            game_started: false,
            log_filter: "info".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn validate(self) -> Result<Self, ClientError> {
        if self.deliberation_delay_ms == 0 || self.deliberation_delay_ms > MAX_DELIBERATION_DELAY_MS
        {
            return Err(ClientError::Config(format!(
                "deliberation delay must be within 1..={MAX_DELIBERATION_DELAY_MS} ms, got {}",
                self.deliberation_delay_ms
            )));
        }
        if let Some(path) = self.endpoints.all().into_iter().find(|p| !p.starts_with('/')) {
            return Err(ClientError::Config(format!(
                "endpoint path must start with '/': {path:?}"
            )));
        }
        Ok(self)
    }

    pub fn deliberation_delay(&self) -> Duration {
        Duration::from_millis(self.deliberation_delay_ms)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
