use async_trait::async_trait;
use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::protocol::{
    AgentMoveResponse, AgentTurn, MoveResponse, MoveVerdict, OutcomeResponse, PlayerSetup,
    StateReply, StateResponse,
};
use crate::service::GameService;
use crate::types::{MoveIntent, Outcome};

/// `fetch`-backed binding to the engine's JSON endpoints.
pub struct HttpGameService {
    config: ClientConfig,
}

impl HttpGameService {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        self.config.url(path)
    }
}

fn transport(err: gloo::net::Error) -> ClientError {
    ClientError::Transport(err.to_string())
}

/// Rejections come back as 4xx with a JSON body, so the status is only logged.
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    if !resp.ok() {
        debug!(status = resp.status(), url = %resp.url(), "engine replied with error status");
    }
    resp.json::<T>()
        .await
        .map_err(|err| ClientError::Decode(err.to_string()))
}

#[async_trait(?Send)]
impl GameService for HttpGameService {
    async fn fetch_state(&self) -> Result<StateReply, ClientError> {
        let resp = Request::get(&self.url(&self.config.endpoints.state))
            .send()
            .await
            .map_err(transport)?;
        StateReply::try_from(decode::<StateResponse>(resp).await?)
    }

    async fn submit_move(&self, intent: MoveIntent) -> Result<MoveVerdict, ClientError> {
        let resp = Request::post(&self.url(&self.config.endpoints.user_move))
            .json(&intent)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        Ok(decode::<MoveResponse>(resp).await?.into())
    }

    async fn request_agent_move(&self) -> Result<AgentTurn, ClientError> {
        let resp = Request::post(&self.url(&self.config.endpoints.agent_move))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(transport)?;
        Ok(decode::<AgentMoveResponse>(resp).await?.into())
    }

    async fn fetch_outcome(&self) -> Result<Outcome, ClientError> {
        let resp = Request::get(&self.url(&self.config.endpoints.outcome))
            .send()
            .await
            .map_err(transport)?;
        Ok(decode::<OutcomeResponse>(resp).await?.into())
    }

    async fn reset(&self) -> Result<(), ClientError> {
        let resp = Request::post(&self.url(&self.config.endpoints.reset))
            .send()
            .await
            .map_err(transport)?;
        debug!(status = resp.status(), "reset acknowledged");
        Ok(())
    }

    async fn start_game(&self, setup: PlayerSetup) -> Result<(), ClientError> {
        let resp = Request::post(&self.url(&self.config.endpoints.new_game))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(setup.form_body())
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        if !resp.ok() {
            return Err(ClientError::Transport(format!(
                "new game rejected with status {}",
                resp.status()
            )));
        }
        Ok(())
    }
}
