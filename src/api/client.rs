//! HTTP client for the TriggerCMD API.
//!
//! No retries, no timeout beyond reqwest's defaults. The bearer token is
//! resolved on every call so a token written while the server runs is
//! picked up without a restart.

use reqwest::header::USER_AGENT;
use serde_json::{json, Value};

use crate::api::types::{CommandList, RemoteCommand, TriggerRequest};
use crate::config::{BridgeConfig, COMMAND_LIST_PATH, TRIGGER_PATH};
use crate::credential::TokenResolver;
use crate::error::BridgeError;

/// Raw outcome of a trigger call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerResponse {
    pub status: u16,
    pub body: String,
}

impl TriggerResponse {
    /// The body as JSON, or a `{status, ok, body}` stand-in when it isn't JSON.
    pub fn into_value(self) -> Value {
        match serde_json::from_str::<Value>(&self.body) {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(
                    status = self.status,
                    body = %self.body,
                    "non-JSON response from trigger endpoint"
                );
                json!({
                    "status": self.status,
                    "ok": (200..300).contains(&self.status),
                    "body": self.body,
                })
            }
        }
    }
}

pub struct TriggerClient {
    http: reqwest::Client,
    tokens: TokenResolver,
    list_url: String,
    trigger_url: String,
    user_agent: String,
}

impl TriggerClient {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            tokens: TokenResolver::from_config(config),
            list_url: config.endpoint(COMMAND_LIST_PATH),
            trigger_url: config.endpoint(TRIGGER_PATH),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Resolve the bearer token for the next request.
    pub async fn token(&self) -> crate::Result<String> {
        self.tokens.resolve().await
    }

    /// Fetch every command in the account's catalog, unfiltered.
    pub async fn fetch_commands(&self) -> crate::Result<Vec<RemoteCommand>> {
        tracing::info!(url = %self.list_url, "fetching commands from TriggerCMD API");
        let token = self.token().await?;

        let resp = self
            .http
            .get(&self.list_url)
            .bearer_auth(&token)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| BridgeError::Network(self.list_url.clone(), e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| BridgeError::Network(self.list_url.clone(), e.to_string()))?;

        if !status.is_success() {
            return Err(BridgeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let list: CommandList = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(body = %body, "failed to parse command list response");
            BridgeError::Decode {
                reason: e.to_string(),
                body: body.clone(),
            }
        })?;

        tracing::info!(
            total = list.records.len(),
            "fetched commands from TriggerCMD API"
        );
        tracing::debug!(
            described = list
                .records
                .iter()
                .filter(|cmd| cmd.tool_description().is_some())
                .count(),
            "commands with a tool description"
        );

        Ok(list.records)
    }

    /// POST a trigger request with an already-resolved token.
    pub async fn trigger(
        &self,
        token: &str,
        request: &TriggerRequest,
    ) -> crate::Result<TriggerResponse> {
        tracing::info!(
            command = %request.command,
            computer = %request.computer,
            "triggering command"
        );

        let resp = self
            .http
            .post(&self.trigger_url)
            .bearer_auth(token)
            .header(USER_AGENT, &self.user_agent)
            .json(request)
            .send()
            .await
            .map_err(|e| BridgeError::Network(self.trigger_url.clone(), e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| BridgeError::Network(self.trigger_url.clone(), e.to_string()))?;

        Ok(TriggerResponse { status, body })
    }
}
