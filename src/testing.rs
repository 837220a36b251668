//! In-process fake of the TriggerCMD API for tests.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use rmcp::model::CallToolResult;
use serde_json::Value;

use crate::config::BridgeConfig;

/// Canned reply for one endpoint.
#[derive(Clone)]
pub struct FakeReply {
    status: u16,
    body: String,
}

impl FakeReply {
    pub fn ok(body: &str) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    fn respond(&self) -> (StatusCode, String) {
        (
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            self.body.clone(),
        )
    }
}

#[derive(Clone, Default)]
struct Recorded {
    requests: usize,
    authorization: Option<String>,
    triggers: Vec<Value>,
}

#[derive(Clone)]
struct FakeState {
    list: FakeReply,
    trigger: FakeReply,
    recorded: Arc<Mutex<Recorded>>,
}

pub struct FakeApi {
    pub base_url: String,
    recorded: Arc<Mutex<Recorded>>,
    token_dir: tempfile::TempDir,
}

impl FakeApi {
    /// Bind on an ephemeral localhost port and serve the two API routes.
    pub async fn start(list: FakeReply, trigger: FakeReply) -> Self {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let state = FakeState {
            list,
            trigger,
            recorded: recorded.clone(),
        };

        let app = Router::new()
            .route("/api/command/list", get(list_handler))
            .route("/api/run/trigger", post(trigger_handler))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            recorded,
            token_dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Config pointed at this fake, with a token file holding `token`.
    pub fn config_with_token(&self, token: &str) -> BridgeConfig {
        let path = self.token_dir.path().join("token.tkn");
        std::fs::write(&path, token).unwrap();
        self.config_for(path)
    }

    /// Config pointed at this fake whose token file does not exist.
    pub fn config_without_token(&self) -> BridgeConfig {
        self.config_for(self.token_dir.path().join("missing.tkn"))
    }

    fn config_for(&self, token_file: PathBuf) -> BridgeConfig {
        BridgeConfig {
            api_base_url: self.base_url.clone(),
            // Never set, so a developer's real token can't leak into tests.
            token_env: "TRIGGERCMD_FAKE_API_TOKEN_UNSET".to_string(),
            token_file: Some(token_file),
            ..Default::default()
        }
    }

    pub fn request_count(&self) -> usize {
        self.recorded.lock().unwrap().requests
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.recorded.lock().unwrap().authorization.clone()
    }

    pub fn triggers(&self) -> Vec<Value> {
        self.recorded.lock().unwrap().triggers.clone()
    }
}

fn record(state: &FakeState, headers: &HeaderMap) {
    let mut recorded = state.recorded.lock().unwrap();
    recorded.requests += 1;
    recorded.authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
}

async fn list_handler(State(state): State<FakeState>, headers: HeaderMap) -> (StatusCode, String) {
    record(&state, &headers);
    state.list.respond()
}

async fn trigger_handler(
    State(state): State<FakeState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    record(&state, &headers);
    let payload = serde_json::from_str(&body).unwrap_or(Value::String(body));
    state.recorded.lock().unwrap().triggers.push(payload);
    state.trigger.respond()
}

/// Text of the first content block of a tool result.
pub fn text_of(result: &CallToolResult) -> &str {
    result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.as_str())
        .expect("tool result should carry text content")
}
