//! Bridge configuration — deserialization and validation.

use crate::error::BridgeError;
use serde::Deserialize;
use std::path::PathBuf;

/// Default TriggerCMD API origin.
pub const DEFAULT_API_BASE_URL: &str = "https://triggercmd.com";

/// Default env var consulted for a bearer token override.
pub const DEFAULT_TOKEN_ENV: &str = "TRIGGERCMD_TOKEN";

/// Catalog endpoint path, relative to the API base URL.
pub const COMMAND_LIST_PATH: &str = "/api/command/list";

/// Trigger endpoint path, relative to the API base URL.
pub const TRIGGER_PATH: &str = "/api/run/trigger";

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

fn default_user_agent() -> String {
    concat!("triggercmd-mcp/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_dynamic_tools() -> bool {
    true
}

/// Top-level bridge configuration, parsed from TOML.
///
/// Every field has a default, so an empty file (or no file at all) yields a
/// working config pointed at the public TriggerCMD API.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Env var holding a token override.
    #[serde(default = "default_token_env")]
    pub token_env: String,
    /// Token file override. Default: `<home>/.TRIGGERcmdData/token.tkn`.
    pub token_file: Option<PathBuf>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Register a `run_<computer>_<command>` tool per described catalog entry.
    #[serde(default = "default_dynamic_tools")]
    pub dynamic_tools: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            token_env: default_token_env(),
            token_file: None,
            user_agent: default_user_agent(),
            dynamic_tools: default_dynamic_tools(),
        }
    }
}

impl BridgeConfig {
    /// Parse a config from TOML text. Does not validate.
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| BridgeError::InvalidConfig(e.to_string()))
    }

    /// Validate the config, failing fast before any client is built.
    pub fn validate(&self) -> crate::Result<()> {
        let base = self.api_base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(BridgeError::InvalidConfig(format!(
                "api_base_url must start with http:// or https://, got '{}'",
                self.api_base_url
            )));
        }

        if self.token_env.trim().is_empty() {
            return Err(BridgeError::InvalidConfig(
                "token_env must not be empty".to_string(),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(BridgeError::InvalidConfig(
                "user_agent must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Join an API path onto the base URL, tolerating a trailing slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url.trim().trim_end_matches('/'), path)
    }
}
