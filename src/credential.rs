//! Bearer token resolution.
//!
//! An env var override wins when it holds a non-blank value; otherwise the
//! token is read from `~/.TRIGGERcmdData/token.tkn` (or a configured path).
//! Resolution happens on every call that needs a token.

use std::path::{Path, PathBuf};

use crate::config::BridgeConfig;
use crate::error::BridgeError;

/// Token file location relative to the user's home directory.
const TOKEN_DIR: &str = ".TRIGGERcmdData";
const TOKEN_FILE: &str = "token.tkn";

/// Default token file path: `<home>/.TRIGGERcmdData/token.tkn`.
pub fn default_token_path() -> crate::Result<PathBuf> {
    let home = dirs::home_dir()
        .filter(|h| !h.as_os_str().is_empty())
        .ok_or_else(|| {
            BridgeError::CredentialMissing("unable to resolve home directory".to_string())
        })?;
    Ok(home.join(TOKEN_DIR).join(TOKEN_FILE))
}

#[derive(Debug, Clone)]
pub struct TokenResolver {
    env_var: String,
    token_file: Option<PathBuf>,
}

impl TokenResolver {
    pub fn new(env_var: impl Into<String>, token_file: Option<PathBuf>) -> Self {
        Self {
            env_var: env_var.into(),
            token_file,
        }
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(config.token_env.clone(), config.token_file.clone())
    }

    /// Resolve the bearer token.
    pub async fn resolve(&self) -> crate::Result<String> {
        if let Ok(value) = std::env::var(&self.env_var) {
            let token = value.trim();
            if !token.is_empty() {
                tracing::debug!(env = %self.env_var, "using token from environment");
                return Ok(token.to_string());
            }
        }

        let path = match &self.token_file {
            Some(path) => path.clone(),
            None => default_token_path()?,
        };
        read_token_file(&path).await
    }
}

async fn read_token_file(path: &Path) -> crate::Result<String> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        BridgeError::CredentialMissing(format!("failed reading {}: {}", path.display(), e))
    })?;
    let token = content.trim();
    if token.is_empty() {
        return Err(BridgeError::CredentialMissing(format!(
            "token file {} is empty",
            path.display()
        )));
    }
    Ok(token.to_string())
}
