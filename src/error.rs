//! Error types for the TriggerCMD MCP bridge.

use thiserror::Error;

/// Main error type for bridge operations
#[derive(Error, Debug)]
pub enum BridgeError {
    /// No usable bearer token (env override unset and token file unreadable or empty)
    #[error("missing TriggerCMD token: {0}")]
    CredentialMissing(String),

    /// Transport-level failure talking to the TriggerCMD API
    #[error("request to {0} failed: {1}")]
    Network(String, String),

    /// API answered with a non-success HTTP status
    #[error("TriggerCMD API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// API body could not be decoded; `body` keeps the raw payload for diagnostics
    #[error("failed to parse API response: {reason}")]
    Decode { reason: String, body: String },

    /// Tool arguments missing or of the wrong shape
    #[error("invalid arguments for tool '{0}': {1}")]
    InvalidArguments(String, String),

    /// No tool registered under the requested name
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// Configuration rejected by validation
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;
