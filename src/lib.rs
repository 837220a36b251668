//! TriggerCMD MCP bridge.
//! Serves the TriggerCMD command API as MCP tools: `list_commands`,
//! `run_command`, and one `run_<computer>_<command>` tool per command that
//! carries an MCP tool description.

pub mod api;
pub mod config;
pub mod credential;
pub mod error;
pub mod invoke;
pub mod namespace;
pub mod registry;
pub mod server;
pub mod tools;

#[cfg(test)]
mod testing;

pub use api::{CommandSummary, Computer, RemoteCommand, TriggerClient, TriggerRequest};
pub use config::BridgeConfig;
pub use credential::TokenResolver;
pub use error::{BridgeError, Result};
pub use invoke::invoke_command;
pub use namespace::tool_name_for;
pub use registry::{ToolRegistry, ToolRegistryBuilder};
pub use server::TriggerMcpServer;
pub use tools::list_commands;
