//! ToolRegistry — the immutable table of tools served to the MCP client.
//!
//! Built once at startup by [`ToolRegistryBuilder`]: the two static tools go in
//! first, then one bound tool per catalog command that carries a description.
//! After `build()` the table is never mutated; the server shares it behind an
//! `Arc` and dispatches calls by exact tool name.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::{CallToolResult, Tool};

use crate::api::{RemoteCommand, TriggerClient};
use crate::error::BridgeError;
use crate::namespace::tool_name_for;
use crate::tools::{
    command_handler, command_tool, list_commands_handler, list_commands_tool, run_command_handler,
    run_command_tool, ToolArgs, ToolHandler,
};

/// Collects tool registrations before serving begins.
///
/// Names are unique: the first registration under a name wins and later ones
/// are skipped with a warning. Static tools are registered first, so a catalog
/// command can never shadow them.
#[derive(Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<Tool>,
    handlers: HashMap<String, ToolHandler>,
}

impl ToolRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Returns `false` if the name was already taken.
    pub fn register(&mut self, tool: Tool, handler: ToolHandler) -> bool {
        let name = tool.name.to_string();
        if self.handlers.contains_key(&name) {
            tracing::warn!(tool = %name, "duplicate tool name, keeping first registration");
            return false;
        }
        self.handlers.insert(name, handler);
        self.tools.push(tool);
        true
    }

    /// Register `list_commands` and `run_command`.
    pub fn register_static(&mut self, client: &Arc<TriggerClient>) {
        self.register(list_commands_tool(), list_commands_handler(client.clone()));
        self.register(run_command_tool(), run_command_handler(client.clone()));
    }

    /// Register a bound tool for every command with a non-blank description.
    ///
    /// Returns the number of tools actually registered.
    pub fn register_catalog(
        &mut self,
        client: &Arc<TriggerClient>,
        commands: Vec<RemoteCommand>,
    ) -> usize {
        let mut registered = 0;
        for command in commands {
            let Some(description) = command.tool_description().map(str::to_string) else {
                continue;
            };
            let name = tool_name_for(&command.computer.name, &command.name);

            tracing::info!(
                tool = %name,
                command = %command.name,
                computer = %command.computer.name,
                "registering dynamic tool"
            );

            let tool = command_tool(&name, &description);
            let handler = command_handler(name, command, client.clone());
            if self.register(tool, handler) {
                registered += 1;
            }
        }
        registered
    }

    pub fn build(self) -> ToolRegistry {
        ToolRegistry {
            tools: self.tools,
            handlers: self.handlers,
        }
    }
}

/// Immutable name → handler table.
pub struct ToolRegistry {
    tools: Vec<Tool>,
    handlers: HashMap<String, ToolHandler>,
}

impl ToolRegistry {
    /// Build the registry for a process: static tools, then (unless disabled)
    /// one tool per described catalog command.
    ///
    /// A failed catalog fetch is not fatal — only the static tools are served.
    pub async fn bootstrap(client: Arc<TriggerClient>, dynamic_tools: bool) -> Self {
        let mut builder = ToolRegistryBuilder::new();
        builder.register_static(&client);

        if !dynamic_tools {
            tracing::info!("dynamic tools disabled, serving static tools only");
            return builder.build();
        }

        match client.fetch_commands().await {
            Ok(commands) => {
                let count = builder.register_catalog(&client, commands);
                tracing::info!(count, "registered dynamic command tools");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch commands for dynamic tools");
            }
        }

        builder.build()
    }

    /// All tools, in registration order.
    pub fn tools(&self) -> Vec<Tool> {
        self.tools.clone()
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Call a tool by exact name.
    pub async fn call_tool(&self, name: &str, arguments: ToolArgs) -> crate::Result<CallToolResult> {
        let handler = self
            .handlers
            .get(name)
            .cloned()
            .ok_or_else(|| BridgeError::UnknownTool(name.to_string()))?;
        handler(arguments).await
    }
}
