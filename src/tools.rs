//! Tool definitions and handler factories.
//!
//! Two static tools (`list_commands`, `run_command`) plus a factory that binds
//! a handler to one catalog command. Every handler is an `Arc`'d closure
//! returning a boxed future, so static and dynamic tools share one table.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde::Deserialize;
use serde_json::json;

use crate::api::{CommandSummary, RemoteCommand, TriggerClient};
use crate::error::BridgeError;
use crate::invoke::invoke_command;

pub const LIST_COMMANDS: &str = "list_commands";
pub const RUN_COMMAND: &str = "run_command";

/// Prefix of the tool error returned when the catalog can't be fetched.
pub const FETCH_ERROR_PREFIX: &str = "Error fetching commands: ";

/// Arguments passed to a tool call, as sent by the client.
pub type ToolArgs = Option<JsonObject>;

/// A callable tool body.
pub type ToolHandler =
    Arc<dyn Fn(ToolArgs) -> BoxFuture<'static, crate::Result<CallToolResult>> + Send + Sync>;

#[derive(Debug, Deserialize)]
struct RunCommandArgs {
    command: String,
    computer: String,
    #[serde(default)]
    parameters: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct BoundCommandArgs {
    #[serde(default)]
    parameters: Option<String>,
}

fn parse_args<T: for<'de> Deserialize<'de>>(tool: &str, args: ToolArgs) -> crate::Result<T> {
    let value = serde_json::Value::Object(args.unwrap_or_default());
    serde_json::from_value(value)
        .map_err(|e| BridgeError::InvalidArguments(tool.to_string(), e.to_string()))
}

fn schema(value: serde_json::Value) -> Arc<JsonObject> {
    match value {
        serde_json::Value::Object(map) => Arc::new(map),
        _ => Arc::new(JsonObject::new()),
    }
}

fn parameters_property() -> serde_json::Value {
    json!({
        "type": "string",
        "description": "Optional parameters to pass to the command"
    })
}

pub fn list_commands_tool() -> Tool {
    Tool::new(
        LIST_COMMANDS,
        "List available TriggerCMD commands",
        schema(json!({"type": "object", "properties": {}})),
    )
}

pub fn run_command_tool() -> Tool {
    Tool::new(
        RUN_COMMAND,
        "Run a TriggerCMD command by computer and command name with optional parameters",
        schema(json!({
            "type": "object",
            "properties": {
                "command": {"type": "string", "description": "Name of the command to run"},
                "computer": {"type": "string", "description": "Name of the computer that owns the command"},
                "parameters": parameters_property()
            },
            "required": ["command", "computer"]
        })),
    )
}

/// Tool definition for a command bound by [`command_handler`].
pub fn command_tool(name: &str, description: &str) -> Tool {
    Tool::new(
        name.to_string(),
        description.to_string(),
        schema(json!({
            "type": "object",
            "properties": {"parameters": parameters_property()}
        })),
    )
}

/// Fetch the catalog and render it as a pretty JSON array.
pub async fn list_commands(client: &TriggerClient) -> CallToolResult {
    match client.fetch_commands().await {
        Ok(commands) => {
            let summaries: Vec<CommandSummary> = commands.iter().map(CommandSummary::from).collect();
            let text = serde_json::to_string_pretty(&summaries).unwrap_or_else(|_| "[]".to_string());
            CallToolResult::success(vec![Content::text(text)])
        }
        Err(e) => {
            tracing::warn!(error = %e, "list_commands failed");
            CallToolResult::error(vec![Content::text(format!("{}{}", FETCH_ERROR_PREFIX, e))])
        }
    }
}

pub fn list_commands_handler(client: Arc<TriggerClient>) -> ToolHandler {
    Arc::new(move |_args: ToolArgs| {
        let client = client.clone();
        async move {
            tracing::info!(tool = LIST_COMMANDS, "tool called");
            Ok(list_commands(&client).await)
        }
        .boxed()
    })
}

pub fn run_command_handler(client: Arc<TriggerClient>) -> ToolHandler {
    Arc::new(move |args: ToolArgs| {
        let client = client.clone();
        async move {
            let args: RunCommandArgs = parse_args(RUN_COMMAND, args)?;
            tracing::info!(tool = RUN_COMMAND, command = %args.command, computer = %args.computer, "tool called");
            invoke_command(
                &client,
                &args.command,
                &args.computer,
                args.parameters.as_deref(),
            )
            .await
        }
        .boxed()
    })
}

/// Bind a handler to one catalog command.
///
/// The closure owns its copy of `command`; the only input the caller may
/// supply is `parameters`.
pub fn command_handler(
    tool_name: String,
    command: RemoteCommand,
    client: Arc<TriggerClient>,
) -> ToolHandler {
    let command = Arc::new(command);
    let tool_name: Arc<str> = tool_name.into();
    Arc::new(move |args: ToolArgs| {
        let client = client.clone();
        let command = command.clone();
        let tool_name = tool_name.clone();
        async move {
            let args: BoundCommandArgs = parse_args(&tool_name, args)?;
            tracing::info!(
                tool = %tool_name,
                command = %command.name,
                computer = %command.computer.name,
                "dynamic tool called"
            );
            invoke_command(
                &client,
                &command.name,
                &command.computer.name,
                args.parameters.as_deref(),
            )
            .await
        }
        .boxed()
    })
}
