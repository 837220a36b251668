//! TriggerMcpServer — rmcp ServerHandler backed by a ToolRegistry.
//!
//! The registry is built before serving starts and shared read-only across
//! every request, so handlers may run concurrently without locking.

use std::sync::Arc;

use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, ListToolsResult, PaginatedRequestParams,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::ErrorData as McpError;
use tokio_util::sync::CancellationToken;

use crate::error::BridgeError;
use crate::registry::ToolRegistry;
use crate::tools::ToolArgs;

/// MCP server exposing TriggerCMD commands as tools.
#[derive(Clone)]
pub struct TriggerMcpServer {
    registry: Arc<ToolRegistry>,
}

impl TriggerMcpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Dispatch a call, aborting the in-flight handler if `ct` fires first.
    ///
    /// Request-scoped API failures become tool error results; only unknown
    /// tools, bad arguments, and cancellation surface as MCP errors.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: ToolArgs,
        ct: CancellationToken,
    ) -> Result<CallToolResult, McpError> {
        let outcome = tokio::select! {
            result = self.registry.call_tool(name, arguments) => result,
            _ = ct.cancelled() => {
                tracing::info!(tool = %name, "tool call cancelled by client");
                return Err(McpError::internal_error(
                    format!("tool call '{}' cancelled", name),
                    None,
                ));
            }
        };

        match outcome {
            Ok(result) => Ok(result),
            Err(e @ (BridgeError::UnknownTool(_) | BridgeError::InvalidArguments(..))) => {
                Err(McpError::invalid_params(e.to_string(), None))
            }
            Err(e) => {
                tracing::warn!(tool = %name, error = %e, "tool call failed");
                Ok(CallToolResult::error(vec![Content::text(e.to_string())]))
            }
        }
    }
}

impl ServerHandler for TriggerMcpServer {
    /// Return server metadata: name "triggercmd", tool capabilities enabled.
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: rmcp::model::Implementation {
                name: "triggercmd".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "TriggerCMD bridge — list commands on your TriggerCMD computers and run them. \
                 Commands with an MCP tool description also get a dedicated run_<computer>_<command> tool."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.registry.tools(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(&request.name, request.arguments, context.ct)
            .await
    }
}
