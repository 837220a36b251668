//! triggercmd-mcp — MCP server for TriggerCMD.
//!
//! Two subcommands:
//! - `triggercmd-mcp stdio` (default): serve TriggerCMD commands as tools over STDIO
//! - `triggercmd-mcp list`: print the command catalog as JSON and exit

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use rmcp::ServiceExt;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use triggercmd_mcp::{BridgeConfig, ToolRegistry, TriggerClient, TriggerMcpServer};

const CONFIG_FILE: &str = "triggercmd-mcp.toml";

/// triggercmd-mcp — run TriggerCMD commands from MCP clients.
#[derive(Parser)]
#[command(
    name = "triggercmd-mcp",
    version,
    about = "triggercmd-mcp — run TriggerCMD commands from MCP clients"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    options: ConfigArgs,
}

#[derive(Args, Clone, Default)]
struct ConfigArgs {
    /// Path to config file [default: ./triggercmd-mcp.toml or ~/.config/triggercmd-mcp/config.toml]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Override the TriggerCMD API base URL
    #[arg(long, global = true)]
    api_base_url: Option<String>,
    /// Serve only list_commands and run_command
    #[arg(long, global = true)]
    no_dynamic_tools: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve tools over STDIO (for Claude Desktop and other STDIO-based MCP clients)
    Stdio,
    /// Fetch the command catalog once and print it as JSON
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries MCP frames, so logs go to stderr (RUST_LOG controls verbosity)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.options).await?;

    let cancel = CancellationToken::new();

    // Ctrl-C handler — cancels the root token for graceful shutdown
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Shutting down triggercmd-mcp...");
        cancel_for_signal.cancel();
    });

    match cli.command.unwrap_or(Commands::Stdio) {
        Commands::Stdio => run_stdio(config, cancel).await?,
        Commands::List => run_list(config).await?,
    }

    Ok(())
}

/// Build the tool registry and serve it over stdin/stdout.
///
/// The catalog is fetched once before serving; the registry is immutable
/// afterwards.
async fn run_stdio(config: BridgeConfig, cancel: CancellationToken) -> Result<()> {
    tracing::info!(api = %config.api_base_url, "triggercmd-mcp starting up");

    let client = Arc::new(TriggerClient::new(&config));
    let server =
        TriggerMcpServer::new(ToolRegistry::bootstrap(client, config.dynamic_tools).await);
    tracing::info!(tool_count = server.registry().len(), "tool registry ready");

    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let running = server
        .serve_with_ct(transport, cancel.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize stdio transport: {:?}", e))?;

    tracing::info!("stdio transport initialized, waiting for messages");

    tokio::select! {
        result = running.waiting() => {
            match result {
                Ok(reason) => {
                    tracing::info!(?reason, "stdio transport completed");
                }
                Err(e) => {
                    tracing::error!(error = %e, "stdio transport error");
                    return Err(anyhow::anyhow!("stdio transport error: {}", e));
                }
            }
        }
        _ = cancel.cancelled() => {
            tracing::info!("stdio transport cancelled");
        }
    }

    Ok(())
}

/// Print the `list_commands` output to stdout.
async fn run_list(config: BridgeConfig) -> Result<()> {
    let client = TriggerClient::new(&config);
    let result = triggercmd_mcp::list_commands(&client).await;

    let text = result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.clone())
        .unwrap_or_default();

    if result.is_error == Some(true) {
        return Err(anyhow::anyhow!(text));
    }
    println!("{}", text);
    Ok(())
}

/// Resolve config file path: explicit flag → ./triggercmd-mcp.toml →
/// ~/.config/triggercmd-mcp/config.toml. `None` means built-in defaults.
fn resolve_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = Path::new(CONFIG_FILE);
    if local.exists() {
        return Some(local.to_path_buf());
    }

    if let Some(config_dir) = dirs::config_dir() {
        let xdg = config_dir.join("triggercmd-mcp").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }

    None
}

/// Load the config file (if any), apply CLI overrides, and validate.
async fn load_config(args: &ConfigArgs) -> Result<BridgeConfig> {
    let mut config = match resolve_config(args.config.as_deref()) {
        Some(path) => {
            let content = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to read config file {:?}: {}", path, e))?;
            tracing::info!(path = %path.display(), "loaded config file");
            BridgeConfig::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file {:?}: {}", path, e))?
        }
        None => BridgeConfig::default(),
    };

    if let Some(url) = &args.api_base_url {
        config.api_base_url = url.clone();
    }
    if args.no_dynamic_tools {
        config.dynamic_tools = false;
    }

    config.validate()?;
    Ok(config)
}
