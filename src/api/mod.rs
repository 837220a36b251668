//! TriggerCMD REST API: wire types and the HTTP client.

pub mod client;
pub mod types;

pub use client::{TriggerClient, TriggerResponse};
pub use types::{CommandList, CommandSummary, Computer, RemoteCommand, TriggerRequest};
