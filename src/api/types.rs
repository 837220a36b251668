//! Wire types for the TriggerCMD API.

use serde::{Deserialize, Deserializer, Serialize};

/// Value sent in the `sender` field of every trigger request.
pub const TRIGGER_SENDER: &str = "MCP";

/// A command registered on a TriggerCMD computer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCommand {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub voice: String,
    /// Agent-facing description; a non-blank value gets the command its own tool.
    #[serde(default)]
    pub mcp_tool_description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub computer: Computer,
}

impl RemoteCommand {
    /// Trimmed description, or `None` when absent or blank.
    pub fn tool_description(&self) -> Option<&str> {
        self.mcp_tool_description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Computer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Decode `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `GET /api/command/list`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandList {
    #[serde(default)]
    pub records: Vec<RemoteCommand>,
}

/// Body of `POST /api/run/trigger`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerRequest {
    pub command: String,
    pub computer: String,
    pub params: String,
    pub sender: &'static str,
}

impl TriggerRequest {
    pub fn new(command: &str, computer: &str, parameters: Option<&str>) -> Self {
        Self {
            command: command.to_string(),
            computer: computer.to_string(),
            params: parameters.unwrap_or_default().to_string(),
            sender: TRIGGER_SENDER,
        }
    }
}

/// Projection of a command returned by the `list_commands` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSummary {
    pub name: String,
    pub voice: String,
    pub computer: String,
    pub description: String,
}

impl From<&RemoteCommand> for CommandSummary {
    fn from(cmd: &RemoteCommand) -> Self {
        Self {
            name: cmd.name.clone(),
            voice: cmd.voice.clone(),
            computer: cmd.computer.name.clone(),
            description: cmd.mcp_tool_description.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_command_list() {
        let list: CommandList = serde_json::from_value(json!({
            "records": [
                {
                    "name": "calc",
                    "voice": "calculator",
                    "mcpToolDescription": "Opens the calculator",
                    "computer": {"name": "Laptop", "id": "abc"},
                    "allowParams": "false"
                },
                {"name": "notepad", "computer": {"name": "Laptop"}}
            ]
        }))
        .unwrap();

        assert_eq!(list.records.len(), 2);
        assert_eq!(list.records[0].voice, "calculator");
        assert_eq!(list.records[0].computer.name, "Laptop");
        assert_eq!(
            list.records[0].tool_description(),
            Some("Opens the calculator")
        );
        assert_eq!(list.records[1].voice, "");
        assert!(list.records[1].mcp_tool_description.is_none());
    }

    #[test]
    fn test_null_and_missing_fields_keep_record() {
        let list: CommandList = serde_json::from_str(
            r#"{"records":[
                {"name":"calc","voice":null,"mcpToolDescription":"Opens calc","computer":{"name":"Laptop"}},
                {"voice":"notes","computer":{"name":null}},
                {"name":null,"computer":null}
            ]}"#,
        )
        .unwrap();

        assert_eq!(list.records.len(), 3);
        assert_eq!(list.records[0].name, "calc");
        assert_eq!(list.records[0].voice, "");
        assert_eq!(list.records[0].tool_description(), Some("Opens calc"));
        assert_eq!(list.records[1].name, "");
        assert_eq!(list.records[1].voice, "notes");
        assert_eq!(list.records[1].computer.name, "");
        assert_eq!(list.records[2], RemoteCommand::default());
    }

    #[test]
    fn test_missing_records_is_empty() {
        let list: CommandList = serde_json::from_str("{}").unwrap();
        assert!(list.records.is_empty());
    }

    #[test]
    fn test_blank_description_is_none() {
        let cmd = RemoteCommand {
            name: "x".to_string(),
            mcp_tool_description: Some("  \n ".to_string()),
            ..Default::default()
        };
        assert_eq!(cmd.tool_description(), None);
    }

    #[test]
    fn test_trigger_request_serialization() {
        let req = TriggerRequest::new("calc", "Laptop", None);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"command": "calc", "computer": "Laptop", "params": "", "sender": "MCP"})
        );

        let req = TriggerRequest::new("volume", "Laptop", Some("50"));
        assert_eq!(req.params, "50");
    }

    #[test]
    fn test_summary_key_order() {
        let cmd = RemoteCommand {
            name: "calc".to_string(),
            voice: "calculator".to_string(),
            mcp_tool_description: None,
            computer: Computer {
                name: "Laptop".to_string(),
            },
        };
        let text = serde_json::to_string(&CommandSummary::from(&cmd)).unwrap();
        assert_eq!(
            text,
            r#"{"name":"calc","voice":"calculator","computer":"Laptop","description":""}"#
        );
    }
}
