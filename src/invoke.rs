//! Command invocation: trigger a command and render the outcome as tool text.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

use crate::api::{TriggerClient, TriggerRequest};
use crate::error::BridgeError;

/// Prefix of the tool error returned when no token can be resolved.
pub const MISSING_TOKEN_PREFIX: &str = "Missing TriggerCMD token: ";

/// Trigger `command` on `computer` and render the API response.
///
/// A missing token is reported as a tool-level error without touching the
/// network. Transport failures propagate as `BridgeError::Network`.
pub async fn invoke_command(
    client: &TriggerClient,
    command: &str,
    computer: &str,
    parameters: Option<&str>,
) -> crate::Result<CallToolResult> {
    let token = match client.token().await {
        Ok(token) => token,
        Err(BridgeError::CredentialMissing(cause)) => {
            tracing::warn!(command = %command, computer = %computer, cause = %cause, "no TriggerCMD token");
            return Ok(CallToolResult::error(vec![Content::text(format!(
                "{}{}",
                MISSING_TOKEN_PREFIX, cause
            ))]));
        }
        Err(e) => return Err(e),
    };

    let request = TriggerRequest::new(command, computer, parameters);
    let response = client.trigger(&token, &request).await?;
    let value = response.into_value();

    Ok(CallToolResult::success(vec![Content::text(
        render_trigger_message(command, computer, &value),
    )]))
}

/// `Triggered '<command>' on '<computer>'.\nResponse: <pretty JSON>`
pub fn render_trigger_message(command: &str, computer: &str, response: &Value) -> String {
    let pretty = serde_json::to_string_pretty(response).unwrap_or_else(|_| response.to_string());
    format!(
        "Triggered '{}' on '{}'.\nResponse: {}",
        command, computer, pretty
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{text_of, FakeApi, FakeReply};
    use serde_json::json;

    #[test]
    fn test_render_message_format() {
        let msg = render_trigger_message("calc", "Laptop", &json!({"message": "ok"}));
        assert_eq!(
            msg,
            "Triggered 'calc' on 'Laptop'.\nResponse: {\n  \"message\": \"ok\"\n}"
        );
    }

    #[tokio::test]
    async fn test_missing_token_is_tool_error_without_network() {
        let api = FakeApi::start(FakeReply::ok("{}"), FakeReply::ok("{}")).await;
        let client = TriggerClient::new(&api.config_without_token());

        let result = invoke_command(&client, "calc", "Laptop", None)
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).starts_with(MISSING_TOKEN_PREFIX));
        assert!(text_of(&result).contains("missing.tkn"));
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_plain_text_response_is_synthesized() {
        let api = FakeApi::start(FakeReply::ok("{}"), FakeReply::ok("OK")).await;
        let client = TriggerClient::new(&api.config_with_token("t"));

        let result = invoke_command(&client, "calc", "Laptop", None)
            .await
            .unwrap();
        assert_ne!(result.is_error, Some(true));
        assert_eq!(
            text_of(&result),
            render_trigger_message(
                "calc",
                "Laptop",
                &json!({"status": 200, "ok": true, "body": "OK"})
            )
        );
    }

    #[tokio::test]
    async fn test_json_response_and_payload() {
        let api = FakeApi::start(
            FakeReply::ok("{}"),
            FakeReply::ok(r#"{"message":"Command ran","ok":true}"#),
        )
        .await;
        let client = TriggerClient::new(&api.config_with_token("t"));

        let result = invoke_command(&client, "volume", "Laptop", Some("50"))
            .await
            .unwrap();
        assert!(text_of(&result).starts_with("Triggered 'volume' on 'Laptop'.\nResponse: {"));
        assert!(text_of(&result).contains("\"message\": \"Command ran\""));
        assert_eq!(
            api.triggers(),
            vec![json!({"command": "volume", "computer": "Laptop", "params": "50", "sender": "MCP"})]
        );
    }
}
