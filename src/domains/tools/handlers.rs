//! Tool handler trait.
//!
//! A handler is the function bound to a tool that does its actual work. The
//! dispatcher hands it an input that has already passed the tool's input
//! contract, and treats whatever it returns as opaque content.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::envelope::ContentItem;

/// Result of a handler invocation. The error's message (including its
/// context chain) becomes the `HandlerFailed` message seen by callers.
pub type HandlerResult = anyhow::Result<Vec<ContentItem>>;

/// Trait implemented by every tool body.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with an already validated input.
    async fn call(&self, input: Value) -> HandlerResult;
}

/// Deserialize a validated input into a tool's parameter struct.
pub fn parse_input<T: DeserializeOwned>(input: Value) -> anyhow::Result<T> {
    serde_json::from_value(input).map_err(|e| anyhow::anyhow!("Malformed tool input: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct EchoParams {
        message: String,
    }

    struct EchoHandler;

    #[async_trait]
    impl ToolHandler for EchoHandler {
        async fn call(&self, input: Value) -> HandlerResult {
            let params: EchoParams = parse_input(input)?;
            Ok(vec![ContentItem::text(params.message)])
        }
    }

    #[tokio::test]
    async fn test_handler_receives_input() {
        let content = EchoHandler.call(json!({ "message": "hi" })).await.unwrap();
        assert_eq!(content, vec![ContentItem::text("hi")]);
    }

    #[tokio::test]
    async fn test_parse_input_failure_is_descriptive() {
        let err = EchoHandler.call(json!({})).await.unwrap_err();
        assert!(err.to_string().starts_with("Malformed tool input"));
    }
}
