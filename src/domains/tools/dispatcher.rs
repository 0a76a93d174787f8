//! Tool dispatcher.
//!
//! The dispatcher turns a `(tool name, raw arguments)` pair into either an
//! [`Envelope`] or a [`ToolError`]:
//!
//! 1. look the tool up in the registry
//! 2. validate the arguments against its input contract
//! 3. run the handler
//! 4. validate the handler's content against the output contract, if any
//! 5. wrap the content into an envelope
//!
//! It holds no mutable state, so any number of invocations can run
//! concurrently against one shared instance.

use std::sync::Arc;

use serde_json::{Map, Value, json};
use tracing::{error, info, instrument, warn};

use super::envelope::{ContentItem, Envelope};
use super::error::ToolError;
use super::registry::{ToolDescriptor, ToolRegistry};
use super::validator::validate;

/// Dispatches tool calls against a frozen registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Invoke a tool by name.
    ///
    /// A missing argument object is treated as `{}`. No timeout is applied:
    /// the call runs until the handler completes or fails.
    #[instrument(skip(self, raw_args))]
    pub async fn invoke(&self, name: &str, raw_args: Option<Value>) -> Result<Envelope, ToolError> {
        let result = self.try_invoke(name, raw_args).await;

        match &result {
            Ok(_) => info!("Tool '{}' completed", name),
            Err(e) if e.is_caller_error() => warn!("Tool call rejected: {}", e),
            Err(ToolError::InvalidOutput { detail, .. }) => {
                error!("Tool '{}' violated its output contract: {}", name, detail)
            }
            Err(e) => error!("{}", e),
        }

        result
    }

    async fn try_invoke(&self, name: &str, raw_args: Option<Value>) -> Result<Envelope, ToolError> {
        let descriptor = self
            .registry
            .lookup(name)
            .ok_or_else(|| ToolError::unknown_tool(name))?;

        let raw_args = raw_args.unwrap_or_else(|| Value::Object(Map::new()));
        let input = validate(&descriptor.input_contract, &raw_args)?;

        info!("Invoking tool '{}'", name);
        let content = descriptor
            .handler
            .call(input)
            .await
            .map_err(|e| ToolError::handler_failed(name, format!("{e:#}")))?;

        wrap_output(descriptor, content)
    }
}

/// Check the handler's content and build the success envelope.
fn wrap_output(descriptor: &ToolDescriptor, content: Vec<ContentItem>) -> Result<Envelope, ToolError> {
    if content.is_empty() {
        return Err(ToolError::invalid_output(
            &descriptor.name,
            "handler returned no content",
        ));
    }

    let Some(contract) = &descriptor.output_contract else {
        return Ok(Envelope::new(content));
    };

    let structured = json!({ "content": &content });
    validate(contract, &structured)
        .map_err(|e| ToolError::invalid_output(&descriptor.name, e.to_string()))?;

    Ok(Envelope::mirrored(content))
}
