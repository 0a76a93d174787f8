//! Tool-specific error types.

use rmcp::model::{CallToolResult, Content};
use thiserror::Error;

use super::validator::ValidationError;

/// Errors that can occur while dispatching a tool call.
#[derive(Debug, Clone, Error)]
pub enum ToolError {
    /// The requested tool is not registered.
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    /// The arguments did not satisfy the tool's input contract.
    #[error("Invalid input: field '{field}' expected {expected}, got {got}")]
    InvalidInput {
        field: String,
        expected: String,
        got: String,
    },

    /// The handler's own logic or one of its upstream services failed.
    #[error("Tool '{name}' failed: {message}")]
    HandlerFailed { name: String, message: String },

    /// The handler returned a result that violates its output contract.
    /// `detail` is for logs only.
    #[error("Internal error: tool '{name}' produced an invalid result")]
    InvalidOutput { name: String, detail: String },
}

/// Classification of a [`ToolError`], used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    UnknownTool,
    InvalidInput,
    HandlerFailed,
    InvalidOutput,
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool { name: name.into() }
    }

    /// Create a new "handler failed" error.
    pub fn handler_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HandlerFailed {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a new "invalid output" error.
    pub fn invalid_output(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidOutput {
            name: name.into(),
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> ToolErrorKind {
        match self {
            Self::UnknownTool { .. } => ToolErrorKind::UnknownTool,
            Self::InvalidInput { .. } => ToolErrorKind::InvalidInput,
            Self::HandlerFailed { .. } => ToolErrorKind::HandlerFailed,
            Self::InvalidOutput { .. } => ToolErrorKind::InvalidOutput,
        }
    }

    /// Whether the caller can fix the failure by changing the request.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self.kind(),
            ToolErrorKind::UnknownTool | ToolErrorKind::InvalidInput
        )
    }

    /// Flatten the error into the wire shape shared by every failure kind:
    /// an error result with a single text message.
    pub fn into_call_result(self) -> CallToolResult {
        CallToolResult::error(vec![Content::text(self.to_string())])
    }
}

impl From<ValidationError> for ToolError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidInput {
            field: err.field,
            expected: err.expected,
            got: err.got,
        }
    }
}
