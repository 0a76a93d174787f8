//! Error types and handling for the MCP server.
//!
//! Startup and transport failures surface through [`Error`]. Tool call
//! failures never do: they are reported to the caller as error results by
//! the dispatcher.

use thiserror::Error;

use crate::domains::resources::ResourceError;
use crate::domains::tools::{RegistryError, ToolError};

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    /// The tool catalog could not be assembled.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Error originating from the resources domain.
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// The configuration cannot be used, e.g. a User-Agent that is not a
    /// valid header value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from the transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_converts() {
        let err: Error = RegistryError::DuplicateName("greet".to_string()).into();
        assert!(matches!(err, Error::Registry(_)));
        assert!(err.to_string().contains("greet"));
    }

    #[test]
    fn test_config_error_message() {
        let err = Error::config("invalid User-Agent");
        assert_eq!(err.to_string(), "Configuration error: invalid User-Agent");
    }
}
