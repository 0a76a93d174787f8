//! Tool Dispatch Server Library
//!
//! An MCP (Model Context Protocol) server whose tools declare typed input
//! and output contracts. Every call is validated against the input contract
//! before the handler runs, and every successful result is checked against
//! the output contract before it is returned.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the server handler and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Contracts, validator, registry, dispatcher and the tool catalog
//!   - **resources**: The `server://info` resource
//!
//! # Example
//!
//! ```rust,no_run
//! use tool_dispatch_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
