//! Tools domain module.
//!
//! This module is the tool-dispatch core of the server. Tools are named,
//! independently invocable operations with a declared input contract, an
//! optional output contract and an async handler.
//!
//! ## Architecture
//!
//! - `contract.rs` - Data-only type contracts and their JSON Schema rendering
//! - `validator.rs` - Generic validation of JSON values against contracts
//! - `registry.rs` - Immutable tool registry, built once at startup
//! - `dispatcher.rs` - Lookup, validation, handler invocation, envelope wrapping
//! - `envelope.rs` - Success envelope and content items
//! - `router.rs` - rmcp ToolRouter built from the registry
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Define its contract and implement [`ToolHandler`]
//! 3. Register it in `definitions::build_registry`
//!
//! **No need to modify the server or the router!**

pub mod contract;
pub mod definitions;
mod dispatcher;
mod envelope;
mod error;
mod handlers;
mod registry;
pub mod router;
pub mod validator;

pub use contract::{FieldSpec, Presence, TypeContract};
pub use definitions::build_registry;
pub use dispatcher::Dispatcher;
pub use envelope::{ContentItem, Envelope, StructuredContent};
pub use error::{ToolError, ToolErrorKind};
pub use handlers::{HandlerResult, ToolHandler, parse_input};
pub use registry::{RegistryError, ToolDescriptor, ToolRegistry, ToolRegistryBuilder, ToolSummary};
pub use router::build_tool_router;
pub use validator::{ValidationError, validate};
