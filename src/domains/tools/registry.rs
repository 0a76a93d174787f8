//! Tool Registry - the process-wide table of tools.
//!
//! The registry is populated once through [`ToolRegistryBuilder`] while the
//! server initializes, then frozen into an immutable [`ToolRegistry`] that
//! is shared by reference between the dispatcher and the resource provider.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use rmcp::model::Tool;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use super::contract::TypeContract;
use super::handlers::ToolHandler;
use super::validator::{ValidationError, validate};

// ============================================================================
// Descriptors
// ============================================================================

/// Everything the dispatcher needs to know about one tool.
#[derive(Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_contract: TypeContract,
    pub output_contract: Option<TypeContract>,
    pub handler: Arc<dyn ToolHandler>,
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_contract: TypeContract,
        handler: Arc<dyn ToolHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_contract,
            output_contract: None,
            handler,
        }
    }

    /// Declare an output contract for this tool.
    pub fn with_output(mut self, contract: TypeContract) -> Self {
        self.output_contract = Some(contract);
        self
    }

    /// Create a Tool model for this descriptor (metadata for `tools/list`).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.clone().into(),
            description: Some(self.description.clone().into()),
            input_schema: Arc::new(self.input_contract.to_schema_object()),
            annotations: None,
            output_schema: self
                .output_contract
                .as_ref()
                .map(|c| Arc::new(c.to_schema_object())),
            icons: None,
            meta: None,
            title: None,
        }
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_contract", &self.input_contract)
            .field("output_contract", &self.output_contract)
            .finish_non_exhaustive()
    }
}

/// Name and description of a registered tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolSummary {
    pub name: String,
    pub description: String,
}

// ============================================================================
// Errors
// ============================================================================

/// Errors raised while populating the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A tool with this name is already registered.
    #[error("Tool already registered: {0}")]
    DuplicateName(String),

    /// A tool's input contract is not an object.
    #[error("Input contract of tool '{0}' must be an object")]
    InputNotObject(String),

    /// A declared default does not satisfy its own field contract.
    #[error("Invalid default in tool '{tool}': {source}")]
    InvalidDefault {
        tool: String,
        #[source]
        source: ValidationError,
    },
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Collects tool descriptors during initialization.
#[derive(Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Names are unique for the lifetime of the process.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<(), RegistryError> {
        if self.index.contains_key(&descriptor.name) {
            return Err(RegistryError::DuplicateName(descriptor.name));
        }
        if !descriptor.input_contract.is_object() {
            return Err(RegistryError::InputNotObject(descriptor.name));
        }
        check_defaults(&descriptor.input_contract).map_err(|source| {
            RegistryError::InvalidDefault {
                tool: descriptor.name.clone(),
                source,
            }
        })?;

        debug!("Registering tool: {}", descriptor.name);
        self.index
            .insert(descriptor.name.clone(), self.tools.len());
        self.tools.push(descriptor);
        Ok(())
    }

    /// Register a tool, builder style.
    pub fn with(mut self, descriptor: ToolDescriptor) -> Result<Self, RegistryError> {
        self.register(descriptor)?;
        Ok(self)
    }

    /// Freeze the registry. No tool can be added afterwards.
    pub fn build(self) -> ToolRegistry {
        info!("Tool registry frozen with {} tools", self.tools.len());
        ToolRegistry {
            tools: self.tools,
            index: self.index,
        }
    }
}

/// The immutable table of registered tools.
#[derive(Debug)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::new()
    }

    /// Find a tool by name.
    pub fn lookup(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Name and description of every tool, in registration order.
    pub fn list(&self) -> Vec<ToolSummary> {
        self.tools
            .iter()
            .map(|t| ToolSummary {
                name: t.name.clone(),
                description: t.description.clone(),
            })
            .collect()
    }

    /// Get all tools as Tool models (metadata), in registration order.
    pub fn tools(&self) -> Vec<Tool> {
        self.tools.iter().map(ToolDescriptor::to_tool).collect()
    }

    /// Iterate over the descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Check every declared default against the contract of its field.
fn check_defaults(contract: &TypeContract) -> Result<(), ValidationError> {
    match contract {
        TypeContract::Object(fields) => {
            for field in fields {
                if let Some(default) = field.default_value() {
                    validate(&field.contract, default).map_err(|mut err| {
                        err.field = field.name.clone();
                        err
                    })?;
                }
                check_defaults(&field.contract)?;
            }
            Ok(())
        }
        TypeContract::Array(items) => check_defaults(items),
        _ => Ok(()),
    }
}
