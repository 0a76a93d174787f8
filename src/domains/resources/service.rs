//! Resource service implementation.
//!
//! The ResourceService lists the registered resources and resolves read
//! requests. Resource content is computed at read time; nothing is cached.
//!
//! Resources are defined in `definitions/` and registered via `registry.rs`.
//! Adding a new resource does NOT require modifying this file.

use std::sync::Arc;

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use tracing::{debug, info};

use super::definitions::server_info::{ResourceSummary, ServerIdentity, ServerInfo, Uptime};
use super::error::ResourceError;
use super::registry::get_all_resources;
use crate::core::config::ServerConfig;
use crate::domains::tools::ToolRegistry;

/// Service for listing and reading resources.
pub struct ResourceService {
    identity: ServerIdentity,

    /// Read-only view of the tool catalog.
    tools: Arc<ToolRegistry>,

    uptime: Uptime,

    /// Registered resources, in catalog order.
    resources: Vec<ResourceEntry>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// How the content is produced.
    pub content: DynamicResourceType,
}

/// Types of dynamic resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicResourceType {
    /// Server identity, uptime and catalog.
    ServerInfo,
}

impl ResourceService {
    pub fn new(server: &ServerConfig, tools: Arc<ToolRegistry>, uptime: Uptime) -> Self {
        info!("Initializing ResourceService");

        let resources = get_all_resources();
        for entry in &resources {
            info!("Registering resource: {}", entry.resource.raw.uri);
        }

        Self {
            identity: ServerIdentity {
                name: server.name.clone(),
                version: server.version.clone(),
            },
            tools,
            uptime,
            resources,
        }
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .iter()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .iter()
            .find(|entry| entry.resource.raw.uri == uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        debug!(uri, "Reading resource");

        let text = match entry.content {
            DynamicResourceType::ServerInfo => {
                let info = self.server_info();
                serde_json::to_string_pretty(&info)
                    .map_err(|e| ResourceError::internal(e.to_string()))?
            }
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: entry.resource.raw.mime_type.clone(),
                text,
                meta: None,
            }],
        })
    }

    /// Snapshot the server info payload.
    pub fn server_info(&self) -> ServerInfo {
        let resources = self
            .resources
            .iter()
            .map(|entry| ResourceSummary {
                uri: entry.resource.raw.uri.clone(),
                name: entry.resource.raw.name.clone(),
                description: entry.resource.raw.description.clone().unwrap_or_default(),
            })
            .collect();

        ServerInfo::collect(
            self.identity.clone(),
            &self.uptime,
            self.tools.list(),
            resources,
        )
    }
}
