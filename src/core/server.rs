//! MCP Server implementation and lifecycle management.
//!
//! The server owns the frozen tool registry (through the dispatcher) and the
//! resource service. Construction is the initialization phase: once
//! [`McpServer::new`] returns, the catalog can no longer change and the
//! server only serves requests.
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool
//! and registered in `build_registry`. The ToolRouter is derived from the
//! registry in `domains/tools/router.rs`.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::tool::{ToolCallContext, ToolRouter},
    model::*,
    service::RequestContext,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::config::Config;
use super::error::Result;
use crate::domains::resources::{ResourceError, ResourceService, Uptime};
use crate::domains::tools::{Dispatcher, build_registry, build_tool_router, router};

/// The main MCP server handler.
///
/// Cloning is cheap; every clone shares the same registry and services.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Validates and runs tool calls.
    dispatcher: Arc<Dispatcher>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails if the tool catalog is inconsistent (duplicate names, invalid
    /// defaults) or the HTTP client for upstream services cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let uptime = Uptime::start();
        let config = Arc::new(config);

        let registry = Arc::new(build_registry(&config)?);
        let dispatcher = Arc::new(Dispatcher::new(registry.clone()));
        let resource_service = Arc::new(ResourceService::new(&config.server, registry, uptime));

        Ok(Self {
            tool_router: build_tool_router::<Self>(dispatcher.clone()),
            config,
            dispatcher,
            resource_service,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                let mut tool = serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                });
                if let Some(output_schema) = t.output_schema {
                    tool["outputSchema"] = serde_json::Value::Object((*output_schema).clone());
                }
                tool
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Always yields a `CallToolResult`; failures are flagged with `isError`.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<serde_json::Value>,
    ) -> CallToolResult {
        router::call_tool(&self.dispatcher, name, arguments).await
    }

    /// List all available resources (for HTTP transport).
    pub async fn list_resources(&self) -> Vec<serde_json::Value> {
        let resources = self.resource_service.list_resources().await;

        resources
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI (for HTTP transport).
    pub async fn read_resource(
        &self,
        uri: &str,
    ) -> std::result::Result<serde_json::Value, ResourceError> {
        let result = self.resource_service.read_resource(uri).await?;
        Ok(serde_json::json!({
            "contents": result.contents
        }))
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        let mut implementation = Implementation::from_build_env();
        implementation.name = self.config.server.name.clone();
        implementation.version = self.config.server.version.clone();

        ServerInfo {
            instructions: Some(
                "General-purpose tool server. Call tools/list for the catalog and read \
                 server://info for identity and uptime."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: implementation,
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        debug!("Listing tools");
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        if self.tool_router.has_route(&request.name) {
            let ctx = ToolCallContext::new(self, request, context);
            return self.tool_router.call(ctx).await;
        }

        // Unregistered names still go through the dispatcher so the caller
        // gets an error result instead of a protocol error.
        let arguments = request.arguments.map(serde_json::Value::Object);
        Ok(router::call_tool(&self.dispatcher, &request.name, arguments).await)
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| match e {
                ResourceError::NotFound(_) => McpError::resource_not_found(e.to_string(), None),
                ResourceError::Internal(_) => McpError::internal_error(e.to_string(), None),
            })
    }
}
