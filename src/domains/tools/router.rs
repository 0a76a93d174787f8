//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Every registered tool becomes one dynamic route whose body delegates to
//! the [`Dispatcher`], so validation and error flattening behave the same on
//! every transport.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::ErrorData as McpError;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter};
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

use super::dispatcher::Dispatcher;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(dispatcher: Arc<Dispatcher>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    let mut router = ToolRouter::new();
    for descriptor in dispatcher.registry().descriptors() {
        router = router.with_route(create_route(descriptor.to_tool(), dispatcher.clone()));
    }
    router
}

/// Create a ToolRoute that forwards a call to the dispatcher.
fn create_route<S>(tool: Tool, dispatcher: Arc<Dispatcher>) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    let name = tool.name.to_string();
    ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().map(Value::Object);
        let dispatcher = dispatcher.clone();
        let name = name.clone();
        async move { Ok::<_, McpError>(call_tool(&dispatcher, &name, args).await) }.boxed()
    })
}

/// Run a tool through the dispatcher and convert the outcome to the MCP
/// result shape. Every failure kind is reported as an error result.
pub async fn call_tool(dispatcher: &Dispatcher, name: &str, args: Option<Value>) -> CallToolResult {
    match dispatcher.invoke(name, args).await {
        Ok(envelope) => envelope.into(),
        Err(e) => e.into_call_result(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::domains::tools::definitions::build_registry;

    struct TestServer {}

    fn test_dispatcher() -> Arc<Dispatcher> {
        let registry = build_registry(&Config::default()).unwrap();
        Arc::new(Dispatcher::new(Arc::new(registry)))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_dispatcher());
        let tools = router.list_all();
        assert_eq!(tools.len(), 7);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"greet"));
        assert!(names.contains(&"calculator"));
        assert!(names.contains(&"time"));
        assert!(names.contains(&"geocode"));
        assert!(names.contains(&"weather"));
        assert!(names.contains(&"code-review-prompt"));
        assert!(names.contains(&"generate-image"));
    }

    #[test]
    fn test_registry_matches_router() {
        let dispatcher = test_dispatcher();
        let registry_names: Vec<_> = dispatcher
            .registry()
            .list()
            .into_iter()
            .map(|t| t.name)
            .collect();

        let router: ToolRouter<TestServer> = build_tool_router(dispatcher);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.to_string()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }

    #[tokio::test]
    async fn test_call_tool_flattens_errors() {
        let dispatcher = test_dispatcher();
        let result = call_tool(&dispatcher, "missing-tool", None).await;
        assert_eq!(result.is_error, Some(true));

        let result = call_tool(
            &dispatcher,
            "calculator",
            Some(serde_json::json!({ "a": 1, "b": 0, "operator": "/" })),
        )
        .await;
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_call_tool_success() {
        let dispatcher = test_dispatcher();
        let result = call_tool(
            &dispatcher,
            "greet",
            Some(serde_json::json!({ "name": "Dana", "language": "ko" })),
        )
        .await;
        assert_eq!(result.is_error, Some(false));
        assert!(result.structured_content.is_some());
    }
}
