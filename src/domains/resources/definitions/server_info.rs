//! Server info resource definition.
//!
//! Reports the server identity, its uptime and the tool/resource catalog.
//! The payload is recomputed on every read.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ResourceDefinition;
use crate::domains::resources::service::DynamicResourceType;
use crate::domains::tools::ToolSummary;

/// Server information resource (dynamic).
pub struct ServerInfoResource;

impl ResourceDefinition for ServerInfoResource {
    const URI: &'static str = "server://info";
    const NAME: &'static str = "server-info";
    const DESCRIPTION: &'static str =
        "Server identity, uptime and the catalog of registered tools and resources";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> DynamicResourceType {
        DynamicResourceType::ServerInfo
    }
}

/// The process start, captured once.
///
/// The wall-clock timestamp is reported to clients; elapsed time is measured
/// on the monotonic clock so uptime never goes backwards.
#[derive(Debug, Clone, Copy)]
pub struct Uptime {
    started_at: DateTime<Utc>,
    started: Instant,
}

impl Uptime {
    /// Capture the current instant as the process start.
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Whole seconds since start.
    pub fn seconds(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

/// Name and version reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerIdentity {
    pub name: String,
    pub version: String,
}

/// Catalog entry for a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceSummary {
    pub uri: String,
    pub name: String,
    pub description: String,
}

/// Payload of the server info resource.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub identity: ServerIdentity,
    pub start_time: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub uptime_formatted: String,
    pub tools: Vec<ToolSummary>,
    pub resources: Vec<ResourceSummary>,
    pub generated_at: DateTime<Utc>,
}

impl ServerInfo {
    /// Snapshot the server state as of now.
    pub fn collect(
        identity: ServerIdentity,
        uptime: &Uptime,
        tools: Vec<ToolSummary>,
        resources: Vec<ResourceSummary>,
    ) -> Self {
        let uptime_seconds = uptime.seconds();
        Self {
            identity,
            start_time: uptime.started_at(),
            uptime_seconds,
            uptime_formatted: format_uptime(uptime_seconds),
            tools,
            resources,
            generated_at: Utc::now(),
        }
    }
}

/// Format a duration as `1d 2h 3m 4s`, omitting leading zero units.
pub fn format_uptime(total_seconds: u64) -> String {
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_info_metadata() {
        assert_eq!(ServerInfoResource::URI, "server://info");
        assert_eq!(ServerInfoResource::MIME_TYPE, "application/json");
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "0s");
        assert_eq!(format_uptime(59), "59s");
        assert_eq!(format_uptime(61), "1m 1s");
        assert_eq!(format_uptime(3_600), "1h 0m 0s");
        assert_eq!(format_uptime(90_061), "1d 1h 1m 1s");
    }

    #[test]
    fn test_collect_serializes_camel_case() {
        let info = ServerInfo::collect(
            ServerIdentity {
                name: "test".to_string(),
                version: "0.0.1".to_string(),
            },
            &Uptime::start(),
            vec![],
            vec![],
        );
        let value = serde_json::to_value(&info).unwrap();
        for key in [
            "identity",
            "startTime",
            "uptimeSeconds",
            "uptimeFormatted",
            "tools",
            "resources",
            "generatedAt",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["identity"]["name"], "test");
    }
}
