//! Current time tool definition.

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::common::text_content;
use crate::domains::tools::contract::{FieldSpec, TypeContract, text_content_contract};
use crate::domains::tools::handlers::{HandlerResult, ToolHandler, parse_input};
use crate::domains::tools::registry::ToolDescriptor;

/// Parameters for the time tool.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeParams {
    /// IANA timezone name, e.g. `Asia/Seoul`.
    pub timezone: String,
}

/// Time tool - reports the current time in an IANA timezone.
pub struct TimeTool;

impl TimeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "time";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get the current time in a given IANA timezone (e.g. 'Asia/Seoul', 'America/New_York').";

    pub fn input_contract() -> TypeContract {
        TypeContract::object([FieldSpec::required("timezone", TypeContract::String)
            .describe("IANA timezone name, e.g. 'Asia/Seoul'")])
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(Self::NAME, Self::DESCRIPTION, Self::input_contract(), Arc::new(Self))
            .with_output(text_content_contract())
    }

    /// Format `now` in the named timezone.
    pub fn format_in(timezone: &str, now: DateTime<Utc>) -> anyhow::Result<String> {
        let tz: Tz = timezone
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid timezone: {}", timezone))?;
        let local = now.with_timezone(&tz);
        Ok(format!(
            "Current time in {}: {}",
            tz.name(),
            local.format("%Y-%m-%d %H:%M:%S %Z (UTC%:z)")
        ))
    }
}

#[async_trait]
impl ToolHandler for TimeTool {
    async fn call(&self, input: Value) -> HandlerResult {
        let params: TimeParams = parse_input(input)?;
        info!("Time requested for timezone: {}", params.timezone);
        Ok(text_content(Self::format_in(&params.timezone, Utc::now())?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 3, 4, 5).unwrap()
    }

    #[test]
    fn test_format_in_seoul() {
        let text = TimeTool::format_in("Asia/Seoul", fixed_now()).unwrap();
        assert_eq!(text, "Current time in Asia/Seoul: 2024-01-15 12:04:05 KST (UTC+09:00)");
    }

    #[test]
    fn test_format_in_utc() {
        let text = TimeTool::format_in("UTC", fixed_now()).unwrap();
        assert!(text.contains("2024-01-15 03:04:05"));
    }

    #[test]
    fn test_invalid_timezone() {
        let err = TimeTool::format_in("Mars/Olympus_Mons", fixed_now()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid timezone: Mars/Olympus_Mons");
    }

    #[tokio::test]
    async fn test_call_reports_timezone() {
        let content = TimeTool.call(json!({ "timezone": "Europe/Paris" })).await.unwrap();
        assert!(content[0].as_text().unwrap().starts_with("Current time in Europe/Paris"));
    }
}
