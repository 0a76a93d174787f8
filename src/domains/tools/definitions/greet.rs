//! Greeting tool definition.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use super::common::text_content;
use crate::domains::tools::contract::{FieldSpec, TypeContract, text_content_contract};
use crate::domains::tools::handlers::{HandlerResult, ToolHandler, parse_input};
use crate::domains::tools::registry::ToolDescriptor;

/// Greeting language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ko,
    En,
}

/// Parameters for the greeting tool.
#[derive(Debug, Clone, Deserialize)]
pub struct GreetParams {
    pub name: String,
    pub language: Language,
}

/// Greeting tool - greets someone in Korean or English.
pub struct GreetTool;

impl GreetTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "greet";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Greet someone by name in Korean or English.";

    pub fn input_contract() -> TypeContract {
        TypeContract::object([
            FieldSpec::required("name", TypeContract::String).describe("Name of the person to greet"),
            FieldSpec::with_default("language", TypeContract::string_enum(["ko", "en"]), json!("en"))
                .describe("Greeting language: 'ko' or 'en' (default: en)"),
        ])
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(Self::NAME, Self::DESCRIPTION, Self::input_contract(), Arc::new(Self))
            .with_output(text_content_contract())
    }

    /// Build the greeting text.
    pub fn greeting(params: &GreetParams) -> String {
        match params.language {
            Language::Ko => format!("안녕하세요, {}님!", params.name),
            Language::En => format!("Hey there, {}! 👋 Nice to meet you!", params.name),
        }
    }
}

#[async_trait]
impl ToolHandler for GreetTool {
    async fn call(&self, input: Value) -> HandlerResult {
        let params: GreetParams = parse_input(input)?;
        info!("Greeting {} ({:?})", params.name, params.language);
        Ok(text_content(Self::greeting(&params)))
    }
}
