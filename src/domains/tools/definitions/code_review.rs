//! Code review prompt tool definition.
//!
//! Expands a fixed review template around the supplied code. Pure: identical
//! inputs always produce identical text.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::common::text_content;
use crate::domains::tools::contract::{FieldSpec, TypeContract, text_content_contract};
use crate::domains::tools::handlers::{HandlerResult, ToolHandler, parse_input};
use crate::domains::tools::registry::ToolDescriptor;

/// Review checklist used when no focus areas are given.
const DEFAULT_FOCUS_AREAS: &[&str] = &[
    "Code quality and readability",
    "Potential bugs or edge cases",
    "Performance considerations",
    "Security concerns",
    "Suggestions for improvement",
];

/// Parameters for the code review prompt tool.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeReviewParams {
    pub code: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub focus_areas: Option<Vec<String>>,
}

/// Code review prompt tool - builds a review request for an LLM.
pub struct CodeReviewPromptTool;

impl CodeReviewPromptTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "code-review-prompt";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Generate a structured code review prompt for the given code, language and focus areas.";

    pub fn input_contract() -> TypeContract {
        TypeContract::object([
            FieldSpec::required("code", TypeContract::String).describe("The code to review"),
            FieldSpec::optional("language", TypeContract::String)
                .describe("Programming language of the code"),
            FieldSpec::optional("focusAreas", TypeContract::array(TypeContract::String))
                .describe("Specific areas to focus on (e.g. security, performance)"),
        ])
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(Self::NAME, Self::DESCRIPTION, Self::input_contract(), Arc::new(Self))
            .with_output(text_content_contract())
    }

    /// Expand the review template.
    pub fn render(params: &CodeReviewParams) -> String {
        let language = params
            .language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty());

        let mut prompt = match language {
            Some(language) => format!("Please review the following {language} code.\n\n"),
            None => "Please review the following code.\n\n".to_string(),
        };

        prompt.push_str(&format!(
            "```{}\n{}\n```\n\n",
            language.unwrap_or_default(),
            params.code.trim_end()
        ));

        match params.focus_areas.as_deref() {
            Some(areas) if !areas.is_empty() => {
                prompt.push_str("Please focus specifically on:\n");
                for area in areas {
                    prompt.push_str(&format!("- {area}\n"));
                }
            }
            _ => {
                prompt.push_str("Please provide a comprehensive review covering:\n");
                for area in DEFAULT_FOCUS_AREAS {
                    prompt.push_str(&format!("- {area}\n"));
                }
            }
        }

        prompt.push_str("\nFor each issue, explain the problem and suggest a concrete fix.");
        prompt
    }
}

#[async_trait]
impl ToolHandler for CodeReviewPromptTool {
    async fn call(&self, input: Value) -> HandlerResult {
        let params: CodeReviewParams = parse_input(input)?;
        Ok(text_content(Self::render(&params)))
    }
}
