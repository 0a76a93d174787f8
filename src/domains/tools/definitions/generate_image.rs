//! Image generation tool definition.
//!
//! Sends a text prompt to a Hugging Face style inference endpoint, which
//! answers with raw image bytes. The bytes are returned base64-encoded as a
//! single image content item.

use std::sync::Arc;

use anyhow::{Context, bail};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use crate::domains::tools::contract::{FieldSpec, TypeContract};
use crate::domains::tools::envelope::ContentItem;
use crate::domains::tools::handlers::{HandlerResult, ToolHandler, parse_input};
use crate::domains::tools::registry::ToolDescriptor;

/// Used when the provider does not report an image content type.
const DEFAULT_MIME_TYPE: &str = "image/png";

/// Parameters for the image generation tool.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateImageParams {
    pub prompt: String,
}

/// Image generation tool - text prompt to image.
pub struct GenerateImageTool {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GenerateImageTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "generate-image";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Generate an image from a text prompt.";

    pub fn new(client: Client, endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        }
    }

    pub fn input_contract() -> TypeContract {
        TypeContract::object([FieldSpec::required("prompt", TypeContract::String)
            .describe("Description of the image to generate")])
    }

    /// Image results carry no structured mirror, so no output contract.
    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor::new(Self::NAME, Self::DESCRIPTION, Self::input_contract(), Arc::new(self))
    }

    #[instrument(skip_all)]
    async fn generate(&self, prompt: &str) -> anyhow::Result<ContentItem> {
        let Some(api_key) = self.api_key.as_deref() else {
            bail!("Image generation API key is not configured (set MCP_IMAGE_API_KEY)");
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&json!({ "inputs": prompt }))
            .send()
            .await
            .context("Image generation request failed")?;

        let status = response.status();
        if !status.is_success() {
            warn!("Image provider returned {}", status);
            bail!("Image generation failed with status code {}", status.as_u16());
        }

        let mime_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .filter(|v| v.starts_with("image/"))
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());

        let bytes = response
            .bytes()
            .await
            .context("Failed to read generated image")?;
        if bytes.is_empty() {
            bail!("Image provider returned an empty image");
        }

        info!("Generated {} byte {} image", bytes.len(), mime_type);
        Ok(ContentItem::image(STANDARD.encode(&bytes), mime_type))
    }
}

#[async_trait]
impl ToolHandler for GenerateImageTool {
    async fn call(&self, input: Value) -> HandlerResult {
        let params: GenerateImageParams = parse_input(input)?;
        info!("Image generation requested");
        Ok(vec![self.generate(&params.prompt).await?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_missing_credential() {
        let tool = GenerateImageTool::new(Client::new(), "http://127.0.0.1:9", None);
        let err = tool.call(json!({ "prompt": "a cat" })).await.unwrap_err();
        assert!(err.to_string().contains("API key is not configured"));
    }

    #[tokio::test]
    async fn test_image_is_base64_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer secret"))
            .and(body_json(json!({ "inputs": "a cat" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/jpeg")
                    .set_body_bytes(vec![0xff, 0xd8, 0xff]),
            )
            .mount(&server)
            .await;

        let tool = GenerateImageTool::new(Client::new(), server.uri(), Some("secret".to_string()));
        let content = tool.call(json!({ "prompt": "a cat" })).await.unwrap();
        assert_eq!(content, vec![ContentItem::image("/9j/", "image/jpeg")]);
    }

    #[tokio::test]
    async fn test_non_image_content_type_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/octet-stream")
                    .set_body_bytes(vec![1, 2, 3]),
            )
            .mount(&server)
            .await;

        let tool = GenerateImageTool::new(Client::new(), server.uri(), Some("k".to_string()));
        let content = tool.call(json!({ "prompt": "x" })).await.unwrap();
        assert!(matches!(&content[0], ContentItem::Image { mime_type, .. } if mime_type == "image/png"));
    }

    #[tokio::test]
    async fn test_provider_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let tool = GenerateImageTool::new(Client::new(), server.uri(), Some("bad".to_string()));
        let err = tool.call(json!({ "prompt": "x" })).await.unwrap_err();
        assert!(err.to_string().contains("status code 401"));
    }
}
