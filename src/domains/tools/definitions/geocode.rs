//! Geocoding tool definition.
//!
//! Resolves a free-form address to coordinates through a Nominatim-style
//! search endpoint.

use std::sync::Arc;

use anyhow::{Context, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::common::{text_content, with_query};
use crate::domains::tools::contract::{FieldSpec, TypeContract, text_content_contract};
use crate::domains::tools::handlers::{HandlerResult, ToolHandler, parse_input};
use crate::domains::tools::registry::ToolDescriptor;

/// Parameters for the geocoding tool.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeParams {
    pub address: String,
}

/// Query string sent upstream.
#[derive(Debug, Serialize)]
struct SearchQuery<'a> {
    q: &'a str,
    format: &'static str,
    limit: u8,
}

/// One search hit. Nominatim reports coordinates as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}

/// Geocoding tool - address to latitude/longitude.
pub struct GeocodeTool {
    client: Client,
    base_url: String,
}

impl GeocodeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "geocode";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Convert an address or place name into latitude and longitude coordinates.";

    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn input_contract() -> TypeContract {
        TypeContract::object([FieldSpec::required("address", TypeContract::String)
            .describe("Address or place name to look up")])
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor::new(Self::NAME, Self::DESCRIPTION, Self::input_contract(), Arc::new(self))
            .with_output(text_content_contract())
    }

    /// Full request URL for an address.
    pub fn request_url(&self, address: &str) -> anyhow::Result<String> {
        let query = serde_urlencoded::to_string(SearchQuery {
            q: address,
            format: "json",
            limit: 1,
        })?;
        Ok(with_query(&self.base_url, &query))
    }

    #[instrument(skip(self))]
    async fn lookup(&self, address: &str) -> anyhow::Result<Place> {
        let url = self.request_url(address)?;
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Geocoding request failed")?;

        let status = response.status();
        if !status.is_success() {
            warn!("Geocoding upstream returned {}", status);
            bail!("Geocoding request failed with status code {}", status.as_u16());
        }

        let places: Vec<Place> = response
            .json()
            .await
            .context("Failed to parse geocoding response")?;

        places
            .into_iter()
            .next()
            .with_context(|| format!("Address not found: {}", address))
    }

    /// Render a search hit.
    pub fn format_place(place: &Place) -> String {
        format!(
            "Address: {}\nLatitude: {}\nLongitude: {}",
            place.display_name, place.lat, place.lon
        )
    }
}

#[async_trait]
impl ToolHandler for GeocodeTool {
    async fn call(&self, input: Value) -> HandlerResult {
        let params: GeocodeParams = parse_input(input)?;
        info!("Geocoding address: {}", params.address);
        let place = self.lookup(&params.address).await?;
        Ok(text_content(Self::format_place(&place)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn tool_for(server: &MockServer) -> GeocodeTool {
        GeocodeTool::new(Client::new(), format!("{}/search", server.uri()))
    }

    #[test]
    fn test_request_url_encodes_address() {
        let tool = GeocodeTool::new(Client::new(), "https://example.test/search");
        assert_eq!(
            tool.request_url("Seoul City Hall").unwrap(),
            "https://example.test/search?q=Seoul+City+Hall&format=json&limit=1"
        );
    }

    #[tokio::test]
    async fn test_lookup_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Seoul City Hall"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "lat": "37.5663", "lon": "126.9779", "display_name": "Seoul City Hall, Jung-gu" }
            ])))
            .mount(&server)
            .await;

        let content = tool_for(&server)
            .await
            .call(json!({ "address": "Seoul City Hall" }))
            .await
            .unwrap();
        let text = content[0].as_text().unwrap();
        assert!(text.contains("Latitude: 37.5663"));
        assert!(text.contains("Longitude: 126.9779"));
    }

    #[tokio::test]
    async fn test_zero_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = tool_for(&server)
            .await
            .call(json!({ "address": "nowhere at all" }))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Address not found: nowhere at all");
    }

    #[tokio::test]
    async fn test_upstream_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = tool_for(&server)
            .await
            .call(json!({ "address": "Seoul" }))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("status code 503"));
    }

    #[tokio::test]
    #[ignore] // Requires network access to Nominatim
    async fn test_live_lookup() {
        let config = crate::core::config::UpstreamConfig::default();
        let client = super::super::common::http_client(&config).unwrap();
        let tool = GeocodeTool::new(client, config.geocoding_url);

        let content = tool.call(json!({ "address": "Eiffel Tower" })).await.unwrap();
        assert!(content[0].as_text().unwrap().contains("Latitude: 48.8"));
    }
}
