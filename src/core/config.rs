//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally through a `.env` file)
//! or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by concern for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Upstream services called by the network tools.
    pub upstream: UpstreamConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Endpoints of the services the network tools delegate to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Nominatim-compatible search endpoint used by `geocode`.
    pub geocoding_url: String,

    /// Open-Meteo-compatible forecast endpoint used by `weather`.
    pub weather_url: String,

    /// Text-to-image inference endpoint used by `generate-image`.
    pub image_url: String,

    /// User-Agent sent with every upstream request. Nominatim rejects
    /// anonymous clients.
    pub user_agent: String,
}

/// Configuration for external API credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Bearer token for the image-generation provider.
    pub image_api_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "image_api_key",
                &self.image_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            geocoding_url: "https://nominatim.openstreetmap.org/search".to_string(),
            weather_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            image_url:
                "https://api-inference.huggingface.co/models/black-forest-labs/FLUX.1-schnell"
                    .to_string(),
            user_agent: format!("tool-dispatch-server/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "tool-dispatch-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            upstream: UpstreamConfig::default(),
            credentials: CredentialsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(url) = std::env::var("MCP_GEOCODING_URL") {
            config.upstream.geocoding_url = url;
        }

        if let Ok(url) = std::env::var("MCP_WEATHER_URL") {
            config.upstream.weather_url = url;
        }

        if let Ok(url) = std::env::var("MCP_IMAGE_API_URL") {
            config.upstream.image_url = url;
        }

        if let Ok(user_agent) = std::env::var("MCP_USER_AGENT") {
            config.upstream.user_agent = user_agent;
        }

        // Load image generation API key
        match std::env::var("MCP_IMAGE_API_KEY") {
            Ok(api_key) if !api_key.trim().is_empty() => {
                config.credentials.image_api_key = Some(api_key);
                info!("Image generation API key loaded from environment");
            }
            _ => {
                warn!("MCP_IMAGE_API_KEY not set - the generate-image tool will fail until it is");
            }
        }

        config
    }
}
