//! Tool definitions module.
//!
//! Each tool is defined in its own file with its name, description, input
//! contract and handler. [`build_registry`] is the single place where the
//! catalog is assembled.

pub mod calculator;
pub mod code_review;
pub mod common;
pub mod generate_image;
pub mod geocode;
pub mod greet;
pub mod time;
pub mod weather;

pub use calculator::CalculatorTool;
pub use code_review::CodeReviewPromptTool;
pub use generate_image::GenerateImageTool;
pub use geocode::GeocodeTool;
pub use greet::GreetTool;
pub use time::TimeTool;
pub use weather::WeatherTool;

use tracing::info;

use super::registry::ToolRegistry;
use crate::core::config::Config;
use crate::core::error::{Error, Result};

/// Build the registry with all available tools, in catalog order.
pub fn build_registry(config: &Config) -> Result<ToolRegistry> {
    let client = common::http_client(&config.upstream)
        .map_err(|e| Error::config(format!("{e:#}")))?;

    let registry = ToolRegistry::builder()
        .with(GreetTool::descriptor())?
        .with(CalculatorTool::descriptor())?
        .with(TimeTool::descriptor())?
        .with(GeocodeTool::new(client.clone(), &config.upstream.geocoding_url).descriptor())?
        .with(WeatherTool::new(client.clone(), &config.upstream.weather_url).descriptor())?
        .with(CodeReviewPromptTool::descriptor())?
        .with(
            GenerateImageTool::new(
                client,
                &config.upstream.image_url,
                config.credentials.image_api_key.clone(),
            )
            .descriptor(),
        )?
        .build();

    info!("Registered {} tools", registry.len());
    Ok(registry)
}
