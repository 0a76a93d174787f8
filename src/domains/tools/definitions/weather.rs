//! Weather forecast tool definition.
//!
//! Fetches current conditions and a daily forecast from an Open-Meteo style
//! endpoint and renders them as text.

use std::sync::Arc;

use anyhow::{Context, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use super::common::{text_content, with_query};
use crate::domains::tools::contract::{FieldSpec, TypeContract, text_content_contract};
use crate::domains::tools::handlers::{HandlerResult, ToolHandler, parse_input};
use crate::domains::tools::registry::ToolDescriptor;

/// Forecast length bounds accepted upstream.
const MIN_FORECAST_DAYS: f64 = 1.0;
const MAX_FORECAST_DAYS: f64 = 16.0;

const CURRENT_FIELDS: &str = "temperature_2m,weather_code,wind_speed_10m";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum";

/// Parameters for the weather tool.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherParams {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub forecast_days: f64,
}

/// Query string sent upstream.
#[derive(Debug, Serialize)]
struct ForecastQuery<'a> {
    latitude: f64,
    longitude: f64,
    current: &'static str,
    daily: &'static str,
    timezone: &'a str,
    forecast_days: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub current: Option<CurrentWeather>,
    #[serde(default)]
    pub daily: Option<DailyForecast>,
}

/// Open-Meteo reports unavailable values as `null`, so every measurement is
/// optional.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    #[serde(default)]
    pub temperature_2m: Option<f64>,
    #[serde(default)]
    pub weather_code: Option<u8>,
    #[serde(default)]
    pub wind_speed_10m: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyForecast {
    pub time: Vec<String>,
    #[serde(default)]
    pub weather_code: Vec<Option<u8>>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
}

/// Weather tool - current conditions and daily forecast for a coordinate.
pub struct WeatherTool {
    client: Client,
    base_url: String,
}

impl WeatherTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "weather";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get current weather and a daily forecast (1-16 days) for a latitude/longitude.";

    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn input_contract() -> TypeContract {
        TypeContract::object([
            FieldSpec::required("latitude", TypeContract::Number).describe("Latitude in degrees"),
            FieldSpec::required("longitude", TypeContract::Number).describe("Longitude in degrees"),
            FieldSpec::with_default("timezone", TypeContract::String, json!("auto"))
                .describe("IANA timezone for the forecast, or 'auto' (default)"),
            FieldSpec::with_default("forecastDays", TypeContract::Number, json!(7))
                .describe("Number of forecast days, 1-16 (default: 7)"),
        ])
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor::new(Self::NAME, Self::DESCRIPTION, Self::input_contract(), Arc::new(self))
            .with_output(text_content_contract())
    }

    /// Full request URL for a forecast query. `forecastDays` is clamped here.
    pub fn request_url(&self, params: &WeatherParams) -> anyhow::Result<String> {
        let query = serde_urlencoded::to_string(ForecastQuery {
            latitude: params.latitude,
            longitude: params.longitude,
            current: CURRENT_FIELDS,
            daily: DAILY_FIELDS,
            timezone: &params.timezone,
            forecast_days: clamp_forecast_days(params.forecast_days),
        })?;
        Ok(with_query(&self.base_url, &query))
    }

    #[instrument(skip(self))]
    async fn fetch(&self, params: &WeatherParams) -> anyhow::Result<ForecastResponse> {
        let url = self.request_url(params)?;
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Weather request failed")?;

        let status = response.status();
        if !status.is_success() {
            warn!("Weather upstream returned {}", status);
            bail!("Weather request failed with status code {}", status.as_u16());
        }

        response
            .json()
            .await
            .context("Failed to parse weather response")
    }

    /// Render a forecast as text.
    pub fn format_forecast(params: &WeatherParams, forecast: &ForecastResponse) -> anyhow::Result<String> {
        let daily = match &forecast.daily {
            Some(daily) if !daily.time.is_empty() => daily,
            _ => bail!("No forecast data available"),
        };

        let mut text = format!(
            "Weather for ({}, {})",
            params.latitude, params.longitude
        );
        if let Some(tz) = &forecast.timezone {
            text.push_str(&format!(" [{}]", tz));
        }
        text.push('\n');

        if let Some(current) = &forecast.current {
            text.push_str(&format!(
                "\nNow: {}, {}°C",
                describe_optional_code(current.weather_code),
                display_value(current.temperature_2m)
            ));
            if let Some(wind) = current.wind_speed_10m {
                text.push_str(&format!(", wind {} km/h", wind));
            }
            text.push('\n');
        }

        text.push_str("\nForecast:");
        for (i, date) in daily.time.iter().enumerate() {
            let description = describe_optional_code(daily.weather_code.get(i).copied().flatten());
            let min = display_value(daily.temperature_2m_min.get(i).copied().flatten());
            let max = display_value(daily.temperature_2m_max.get(i).copied().flatten());
            text.push_str(&format!("\n{}: {}, {}°C / {}°C", date, description, min, max));
            if let Some(rain) = daily.precipitation_sum.get(i).copied().flatten() {
                text.push_str(&format!(", precipitation {} mm", rain));
            }
        }

        Ok(text)
    }
}

#[async_trait]
impl ToolHandler for WeatherTool {
    async fn call(&self, input: Value) -> HandlerResult {
        let params: WeatherParams = parse_input(input)?;
        info!(
            "Weather requested for ({}, {}), {} day(s)",
            params.latitude,
            params.longitude,
            clamp_forecast_days(params.forecast_days)
        );
        let forecast = self.fetch(&params).await?;
        Ok(text_content(Self::format_forecast(&params, &forecast)?))
    }
}

/// Render a measurement, or `n/a` when upstream had none.
fn display_value(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

fn describe_optional_code(code: Option<u8>) -> &'static str {
    code.map_or("Unknown", describe_weather_code)
}

/// Clamp a requested forecast length to the 1-16 day range.
///
/// Fractional days are rounded to the nearest whole day first, halves away
/// from zero (`2.5` becomes 3).
pub fn clamp_forecast_days(days: f64) -> u8 {
    days.round().clamp(MIN_FORECAST_DAYS, MAX_FORECAST_DAYS) as u8
}

/// Map a WMO weather interpretation code to a description.
pub fn describe_weather_code(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}
