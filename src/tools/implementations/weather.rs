//! The get_weather tool
//!
//! Current conditions from OpenWeather for a city, with a TTL cache in
//! front of the API so repeat questions inside an hour do not burn quota.
//! The tool is registered but disabled when no API key is configured.

use crate::cli::config::ToolsSection;
use crate::errors::{AgentError, Result};
use crate::tools::cache::TtlCache;
use crate::tools::types::{Tool, ToolArgs, ToolContext, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Mutex;
use std::time::Duration;

const OPENWEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// Parsed current conditions
#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub main: String,
    pub description: String,
    pub temperature_celsius: f64,
    pub humidity: u8,
    pub wind_speed: f64,
}

impl WeatherReport {
    fn render(&self, city: &str) -> String {
        format!(
            "{}: {} ({}), {:.1} C, humidity {}%, wind {} m/s",
            city, self.main, self.description, self.temperature_celsius, self.humidity,
            self.wind_speed
        )
    }
}

// OpenWeather response shapes, only the fields we read
#[derive(Debug, Deserialize)]
struct ApiResponse {
    weather: Vec<ApiWeather>,
    main: ApiMain,
    wind: ApiWind,
}

#[derive(Debug, Deserialize)]
struct ApiWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    /// Kelvin
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct ApiWind {
    speed: f64,
}

pub struct WeatherTool {
    client: reqwest::Client,
    api_key: Option<String>,
    default_city: String,
    cache: Mutex<TtlCache<WeatherReport>>,
}

impl WeatherTool {
    pub fn from_config(config: &ToolsSection) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.openweather_api_key.clone(),
            default_city: config.default_city.clone(),
            cache: Mutex::new(TtlCache::new(Duration::from_secs(
                config.weather_cache_ttl_secs,
            ))),
        }
    }

    async fn fetch(&self, city: &str, api_key: &str) -> Result<WeatherReport> {
        let response = self
            .client
            .get(OPENWEATHER_URL)
            .query(&[("appid", api_key), ("q", city)])
            .send()
            .await
            .map_err(|e| AgentError::Tool(format!("weather service unreachable: {}", e)))?;

        match response.status().as_u16() {
            200 => {}
            404 => {
                return Err(AgentError::Tool(format!(
                    "weather data not found for location '{}'",
                    city
                )))
            }
            429 => {
                return Err(AgentError::Tool(
                    "weather service busy (rate limit), try again in a few minutes".to_string(),
                ))
            }
            status => {
                return Err(AgentError::Tool(format!(
                    "weather service error, status {}",
                    status
                )))
            }
        }

        let parsed: ApiResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Tool(format!("malformed weather response: {}", e)))?;

        let condition = parsed
            .weather
            .first()
            .ok_or_else(|| AgentError::Tool("weather response missing conditions".to_string()))?;

        Ok(WeatherReport {
            main: condition.main.clone(),
            description: condition.description.clone(),
            temperature_celsius: parsed.main.temp - 273.15,
            humidity: parsed.main.humidity,
            wind_speed: parsed.wind.speed,
        })
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn schema(&self) -> ToolSchema {
        let mut schema = ToolSchema::new(
            "get_weather",
            "Get the current weather conditions in a specified city.",
            json!({
                "type": "object",
                "properties": {
                    "city": {
                        "type": "string",
                        "description": "The name of the city to get weather conditions for."
                    }
                },
                "required": []
            }),
        );
        schema.enabled = self.api_key.is_some();
        schema
    }

    async fn execute(&self, args: &ToolArgs, _ctx: &ToolContext) -> Result<String> {
        let api_key = self
            .api_key
            .clone()
            .ok_or_else(|| AgentError::Tool("no OpenWeather API key configured".to_string()))?;
        let city = args
            .optional_str("city")
            .unwrap_or(&self.default_city)
            .to_string();
        let cache_key = format!("weather_{}", city.to_lowercase());

        if let Some(report) = self.cache.lock().unwrap().get(&cache_key) {
            tracing::debug!(city = %city, "serving cached weather");
            return Ok(report.render(&city));
        }

        let report = self.fetch(&city, &api_key).await?;
        let rendered = report.render(&city);
        self.cache.lock().unwrap().insert(cache_key, report);
        Ok(rendered)
    }
}
