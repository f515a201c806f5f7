//! Weather/geocode provider port and the OpenWeather HTTP implementation.
//!
//! The port is request/response only: no retries, no cancellation. A failed
//! call surfaces to the caller, which waits for an explicit user retry.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use smartweather_core::{NetworkError, ProviderConfig, ReqwestErrorExt};

use crate::types::{RawForecastEntry, RawForecastResponse, RawGeoResult, RawWeather};

const USER_AGENT: &str = "SmartWeather/0.1.0";

/// Provider errors
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Provider returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Provider rejected the API key")]
    Unauthorized,

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ProviderError::Parse(e.to_string())
        } else {
            ProviderError::Network(e.into_network_error())
        }
    }
}

/// External weather/geocode collaborator.
///
/// Units on the wire: Kelvin, meters, m/s, hPa.
pub trait WeatherApi: Send + Sync {
    fn current_weather(
        &self,
        lat: f64,
        lon: f64,
    ) -> impl Future<Output = Result<RawWeather, ProviderError>> + Send;

    /// 3-hour cadence, chronological.
    fn forecast(
        &self,
        lat: f64,
        lon: f64,
    ) -> impl Future<Output = Result<Vec<RawForecastEntry>, ProviderError>> + Send;

    /// Zero hits is `Ok(vec![])`; the caller decides whether that is "not found".
    fn geocode(
        &self,
        query: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<RawGeoResult>, ProviderError>> + Send;
}

/// OpenWeather client (data/2.5 + geo/1.0).
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    weather_base_url: String,
    geo_base_url: String,
}

impl OpenWeatherClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let api_key = config.resolved_api_key().unwrap_or_else(|| {
            tracing::warn!("No OpenWeather API key configured; requests will be rejected");
            String::new()
        });

        Self::with_base_urls(
            api_key,
            &config.weather_base_url,
            &config.geo_base_url,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn with_base_urls(
        api_key: impl Into<String>,
        weather_base_url: &str,
        geo_base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            weather_base_url: weather_base_url.trim_end_matches('/').to_string(),
            geo_base_url: geo_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Provider rejected API key");
            return Err(ProviderError::Unauthorized);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::debug!("Provider returned status {}: {}", status, message);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

impl WeatherApi for OpenWeatherClient {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn current_weather(&self, lat: f64, lon: f64) -> Result<RawWeather, ProviderError> {
        let url = format!("{}/weather", self.weather_base_url);
        self.get_json(&url, &[("lat", lat.to_string()), ("lon", lon.to_string())])
            .await
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn forecast(&self, lat: f64, lon: f64) -> Result<Vec<RawForecastEntry>, ProviderError> {
        let url = format!("{}/forecast", self.weather_base_url);
        let body: RawForecastResponse = self
            .get_json(&url, &[("lat", lat.to_string()), ("lon", lon.to_string())])
            .await?;
        Ok(body.list)
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn geocode(&self, query: &str, limit: u32) -> Result<Vec<RawGeoResult>, ProviderError> {
        let url = format!("{}/direct", self.geo_base_url);
        let results: Vec<RawGeoResult> = self
            .get_json(&url, &[("q", query.to_string()), ("limit", limit.to_string())])
            .await?;
        tracing::debug!("Geocode returned {} result(s)", results.len());
        Ok(results)
    }
}
