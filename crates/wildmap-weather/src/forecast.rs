//! Forecast client: current weather plus air quality for one coordinate.
//! Uses Open-Meteo - free, no API key required.

use crate::types::{
    Coordinate, ForecastService, ForecastSnapshot, WeatherError, NOT_AVAILABLE,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use wildmap_core::WeatherConfig;

const HOURLY_WEATHER_FIELDS: &str =
    "temperature_2m,relativehumidity_2m,precipitation,windspeed_10m,winddirection_10m,uv_index";
const HOURLY_AIR_QUALITY_FIELDS: &str = "pm10,pm2_5";
const DAILY_FIELDS: &str = "sunrise,sunset";

/// Hourly series as returned upstream; individual samples may be null
type Series = Option<Vec<Option<f64>>>;

/// Raw forecast endpoint payload. Every block is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ForecastResponse {
    pub current_weather: Option<CurrentConditions>,
    pub hourly: Option<HourlyWeather>,
    pub daily: Option<DailySun>,
    pub timezone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CurrentConditions {
    pub temperature: Option<f64>,
    pub windspeed: Option<f64>,
    pub winddirection: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HourlyWeather {
    pub temperature_2m: Series,
    pub relativehumidity_2m: Series,
    pub precipitation: Series,
    pub windspeed_10m: Series,
    pub winddirection_10m: Series,
    pub uv_index: Series,
}

#[derive(Debug, Default, Deserialize)]
pub struct DailySun {
    pub sunrise: Option<Vec<Option<String>>>,
    pub sunset: Option<Vec<Option<String>>>,
}

/// Raw air-quality endpoint payload
#[derive(Debug, Default, Deserialize)]
pub struct AirQualityResponse {
    pub hourly: Option<HourlyAirQuality>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HourlyAirQuality {
    pub pm10: Series,
    pub pm2_5: Series,
}

fn first_sample(series: &Series) -> Option<f64> {
    series.as_deref().and_then(|s| s.first().copied().flatten())
}

fn hourly_first(
    hourly: Option<&HourlyWeather>,
    pick: impl Fn(&HourlyWeather) -> &Series,
) -> Option<f64> {
    hourly.and_then(|h| first_sample(pick(h)))
}

fn last_sample(series: &Series) -> Option<f64> {
    series.as_deref().and_then(|s| s.last().copied().flatten())
}

fn first_day(series: Option<&Vec<Option<String>>>) -> String {
    series
        .and_then(|s| s.first())
        .and_then(|v| v.as_deref())
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

impl ForecastSnapshot {
    /// Combine the two upstream payloads into one display record.
    ///
    /// Temperature and wind prefer current conditions and fall back to the
    /// first hourly sample. Humidity, precipitation and UV always use the
    /// first hourly sample. PM values use the last hourly sample.
    pub fn from_responses(
        coordinate: Coordinate,
        weather: &ForecastResponse,
        air: &AirQualityResponse,
    ) -> Self {
        let current = weather.current_weather.as_ref();
        let hourly = weather.hourly.as_ref();

        let temperature = current
            .and_then(|c| c.temperature)
            .or_else(|| hourly_first(hourly, |h| &h.temperature_2m));
        let wind_speed = current
            .and_then(|c| c.windspeed)
            .or_else(|| hourly_first(hourly, |h| &h.windspeed_10m));
        let wind_direction = current
            .and_then(|c| c.winddirection)
            .or_else(|| hourly_first(hourly, |h| &h.winddirection_10m));

        let daily = weather.daily.as_ref();
        let air_hourly = air.hourly.as_ref();

        Self {
            coordinate,
            timezone: weather.timezone.clone().unwrap_or_default(),
            temperature,
            wind_speed,
            wind_direction,
            humidity: hourly_first(hourly, |h| &h.relativehumidity_2m),
            precipitation: hourly_first(hourly, |h| &h.precipitation),
            uv_index: hourly_first(hourly, |h| &h.uv_index),
            sunrise: first_day(daily.and_then(|d| d.sunrise.as_ref())),
            sunset: first_day(daily.and_then(|d| d.sunset.as_ref())),
            pm2_5: air_hourly.and_then(|h| last_sample(&h.pm2_5)),
            pm10: air_hourly.and_then(|h| last_sample(&h.pm10)),
        }
    }
}

/// Client for the forecast and air-quality endpoints
#[derive(Debug, Clone)]
pub struct ForecastProvider {
    client: Arc<Client>,
    forecast_url: String,
    air_quality_url: String,
}

impl ForecastProvider {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        Self::with_endpoints(
            &config.forecast_url,
            &config.air_quality_url,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn with_endpoints(
        forecast_url: &str,
        air_quality_url: &str,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let mut builder = Client::builder();
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client: Arc::new(client),
            forecast_url: forecast_url.to_string(),
            air_quality_url: air_quality_url.to_string(),
        })
    }

    /// Fetch both endpoints concurrently and normalize the result.
    ///
    /// Fails as a whole when either request fails; no partial snapshot is returned.
    pub async fn fetch(&self, coordinate: Coordinate) -> Result<ForecastSnapshot, WeatherError> {
        let (weather, air) = tokio::try_join!(
            self.fetch_weather(coordinate),
            self.fetch_air_quality(coordinate)
        )?;

        tracing::debug!(
            "Forecast for {} resolved (timezone {:?})",
            coordinate,
            weather.timezone
        );
        Ok(ForecastSnapshot::from_responses(coordinate, &weather, &air))
    }

    async fn fetch_weather(&self, coordinate: Coordinate) -> Result<ForecastResponse, WeatherError> {
        let query = [
            ("latitude", coordinate.latitude.to_string()),
            ("longitude", coordinate.longitude.to_string()),
            ("hourly", HOURLY_WEATHER_FIELDS.to_string()),
            ("current_weather", "true".to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
        ];
        self.get_json(ForecastService::Weather, &self.forecast_url, &query)
            .await
    }

    async fn fetch_air_quality(
        &self,
        coordinate: Coordinate,
    ) -> Result<AirQualityResponse, WeatherError> {
        let query = [
            ("latitude", coordinate.latitude.to_string()),
            ("longitude", coordinate.longitude.to_string()),
            ("hourly", HOURLY_AIR_QUALITY_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
        ];
        self.get_json(ForecastService::AirQuality, &self.air_quality_url, &query)
            .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        service: ForecastService,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        tracing::debug!("{} request: {} {:?}", service, url, query);
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} endpoint returned status {}", service, status);
            return Err(WeatherError::Status {
                service,
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| WeatherError::Parse(format!("{service} response: {e}")))
    }
}
