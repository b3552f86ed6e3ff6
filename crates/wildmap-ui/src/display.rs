//! Forecast panel text.

use wildmap_weather::{ForecastSnapshot, NOT_AVAILABLE};

/// Display strings for one forecast snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastPanel {
    pub location: String,
    pub temperature: String,
    pub humidity: String,
    pub precipitation: String,
    pub wind: String,
    pub uv_index: String,
    pub sun: String,
    pub air_quality: String,
}

impl ForecastPanel {
    pub fn from_snapshot(snapshot: &ForecastSnapshot) -> Self {
        let wind = match snapshot.wind_speed {
            Some(speed) => format!(
                "{} m/s ({}°)",
                speed,
                value_or_na(snapshot.wind_direction, "")
            ),
            None => NOT_AVAILABLE.to_string(),
        };

        Self {
            location: format!(
                "Lat: {:.4}, Lon: {:.4} ({})",
                snapshot.coordinate.latitude, snapshot.coordinate.longitude, snapshot.timezone
            ),
            temperature: value_or_na(snapshot.temperature, " °C"),
            humidity: value_or_na(snapshot.humidity, " %"),
            precipitation: value_or_na(snapshot.precipitation, " mm"),
            wind,
            uv_index: value_or_na(snapshot.uv_index, ""),
            sun: format!("{} / {}", snapshot.sunrise, snapshot.sunset),
            air_quality: format!(
                "PM2.5: {} — PM10: {}",
                value_or_na(snapshot.pm2_5, " µg/m³"),
                value_or_na(snapshot.pm10, " µg/m³")
            ),
        }
    }
}

fn value_or_na(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v}{unit}"),
        None => NOT_AVAILABLE.to_string(),
    }
}
