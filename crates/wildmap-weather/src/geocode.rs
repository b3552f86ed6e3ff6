//! Forward geocoding: resolve a free-text place name to a coordinate.
//! Uses Nominatim (OpenStreetMap) - free, no API key required, contact address mandatory.

use crate::types::{Coordinate, GeocodeError, Place};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use wildmap_core::GeocodeConfig;

/// Nominatim reports coordinates as strings; other providers use numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn parse(&self, field: &str) -> Result<f64, GeocodeError> {
        match self {
            Degrees::Number(v) => Ok(*v),
            Degrees::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| GeocodeError::Parse(format!("invalid {field}: {s:?}"))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: Degrees,
    lon: Degrees,
    display_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    search_url: String,
    contact_email: String,
}

impl GeocodeClient {
    pub fn new(config: &GeocodeConfig) -> Result<Self, GeocodeError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }

        Ok(Self {
            client: builder.build()?,
            search_url: config.search_url.clone(),
            contact_email: config.contact_email.clone(),
        })
    }

    /// Resolve `query` to the best matching place.
    ///
    /// Returns `Ok(None)` when the provider has no match. Blank queries are
    /// rejected locally without issuing a request.
    pub async fn resolve(&self, query: &str) -> Result<Option<Place>, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        tracing::debug!("Geocode request: {} q={:?}", self.search_url, query);
        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("format", "json"),
                ("q", query),
                ("limit", "1"),
                ("email", self.contact_email.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Geocode returned status {}", status);
            return Err(GeocodeError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let hits: Vec<SearchHit> = response
            .json()
            .await
            .map_err(|e| GeocodeError::Parse(e.to_string()))?;

        let Some(hit) = hits.into_iter().next() else {
            tracing::info!("No geocode match for {:?}", query);
            return Ok(None);
        };

        let coordinate = Coordinate::new(hit.lat.parse("lat")?, hit.lon.parse("lon")?);
        let display_name = hit.display_name.unwrap_or_else(|| coordinate.to_string());

        tracing::info!("Geocoded {:?} to {} ({})", query, display_name, coordinate);
        Ok(Some(Place {
            coordinate,
            display_name,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeocodeClient {
        GeocodeClient::new(&GeocodeConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_blank_query_is_rejected_locally() {
        let result = client().resolve("   ").await;
        assert!(matches!(result, Err(GeocodeError::EmptyQuery)));
    }

    #[test]
    fn test_degrees_accept_strings_and_numbers() {
        let hit: SearchHit = serde_json::from_str(
            r#"{"lat": "52.5170365", "lon": 13.3888599, "display_name": "Berlin, Deutschland"}"#,
        )
        .unwrap();
        assert_eq!(hit.lat.parse("lat").unwrap(), 52.5170365);
        assert_eq!(hit.lon.parse("lon").unwrap(), 13.3888599);
    }

    #[test]
    fn test_degrees_reject_garbage() {
        let d = Degrees::Text("north-ish".into());
        assert!(matches!(d.parse("lat"), Err(GeocodeError::Parse(_))));
    }
}
