//! Shared services for the explorer.
//!
//! `AppServices` bundles the runtime handle with one implementation of each
//! network port. Production code builds it from `Config`; tests build it from
//! their own port implementations.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use wildmap_core::{AppError, Config};
use wildmap_services::{AnnotationClient, AnnotationHttpClient, AnnotationService, JsonFileStore};
use wildmap_weather::{DeviceLocation, ForecastProvider, GeocodeClient};

use crate::ports::{AnnotationSink, ForecastSource, LocationSource, PlaceSearch};

pub struct AppServices {
    runtime: Handle,
    pub forecast: Arc<dyn ForecastSource>,
    pub places: Arc<dyn PlaceSearch>,
    pub location: Arc<dyn LocationSource>,
    pub entries: Arc<dyn AnnotationSink>,
}

impl AppServices {
    pub fn new(
        runtime: Handle,
        forecast: Arc<dyn ForecastSource>,
        places: Arc<dyn PlaceSearch>,
        location: Arc<dyn LocationSource>,
        entries: Arc<dyn AnnotationSink>,
    ) -> Self {
        Self {
            runtime,
            forecast,
            places,
            location,
            entries,
        }
    }

    /// Build the production services.
    ///
    /// With `server_url` set, entries go to a remote Wildmap server;
    /// otherwise they are stored in the configured data directory.
    pub fn from_config(
        config: &Config,
        server_url: Option<&str>,
        runtime: Handle,
    ) -> Result<Self, AppError> {
        let entries = match server_url {
            Some(url) => {
                tracing::info!("Entries go to {}", url);
                let timeout = Duration::from_secs(config.storage.timeout_secs);
                AnnotationClient::http(AnnotationHttpClient::new(url, timeout)?)
            }
            None => {
                let store = JsonFileStore::open(&config.storage.data_dir)?;
                AnnotationClient::local(AnnotationService::new(Arc::new(store)))
            }
        };

        let location = DeviceLocation::from_config(config.location.as_ref());
        if !location.is_available() {
            tracing::warn!("No device location configured");
        }

        Ok(Self::new(
            runtime,
            Arc::new(ForecastProvider::new(&config.weather)?),
            Arc::new(GeocodeClient::new(&config.geocode)?),
            Arc::new(location),
            Arc::new(entries),
        ))
    }

    pub fn runtime(&self) -> &Handle {
        &self.runtime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_config_uses_local_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.storage.data_dir = dir.path().join("data");

        let services = AppServices::from_config(&config, None, Handle::current()).unwrap();
        assert!(!services.location.is_available());
        assert!(dir.path().join("data").is_dir());
    }

    #[tokio::test]
    async fn test_from_config_uses_remote_server() {
        let config = Config::default();
        let services =
            AppServices::from_config(&config, Some("http://maps.example/wildmap"), Handle::current());
        assert!(services.is_ok());
    }

    #[tokio::test]
    async fn test_from_config_rejects_bad_server_url() {
        let config = Config::default();
        assert!(AppServices::from_config(&config, Some("not a url"), Handle::current()).is_err());
    }
}
