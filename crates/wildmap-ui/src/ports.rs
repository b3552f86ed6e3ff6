//! Network ports the explorer talks through.
//!
//! Handlers never reach a concrete client directly; tests inject their own
//! implementations of these traits.

use async_trait::async_trait;
use wildmap_core::AppError;
use wildmap_services::{Annotation, AnnotationClient, AnnotationKind, SubmitRequest, SubmitResult};
use wildmap_weather::{
    Coordinate, DeviceLocation, ForecastProvider, ForecastSnapshot, GeocodeClient, GeocodeError,
    LocationError, Place, WeatherError,
};

#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn forecast(&self, coordinate: Coordinate) -> Result<ForecastSnapshot, WeatherError>;
}

#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// `Ok(None)` means the search ran and matched nothing.
    async fn search(&self, query: &str) -> Result<Option<Place>, GeocodeError>;
}

#[async_trait]
pub trait LocationSource: Send + Sync {
    /// False when the platform has no geolocation at all.
    fn is_available(&self) -> bool;

    async fn locate(&self) -> Result<Coordinate, LocationError>;
}

#[async_trait]
pub trait AnnotationSink: Send + Sync {
    async fn load_all(&self, kind: AnnotationKind) -> Result<Vec<Annotation>, AppError>;

    async fn submit(&self, request: SubmitRequest) -> Result<SubmitResult, AppError>;
}

#[async_trait]
impl ForecastSource for ForecastProvider {
    async fn forecast(&self, coordinate: Coordinate) -> Result<ForecastSnapshot, WeatherError> {
        self.fetch(coordinate).await
    }
}

#[async_trait]
impl PlaceSearch for GeocodeClient {
    async fn search(&self, query: &str) -> Result<Option<Place>, GeocodeError> {
        self.resolve(query).await
    }
}

#[async_trait]
impl LocationSource for DeviceLocation {
    fn is_available(&self) -> bool {
        DeviceLocation::is_available(self)
    }

    async fn locate(&self) -> Result<Coordinate, LocationError> {
        self.current_location().await
    }
}

#[async_trait]
impl AnnotationSink for AnnotationClient {
    async fn load_all(&self, kind: AnnotationKind) -> Result<Vec<Annotation>, AppError> {
        AnnotationClient::load_all(self, kind).await
    }

    async fn submit(&self, request: SubmitRequest) -> Result<SubmitResult, AppError> {
        AnnotationClient::submit(self, request).await
    }
}
