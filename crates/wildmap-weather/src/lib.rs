//! Weather and place lookup for Wildmap
//!
//! Provides current weather and air quality via Open-Meteo, forward
//! geocoding via Nominatim and the device location gate.

pub mod forecast;
pub mod geocode;
pub mod location;
pub mod types;

pub use forecast::ForecastProvider;
pub use geocode::GeocodeClient;
pub use location::DeviceLocation;
pub use types::*;
