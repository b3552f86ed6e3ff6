//! Map explorer state and event handling for Wildmap.
//!
//! This crate is a library with no binary of its own. A frontend host builds
//! [`AppServices::from_config`], creates an [`ExplorerModel::from_config`],
//! forwards user events to its `on_*` handlers, and calls
//! [`ExplorerModel::poll`] from its event loop to apply finished work. The
//! `wildmap` binary only runs the HTTP backend.

pub mod app_services;
pub mod display;
mod error_mapping;
pub mod map;
pub mod models;
pub mod ports;
pub mod services;

pub use app_services::AppServices;
pub use display::ForecastPanel;
pub use map::{BaseLayer, MapViewController, Marker, MarkerIcon, MarkerId, BASE_LAYERS};
pub use models::{EntryForm, ExplorerModel, UiState};
pub use ports::{AnnotationSink, ForecastSource, LocationSource, PlaceSearch};
