//! Async request helpers for the explorer.
//!
//! Each `request_*` function spawns its work on the tokio runtime and sends
//! the result back as a `UiMessage`.

pub mod entry_service;
pub mod forecast_service;
pub mod place_service;

pub use entry_service::{
    request_load as request_entry_load, request_submit as request_entry_submit, EntryError,
    EntryServiceMessage,
};
pub use forecast_service::{
    request_fetch as request_forecast_fetch, ForecastError, ForecastServiceMessage,
};
pub use place_service::{
    request_locate, request_search as request_place_search, PlaceError, PlaceServiceMessage,
};

/// Sending half of the explorer's message channel
pub type UiSender = tokio::sync::mpsc::UnboundedSender<UiMessage>;

/// Messages sent from async operations back to the explorer
#[derive(Debug)]
pub enum UiMessage {
    Forecast(ForecastServiceMessage),
    Place(PlaceServiceMessage),
    Entry(EntryServiceMessage),
}
