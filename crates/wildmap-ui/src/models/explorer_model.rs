//! Explorer model: the event handlers behind the map page.
//!
//! Handlers update `UiState` immediately and dispatch network work through
//! the services module. Completions come back on a channel and are applied
//! by `poll` (non-blocking) or `settle` (awaits everything in flight).

use std::sync::Arc;

use tokio::sync::mpsc;
use wildmap_core::{AppError, Config};
use wildmap_services::{Annotation, AnnotationKind, SubmitRequest};
use wildmap_weather::Coordinate;

use crate::app_services::AppServices;
use crate::display::ForecastPanel;
use crate::map::{MapViewController, FOCUS_ZOOM};
use crate::services::{
    self, EntryServiceMessage, ForecastServiceMessage, PlaceError, PlaceServiceMessage,
    UiMessage, UiSender,
};

pub const ENTRY_INCOMPLETE: &str = "❌ Please click a map location and enter species.";
pub const ENTRY_SAVE_FAILED: &str = "⚠️ Error saving entry.";

/// Contents of the add-entry form
#[derive(Debug, Clone, PartialEq)]
pub struct EntryForm {
    pub kind: AnnotationKind,
    pub species: String,
    pub note: String,
    pub lat: String,
    pub lon: String,
}

impl Default for EntryForm {
    fn default() -> Self {
        Self {
            kind: AnnotationKind::Animal,
            species: String::new(),
            note: String::new(),
            lat: String::new(),
            lon: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    /// Status line under the search box
    pub status: String,
    /// Result line under the add-entry form
    pub add_status: String,
    /// Alert-level message, shown until dismissed
    pub alert: Option<String>,
    /// Plain-language summary of the last failure; empty when none
    pub error_message: String,
    pub forecast: Option<ForecastPanel>,
    pub form: EntryForm,
}

pub struct ExplorerModel {
    services: Arc<AppServices>,
    map: MapViewController,
    state: UiState,
    tx: UiSender,
    rx: mpsc::UnboundedReceiver<UiMessage>,
    pending: usize,
    forecast_token: u64,
}

impl ExplorerModel {
    pub fn new(services: Arc<AppServices>, center: Coordinate, zoom: u8) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            services,
            map: MapViewController::new(center, zoom),
            state: UiState::default(),
            tx,
            rx,
            pending: 0,
            forecast_token: 0,
        }
    }

    /// Start from the `[map]` section: configured center and zoom.
    pub fn from_config(services: Arc<AppServices>, config: &Config) -> Self {
        let center = Coordinate::new(config.map.center_latitude, config.map.center_longitude);
        Self::new(services, center, config.map.zoom)
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn map(&self) -> &MapViewController {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut MapViewController {
        &mut self.map
    }

    pub fn form_mut(&mut self) -> &mut EntryForm {
        &mut self.state.form
    }

    pub fn dismiss_alert(&mut self) {
        self.state.alert = None;
    }

    fn set_error(&mut self, err: AppError, context: &str) {
        tracing::error!("{}: {} [{:?}]", context, err, err.kind());
        self.state.error_message = err.user_message().to_string();
    }

    fn clear_error(&mut self) {
        self.state.error_message.clear();
    }

    /// Operations dispatched but not yet applied
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Fill both overlays from the stored collections.
    pub fn load_overlays(&mut self) {
        for kind in AnnotationKind::ALL {
            self.pending += 1;
            services::request_entry_load(
                &self.tx,
                self.services.runtime(),
                self.services.entries.clone(),
                kind,
            );
        }
    }

    pub fn on_map_click(&mut self, coordinate: Coordinate) {
        self.map.place_selection(coordinate);
        self.state.form.lat = format!("{:.6}", coordinate.latitude);
        self.state.form.lon = format!("{:.6}", coordinate.longitude);
        self.fetch_forecast(coordinate);
    }

    pub fn on_use_my_location(&mut self) {
        if !self.services.location.is_available() {
            self.state.alert = Some(PlaceError::Unsupported.to_string());
            return;
        }

        self.clear_error();
        self.state.status = "Locating...".to_string();
        self.pending += 1;
        services::request_locate(
            &self.tx,
            self.services.runtime(),
            self.services.location.clone(),
        );
    }

    pub fn on_search(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.state.alert = Some(PlaceError::EmptyQuery.to_string());
            return;
        }

        self.clear_error();
        self.state.status = "Finding location...".to_string();
        self.pending += 1;
        services::request_place_search(
            &self.tx,
            self.services.runtime(),
            self.services.places.clone(),
            query.to_string(),
        );
    }

    pub fn on_add_entry(&mut self) {
        let form = &self.state.form;
        let species = form.species.trim();
        let note = form.note.trim();
        let lat = parse_degrees(&form.lat);
        let lon = parse_degrees(&form.lon);

        let (Some(lat), Some(lon)) = (lat, lon) else {
            self.state.add_status = ENTRY_INCOMPLETE.to_string();
            return;
        };
        if species.is_empty() {
            self.state.add_status = ENTRY_INCOMPLETE.to_string();
            return;
        }

        let request = SubmitRequest {
            kind: form.kind,
            species: species.to_string(),
            note: Some(note.to_string()).filter(|n| !n.is_empty()),
            lat,
            lon,
        };

        self.state.add_status.clear();
        self.clear_error();
        self.pending += 1;
        services::request_entry_submit(
            &self.tx,
            self.services.runtime(),
            self.services.entries.clone(),
            request,
        );
    }

    fn fetch_forecast(&mut self, coordinate: Coordinate) {
        self.forecast_token += 1;
        self.clear_error();
        self.state.status = "Fetching data...".to_string();
        self.pending += 1;
        services::request_forecast_fetch(
            &self.tx,
            self.services.runtime(),
            self.services.forecast.clone(),
            self.forecast_token,
            coordinate,
        );
    }

    /// Apply every completion already waiting. Returns how many were applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(msg) = self.rx.try_recv() {
            self.handle_message(msg);
            applied += 1;
        }
        applied
    }

    /// Wait until nothing is in flight, applying completions as they land.
    pub async fn settle(&mut self) {
        while self.pending > 0 {
            match self.rx.recv().await {
                Some(msg) => self.handle_message(msg),
                None => break,
            }
        }
    }

    pub fn handle_message(&mut self, msg: UiMessage) {
        self.pending = self.pending.saturating_sub(1);
        match msg {
            UiMessage::Forecast(ForecastServiceMessage::FetchDone {
                token,
                coordinate,
                result,
            }) => {
                if token != self.forecast_token {
                    tracing::debug!(
                        "Discarding stale forecast #{} for {} (latest #{})",
                        token,
                        coordinate,
                        self.forecast_token
                    );
                    return;
                }
                match result {
                    Ok(snapshot) => {
                        self.state.forecast = Some(ForecastPanel::from_snapshot(&snapshot));
                        self.state.status = "Updated".to_string();
                    }
                    Err(e) => {
                        self.state.status = format!("Data fetch error: {}", e);
                        self.set_error(AppError::from(e), "Forecast fetch failed");
                    }
                }
            }

            UiMessage::Place(PlaceServiceMessage::LocateDone(result)) => match result {
                Ok(coordinate) => self.focus(coordinate),
                Err(e) => {
                    self.state.alert = Some(format!("Location error: {}", e));
                    self.state.status.clear();
                    self.set_error(AppError::from(e), "Location request failed");
                }
            },

            UiMessage::Place(PlaceServiceMessage::SearchDone(result)) => match result {
                Ok(Some(place)) => {
                    self.focus(place.coordinate);
                    self.state.status = format!("Found: {}", place.display_name);
                }
                Ok(None) => {
                    self.state.status = "Location not found.".to_string();
                }
                Err(e) => {
                    self.state.status =
                        "Error finding place. See console for details.".to_string();
                    self.state.alert = Some(format!("Error finding place: {}", e));
                    self.set_error(AppError::from(e), "Geocoding failed");
                }
            },

            UiMessage::Entry(EntryServiceMessage::LoadDone { kind, result }) => match result {
                Ok(records) => {
                    self.map.load_overlay(kind, &records);
                }
                Err(e) => self.set_error(AppError::from(e), "Loading stored entries failed"),
            },

            UiMessage::Entry(EntryServiceMessage::SubmitDone { request, result }) => {
                match result {
                    Ok(reply) => {
                        self.state.add_status = reply.message;
                        if reply.accepted {
                            let record = Annotation {
                                species: request.species,
                                note: request.note,
                                latitude: request.lat,
                                longitude: request.lon,
                            };
                            self.map.add_annotation(request.kind, &record);
                        }
                    }
                    Err(e) => {
                        self.state.add_status = ENTRY_SAVE_FAILED.to_string();
                        self.set_error(AppError::from(e), "Saving entry failed");
                    }
                }
            }
        }
    }

    /// Center on `coordinate`, move the selection there and refresh the forecast.
    fn focus(&mut self, coordinate: Coordinate) {
        self.map.set_view(coordinate, FOCUS_ZOOM);
        self.map.place_selection(coordinate);
        self.fetch_forecast(coordinate);
    }
}

fn parse_degrees(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_degrees() {
        assert_eq!(parse_degrees(" 52.500000 "), Some(52.5));
        assert_eq!(parse_degrees("-13"), Some(-13.0));
        assert_eq!(parse_degrees(""), None);
        assert_eq!(parse_degrees("north"), None);
        assert_eq!(parse_degrees("NaN"), None);
        assert_eq!(parse_degrees("inf"), None);
    }

    #[test]
    fn test_entry_form_defaults_to_animal() {
        let form = EntryForm::default();
        assert_eq!(form.kind, AnnotationKind::Animal);
        assert!(form.species.is_empty());
    }
}
