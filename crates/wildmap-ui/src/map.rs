//! Map view state: base layers, annotation overlays and the selection marker.
//!
//! `MapViewController` owns every piece of mutable map state. Rendering is
//! left to whatever front end reads it back.

use wildmap_services::{Annotation, AnnotationKind};
use wildmap_weather::Coordinate;

/// Zoom used when jumping to a searched place or the device position
pub const FOCUS_ZOOM: u8 = 12;

/// A raster tile style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseLayer {
    pub name: &'static str,
    pub url_template: &'static str,
    pub max_zoom: u8,
    pub attribution: &'static str,
}

pub const BASE_LAYERS: [BaseLayer; 4] = [
    BaseLayer {
        name: "OpenStreetMap",
        url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        max_zoom: 19,
        attribution: "&copy; OpenStreetMap contributors",
    },
    BaseLayer {
        name: "Satellite (Esri)",
        url_template: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
        max_zoom: 19,
        attribution: "Tiles &copy; Esri",
    },
    BaseLayer {
        name: "Topo Map",
        url_template: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
        max_zoom: 17,
        attribution: "Map data: &copy; OpenStreetMap contributors, SRTM | Map style: &copy; OpenTopoMap (CC-BY-SA)",
    },
    BaseLayer {
        name: "Gray Map (Carto Light)",
        url_template: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
        max_zoom: 19,
        attribution: "&copy; OpenStreetMap contributors &copy; CARTO",
    },
];

/// Marker image for an annotation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerIcon {
    pub glyph: &'static str,
    pub url: &'static str,
    pub size: u32,
    pub anchor: (u32, u32),
}

impl MarkerIcon {
    pub fn for_kind(kind: AnnotationKind) -> Self {
        match kind {
            AnnotationKind::Animal => Self {
                glyph: "🦊",
                url: "https://openmoji.org/data/color/svg/1F98A.svg",
                size: 30,
                anchor: (12, 12),
            },
            AnnotationKind::Tree => Self {
                glyph: "🌳",
                url: "https://openmoji.org/data/color/svg/1F332.svg",
                size: 36,
                anchor: (12, 12),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(u64);

/// An annotation rendered on one of the overlays
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub kind: AnnotationKind,
    pub coordinate: Coordinate,
    pub icon: MarkerIcon,
    pub popup_html: String,
}

/// A toggleable layer holding the markers of one kind
#[derive(Debug, Clone)]
pub struct Overlay {
    pub kind: AnnotationKind,
    pub label: &'static str,
    pub visible: bool,
    markers: Vec<Marker>,
    loaded: bool,
}

impl Overlay {
    fn new(kind: AnnotationKind) -> Self {
        let label = match kind {
            AnnotationKind::Animal => "Animal Sightings",
            AnnotationKind::Tree => "Tree Mapping",
        };
        Self {
            kind,
            label,
            visible: true,
            markers: Vec::new(),
            loaded: false,
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

/// Marker for the coordinate driving the forecast panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionMarker {
    pub id: MarkerId,
    pub coordinate: Coordinate,
}

pub struct MapViewController {
    active_layer: usize,
    overlays: [Overlay; 2],
    selection_layer: Vec<SelectionMarker>,
    center: Coordinate,
    zoom: u8,
    open_popup: Option<MarkerId>,
    next_id: u64,
}

impl MapViewController {
    /// Start on the first base layer with the selection marker at `center`.
    pub fn new(center: Coordinate, zoom: u8) -> Self {
        let mut map = Self {
            active_layer: 0,
            overlays: [
                Overlay::new(AnnotationKind::Animal),
                Overlay::new(AnnotationKind::Tree),
            ],
            selection_layer: Vec::with_capacity(1),
            center,
            zoom: 0,
            open_popup: None,
            next_id: 0,
        };
        map.set_view(center, zoom);
        map.place_selection(center);
        map
    }

    fn allocate_id(&mut self) -> MarkerId {
        self.next_id += 1;
        MarkerId(self.next_id)
    }

    fn overlay_mut(&mut self, kind: AnnotationKind) -> &mut Overlay {
        match kind {
            AnnotationKind::Animal => &mut self.overlays[0],
            AnnotationKind::Tree => &mut self.overlays[1],
        }
    }

    pub fn base_layers(&self) -> &'static [BaseLayer] {
        &BASE_LAYERS
    }

    pub fn active_base_layer(&self) -> &BaseLayer {
        &BASE_LAYERS[self.active_layer]
    }

    /// Switch the base layer by name. Exactly one base layer is active at a
    /// time; an unknown name leaves the current one in place.
    pub fn select_base_layer(&mut self, name: &str) -> bool {
        let Some(index) = BASE_LAYERS.iter().position(|l| l.name == name) else {
            tracing::warn!("Unknown base layer {:?}", name);
            return false;
        };
        self.active_layer = index;
        self.zoom = self.zoom.min(BASE_LAYERS[index].max_zoom);
        true
    }

    pub fn overlay(&self, kind: AnnotationKind) -> &Overlay {
        match kind {
            AnnotationKind::Animal => &self.overlays[0],
            AnnotationKind::Tree => &self.overlays[1],
        }
    }

    pub fn set_overlay_visible(&mut self, kind: AnnotationKind, visible: bool) {
        self.overlay_mut(kind).visible = visible;
    }

    pub fn toggle_overlay(&mut self, kind: AnnotationKind) -> bool {
        let overlay = self.overlay_mut(kind);
        overlay.visible = !overlay.visible;
        overlay.visible
    }

    /// Populate an overlay from the stored collection.
    ///
    /// Runs once per kind; later calls are ignored and return false.
    pub fn load_overlay(&mut self, kind: AnnotationKind, records: &[Annotation]) -> bool {
        if self.overlay(kind).loaded {
            tracing::debug!("{} overlay already loaded", kind);
            return false;
        }

        for record in records {
            self.push_marker(kind, record);
        }
        self.overlay_mut(kind).loaded = true;
        tracing::info!("Loaded {} {} markers", records.len(), kind);
        true
    }

    /// Render a freshly saved annotation into its overlay.
    pub fn add_annotation(&mut self, kind: AnnotationKind, record: &Annotation) -> MarkerId {
        self.push_marker(kind, record)
    }

    fn push_marker(&mut self, kind: AnnotationKind, record: &Annotation) -> MarkerId {
        let id = self.allocate_id();
        let marker = Marker {
            id,
            kind,
            coordinate: Coordinate::new(record.latitude, record.longitude),
            icon: MarkerIcon::for_kind(kind),
            popup_html: popup_html(kind, record),
        };
        self.overlay_mut(kind).markers.push(marker);
        id
    }

    /// Move the selection marker. The previous one is removed first.
    pub fn place_selection(&mut self, coordinate: Coordinate) -> MarkerId {
        self.selection_layer.clear();
        let id = self.allocate_id();
        self.selection_layer.push(SelectionMarker { id, coordinate });
        id
    }

    pub fn selection(&self) -> Option<&SelectionMarker> {
        self.selection_layer.last()
    }

    pub fn selection_markers(&self) -> &[SelectionMarker] {
        &self.selection_layer
    }

    /// Recenter the map. Zoom is clamped to the active layer's maximum.
    pub fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.center = center;
        self.zoom = zoom.min(self.active_base_layer().max_zoom);
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    fn find_marker(&self, id: MarkerId) -> Option<&Marker> {
        self.overlays
            .iter()
            .flat_map(|o| o.markers.iter())
            .find(|m| m.id == id)
    }

    /// Pointer entered a marker: open its popup.
    pub fn hover(&mut self, id: MarkerId) -> Option<&str> {
        let exists = self.find_marker(id).is_some();
        self.open_popup = exists.then_some(id);
        self.open_popup
            .and_then(|id| self.find_marker(id))
            .map(|m| m.popup_html.as_str())
    }

    /// Pointer left a marker: close its popup if it is the open one.
    pub fn unhover(&mut self, id: MarkerId) {
        if self.open_popup == Some(id) {
            self.open_popup = None;
        }
    }

    pub fn open_popup(&self) -> Option<&str> {
        self.open_popup
            .and_then(|id| self.find_marker(id))
            .map(|m| m.popup_html.as_str())
    }
}

/// Popup body for an annotation marker
pub fn popup_html(kind: AnnotationKind, record: &Annotation) -> String {
    format!(
        "<b>{} {}</b><br>{}<br><small>{:.4}, {:.4}</small>",
        MarkerIcon::for_kind(kind).glyph,
        escape_html(&record.species),
        escape_html(record.note.as_deref().unwrap_or("")),
        record.latitude,
        record.longitude
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> MapViewController {
        MapViewController::new(Coordinate::new(52.507259, 13.329013), 13)
    }

    fn record(species: &str, note: Option<&str>) -> Annotation {
        Annotation {
            species: species.into(),
            note: note.map(str::to_string),
            latitude: 52.123456,
            longitude: 13.987654,
        }
    }

    #[test]
    fn test_initial_view_has_selection_at_center() {
        let map = start();
        assert_eq!(map.zoom(), 13);
        assert_eq!(map.active_base_layer().name, "OpenStreetMap");
        assert_eq!(map.selection_markers().len(), 1);
        assert_eq!(
            map.selection().map(|s| s.coordinate),
            Some(Coordinate::new(52.507259, 13.329013))
        );
        assert!(map.overlay(AnnotationKind::Animal).visible);
        assert_eq!(map.overlay(AnnotationKind::Tree).label, "Tree Mapping");
    }

    #[test]
    fn test_selection_never_accumulates() {
        let mut map = start();
        for n in 0..25 {
            map.place_selection(Coordinate::new(50.0 + n as f64 / 10.0, 10.0));
            assert_eq!(map.selection_markers().len(), 1);
        }
        assert_eq!(map.selection().map(|s| s.coordinate.latitude), Some(52.4));
    }

    #[test]
    fn test_base_layers_are_exclusive_and_clamp_zoom() {
        let mut map = start();
        map.set_view(map.center(), 19);
        assert_eq!(map.zoom(), 19);

        assert!(map.select_base_layer("Topo Map"));
        assert_eq!(map.active_base_layer().max_zoom, 17);
        assert_eq!(map.zoom(), 17);

        map.set_view(map.center(), 18);
        assert_eq!(map.zoom(), 17);

        assert!(!map.select_base_layer("Watercolor"));
        assert_eq!(map.active_base_layer().name, "Topo Map");
    }

    #[test]
    fn test_overlay_loads_once() {
        let mut map = start();
        let records = vec![record("Fox", None), record("Heron", Some("pond"))];

        assert!(map.load_overlay(AnnotationKind::Animal, &records));
        assert!(!map.load_overlay(AnnotationKind::Animal, &records));
        assert_eq!(map.overlay(AnnotationKind::Animal).markers().len(), 2);
        assert!(map.overlay(AnnotationKind::Tree).markers().is_empty());
    }

    #[test]
    fn test_added_annotation_lands_in_its_overlay() {
        let mut map = start();
        map.add_annotation(AnnotationKind::Tree, &record("Linden", None));

        let trees = map.overlay(AnnotationKind::Tree).markers();
        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].icon.size, 36);
        assert!(map.overlay(AnnotationKind::Animal).markers().is_empty());
    }

    #[test]
    fn test_popup_opens_on_hover_and_closes_on_leave() {
        let mut map = start();
        let id = map.add_annotation(AnnotationKind::Animal, &record("Fox", Some("den")));

        let html = map.hover(id).map(str::to_string);
        assert_eq!(
            html.as_deref(),
            Some("<b>🦊 Fox</b><br>den<br><small>52.1235, 13.9877</small>")
        );
        assert!(map.open_popup().is_some());

        map.unhover(id);
        assert!(map.open_popup().is_none());
    }

    #[test]
    fn test_popup_escapes_user_text() {
        let html = popup_html(
            AnnotationKind::Tree,
            &record("<script>", Some("a & b")),
        );
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn test_toggle_overlay() {
        let mut map = start();
        assert!(!map.toggle_overlay(AnnotationKind::Tree));
        assert!(!map.overlay(AnnotationKind::Tree).visible);
        map.set_overlay_visible(AnnotationKind::Tree, true);
        assert!(map.overlay(AnnotationKind::Tree).visible);
    }
}
