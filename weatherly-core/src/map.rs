//! Map widget abstraction and the single-marker updater.

use std::fmt::Write as _;

use crate::{config::MapConfig, model::Coordinates, render::escape_js};

/// Handle to a marker placed on a [`MapWidget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub url_template: String,
    pub max_zoom: u8,
    pub attribution: String,
}

impl From<&MapConfig> for TileLayer {
    fn from(cfg: &MapConfig) -> Self {
        Self {
            url_template: cfg.tile_url.clone(),
            max_zoom: cfg.max_zoom,
            attribution: cfg.attribution.clone(),
        }
    }
}

/// Operations the map library exposes.
pub trait MapWidget {
    fn set_view(&mut self, center: Coordinates, zoom: u8);
    fn add_tile_layer(&mut self, layer: TileLayer);
    fn add_marker(&mut self, at: Coordinates) -> MarkerId;
    fn bind_popup(&mut self, marker: MarkerId, html: String, open: bool);
    fn remove_layer(&mut self, marker: MarkerId);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub position: Coordinates,
    pub popup: Option<String>,
    pub popup_open: bool,
}

/// In-memory Leaflet map. Records its state and can emit the script that
/// rebuilds it in a browser.
#[derive(Debug, Clone)]
pub struct LeafletMap {
    container_id: String,
    center: Coordinates,
    zoom: u8,
    tile_layers: Vec<TileLayer>,
    markers: Vec<Marker>,
    next_id: u32,
}

impl LeafletMap {
    pub fn new(container_id: impl Into<String>, center: Coordinates, zoom: u8) -> Self {
        Self {
            container_id: container_id.into(),
            center,
            zoom,
            tile_layers: Vec::new(),
            markers: Vec::new(),
            next_id: 0,
        }
    }

    /// Map centered on the configured initial view with its tile layer added.
    pub fn from_config(cfg: &MapConfig) -> Self {
        let mut map = Self::new("map", cfg.initial_center, cfg.initial_zoom);
        map.add_tile_layer(TileLayer::from(cfg));
        map
    }

    pub fn center(&self) -> Coordinates {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn tile_layers(&self) -> &[TileLayer] {
        &self.tile_layers
    }

    /// JavaScript that reproduces this map with Leaflet's `L` namespace.
    pub fn to_leaflet_script(&self) -> String {
        let mut js = String::new();

        let _ = writeln!(
            js,
            "let map = L.map('{}').setView([{}, {}], {});",
            escape_js(&self.container_id),
            self.center.latitude,
            self.center.longitude,
            self.zoom
        );

        for layer in &self.tile_layers {
            let _ = writeln!(
                js,
                "L.tileLayer('{}', {{ maxZoom: {}, attribution: '{}' }}).addTo(map);",
                escape_js(&layer.url_template),
                layer.max_zoom,
                escape_js(&layer.attribution)
            );
        }

        for marker in &self.markers {
            let _ = write!(
                js,
                "L.marker([{}, {}]).addTo(map)",
                marker.position.latitude, marker.position.longitude
            );
            if let Some(popup) = &marker.popup {
                let _ = write!(js, ".bindPopup('{}')", escape_js(popup));
                if marker.popup_open {
                    js.push_str(".openPopup()");
                }
            }
            js.push_str(";\n");
        }

        js
    }
}

impl MapWidget for LeafletMap {
    fn set_view(&mut self, center: Coordinates, zoom: u8) {
        self.center = center;
        self.zoom = zoom;
    }

    fn add_tile_layer(&mut self, layer: TileLayer) {
        self.tile_layers.push(layer);
    }

    fn add_marker(&mut self, at: Coordinates) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.markers.push(Marker { id, position: at, popup: None, popup_open: false });
        id
    }

    fn bind_popup(&mut self, marker: MarkerId, html: String, open: bool) {
        if let Some(m) = self.markers.iter_mut().find(|m| m.id == marker) {
            m.popup = Some(html);
            m.popup_open = open;
        }
    }

    fn remove_layer(&mut self, marker: MarkerId) {
        self.markers.retain(|m| m.id != marker);
    }
}

/// Keeps exactly one weather marker on the map.
#[derive(Debug, Clone)]
pub struct MapUpdater<M> {
    map: M,
    zoom: u8,
    marker: Option<MarkerId>,
}

impl<M: MapWidget> MapUpdater<M> {
    pub fn new(map: M, zoom: u8) -> Self {
        Self { map, zoom, marker: None }
    }

    /// Recenter on `at`, replace the marker and open a popup with the reading.
    pub fn update(&mut self, at: Coordinates, temp: &str, condition: &str) {
        self.map.set_view(at, self.zoom);

        if let Some(old) = self.marker.take() {
            self.map.remove_layer(old);
        }

        let marker = self.map.add_marker(at);
        self.map.bind_popup(marker, format!("<b>{temp}°C</b><br>{condition}"), true);
        self.marker = Some(marker);

        tracing::debug!(%at, ?marker, "map marker moved");
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn marker(&self) -> Option<MarkerId> {
        self.marker
    }
}
