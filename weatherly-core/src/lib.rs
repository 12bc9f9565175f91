//! Core library for the `weatherly` viewer.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Clients for the weather and reverse-geocoding services
//! - Shared domain models (payload, coordinates, icon codes)
//! - HTML rendering of the current panel and forecast list, plus the map marker
//! - The presenter that ties one UI event to a fetch and a render
//!
//! It is used by `weatherly-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod geocode;
pub mod icon;
pub mod location;
pub mod map;
pub mod model;
pub mod presenter;
pub mod provider;
pub mod render;
pub mod session;

pub use config::Config;
pub use error::{GeocodeError, GeolocationError, WeatherError};
pub use geocode::{LocationResolver, NominatimGeocoder, ReverseGeocoder};
pub use icon::{IconCode, glyph_for};
pub use location::{FixedGeolocator, Geolocator, LocationSource};
pub use map::{LeafletMap, MapUpdater, MapWidget};
pub use model::{Coordinates, WeatherPayload};
pub use presenter::{UiEvent, WeatherPresenter};
pub use provider::{WeatherFetcher, WeatherProvider};
pub use session::UiSession;
