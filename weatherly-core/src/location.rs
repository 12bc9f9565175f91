use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::GeolocationError, model::Coordinates};

/// Source of the device position.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Geolocator backed by a position known up front (flags or config).
/// Reports `Unavailable` when there is none.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedGeolocator {
    position: Option<Coordinates>,
}

impl FixedGeolocator {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        self.position.ok_or(GeolocationError::Unavailable)
    }
}

/// Where the location for one pipeline run comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationSource {
    /// Text typed by the user.
    Query(String),
    /// Device position, reverse geocoded for display.
    Position(Coordinates),
    /// The configured fallback location.
    Default,
}
