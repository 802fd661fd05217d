//! Geocoding protocol.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GeocodeError;

/// A point on the globe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Arithmetic midpoint of two coordinates.
    pub fn midpoint(&self, other: &Coordinates) -> Coordinates {
        Coordinates {
            latitude: (self.latitude + other.latitude) / 2.0,
            longitude: (self.longitude + other.longitude) / 2.0,
        }
    }
}

/// Resolves place names to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Look up `query`; `Ok(None)` means the service found nothing.
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>, GeocodeError>;
}
