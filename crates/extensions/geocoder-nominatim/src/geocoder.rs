//! Nominatim search client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use cargotrack_protocols::{Coordinates, GeocodeError, Geocoder};

pub const DEFAULT_URL: &str = "https://nominatim.openstreetmap.org";

/// One hit from `/search?format=json`. Nominatim encodes coordinates as strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

impl Place {
    fn coordinates(&self) -> Result<Coordinates, GeocodeError> {
        let latitude = self
            .lat
            .parse::<f64>()
            .map_err(|e| GeocodeError::InvalidResponse(format!("lat {:?}: {}", self.lat, e)))?;
        let longitude = self
            .lon
            .parse::<f64>()
            .map_err(|e| GeocodeError::InvalidResponse(format!("lon {:?}: {}", self.lon, e)))?;
        Ok(Coordinates::new(latitude, longitude))
    }
}

/// [`Geocoder`] backed by a Nominatim instance.
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

impl NominatimGeocoder {
    /// Nominatim requires an identifying User-Agent on every request.
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GeocodeError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let url = format!("{}/search", self.base_url);
        debug!("Nominatim search: {}", query);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| GeocodeError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status {
                status: status.as_u16(),
            });
        }

        let places: Vec<Place> = response
            .json()
            .await
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        places.first().map(Place::coordinates).transpose()
    }
}

#[cfg(test)]
#[path = "geocoder_tests.rs"]
mod tests;
