//! # cargotrack Nominatim Geocoder
//!
//! Resolves port names to coordinates through the OpenStreetMap
//! Nominatim search API.

mod geocoder;

pub use geocoder::{DEFAULT_URL, NominatimGeocoder};
