//! Route map rendering.
//!
//! Both ports are geocoded and drawn as a two-point route on a self-contained
//! Leaflet page. Any failure degrades to a [`MapOutcome`] instead of an error.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use tracing::{info, warn};

use cargotrack_protocols::{Coordinates, Geocoder};

const ZOOM: u8 = 3;

/// Result of a route map attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum MapOutcome {
    /// Map written to this path.
    Generated(PathBuf),
    /// The geocoder found nothing for `place`.
    NotGeocoded { place: String },
    /// Lookup or write failed.
    Failed(String),
}

impl MapOutcome {
    /// Path of the generated map, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            MapOutcome::Generated(path) => Some(path),
            _ => None,
        }
    }
}

/// Draws origin-to-destination route maps.
pub struct RouteMapper {
    geocoder: Arc<dyn Geocoder>,
    output_dir: PathBuf,
}

impl RouteMapper {
    pub fn new(geocoder: Arc<dyn Geocoder>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            geocoder,
            output_dir: output_dir.into(),
        }
    }

    /// Geocode both ports and write the map. Never returns an error.
    pub async fn render(&self, origin: &str, destination: &str) -> MapOutcome {
        let outcome = self.try_render(origin, destination).await;
        match &outcome {
            MapOutcome::Generated(path) => info!("Route map written to {}", path.display()),
            MapOutcome::NotGeocoded { place } => {
                warn!("Could not geocode {}, skipping route map", place)
            }
            MapOutcome::Failed(reason) => warn!("Route map generation failed: {}", reason),
        }
        outcome
    }

    async fn try_render(&self, origin: &str, destination: &str) -> MapOutcome {
        let from = match self.locate(origin).await {
            Ok(coords) => coords,
            Err(outcome) => return outcome,
        };
        let to = match self.locate(destination).await {
            Ok(coords) => coords,
            Err(outcome) => return outcome,
        };

        let html = match route_html(origin, from, destination, to) {
            Ok(html) => html,
            Err(e) => return MapOutcome::Failed(e.to_string()),
        };

        if let Err(e) = fs::create_dir_all(&self.output_dir) {
            return MapOutcome::Failed(format!(
                "cannot create {}: {}",
                self.output_dir.display(),
                e
            ));
        }

        let path = self.output_dir.join(format!(
            "route_{}.html",
            Local::now().format("%Y%m%d_%H%M%S")
        ));
        match fs::write(&path, html) {
            Ok(()) => MapOutcome::Generated(path),
            Err(e) => MapOutcome::Failed(format!("cannot write {}: {}", path.display(), e)),
        }
    }

    async fn locate(&self, place: &str) -> Result<Coordinates, MapOutcome> {
        let query = format!("{place} port");
        match self.geocoder.geocode(&query).await {
            Ok(Some(coords)) => Ok(coords),
            Ok(None) => Err(MapOutcome::NotGeocoded {
                place: place.to_string(),
            }),
            Err(e) => Err(MapOutcome::Failed(e.to_string())),
        }
    }
}

/// JSON-encode `text` for embedding in an inline script.
fn js_string(text: &str) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(text)?.replace("</", "<\\/"))
}

fn route_html(
    origin: &str,
    from: Coordinates,
    destination: &str,
    to: Coordinates,
) -> Result<String, serde_json::Error> {
    let center = from.midpoint(&to);
    let origin_popup = js_string(&format!("Origin: {origin}"))?;
    let destination_popup = js_string(&format!("Destination: {destination}"))?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
html, body, #map {{ height: 100%; width: 100%; margin: 0; padding: 0; }}
.pin {{ width: 26px; height: 26px; border-radius: 50%; color: #fff; text-align: center; line-height: 26px; font-size: 16px; border: 2px solid #fff; box-shadow: 0 0 3px #333; }}
</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map("map").setView([{center_lat}, {center_lon}], {zoom});
L.tileLayer("https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
    attribution: "&copy; OpenStreetMap contributors"
}}).addTo(map);
function pin(color, glyph) {{
    return L.divIcon({{className: "", html: '<div class="pin" style="background:' + color + '">' + glyph + '</div>', iconSize: [30, 30], iconAnchor: [15, 15]}});
}}
L.marker([{from_lat}, {from_lon}], {{icon: pin("green", "&#9875;"), title: "anchor"}}).bindPopup({origin_popup}).addTo(map);
L.marker([{to_lat}, {to_lon}], {{icon: pin("red", "&#9873;"), title: "flag"}}).bindPopup({destination_popup}).addTo(map);
L.polyline([[{from_lat}, {from_lon}], [{to_lat}, {to_lon}]], {{color: "blue", weight: 2, opacity: 1}}).addTo(map);
</script>
</body>
</html>
"#,
        center_lat = center.latitude,
        center_lon = center.longitude,
        zoom = ZOOM,
        from_lat = from.latitude,
        from_lon = from.longitude,
        to_lat = to.latitude,
        to_lon = to.longitude,
    ))
}

#[cfg(test)]
#[path = "route_map_tests.rs"]
mod tests;
