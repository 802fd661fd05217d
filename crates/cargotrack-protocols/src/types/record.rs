//! The tracking record produced for every run.

use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};

/// Marker used for any field whose value is unknown.
pub const NOT_AVAILABLE: &str = "N/A";

/// Returns true when `value` is a real value rather than the sentinel.
pub fn is_known(value: &str) -> bool {
    value != NOT_AVAILABLE
}

/// Current local time as an RFC 3339 timestamp.
pub fn now_timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// Vessel carrying the shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vessel {
    #[serde(default = "not_available")]
    pub name: String,
    /// Voyage number.
    #[serde(default = "not_available")]
    pub number: String,
}

impl Default for Vessel {
    fn default() -> Self {
        Self {
            name: not_available(),
            number: not_available(),
        }
    }
}

/// Origin and destination ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ports {
    #[serde(default = "not_available")]
    pub loading: String,
    #[serde(default = "not_available")]
    pub discharge: String,
}

impl Default for Ports {
    fn default() -> Self {
        Self {
            loading: not_available(),
            discharge: not_available(),
        }
    }
}

/// Arrival estimate and shipment status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default = "not_available")]
    pub eta: String,
    #[serde(default = "not_available")]
    pub status: String,
    #[serde(default = "not_available")]
    pub last_update: String,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            eta: not_available(),
            status: not_available(),
            last_update: not_available(),
        }
    }
}

/// Normalized result of one tracking run.
///
/// `vessel`, `ports` and `schedule` are always fully populated; unknown
/// fields hold [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub reference_id: String,
    #[serde(default)]
    pub vessel: Vessel,
    #[serde(default)]
    pub ports: Ports,
    #[serde(default)]
    pub schedule: Schedule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_path: Option<String>,
    pub timestamp: String,
}

impl TrackingRecord {
    /// Create an all-sentinel record stamped with the current time.
    pub fn new(reference_id: impl Into<String>) -> Self {
        Self {
            reference_id: reference_id.into(),
            vessel: Vessel::default(),
            ports: Ports::default(),
            schedule: Schedule::default(),
            current_location: None,
            map_path: None,
            timestamp: now_timestamp(),
        }
    }

    /// Both ports are known, so a route can be drawn.
    pub fn has_route(&self) -> bool {
        is_known(&self.ports.loading) && is_known(&self.ports.discharge)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
