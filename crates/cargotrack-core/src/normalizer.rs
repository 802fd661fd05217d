//! Result normalization.
//!
//! The agent returns whatever it managed to scrape: a JSON object, prose with
//! a JSON object somewhere inside it, plain prose, or nothing. [`normalize`]
//! maps all of these onto a fully populated [`TrackingRecord`] and never fails.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use cargotrack_protocols::TrackingRecord;

static EMBEDDED_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{(?:[^{}]|\{.*?\})*\}").expect("embedded object pattern is valid")
});

static VESSEL: LazyLock<Regex> = LazyLock::new(|| text_pattern(r"vessel[\s:]+([^\n]+)"));
static VOYAGE: LazyLock<Regex> = LazyLock::new(|| text_pattern(r"voyage[\s:]+([A-Z0-9]+)"));
static PORT_OF_LOADING: LazyLock<Regex> =
    LazyLock::new(|| text_pattern(r"port of loading[\s:]+([^\n]+)"));
static PORT_OF_DISCHARGE: LazyLock<Regex> =
    LazyLock::new(|| text_pattern(r"port of discharge[\s:]+([^\n]+)"));
static ETA: LazyLock<Regex> = LazyLock::new(|| text_pattern(r"eta[:\s]+([^\n]+)"));
static STATUS: LazyLock<Regex> = LazyLock::new(|| text_pattern(r"status[:\s]+([^\n]+)"));

fn text_pattern(body: &str) -> Regex {
    Regex::new(&format!("(?i){body}")).expect("text-mining pattern is valid")
}

/// What the agent's raw output turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum RawShape {
    /// Nothing usable: null, blank text, empty collections, `false`, `0`.
    Empty,
    /// A JSON object returned directly.
    Structured(Map<String, Value>),
    /// A JSON object found inside surrounding text.
    EmbeddedJson(Map<String, Value>),
    /// Text with no parseable object; mined with regexes.
    FreeText(String),
    /// Any other non-empty value.
    Unrecognized,
}

/// Resolve the raw agent output to a single shape.
pub fn classify(raw: &Value) -> RawShape {
    match raw {
        Value::Null | Value::Bool(false) => RawShape::Empty,
        Value::Number(n) if n.as_f64() == Some(0.0) => RawShape::Empty,
        Value::String(s) if s.trim().is_empty() => RawShape::Empty,
        Value::Array(items) if items.is_empty() => RawShape::Empty,
        Value::Object(map) if map.is_empty() => RawShape::Empty,
        Value::Object(map) => RawShape::Structured(map.clone()),
        Value::String(s) => match find_embedded_object(s) {
            Some(map) => RawShape::EmbeddedJson(map),
            None => RawShape::FreeText(s.clone()),
        },
        _ => RawShape::Unrecognized,
    }
}

fn find_embedded_object(text: &str) -> Option<Map<String, Value>> {
    let found = EMBEDDED_OBJECT.find(text)?;
    match serde_json::from_str::<Value>(found.as_str()) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            debug!("Embedded object is not valid JSON: {}", e);
            None
        }
    }
}

/// Normalize raw agent output into a tracking record for `reference_id`.
pub fn normalize(raw: &Value, reference_id: &str) -> TrackingRecord {
    let mut record = TrackingRecord::new(reference_id);

    match classify(raw) {
        RawShape::Structured(map) | RawShape::EmbeddedJson(map) => {
            extract_mapping(&map, &mut record)
        }
        RawShape::FreeText(text) => mine_text(&text, &mut record),
        RawShape::Empty => debug!("Agent returned no data for {}", reference_id),
        RawShape::Unrecognized => {
            debug!("Unrecognized agent output for {}: {}", reference_id, raw)
        }
    }

    record
}

/// Field text for a JSON value; `None` when the value counts as missing.
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        nested => Some(nested.to_string()),
    }
}

fn nested<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    map.get(key).and_then(Value::as_object)
}

fn lookup(map: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    map.and_then(|m| m.get(key)).and_then(field_text)
}

fn set_if_present(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn extract_mapping(map: &Map<String, Value>, record: &mut TrackingRecord) {
    let vessel = nested(map, "vessel");
    set_if_present(&mut record.vessel.name, lookup(vessel, "name"));
    set_if_present(&mut record.vessel.number, lookup(vessel, "number"));

    let ports = nested(map, "ports");
    set_if_present(&mut record.ports.loading, lookup(ports, "loading"));
    set_if_present(&mut record.ports.discharge, lookup(ports, "discharge"));

    let schedule = nested(map, "schedule");
    let top = Some(map);
    set_if_present(
        &mut record.schedule.eta,
        lookup(schedule, "eta")
            .or_else(|| lookup(top, "eta"))
            .or_else(|| lookup(top, "arrival_date")),
    );
    set_if_present(
        &mut record.schedule.status,
        lookup(schedule, "status")
            .or_else(|| lookup(top, "status"))
            .or_else(|| lookup(top, "current_status")),
    );
    set_if_present(
        &mut record.schedule.last_update,
        lookup(schedule, "last_update")
            .or_else(|| lookup(top, "last_update"))
            .or_else(|| lookup(top, "current_location_date_time")),
    );

    record.current_location = lookup(top, "current_location");
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    let value = pattern.captures(text)?.get(1)?.as_str().trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn mine_text(text: &str, record: &mut TrackingRecord) {
    set_if_present(&mut record.vessel.name, capture(&VESSEL, text));
    set_if_present(&mut record.vessel.number, capture(&VOYAGE, text));
    set_if_present(&mut record.ports.loading, capture(&PORT_OF_LOADING, text));
    set_if_present(&mut record.ports.discharge, capture(&PORT_OF_DISCHARGE, text));
    set_if_present(&mut record.schedule.eta, capture(&ETA, text));
    set_if_present(&mut record.schedule.status, capture(&STATUS, text));
}

#[cfg(test)]
#[path = "normalizer_tests.rs"]
mod tests;
