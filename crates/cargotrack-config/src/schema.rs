//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tracker: TrackerConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub geocoder: GeocoderConfig,
}

/// Tracking target and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Tracking aggregator the agent is sent to.
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Carrier to select on the aggregator.
    #[serde(default = "default_carrier")]
    pub carrier: String,

    /// Directory for the history file, route maps and logs.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// History file name, relative to `results_dir`.
    #[serde(default = "default_history_file")]
    pub history_file: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            carrier: default_carrier(),
            results_dir: default_results_dir(),
            history_file: default_history_file(),
        }
    }
}

impl TrackerConfig {
    /// Full path of the history file.
    pub fn history_path(&self) -> PathBuf {
        self.results_dir.join(&self.history_file)
    }
}

fn default_site_url() -> String {
    "http://www.seacargotracking.net/".to_string()
}

fn default_carrier() -> String {
    "HMM (Hyundai Merchant Marine)".to_string()
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("tracking_results")
}

fn default_history_file() -> String {
    "tracking_history.json".to_string()
}

/// Browser launch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    #[serde(default)]
    pub headless: bool,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,

    /// Explicit Chrome executable; searched in well-known locations when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_dir: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: default_debug_port(),
            headless: false,
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            chrome_path: None,
            profile_dir: None,
        }
    }
}

fn default_debug_port() -> u16 {
    9222
}

fn default_viewport_width() -> u32 {
    1920
}

fn default_viewport_height() -> u32 {
    1080
}

/// LLM used by the browser agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default)]
    pub temperature: f32,

    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key: None,
            base_url: None,
            temperature: 0.0,
            max_turns: default_max_turns(),
        }
    }
}

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_max_turns() -> u32 {
    30
}

/// Port geocoding for the route map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_geocoder_url")]
    pub base_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_geocoder_url(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_geocoder_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_user_agent() -> String {
    "cargo_tracker".to_string()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
