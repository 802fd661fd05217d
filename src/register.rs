//! Component wiring from the loaded configuration.

use std::sync::Arc;

use tracing::info;

use cargotrack_browser_agent::{AgentLoopConfig, BrowserAgent, BrowserManagerConfig};
use cargotrack_config::{API_KEY_VAR, Config};
use cargotrack_core::{HistoryStore, RouteMapper, TaskComposer, Tracker};
use cargotrack_geocoder_nominatim::NominatimGeocoder;
use cargotrack_protocols::{LLMProvider, TrackerError};
use cargotrack_provider_gemini::GeminiProvider;

pub(crate) fn history_store(config: &Config) -> HistoryStore {
    HistoryStore::new(config.tracker.history_path())
}

pub(crate) fn browser_config(config: &Config) -> BrowserManagerConfig {
    BrowserManagerConfig {
        debug_port: config.browser.debug_port,
        viewport_width: config.browser.viewport_width,
        viewport_height: config.browser.viewport_height,
        profile_dir: config.browser.profile_dir.clone(),
        chrome_path: config.browser.chrome_path.clone(),
        headless: config.browser.headless,
    }
}

pub(crate) fn agent_config(config: &Config) -> AgentLoopConfig {
    AgentLoopConfig {
        model: config.llm.model.clone(),
        max_turns: config.llm.max_turns,
        temperature: config.llm.temperature,
    }
}

/// Build the LLM provider; fails when no API key was configured.
pub(crate) fn build_provider(config: &Config) -> Result<Arc<dyn LLMProvider>, TrackerError> {
    let api_key = config
        .llm
        .api_key
        .clone()
        .filter(|key| !key.is_empty())
        .ok_or_else(|| TrackerError::MissingCredential(API_KEY_VAR.to_string()))?;

    let provider = match config.llm.base_url {
        Some(ref url) => GeminiProvider::with_url(api_key, url.clone()),
        None => GeminiProvider::new(api_key),
    }
    .map_err(|e| TrackerError::Setup(e.to_string()))?;

    Ok(Arc::new(provider))
}

pub(crate) fn build_route_mapper(config: &Config) -> Result<RouteMapper, TrackerError> {
    let geocoder = NominatimGeocoder::new(&config.geocoder.base_url, &config.geocoder.user_agent)
        .map_err(|e| TrackerError::Setup(e.to_string()))?;
    Ok(RouteMapper::new(
        Arc::new(geocoder),
        config.tracker.results_dir.clone(),
    ))
}

/// Assemble the tracking pipeline.
pub(crate) fn build_tracker(config: &Config, with_map: bool) -> Result<Tracker, TrackerError> {
    let provider = build_provider(config)?;
    let agent = BrowserAgent::new(provider, browser_config(config), agent_config(config));
    let composer = TaskComposer::new(&config.tracker.site_url, &config.tracker.carrier);

    let mut tracker = Tracker::new(Arc::new(agent), composer, history_store(config));

    if with_map && config.geocoder.enabled {
        tracker = tracker.with_route_mapper(build_route_mapper(config)?);
    } else {
        info!("Route map generation disabled");
    }

    Ok(tracker)
}

#[cfg(test)]
#[path = "register_tests.rs"]
mod tests;
