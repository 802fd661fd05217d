//! Configuration validation.

use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

const SUPPORTED_PROVIDERS: [&str; 1] = ["gemini"];

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_tracker(config, &mut result);
        Self::validate_browser(config, &mut result);
        Self::validate_llm(config, &mut result);
        Self::validate_geocoder(config, &mut result);

        result
    }

    fn validate_tracker(config: &Config, result: &mut ValidationResult) {
        if !is_http_url(&config.tracker.site_url) {
            result.add_error(ValidationError::new(
                "tracker.site_url",
                "site_url must start with http:// or https://",
            ));
        }

        if config.tracker.carrier.trim().is_empty() {
            result.add_error(ValidationError::new(
                "tracker.carrier",
                "Carrier cannot be empty",
            ));
        }

        if config.tracker.history_file.trim().is_empty() {
            result.add_error(ValidationError::new(
                "tracker.history_file",
                "History file name cannot be empty",
            ));
        }
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new(
                "browser.debug_port",
                "Port cannot be 0",
            ));
        }

        if config.browser.viewport_width == 0 || config.browser.viewport_height == 0 {
            result.add_error(ValidationError::new(
                "browser.viewport",
                "Viewport dimensions must be greater than 0",
            ));
        }

        if let Some(ref chrome) = config.browser.chrome_path {
            if !chrome.exists() {
                result.add_warning(ValidationWarning::new(
                    "browser.chrome_path",
                    format!("Chrome executable does not exist: {}", chrome.display()),
                ));
            }
        }
    }

    fn validate_llm(config: &Config, result: &mut ValidationResult) {
        if !SUPPORTED_PROVIDERS.contains(&config.llm.provider.as_str()) {
            result.add_error(ValidationError::new(
                "llm.provider",
                format!(
                    "Unknown provider '{}', supported: {:?}",
                    config.llm.provider, SUPPORTED_PROVIDERS
                ),
            ));
        }

        if config.llm.max_turns == 0 {
            result.add_error(ValidationError::new(
                "llm.max_turns",
                "max_turns must be greater than 0",
            ));
        }

        if config.llm.max_turns > 100 {
            result.add_warning(ValidationWarning::new(
                "llm.max_turns",
                "max_turns is very high (>100), a stuck agent will run for a long time",
            ));
        }

        if !(0.0..=2.0).contains(&config.llm.temperature) {
            result.add_error(ValidationError::new(
                "llm.temperature",
                "temperature must be between 0.0 and 2.0",
            ));
        }

        if let Some(ref url) = config.llm.base_url {
            if !is_http_url(url) {
                result.add_error(ValidationError::new(
                    "llm.base_url",
                    "base_url must start with http:// or https://",
                ));
            }
        }

        if config.llm.api_key.is_none() {
            result.add_warning(ValidationWarning::new(
                "llm.api_key",
                "API key is not set, set GOOGLE_API_KEY in the environment or .env",
            ));
        }
    }

    fn validate_geocoder(config: &Config, result: &mut ValidationResult) {
        if !config.geocoder.enabled {
            return;
        }

        if !is_http_url(&config.geocoder.base_url) {
            result.add_error(ValidationError::new(
                "geocoder.base_url",
                "base_url must start with http:// or https://",
            ));
        }

        if config.geocoder.user_agent.trim().is_empty() {
            result.add_error(ValidationError::new(
                "geocoder.user_agent",
                "Nominatim requires a non-empty user agent",
            ));
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
