//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::ConfigError;
use crate::schema::Config;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Environment variable holding the LLM API key.
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Environment variable overriding the geocoder base URL.
pub const GEOCODER_URL_VAR: &str = "NOMINATIM_URL";

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a file, falling back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            debug!("Config file {} not found, using defaults", path.display());
            let mut config = Config::default();
            Self::expand_paths(&mut config);
            return Ok(config);
        }
        Self::load(path)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let mut config: Config = toml::from_str(&expanded)?;
        Self::expand_paths(&mut config);
        Ok(config)
    }

    /// Load `KEY=value` pairs from a dotenv file into the process environment.
    ///
    /// Variables that are already set keep their value. Returns whether a file was read.
    pub fn load_dotenv(path: &Path) -> Result<bool, ConfigError> {
        if !path.exists() {
            return Ok(false);
        }
        dotenvy::from_path(path).map_err(|e| ConfigError::DotEnv(e.to_string()))?;
        debug!("Loaded environment from {}", path.display());
        Ok(true)
    }

    /// Fill credentials and overrides from the process environment.
    pub fn apply_env(config: &mut Config) {
        Self::apply_env_with(config, |name| std::env::var(name).ok());
    }

    /// Fill credentials and overrides using `lookup` as the environment.
    pub fn apply_env_with<F>(config: &mut Config, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if config.llm.api_key.as_deref().is_none_or(str::is_empty) {
            config.llm.api_key = lookup(API_KEY_VAR).filter(|key| !key.is_empty());
        }
        if let Some(url) = lookup(GEOCODER_URL_VAR).filter(|url| !url.is_empty()) {
            config.geocoder.base_url = url;
        }
    }

    /// Expand environment variables in the format `${VAR}`.
    ///
    /// Comments are left untouched, so documentation mentioning a placeholder
    /// does not require the variable to be set.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = String::with_capacity(content.len());

        for line in content.split_inclusive('\n') {
            let (code, comment) = line.split_at(comment_start(line));
            result.push_str(&Self::expand_line(code)?);
            result.push_str(comment);
        }

        Ok(result)
    }

    fn expand_line(code: &str) -> Result<String, ConfigError> {
        let mut result = code.to_string();

        for cap in ENV_VAR_PATTERN.captures_iter(code) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    fn expand_paths(config: &mut Config) {
        let results_dir = config.tracker.results_dir.to_string_lossy().into_owned();
        config.tracker.results_dir = PathBuf::from(Self::expand_path(&results_dir));

        if let Some(profile) = config.browser.profile_dir.take() {
            let profile = profile.to_string_lossy().into_owned();
            config.browser.profile_dir = Some(PathBuf::from(Self::expand_path(&profile)));
        }
    }

    /// Expand shell-style paths (e.g., `~/.config`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

/// Byte offset of the `#` starting a TOML comment on `line`, or its length.
fn comment_start(line: &str) -> usize {
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        match quote {
            Some('"') if escaped => escaped = false,
            Some('"') if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '#' => return i,
            None if c == '"' || c == '\'' => quote = Some(c),
            None => {}
        }
    }

    line.len()
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
