use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_empty_config() {
    let config = ConfigLoader::load_str("").unwrap();
    assert_eq!(config.browser.debug_port, 9222);
    assert_eq!(config.tracker.history_file, "tracking_history.json");
}

#[test]
fn test_load_full_config() {
    let content = r#"
        [tracker]
        site_url = "https://tracking.example.com/"
        carrier = "Maersk"
        results_dir = "out"

        [browser]
        headless = true
        debug_port = 9333

        [llm]
        model = "gemini-1.5-pro"
        api_key = "test-key"
        max_turns = 12

        [geocoder]
        enabled = false
    "#;
    let config = ConfigLoader::load_str(content).unwrap();
    assert_eq!(config.tracker.carrier, "Maersk");
    assert_eq!(config.tracker.results_dir, PathBuf::from("out"));
    assert!(config.browser.headless);
    assert_eq!(config.browser.debug_port, 9333);
    assert_eq!(config.llm.model, "gemini-1.5-pro");
    assert_eq!(config.llm.api_key.as_deref(), Some("test-key"));
    assert_eq!(config.llm.max_turns, 12);
    assert!(!config.geocoder.enabled);
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[browser]").unwrap();
    writeln!(file, "debug_port = 5000").unwrap();

    let config = ConfigLoader::load(file.path()).unwrap();
    assert_eq!(config.browser.debug_port, 5000);
}

#[test]
fn test_load_nonexistent_file() {
    let result = ConfigLoader::load(Path::new("/nonexistent/path/config.toml"));
    assert!(result.is_err());
}

#[test]
fn test_load_or_default_missing_file() {
    let config = ConfigLoader::load_or_default(Path::new("/nonexistent/cargotrack.toml")).unwrap();
    assert_eq!(config.llm.provider, "gemini");
}

#[test]
fn test_load_invalid_toml() {
    let result = ConfigLoader::load_str("invalid = [unclosed");
    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn test_expand_env_vars_not_set() {
    let content = "value = \"${NONEXISTENT_CARGOTRACK_VAR_12345}\"";
    let result = ConfigLoader::expand_env_vars(content);
    assert!(matches!(result, Err(ConfigError::EnvVarNotSet(ref v)) if v == "NONEXISTENT_CARGOTRACK_VAR_12345"));
}

#[test]
fn test_expand_env_vars_no_vars() {
    let content = "value = \"no variables here\"";
    let expanded = ConfigLoader::expand_env_vars(content).unwrap();
    assert_eq!(expanded, content);
}

#[test]
fn test_expand_path_with_tilde() {
    let expanded = ConfigLoader::expand_path("~/results");
    assert!(!expanded.starts_with('~'));
    assert!(expanded.ends_with("/results"));
}

#[test]
fn test_apply_env_fills_missing_api_key() {
    let mut config = Config::default();
    ConfigLoader::apply_env_with(&mut config, |name| match name {
        API_KEY_VAR => Some("from-env".to_string()),
        _ => None,
    });
    assert_eq!(config.llm.api_key.as_deref(), Some("from-env"));
}

#[test]
fn test_apply_env_keeps_configured_api_key() {
    let mut config = Config::default();
    config.llm.api_key = Some("from-file".to_string());
    ConfigLoader::apply_env_with(&mut config, |_| Some("from-env".to_string()));
    assert_eq!(config.llm.api_key.as_deref(), Some("from-file"));
}

#[test]
fn test_apply_env_ignores_empty_values() {
    let mut config = Config::default();
    ConfigLoader::apply_env_with(&mut config, |_| Some(String::new()));
    assert!(config.llm.api_key.is_none());
    assert_eq!(config.geocoder.base_url, "https://nominatim.openstreetmap.org");
}

#[test]
fn test_apply_env_geocoder_override() {
    let mut config = Config::default();
    ConfigLoader::apply_env_with(&mut config, |name| match name {
        GEOCODER_URL_VAR => Some("http://localhost:8088".to_string()),
        _ => None,
    });
    assert_eq!(config.geocoder.base_url, "http://localhost:8088");
}

#[test]
fn test_load_dotenv_missing_file() {
    let loaded = ConfigLoader::load_dotenv(Path::new("/nonexistent/.env")).unwrap();
    assert!(!loaded);
}

#[test]
fn test_load_dotenv_reads_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "CARGOTRACK_DOTENV_TEST_VAR=loaded").unwrap();

    let loaded = ConfigLoader::load_dotenv(file.path()).unwrap();
    assert!(loaded);
    assert_eq!(std::env::var("CARGOTRACK_DOTENV_TEST_VAR").unwrap(), "loaded");
}

#[test]
fn test_placeholders_in_comments_are_ignored() {
    let content = r#"
        # Set ${CARGOTRACK_TEST_UNSET_COMMENT} before running.
        [tracker]
        carrier = "Maersk" # or ${CARGOTRACK_TEST_UNSET_TRAILING}
    "#;
    let config = ConfigLoader::load_str(content).unwrap();
    assert_eq!(config.tracker.carrier, "Maersk");
}

#[test]
fn test_placeholder_outside_comment_still_required() {
    let content = "# ${CARGOTRACK_TEST_UNSET_A}\n[llm]\napi_key = \"${CARGOTRACK_TEST_UNSET_B}\"\n";
    let err = ConfigLoader::load_str(content).unwrap_err();
    assert!(matches!(err, ConfigError::EnvVarNotSet(ref var) if var == "CARGOTRACK_TEST_UNSET_B"));
}

#[test]
fn test_comment_start_skips_hashes_in_strings() {
    assert_eq!(comment_start("# note"), 0);
    assert_eq!(comment_start("a = 1 # note"), 6);
    assert_eq!(comment_start(r#"url = "http://x/#frag" # note"#), 23);
    assert_eq!(comment_start(r##"s = "say \"#\"" "##), 16);
    assert_eq!(comment_start("p = 'C:\\#dir' # x"), 14);
    assert_eq!(comment_start("no comment"), 10);
}

#[test]
fn test_shipped_default_config_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/default.toml");
    assert!(path.exists(), "missing {}", path.display());

    let config = ConfigLoader::load_or_default(&path).unwrap();
    assert_eq!(config.tracker.site_url, "http://www.seacargotracking.net/");
    assert_eq!(config.geocoder.user_agent, "cargo_tracker");
    assert!(config.llm.api_key.is_none());
}
