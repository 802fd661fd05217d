use super::*;
use crate::cdp::CdpError;
use std::path::PathBuf;

#[test]
fn test_config_defaults() {
    let config = BrowserManagerConfig::default();
    assert_eq!(config.debug_port, 9222);
    assert_eq!(config.viewport_width, 1920);
    assert_eq!(config.viewport_height, 1080);
    assert!(!config.headless);
    assert_eq!(config.endpoint(), "http://localhost:9222");
}

#[test]
fn test_profile_dir() {
    let config = BrowserManagerConfig {
        profile_dir: Some(PathBuf::from("/tmp/cargotrack-profile")),
        ..Default::default()
    };
    assert_eq!(config.get_profile_dir(), PathBuf::from("/tmp/cargotrack-profile"));

    let default_dir = BrowserManagerConfig::default().get_profile_dir();
    assert!(default_dir.ends_with(".cargotrack/browser-profile"));
}

#[test]
fn test_error_from_cdp() {
    let err: BrowserError = CdpError::ChromeNotAvailable("localhost:9222".to_string()).into();
    assert!(matches!(err, BrowserError::ConnectionFailed(_)));

    let err: BrowserError = CdpError::SessionClosed.into();
    assert!(matches!(err, BrowserError::NotConnected));

    let err: BrowserError = CdpError::ElementNotFound("#ref".to_string()).into();
    assert_eq!(err.to_string(), "Element not found: #ref");
}

#[tokio::test]
async fn test_open_page_requires_connection() {
    let manager = BrowserManager::new(BrowserManagerConfig::default());
    let result = manager.open_page().await;
    assert!(matches!(result, Err(BrowserError::NotConnected)));
}

#[tokio::test]
async fn test_missing_configured_chrome() {
    let manager = BrowserManager::new(BrowserManagerConfig {
        debug_port: 1,
        chrome_path: Some(PathBuf::from("/nonexistent/chrome")),
        ..Default::default()
    });

    let result = manager.connect().await;
    assert!(matches!(result, Err(BrowserError::ChromeNotFound)));

    // Shutdown after a failed start is a no-op.
    manager.shutdown().await;
}

#[test]
fn test_headless_ignored_only_when_requested() {
    let visible = BrowserManager::new(BrowserManagerConfig::default());
    assert!(!visible.headless_ignored());

    let headless = BrowserManager::new(BrowserManagerConfig {
        headless: true,
        ..Default::default()
    });
    assert!(headless.headless_ignored());
}
