//! BrowserManager: Chrome discovery, launch, connection and teardown.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{BrowserError, BrowserManagerConfig};
use crate::cdp::{CdpClient, PageSession};

const STARTUP_ATTEMPTS: u32 = 30;

/// Owns the Chrome connection, the single working page and, if it started
/// Chrome itself, the Chrome process.
pub struct BrowserManager {
    config: BrowserManagerConfig,
    client: RwLock<Option<Arc<CdpClient>>>,
    page: RwLock<Option<Arc<PageSession>>>,
    chrome_process: RwLock<Option<Child>>,
}

impl BrowserManager {
    /// Create a new browser manager.
    pub fn new(config: BrowserManagerConfig) -> Self {
        Self {
            config,
            client: RwLock::new(None),
            page: RwLock::new(None),
            chrome_process: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &BrowserManagerConfig {
        &self.config
    }

    /// Find Chrome executable path.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let paths: &[&str] = &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];

        #[cfg(target_os = "linux")]
        let paths: &[&str] = &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths: &[&str] = &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        let paths: &[&str] = &[];

        paths.iter().map(PathBuf::from).find(|p| p.exists())
    }

    fn chrome_executable(&self) -> Result<PathBuf, BrowserError> {
        match self.config.chrome_path {
            Some(ref path) if path.exists() => Ok(path.clone()),
            Some(ref path) => {
                warn!("Configured Chrome {} does not exist", path.display());
                Err(BrowserError::ChromeNotFound)
            }
            None => Self::find_chrome().ok_or(BrowserError::ChromeNotFound),
        }
    }

    async fn is_chrome_running(&self) -> bool {
        reqwest::get(&format!("{}/json/version", self.config.endpoint()))
            .await
            .is_ok()
    }

    async fn launch_chrome(&self) -> Result<Child, BrowserError> {
        let chrome_path = self.chrome_executable()?;
        let profile_dir = self.config.get_profile_dir();

        if let Err(e) = std::fs::create_dir_all(&profile_dir) {
            warn!("Failed to create profile directory: {}", e);
        }

        info!("Launching Chrome with profile at: {}", profile_dir.display());

        let mut cmd = Command::new(&chrome_path);
        cmd.arg(format!("--remote-debugging-port={}", self.config.debug_port))
            .arg(format!("--user-data-dir={}", profile_dir.display()))
            .arg(format!(
                "--window-size={},{}",
                self.config.viewport_width, self.config.viewport_height
            ))
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-background-networking")
            .arg("--disable-sync")
            .arg("--disable-translate")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        if self.config.headless {
            cmd.arg("--headless=new");
        }

        let child = cmd
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        info!("Chrome launched with PID: {:?}", child.id());
        Ok(child)
    }

    /// Headless mode was requested but an already running browser will be attached instead.
    pub(crate) fn headless_ignored(&self) -> bool {
        self.config.headless
    }

    /// Connect to the browser, launching it if necessary.
    pub async fn connect(&self) -> Result<(), BrowserError> {
        if self.client.read().await.is_some() {
            return Ok(());
        }

        if !self.is_chrome_running().await {
            info!(
                "Chrome not running on port {}, launching...",
                self.config.debug_port
            );

            let child = self.launch_chrome().await?;
            *self.chrome_process.write().await = Some(child);

            let mut ready = false;
            for _ in 0..STARTUP_ATTEMPTS {
                tokio::time::sleep(Duration::from_millis(200)).await;
                if self.is_chrome_running().await {
                    ready = true;
                    break;
                }
            }

            if !ready {
                return Err(BrowserError::LaunchFailed(
                    "Chrome failed to start within timeout".to_string(),
                ));
            }
        } else {
            info!("Chrome already running on port {}", self.config.debug_port);
            if self.headless_ignored() {
                warn!(
                    "Reusing the Chrome on port {}; --headless only applies to a browser cargotrack launches",
                    self.config.debug_port
                );
            }
        }

        let client = CdpClient::connect(&self.config.endpoint()).await?;
        *self.client.write().await = Some(Arc::new(client));

        info!("Connected to Chrome at {}", self.config.endpoint());
        Ok(())
    }

    /// Open the working page, sized to the configured viewport.
    pub async fn open_page(&self) -> Result<Arc<PageSession>, BrowserError> {
        if let Some(ref page) = *self.page.read().await {
            return Ok(page.clone());
        }

        let client = self
            .client
            .read()
            .await
            .clone()
            .ok_or(BrowserError::NotConnected)?;

        let page = Arc::new(client.new_page().await?);
        page.set_viewport(self.config.viewport_width, self.config.viewport_height)
            .await?;

        debug!("Opened page {}", page.target_id());
        *self.page.write().await = Some(page.clone());
        Ok(page)
    }

    /// Close the page and drop the connection.
    pub async fn close(&self) {
        let page = self.page.write().await.take();
        let client = self.client.write().await.take();

        if let (Some(page), Some(client)) = (page, client.as_ref()) {
            if let Err(e) = client.close_page(page.target_id()).await {
                warn!("Failed to close page {}: {}", page.target_id(), e);
            }
        }

        if client.is_some() {
            info!("Browser connection closed");
        }
    }

    /// Close everything and stop Chrome if this manager launched it.
    pub async fn shutdown(&self) {
        self.close().await;
        if let Some(mut child) = self.chrome_process.write().await.take() {
            info!("Shutting down Chrome...");
            if let Err(e) = child.kill().await {
                warn!("Failed to stop Chrome: {}", e);
            }
        }
    }
}
