//! A CDP session attached to a single page.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::{Value, json};
use tracing::debug;

use super::client::Transport;
use super::error::CdpError;

const LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// A session attached to a single page/target.
pub struct PageSession {
    target_id: String,
    session_id: String,
    transport: Arc<Transport>,
}

impl PageSession {
    pub(crate) fn new(target_id: String, session_id: String, transport: Arc<Transport>) -> Self {
        Self {
            target_id,
            session_id,
            transport,
        }
    }

    /// Get target ID.
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Get session ID.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send a CDP command to this page session.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport
            .call(method, params, Some(&self.session_id))
            .await
    }

    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("Runtime.enable", None).await?;

        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }

    /// Override the page viewport.
    pub async fn set_viewport(&self, width: u32, height: u32) -> Result<(), CdpError> {
        self.call(
            "Emulation.setDeviceMetricsOverride",
            Some(json!({
                "width": width,
                "height": height,
                "deviceScaleFactor": 1,
                "mobile": false,
            })),
        )
        .await?;
        Ok(())
    }

    /// Navigate to URL and wait for the document to load.
    pub async fn navigate(&self, url: &str) -> Result<(), CdpError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText").and_then(Value::as_str) {
            return Err(CdpError::NavigationFailed(error.to_string()));
        }

        self.wait_for_load().await?;

        debug!("Navigated to {}", url);
        Ok(())
    }

    /// Poll `document.readyState` until the page is usable.
    pub async fn wait_for_load(&self) -> Result<(), CdpError> {
        let start = Instant::now();

        loop {
            let state = self.evaluate("document.readyState").await?;
            if matches!(state.as_str(), Some("complete" | "interactive")) {
                return Ok(());
            }

            if start.elapsed() > LOAD_TIMEOUT {
                return Err(CdpError::Timeout("Page load timeout".to_string()));
            }

            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }

    /// Evaluate a JavaScript expression and return its value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            let text = exception["exception"]["description"]
                .as_str()
                .or_else(|| exception["text"].as_str())
                .unwrap_or("Unknown error");
            return Err(CdpError::JavaScript(text.to_string()));
        }

        Ok(result["result"]["value"].clone())
    }

    /// Click the first element matching `selector`.
    pub async fn click(&self, selector: &str) -> Result<(), CdpError> {
        let found = self.evaluate(&click_script(selector)?).await?;
        if found.as_bool() != Some(true) {
            return Err(CdpError::ElementNotFound(selector.to_string()));
        }
        // Clicks commonly trigger navigation.
        self.wait_for_load().await
    }

    /// Fill the element matching `selector` with `text`.
    ///
    /// For `<select>` elements the option whose label or value equals `text`
    /// is chosen.
    pub async fn type_text(&self, selector: &str, text: &str) -> Result<(), CdpError> {
        let outcome = self.evaluate(&fill_script(selector, text)?).await?;
        match outcome.as_str() {
            Some("ok") => Ok(()),
            Some("no-option") => Err(CdpError::ElementNotFound(format!(
                "option '{}' in {}",
                text, selector
            ))),
            _ => Err(CdpError::ElementNotFound(selector.to_string())),
        }
    }

    /// Visible text of the page body.
    pub async fn text_content(&self) -> Result<String, CdpError> {
        let result = self
            .evaluate("document.body ? document.body.innerText : ''")
            .await?;
        Ok(result.as_str().unwrap_or_default().to_string())
    }

    /// Summary of form controls and buttons, one per line, with a selector for each.
    pub async fn form_controls(&self) -> Result<Vec<String>, CdpError> {
        let result = self.evaluate(FORM_CONTROLS_SCRIPT).await?;
        Ok(result
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Get current URL.
    pub async fn url(&self) -> Result<String, CdpError> {
        let result = self.evaluate("window.location.href").await?;
        Ok(result.as_str().unwrap_or_default().to_string())
    }

    /// Get page title.
    pub async fn title(&self) -> Result<String, CdpError> {
        let result = self.evaluate("document.title").await?;
        Ok(result.as_str().unwrap_or_default().to_string())
    }
}

fn click_script(selector: &str) -> Result<String, CdpError> {
    let selector = serde_json::to_string(selector)?;
    Ok(format!(
        r#"(() => {{
    const el = document.querySelector({selector});
    if (!el) return false;
    el.scrollIntoView({{block: "center"}});
    el.click();
    return true;
}})()"#
    ))
}

fn fill_script(selector: &str, text: &str) -> Result<String, CdpError> {
    let selector = serde_json::to_string(selector)?;
    let text = serde_json::to_string(text)?;
    Ok(format!(
        r#"(() => {{
    const el = document.querySelector({selector});
    if (!el) return "missing";
    const text = {text};
    el.focus();
    if (el.tagName === "SELECT") {{
        const option = Array.from(el.options).find(o => o.value === text || o.text.trim() === text);
        if (!option) return "no-option";
        el.value = option.value;
    }} else {{
        el.value = text;
    }}
    el.dispatchEvent(new Event("input", {{bubbles: true}}));
    el.dispatchEvent(new Event("change", {{bubbles: true}}));
    return "ok";
}})()"#
    ))
}

const FORM_CONTROLS_SCRIPT: &str = r##"(() => {
    const describe = (el) => {
        const tag = el.tagName.toLowerCase();
        let selector = tag;
        if (el.id) selector = tag + "#" + CSS.escape(el.id);
        else if (el.name) selector = tag + "[name=\"" + el.name + "\"]";
        let label = (el.innerText || el.value || el.placeholder || "").trim().slice(0, 60);
        if (tag === "select") {
            label = Array.from(el.options).map(o => o.text.trim()).slice(0, 40).join(" | ");
        }
        return selector + " " + (el.type ? "(" + el.type + ") " : "") + label;
    };
    return Array.from(document.querySelectorAll("input, select, textarea, button"))
        .filter(el => el.type !== "hidden")
        .slice(0, 60)
        .map(describe);
})()"##;
