//! # cargotrack Browser Agent
//!
//! A small tool-calling agent that drives Chrome over the DevTools Protocol
//! to look up a shipment.
//!
//! ## Features
//!
//! - **Pure Rust CDP**: Direct WebSocket connection to Chrome, no Node.js
//! - **Scoped sessions**: Chrome is launched or attached per run and always released
//! - **Turn-bounded loop**: The model gets a fixed number of turns to call `done`
//!
//! ## Tools
//!
//! - `browser_navigate` - Open a URL
//! - `browser_click` - Click an element by CSS selector
//! - `browser_type` - Fill an input or choose a select option
//! - `browser_get_content` - Read the visible page text and form controls
//! - `done` - Hand back the extracted result

pub mod agent;
pub mod cdp;
pub mod manager;
pub mod tools;

pub use agent::{AgentLoopConfig, BrowserAgent, ToolLoop};
pub use cdp::{CdpClient, CdpError, PageSession};
pub use manager::{BrowserError, BrowserManager, BrowserManagerConfig};
