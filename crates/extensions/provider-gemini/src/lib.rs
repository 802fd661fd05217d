//! # cargotrack Provider - Gemini
//!
//! Google Gemini `generateContent` backend for the browser agent.

mod client;
mod provider;
mod types;

pub use provider::{DEFAULT_MODEL, GeminiProvider};
pub use types::*;
