//! # cargotrack Protocols
//!
//! Shared definitions for the cargotrack workspace.
//! Contains data types, trait seams and error enums - no I/O.
//!
//! ## Core Traits
//!
//! - [`TrackingAgent`] - Runs a natural-language tracking task and returns an opaque result
//! - [`Geocoder`] - Resolves a place name to coordinates
//! - [`LLMProvider`] - Chat completion backend used by the browser agent
//! - [`Tool`] - Action the browser agent can invoke

pub mod agent;
pub mod error;
pub mod geocode;
pub mod provider;
pub mod tool;
pub mod types;

pub use agent::{DONE_TOOL, TrackingAgent};
pub use error::{
    AgentError, GeocodeError, HistoryError, ProviderError, ToolError, TrackerError,
};
pub use geocode::{Coordinates, Geocoder};
pub use provider::{CompletionRequest, CompletionResponse, LLMProvider};
pub use tool::{Tool, ToolDefinition, ToolResult};
pub use types::*;
