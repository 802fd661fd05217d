//! # cargotrack Core
//!
//! The tracking pipeline and everything it needs that is not an external
//! collaborator.
//!
//! ## Components
//!
//! - [`TaskComposer`] - Builds the natural-language instruction for the agent
//! - [`normalize`] - Turns whatever the agent returned into a [`TrackingRecord`]
//! - [`RouteMapper`] - Geocodes both ports and writes an HTML route map
//! - [`HistoryStore`] - Append-only JSON history of every run
//! - [`Reporter`] - Human-readable summary of a record
//! - [`Tracker`] - Wires the above around a [`TrackingAgent`]
//!
//! [`TrackingRecord`]: cargotrack_protocols::TrackingRecord
//! [`TrackingAgent`]: cargotrack_protocols::TrackingAgent

pub mod history;
pub mod normalizer;
pub mod report;
pub mod route_map;
pub mod task;
pub mod tracker;

pub use history::HistoryStore;
pub use normalizer::{RawShape, classify, normalize};
pub use report::Reporter;
pub use route_map::{MapOutcome, RouteMapper};
pub use task::TaskComposer;
pub use tracker::Tracker;
