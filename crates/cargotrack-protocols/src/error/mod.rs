//! Error types shared across cargotrack crates.

mod agent;
mod geocode;
mod history;
mod provider;
mod tool;
mod tracker;

pub use agent::*;
pub use geocode::*;
pub use history::*;
pub use provider::*;
pub use tool::*;
pub use tracker::*;
