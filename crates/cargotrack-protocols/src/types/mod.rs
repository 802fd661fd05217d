//! Common types used across cargotrack.

mod common;
mod message;
mod record;

pub use common::*;
pub use message::*;
pub use record::*;
