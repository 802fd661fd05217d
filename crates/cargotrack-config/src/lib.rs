//! # cargotrack Config
//!
//! Configuration management for cargotrack. The [`Config`] struct is loaded
//! once at startup and handed to component constructors; nothing else reads
//! the process environment.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::{API_KEY_VAR, ConfigLoader, GEOCODER_URL_VAR};
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
