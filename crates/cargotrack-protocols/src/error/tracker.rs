//! Top-level tracking errors.

use thiserror::Error;

use super::{AgentError, HistoryError};

/// Errors that abort a tracking run.
///
/// Everything below this level degrades to sentinel values instead of failing;
/// only these reach the process boundary.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Agent run failed: {0}")]
    Agent(#[from] AgentError),

    #[error("History store failed: {0}")]
    History(#[from] HistoryError),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Setup failed: {0}")]
    Setup(String),
}
