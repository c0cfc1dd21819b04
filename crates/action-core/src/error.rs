//! Error types for action dispatch.

use thiserror::Error;

/// Errors that can occur while dispatching or running an action.
///
/// User-facing failures (bad amounts, unreachable services) are not errors
/// at this level: actions report them as messages and return normally.
#[derive(Debug, Error)]
pub enum ActionError {
    /// No action registered under this name.
    #[error("No registered action found for name '{0}'")]
    NotFound(String),

    /// The request payload could not be understood.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
