//! Engine-level error types.

use thiserror::Error;

/// Errors produced when starting a workflow execution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A trigger asked for an execution without any input items.
    #[error("trigger '{node}' produced no items to start an execution with")]
    NoItems { node: String },

    /// The launcher cannot accept executions right now.
    #[error("execution launcher unavailable: {0}")]
    Unavailable(String),
}
