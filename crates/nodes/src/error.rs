//! Node-level error types.

use thiserror::Error;

/// Errors returned by a node's `webhook` method.
///
/// Any of these reaching the HTTP layer is answered with a generic
/// `500 Internal Server Error`; expected outcomes such as a rejected secret
/// are *not* errors and travel as a [`crate::WebhookOutcome`] instead.
#[derive(Debug, Error)]
pub enum NodeError {
    /// The node's configured parameters could not be read.
    #[error("invalid node parameters: {0}")]
    InvalidParameters(String),

    /// The credential lookup failed.
    #[error(transparent)]
    Credentials(#[from] CredentialError),
}

/// Errors raised by a [`crate::CredentialStore`] or while decoding a
/// credential record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// No credential of the requested type is configured for the node.
    #[error("node does not have any credentials of type '{0}' set")]
    NotFound(String),

    /// The stored record does not have the expected shape.
    #[error("credential '{credential_type}' is malformed: {message}")]
    Malformed {
        credential_type: String,
        message: String,
    },

    /// The backing store could not be read.
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
}
