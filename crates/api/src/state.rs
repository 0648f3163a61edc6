//! Shared state handed to every request handler.

use std::sync::Arc;

use engine::ExecutionLauncher;
use nodes::{CredentialStore, WebhookNode};
use serde_json::Value;

#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<dyn CredentialStore>,
    pub launcher: Arc<dyn ExecutionLauncher>,
}

impl AppState {
    pub fn new(credentials: Arc<dyn CredentialStore>, launcher: Arc<dyn ExecutionLauncher>) -> Self {
        Self { credentials, launcher }
    }
}

/// A node instance served by the router, together with the parameters the
/// workflow author configured for it.
pub struct NodeRegistration {
    pub node: Arc<dyn WebhookNode>,
    pub parameters: Value,
}

impl NodeRegistration {
    pub fn new(node: Arc<dyn WebhookNode>, parameters: Value) -> Self {
        Self { node, parameters }
    }
}
