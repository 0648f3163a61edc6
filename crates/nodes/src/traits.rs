//! The `WebhookNode` trait — the contract every trigger node must fulfil.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::credentials::CredentialStore;
use crate::description::NodeTypeDescription;
use crate::{NodeError, WorkflowItem};

/// An inbound webhook call as seen by a node.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookRequest {
    /// Header names are stored lower-cased; the first value wins.
    headers: BTreeMap<String, String>,
    body: Value,
}

impl WebhookRequest {
    pub fn new(body: Value) -> Self {
        Self { headers: BTreeMap::new(), body }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.to_ascii_lowercase())
            .or_insert_with(|| value.into());
        self
    }

    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn body(&self) -> &Value {
        &self.body
    }
}

/// Everything the host hands a node alongside the request.
pub struct WebhookContext<'a> {
    /// Name of the webhook (from the node description) that received the call.
    pub webhook_name: &'a str,
    /// The node's configured parameters, as a JSON object.
    pub parameters: &'a Value,
    pub credentials: &'a dyn CredentialStore,
}

/// Short-circuit response written straight back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

/// What the host should do with a webhook call.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookOutcome {
    /// Answer the caller directly; no workflow execution is started.
    Respond(WebhookResponse),
    /// Start a new workflow execution with these items.
    StartWorkflow(Vec<WorkflowItem>),
}

impl WebhookOutcome {
    pub fn respond(status: u16, body: impl Into<String>) -> Self {
        Self::Respond(WebhookResponse { status, body: body.into() })
    }
}

/// A node that starts workflows from inbound HTTP calls.
#[async_trait]
pub trait WebhookNode: Send + Sync {
    fn description(&self) -> &NodeTypeDescription;

    /// Classify one inbound call. Must not mutate parameters or credentials.
    async fn webhook(
        &self,
        request: &WebhookRequest,
        ctx: &WebhookContext<'_>,
    ) -> Result<WebhookOutcome, NodeError>;
}
