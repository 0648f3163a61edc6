//! Credential types and the store nodes read them from.
//!
//! A node never owns credential data: it asks the [`CredentialStore`] for a
//! record by credential type name on every invocation and decodes the JSON
//! into its own typed struct.

pub mod qualytics_api;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::description::{HttpMethod, NodeProperty};
use crate::CredentialError;

pub use qualytics_api::{QualyticsApi, QualyticsApiCredentials};

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Read-only access to decrypted credential records.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetch the record for `credential_type`.
    async fn get(&self, credential_type: &str) -> Result<Value, CredentialError>;
}

/// Credentials held in memory, keyed by credential type name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    entries: HashMap<String, Value>,
}

impl InMemoryCredentialStore {
    pub fn new(entries: HashMap<String, Value>) -> Self {
        Self { entries }
    }

    pub fn insert(&mut self, credential_type: impl Into<String>, data: Value) {
        self.entries.insert(credential_type.into(), data);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get(&self, credential_type: &str) -> Result<Value, CredentialError> {
        self.entries
            .get(credential_type)
            .cloned()
            .ok_or_else(|| CredentialError::NotFound(credential_type.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Description
// ---------------------------------------------------------------------------

/// Metadata for one credential type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialTypeDescription {
    pub name: &'static str,
    pub display_name: &'static str,
    pub documentation_url: &'static str,
    pub icon: &'static str,
    pub properties: Vec<NodeProperty>,
    pub test: CredentialTestRequest,
}

/// The request issued when a user asks to test a credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialTestRequest {
    pub base_url: String,
    pub url: &'static str,
    pub method: HttpMethod,
    pub skip_ssl_certificate_validation: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CredentialTestStatus {
    Ok,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialTestResult {
    pub status: CredentialTestStatus,
    pub message: String,
}

impl CredentialTestRequest {
    const TIMEOUT: Duration = Duration::from_secs(10);

    /// Full URL the test request targets.
    pub fn target(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.url)
    }

    /// Issue the test request.
    ///
    /// There is no remote endpoint that can validate a webhook secret, so the
    /// outcome of the request is logged and the test always reports success.
    pub async fn run(&self) -> CredentialTestResult {
        let target = self.target();

        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(self.skip_ssl_certificate_validation)
            .timeout(Self::TIMEOUT)
            .build();

        match client {
            Ok(client) => {
                let method = match self.method {
                    HttpMethod::Get => reqwest::Method::GET,
                    HttpMethod::Head => reqwest::Method::HEAD,
                    HttpMethod::Post => reqwest::Method::POST,
                };
                match client.request(method, &target).send().await {
                    Ok(response) => {
                        debug!("credential test {} -> {}", target, response.status());
                    }
                    Err(e) => warn!("credential test request to {} failed: {}", target, e),
                }
            }
            Err(e) => warn!("could not build credential test client: {}", e),
        }

        CredentialTestResult {
            status: CredentialTestStatus::Ok,
            message: "Connection successful".to_owned(),
        }
    }
}
