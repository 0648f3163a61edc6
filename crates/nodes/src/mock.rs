//! `MockCredentialStore` — a test double for `CredentialStore`.
//!
//! Useful in unit and integration tests that need to assert whether (and
//! how often) a node looked up its credentials, or to simulate a failing
//! store.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

use crate::credentials::CredentialStore;
use crate::CredentialError;

/// Behaviour injected into `MockCredentialStore` at construction time.
pub enum MockBehaviour {
    /// Return a specific JSON record for every lookup.
    ReturnValue(Value),
    /// Fail every lookup with the given error.
    Fail(CredentialError),
}

/// A mock store that records every credential type requested and returns a
/// programmer-specified result.
pub struct MockCredentialStore {
    pub behaviour: MockBehaviour,
    /// All credential types requested (in call order).
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockCredentialStore {
    /// Create a mock that always returns `record`.
    pub fn returning(record: Value) -> Self {
        Self {
            behaviour: MockBehaviour::ReturnValue(record),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock whose lookups always fail.
    pub fn failing(error: CredentialError) -> Self {
        Self {
            behaviour: MockBehaviour::Fail(error),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of lookups served so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CredentialStore for MockCredentialStore {
    async fn get(&self, credential_type: &str) -> Result<Value, CredentialError> {
        self.calls.lock().unwrap().push(credential_type.to_owned());

        match &self.behaviour {
            MockBehaviour::ReturnValue(v) => Ok(v.clone()),
            MockBehaviour::Fail(e) => Err(e.clone()),
        }
    }
}
