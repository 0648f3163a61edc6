//! `MockLauncher` — a test double for `ExecutionLauncher`.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use nodes::WorkflowItem;

use crate::{EngineError, Execution, ExecutionLauncher};

/// A mock launcher that records every execution it is asked to start and
/// optionally fails.
#[derive(Clone, Default)]
pub struct MockLauncher {
    /// Error returned from every `launch`, if set.
    pub failure: Option<EngineError>,
    /// All executions started (in call order).
    pub launched: Arc<Mutex<Vec<Execution>>>,
}

impl MockLauncher {
    /// Create a mock that always succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that always fails with `error`.
    pub fn failing(error: EngineError) -> Self {
        Self { failure: Some(error), launched: Arc::default() }
    }

    /// Number of executions started so far.
    pub fn launch_count(&self) -> usize {
        self.launched.lock().unwrap().len()
    }

    /// Snapshot of the started executions.
    pub fn executions(&self) -> Vec<Execution> {
        self.launched.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExecutionLauncher for MockLauncher {
    async fn launch(&self, node: &str, items: Vec<WorkflowItem>) -> Result<Execution, EngineError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        let execution = Execution::new(node, items);
        self.launched.lock().unwrap().push(execution.clone());
        Ok(execution)
    }
}
