//! Workflow items, the unit of data handed to a workflow execution.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowItem {
    pub json: Value,
}

impl WorkflowItem {
    pub fn new(json: Value) -> Self {
        Self { json }
    }
}
