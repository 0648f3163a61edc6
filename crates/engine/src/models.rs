//! Core domain models for the workflow engine.

use chrono::{DateTime, Utc};
use nodes::WorkflowItem;
use serde::Serialize;
use uuid::Uuid;

/// A started workflow execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    pub id: Uuid,
    /// Type name of the trigger node that started the execution.
    pub node: String,
    /// Input items handed to the first node.
    pub items: Vec<WorkflowItem>,
    pub started_at: DateTime<Utc>,
}

impl Execution {
    pub fn new(node: impl Into<String>, items: Vec<WorkflowItem>) -> Self {
        Self {
            id: Uuid::new_v4(),
            node: node.into(),
            items,
            started_at: Utc::now(),
        }
    }
}
