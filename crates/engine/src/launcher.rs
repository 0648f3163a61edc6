//! Hand-off from a trigger to the workflow engine.
//!
//! The HTTP layer calls [`ExecutionLauncher::launch`] once per accepted
//! webhook call with the items the trigger produced. The launcher assigns
//! the execution an ID and starts it; the caller only needs the ID back to
//! acknowledge the request.

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use nodes::WorkflowItem;

use crate::{EngineError, Execution};

#[async_trait]
pub trait ExecutionLauncher: Send + Sync {
    /// Start a new execution for `node` with `items` as its input.
    ///
    /// # Errors
    /// [`EngineError::NoItems`] if `items` is empty; implementation-specific
    /// errors otherwise.
    async fn launch(&self, node: &str, items: Vec<WorkflowItem>) -> Result<Execution, EngineError>;
}

/// Launcher that records each execution in the trace log.
///
/// Holds no state: the execution exists only as the structured log event
/// and the returned [`Execution`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLauncher;

#[async_trait]
impl ExecutionLauncher for TracingLauncher {
    #[instrument(skip(self, items), fields(item_count = items.len()))]
    async fn launch(&self, node: &str, items: Vec<WorkflowItem>) -> Result<Execution, EngineError> {
        if items.is_empty() {
            return Err(EngineError::NoItems { node: node.to_owned() });
        }

        let execution = Execution::new(node, items);
        info!(execution_id = %execution.id, "workflow execution started");
        for (index, item) in execution.items.iter().enumerate() {
            debug!(execution_id = %execution.id, index, payload = %item.json, "execution input");
        }

        Ok(execution)
    }
}
