//! `engine` crate — starting workflow executions from trigger output.

pub mod error;
pub mod launcher;
pub mod mock;
pub mod models;

pub use error::EngineError;
pub use launcher::{ExecutionLauncher, TracingLauncher};
pub use models::Execution;
