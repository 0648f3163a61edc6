pub mod webhooks;

pub use crate::state::{AppState, NodeRegistration};
