//! `nodes` crate — the `WebhookNode` trait, node/credential descriptors and
//! the Qualytics trigger.
//!
//! Every trigger node must implement [`WebhookNode`]. The api crate
//! registers one route per declared webhook and dispatches through the
//! trait object.

pub mod credentials;
pub mod description;
pub mod error;
pub mod item;
pub mod mock;
pub mod qualytics;
pub mod traits;

pub use credentials::{CredentialStore, InMemoryCredentialStore};
pub use error::{CredentialError, NodeError};
pub use item::WorkflowItem;
pub use qualytics::QualyticsTrigger;
pub use traits::{WebhookContext, WebhookNode, WebhookOutcome, WebhookRequest, WebhookResponse};
