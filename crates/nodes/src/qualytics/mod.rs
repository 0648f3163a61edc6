//! Qualytics Trigger: starts a workflow when a Qualytics Flow Action fires.
//!
//! Qualytics POSTs a JSON notification to `/qualytics`. The trigger:
//! 1. optionally validates the `x-qualytics-secret` header against the
//!    `qualyticsApi` credential,
//! 2. optionally drops events whose `event` field does not match the
//!    configured filter,
//! 3. otherwise forwards the body, unchanged, as the single item of a new
//!    workflow execution.

mod parameters;

#[cfg(test)]
mod trigger_tests;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::credentials::{QualyticsApi, QualyticsApiCredentials};
use crate::description::{
    ConnectionType, CredentialReference, DisplayOptions, HttpMethod, NodeDefaults, NodeProperty,
    NodeTypeDescription, PropertyOption, PropertyType, ResponseMode, WebhookDescription,
};
use crate::traits::{WebhookContext, WebhookNode, WebhookOutcome, WebhookRequest};
use crate::{NodeError, WorkflowItem};

pub use parameters::{Authentication, EventFilter, TriggerParameters};

/// Header carrying the shared secret.
pub const SECRET_HEADER: &str = "x-qualytics-secret";

pub struct QualyticsTrigger {
    description: NodeTypeDescription,
}

impl QualyticsTrigger {
    pub const NAME: &'static str = "qualyticsTrigger";

    pub fn new() -> Self {
        Self { description: Self::build_description() }
    }

    fn build_description() -> NodeTypeDescription {
        NodeTypeDescription {
            display_name: "Qualytics Trigger",
            name: Self::NAME,
            icon: "file:../../icons/qualytics.svg",
            group: vec!["trigger"],
            version: 1,
            subtitle: "={{$parameter[\"event\"] || \"all events\"}}",
            description: "Triggers workflow when a Qualytics Flow Action fires",
            defaults: NodeDefaults { name: "Qualytics Trigger" },
            usable_as_tool: true,
            inputs: Vec::new(),
            outputs: vec![ConnectionType::Main],
            credentials: vec![CredentialReference {
                name: QualyticsApi::NAME,
                required: false,
                display_options: Some(DisplayOptions::show_when(
                    "authentication",
                    &[Authentication::WebhookSecret.as_str()],
                )),
            }],
            webhooks: vec![WebhookDescription {
                name: "default",
                http_method: HttpMethod::Post,
                response_mode: ResponseMode::OnReceived,
                path: "qualytics",
            }],
            properties: vec![
                NodeProperty {
                    display_name: "Authentication",
                    name: "authentication",
                    kind: PropertyType::Options,
                    type_options: None,
                    options: vec![
                        PropertyOption { name: "None", value: Authentication::None.as_str() },
                        PropertyOption {
                            name: "Webhook Secret",
                            value: Authentication::WebhookSecret.as_str(),
                        },
                    ],
                    default: json!(Authentication::None.as_str()),
                    description: "How to authenticate incoming webhook requests",
                },
                NodeProperty {
                    display_name: "Event Filter",
                    name: "event",
                    kind: PropertyType::Options,
                    type_options: None,
                    options: vec![
                        PropertyOption { name: "All Events", value: EventFilter::All.as_str() },
                        PropertyOption {
                            name: "Flow Triggered",
                            value: EventFilter::FlowTriggered.as_str(),
                        },
                    ],
                    default: json!(EventFilter::All.as_str()),
                    description: "Which events to trigger on",
                },
            ],
        }
    }
}

impl Default for QualyticsTrigger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebhookNode for QualyticsTrigger {
    fn description(&self) -> &NodeTypeDescription {
        &self.description
    }

    #[instrument(skip_all, fields(node = QualyticsTrigger::NAME, webhook = ctx.webhook_name))]
    async fn webhook(
        &self,
        request: &WebhookRequest,
        ctx: &WebhookContext<'_>,
    ) -> Result<WebhookOutcome, NodeError> {
        let params = TriggerParameters::from_value(ctx.parameters)?;

        if params.authentication == Authentication::WebhookSecret {
            let record = ctx.credentials.get(QualyticsApi::NAME).await?;
            let credentials = QualyticsApiCredentials::from_value(record)?;

            if !credentials.accepts(request.header(SECRET_HEADER)) {
                warn!("rejecting webhook call: secret mismatch");
                return Ok(WebhookOutcome::respond(401, "Unauthorized"));
            }
        }

        let body = request.body();
        if !params.event.matches(body) {
            debug!(
                filter = params.event.as_str(),
                event = body.get("event").and_then(|e| e.as_str()).unwrap_or("<none>"),
                "event filtered"
            );
            return Ok(WebhookOutcome::respond(200, "Event filtered"));
        }

        Ok(WebhookOutcome::StartWorkflow(vec![WorkflowItem::new(body.clone())]))
    }
}
