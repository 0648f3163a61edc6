use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{error, info, warn};

use super::{AppState, NodeRegistration};
use nodes::{WebhookContext, WebhookOutcome, WebhookRequest};

/// Dispatch one inbound call to the node that owns the webhook.
pub async fn handle_webhook(
    State(state): State<AppState>,
    registration: Arc<NodeRegistration>,
    webhook_name: &'static str,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, StatusCode> {
    let node_name = registration.node.description().name;

    // 1. Parse the body; an empty body counts as an empty object.
    let payload = match parse_body(&body) {
        Ok(p) => p,
        Err(e) => {
            warn!(node = node_name, "rejecting webhook call with invalid JSON: {e}");
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    // 2. Let the node classify the call.
    let request = to_webhook_request(&headers, payload);
    let ctx = WebhookContext {
        webhook_name,
        parameters: &registration.parameters,
        credentials: state.credentials.as_ref(),
    };

    let outcome = match registration.node.webhook(&request, &ctx).await {
        Ok(o) => o,
        Err(e) => {
            error!(node = node_name, "webhook handler failed: {e}");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // 3. Either answer directly or start the workflow.
    let items = match outcome {
        WebhookOutcome::Respond(response) => {
            let status = StatusCode::from_u16(response.status)
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
            return Ok((status, response.body).into_response());
        }
        WebhookOutcome::StartWorkflow(items) => items,
    };

    let execution = match state.launcher.launch(node_name, items).await {
        Ok(exec) => exec,
        Err(e) => {
            error!(node = node_name, "failed to start workflow execution: {e}");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    info!(node = node_name, execution_id = %execution.id, "webhook accepted");

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({
            "message": "Workflow was started",
            "executionId": execution.id,
        })),
    )
        .into_response())
}

fn parse_body(body: &[u8]) -> Result<Value, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(json!({}));
    }
    serde_json::from_slice(body)
}

/// Copy headers into the node-facing request. Values that are not visible
/// ASCII are dropped.
fn to_webhook_request(headers: &HeaderMap, body: Value) -> WebhookRequest {
    headers
        .iter()
        .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v)))
        .fold(WebhookRequest::new(body), |req, (name, value)| req.with_header(name, value))
}
