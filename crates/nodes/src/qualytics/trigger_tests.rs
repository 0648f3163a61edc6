//! Behaviour tests for the Qualytics trigger's webhook handler.
//!
//! Credentials come from `MockCredentialStore` so the tests can also assert
//! whether the handler looked them up at all.

use serde_json::{json, Value};

use super::*;
use crate::mock::MockCredentialStore;
use crate::CredentialError;

const FLOW_TRIGGERED: &str = "qualytics.flow.triggered";

fn params(authentication: &str, event: &str) -> Value {
    json!({ "authentication": authentication, "event": event })
}

fn secret_store(secret: &str) -> MockCredentialStore {
    MockCredentialStore::returning(json!({ "webhookSecret": secret }))
}

async fn call(
    request: &WebhookRequest,
    parameters: &Value,
    store: &MockCredentialStore,
) -> Result<WebhookOutcome, NodeError> {
    let ctx = WebhookContext { webhook_name: "default", parameters, credentials: store };
    QualyticsTrigger::new().webhook(request, &ctx).await
}

fn started_with(body: Value) -> WebhookOutcome {
    WebhookOutcome::StartWorkflow(vec![WorkflowItem::new(body)])
}

fn unauthorized() -> WebhookOutcome {
    WebhookOutcome::respond(401, "Unauthorized")
}

fn filtered() -> WebhookOutcome {
    WebhookOutcome::respond(200, "Event filtered")
}

// ============================================================
// Descriptor
// ============================================================

#[test]
fn description_declares_single_post_webhook() {
    let trigger = QualyticsTrigger::new();
    let desc = trigger.description();

    assert_eq!(desc.name, "qualyticsTrigger");
    assert!(desc.inputs.is_empty());
    assert_eq!(desc.outputs, vec![ConnectionType::Main]);
    assert!(desc.usable_as_tool);

    assert_eq!(desc.webhooks.len(), 1);
    let hook = &desc.webhooks[0];
    assert_eq!(hook.http_method, HttpMethod::Post);
    assert_eq!(hook.response_mode, ResponseMode::OnReceived);
    assert_eq!(hook.route(), "/qualytics");
}

#[test]
fn credential_shown_only_for_webhook_secret() {
    let trigger = QualyticsTrigger::new();
    let cred = &trigger.description().credentials[0];
    assert_eq!(cred.name, "qualyticsApi");
    assert!(!cred.required);

    let rule = cred.display_options.as_ref().unwrap();
    assert!(rule.is_visible(&params("webhookSecret", "all")));
    assert!(!rule.is_visible(&params("none", "all")));
}

#[test]
fn declared_options_match_typed_parameters() {
    let trigger = QualyticsTrigger::new();
    let desc = trigger.description();

    let auth = desc.property("authentication").unwrap();
    assert!(auth.allows("none") && auth.allows("webhookSecret"));
    assert!(!auth.allows("basicAuth"));
    assert_eq!(auth.default, json!("none"));

    let event = desc.property("event").unwrap();
    assert!(event.allows("all") && event.allows(FLOW_TRIGGERED));
    assert_eq!(event.default, json!("all"));
}

#[test]
fn description_serializes_with_host_keys() {
    let trigger = QualyticsTrigger::new();
    let value = serde_json::to_value(trigger.description()).unwrap();
    assert_eq!(value["displayName"], "Qualytics Trigger");
    assert_eq!(value["usableAsTool"], true);
    assert_eq!(value["webhooks"][0]["httpMethod"], "POST");
    assert_eq!(value["webhooks"][0]["responseMode"], "onReceived");
    assert_eq!(value["properties"][1]["type"], "options");
    assert_eq!(value["credentials"][0]["displayOptions"]["show"]["authentication"][0], "webhookSecret");
}

// ============================================================
// Scenarios
// ============================================================

#[tokio::test]
async fn no_auth_all_events_forwards_body() {
    let store = secret_store("unused");
    let body = json!({ "event": "x" });
    let req = WebhookRequest::new(body.clone());

    let outcome = call(&req, &params("none", "all"), &store).await.unwrap();
    assert_eq!(outcome, started_with(body));
    assert_eq!(store.call_count(), 0, "credentials must not be read without auth");
}

#[tokio::test]
async fn missing_secret_header_is_unauthorized() {
    let store = secret_store("s3cr3t");
    let req = WebhookRequest::new(json!({ "event": FLOW_TRIGGERED }));

    let outcome = call(&req, &params("webhookSecret", "all"), &store).await.unwrap();
    assert_eq!(outcome, unauthorized());
    assert_eq!(*store.calls.lock().unwrap(), vec!["qualyticsApi".to_string()]);
}

#[tokio::test]
async fn valid_secret_with_other_event_is_filtered() {
    let store = secret_store("s3cr3t");
    let req = WebhookRequest::new(json!({ "event": "other" })).with_header(SECRET_HEADER, "s3cr3t");

    let outcome = call(&req, &params("webhookSecret", FLOW_TRIGGERED), &store).await.unwrap();
    assert_eq!(outcome, filtered());
}

#[tokio::test]
async fn valid_secret_with_matching_event_forwards() {
    let store = secret_store("s3cr3t");
    let body = json!({ "event": FLOW_TRIGGERED, "flow": { "id": 12 } });
    let req = WebhookRequest::new(body.clone()).with_header(SECRET_HEADER, "s3cr3t");

    let outcome = call(&req, &params("webhookSecret", FLOW_TRIGGERED), &store).await.unwrap();
    assert_eq!(outcome, started_with(body));
}

// ============================================================
// Properties
// ============================================================

#[tokio::test]
async fn no_auth_never_unauthorized() {
    let store = secret_store("s3cr3t");
    for header in [None, Some("wrong"), Some("s3cr3t")] {
        let mut req = WebhookRequest::new(json!({ "event": "x" }));
        if let Some(h) = header {
            req = req.with_header(SECRET_HEADER, h);
        }
        let outcome = call(&req, &params("none", "all"), &store).await.unwrap();
        assert_ne!(outcome, unauthorized());
    }
}

#[tokio::test]
async fn unauthorized_iff_header_differs_from_secret() {
    let store = secret_store("s3cr3t");
    let cases = [
        (None, true),
        (Some(""), true),
        (Some("S3CR3T"), true),
        (Some("s3cr3t2"), true),
        (Some("s3cr3t"), false),
    ];

    for (header, rejected) in cases {
        let mut req = WebhookRequest::new(json!({}));
        if let Some(h) = header {
            req = req.with_header(SECRET_HEADER, h);
        }
        let outcome = call(&req, &params("webhookSecret", "all"), &store).await.unwrap();
        assert_eq!(outcome == unauthorized(), rejected, "header {header:?}");
    }
}

#[tokio::test]
async fn secret_header_name_is_case_insensitive() {
    let store = secret_store("s3cr3t");
    let req = WebhookRequest::new(json!({})).with_header("X-Qualytics-Secret", "s3cr3t");

    let outcome = call(&req, &params("webhookSecret", "all"), &store).await.unwrap();
    assert_eq!(outcome, started_with(json!({})));
}

#[tokio::test]
async fn empty_stored_secret_bypasses_validation() {
    for record in [json!({ "webhookSecret": "" }), json!({})] {
        let store = MockCredentialStore::returning(record);
        let req = WebhookRequest::new(json!({ "event": "x" })).with_header(SECRET_HEADER, "anything");

        let outcome = call(&req, &params("webhookSecret", "all"), &store).await.unwrap();
        assert_eq!(outcome, started_with(json!({ "event": "x" })));
    }
}

#[tokio::test]
async fn specific_filter_drops_missing_or_malformed_event() {
    let store = secret_store("");
    for body in [json!({}), json!({ "event": null }), json!({ "event": 1 }), json!([])] {
        let req = WebhookRequest::new(body);
        let outcome = call(&req, &params("none", FLOW_TRIGGERED), &store).await.unwrap();
        assert_eq!(outcome, filtered());
    }
}

#[tokio::test]
async fn authentication_is_checked_before_filter() {
    let store = secret_store("s3cr3t");
    let req = WebhookRequest::new(json!({ "event": "other" }));

    let outcome = call(&req, &params("webhookSecret", FLOW_TRIGGERED), &store).await.unwrap();
    assert_eq!(outcome, unauthorized());
}

#[tokio::test]
async fn identical_requests_classify_identically() {
    let store = secret_store("s3cr3t");
    let req = WebhookRequest::new(json!({ "event": FLOW_TRIGGERED })).with_header(SECRET_HEADER, "s3cr3t");
    let parameters = params("webhookSecret", FLOW_TRIGGERED);

    let first = call(&req, &parameters, &store).await.unwrap();
    let second = call(&req, &parameters, &store).await.unwrap();
    assert_eq!(first, second);
}

// ============================================================
// Errors
// ============================================================

#[tokio::test]
async fn credential_lookup_failure_propagates() {
    let store = MockCredentialStore::failing(CredentialError::NotFound("qualyticsApi".into()));
    let req = WebhookRequest::new(json!({}));

    let err = call(&req, &params("webhookSecret", "all"), &store).await.unwrap_err();
    assert!(matches!(err, NodeError::Credentials(CredentialError::NotFound(_))));
}

#[tokio::test]
async fn invalid_parameters_are_an_error() {
    let store = secret_store("");
    let req = WebhookRequest::new(json!({}));

    let err = call(&req, &json!({ "authentication": "oauth2" }), &store).await.unwrap_err();
    assert!(matches!(err, NodeError::InvalidParameters(_)));
}
