//! Axum router configuration.
//!
//! Routes are not hard-coded: every webhook a registered node declares in its
//! description becomes one route (`/{path}`) for the declared HTTP method.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    routing::{get, head, post, MethodRouter},
    Router,
};
use nodes::description::HttpMethod;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers::{webhooks, AppState, NodeRegistration};

/// Build the router serving every webhook of `registrations`.
///
/// # Panics
/// If two webhooks resolve to the same route and method.
pub fn build_router(state: AppState, registrations: Vec<NodeRegistration>) -> Router {
    let mut router = Router::new();

    for registration in registrations {
        let registration = Arc::new(registration);

        for webhook in &registration.node.description().webhooks {
            let route = webhook.route();
            info!(
                node = registration.node.description().name,
                webhook = webhook.name,
                "registering {:?} {}",
                webhook.http_method,
                route
            );
            router = router.route(&route, webhook_route(registration.clone(), webhook.name, webhook.http_method));
        }
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

fn webhook_route(
    registration: Arc<NodeRegistration>,
    webhook_name: &'static str,
    method: HttpMethod,
) -> MethodRouter<AppState> {
    let handler = move |state: State<AppState>, headers: HeaderMap, body: Bytes| {
        webhooks::handle_webhook(state, registration, webhook_name, headers, body)
    };

    match method {
        HttpMethod::Get => get(handler),
        HttpMethod::Head => head(handler),
        HttpMethod::Post => post(handler),
    }
}
