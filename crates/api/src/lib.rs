//! `api` crate — HTTP layer hosting trigger nodes.
//!
//! Exposes one route per declared node webhook, e.g.:
//!   POST   /qualytics

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;


use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

pub use error::ApiError;
pub use router::build_router;
pub use state::{AppState, NodeRegistration};

/// Bind `addr` and serve `router` until Ctrl-C.
pub async fn serve(addr: &str, router: Router) -> Result<(), ApiError> {
    let listener = TcpListener::bind(addr).await.map_err(|source| ApiError::Bind {
        addr: addr.to_owned(),
        source,
    })?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
