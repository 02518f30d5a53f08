//! HTTP API - router, handlers and wire models

pub mod handlers;
pub mod models;
pub mod routes;

use std::sync::Arc;
use tracing::info;

use crate::error::Result;
use crate::AppState;

/// Bind `addr` and serve the API until the process is stopped
pub async fn serve(state: Arc<AppState>, addr: &str) -> Result<()> {
    let app = routes::create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
