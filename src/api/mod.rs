mod error;
mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use log::info;

use crate::core::PeekError;
use crate::registry::Registry;

pub struct PeekApi {
    registry: Arc<Registry>,
}

impl PeekApi {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/v1/table", get(handlers::list_tables))
            .route("/api/v1/table/{label}", get(handlers::metadata))
            .route("/api/v1/table/{label}/rows", get(handlers::head_rows))
            .route("/api/v1/table/{label}/tail", get(handlers::tail_rows))
            .with_state(self.registry.clone())
    }

    pub async fn serve(self, addr: &str) -> Result<(), PeekError> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| PeekError::IoFailure(format!("binding to {addr}: {e}")))?;
        info!("listening on {addr}");
        axum::serve(listener, self.router())
            .await
            .map_err(|e| PeekError::IoFailure(format!("serving: {e}")))?;
        Ok(())
    }
}
