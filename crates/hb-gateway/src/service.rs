//! Gateway service: router construction and the serve loop.

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::routes::{self, AppState};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, post};
use axum::Router;
use hb_account_ordering::AccountOrderingApi;
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// HTTP gateway over a shared account ordering service.
pub struct Gateway<S> {
    config: GatewayConfig,
    state: AppState<S>,
}

impl<S> Gateway<S>
where
    S: AccountOrderingApi + Send + Sync + 'static,
{
    pub fn new(config: GatewayConfig, service: Arc<RwLock<S>>) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let state = AppState {
            service,
            max_reorder_batch: config.max_reorder_batch,
        };
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Build the HTTP router
    pub fn router(&self) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(self.config.request_timeout))
            .layer(DefaultBodyLimit::max(self.config.max_body_bytes));

        Router::new()
            .route("/health", get(routes::health_check))
            .route("/families", post(routes::create_family::<S>))
            .route(
                "/accounts",
                get(routes::list_accounts::<S>).post(routes::create_account::<S>),
            )
            .route("/accounts/grouped", get(routes::list_grouped::<S>))
            .route("/accounts/update_order", patch(routes::update_order::<S>))
            .route("/accounts/sync_all", post(routes::sync_all::<S>))
            .route(
                "/accounts/:id",
                get(routes::find_account::<S>).delete(routes::destroy_account::<S>),
            )
            .route("/accounts/:id/sync", post(routes::sync_account::<S>))
            .layer(middleware)
            .with_state(self.state.clone())
    }

    /// Bind and serve until `shutdown` resolves.
    pub async fn serve<F>(self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.addr();
        let router = self.router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{addr}: {e}")))?;
        info!(addr = %addr, "[gateway] Listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| GatewayError::Serve(e.to_string()))?;

        info!("[gateway] Stopped");
        Ok(())
    }
}
