//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (rate limiting, tracing, timeout, request ID)
//! - Serve requests with graceful shutdown
//!
//! # Design Decisions
//! - The rate limiter wraps the application routes only; the health probe
//!   and the metrics endpoint stay outside the limited pipeline
//! - Peer addresses come from connect info, so the server is always built
//!   with `into_make_service_with_connect_info`

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, State},
    http::{HeaderMap, Request},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::middleware::rate_limit::rate_limit_middleware;
use crate::limiter::{resolve_client_id, RateLimiter, TrustPolicy};
use crate::observability::metrics;

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub limiter: Arc<RateLimiter>,
    pub trust_policy: TrustPolicy,
    pub expose_client_id: bool,
}

/// HTTP server hosting the rate-limited pipeline.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The configuration must already be validated; quota and window reach
    /// the limiter as positive values.
    pub fn new(config: GatewayConfig) -> Self {
        let limiter = Arc::new(RateLimiter::new(
            config.rate_limit.requests_per_window,
            config.rate_limit.window(),
        ));

        let state = AppState {
            limiter,
            trust_policy: config.trust.policy(),
            expose_client_id: config.rate_limit.expose_client_id,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/test", get(test_handler))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                rate_limit_middleware,
            ))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(middleware::from_fn(track_requests))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Record per-request metrics around the whole pipeline.
async fn track_requests(request: Request<axum::body::Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();

    let response = next.run(request).await;

    metrics::record_request(method.as_str(), response.status().as_u16(), start);
    response
}

/// Liveness probe, outside the rate-limited pipeline.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Demo downstream handler; echoes the identity the limiter keyed on.
async fn test_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let client_id = resolve_client_id(&headers, addr, &state.trust_policy);
    Json(serde_json::json!({
        "message": "Success",
        "yourIP": client_id,
    }))
}
