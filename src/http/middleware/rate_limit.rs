//! Rate Limiting Middleware.
//! Admits or rejects each request against the per-client quota.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;

use crate::http::response::{set_rate_limit_headers, RateLimitRejection};
use crate::http::server::AppState;
use crate::limiter::{resolve_client_id, Decision};
use crate::observability::metrics;

/// Middleware stage inserted before application handlers.
///
/// Admitted requests continue downstream and gain quota headers; rejected
/// requests short-circuit with the 429 payload. A rejection is expected
/// traffic shaping, so it is counted and logged at debug, never as an error.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let client_id = resolve_client_id(request.headers(), addr, &state.trust_policy);

    let decision = state.limiter.check(&client_id);
    metrics::record_tracked_clients(state.limiter.tracked_clients());

    match decision {
        Decision::Admitted { limit, remaining } => {
            let mut response = next.run(request).await;
            set_rate_limit_headers(&mut response, limit, remaining);
            response
        }
        Decision::Rejected { retry_after_secs } => {
            tracing::debug!(
                client = %client_id,
                retry_after_secs,
                "Request over quota"
            );
            metrics::record_rate_limited();
            RateLimitRejection {
                retry_after_secs,
                client_id,
                expose_client_id: state.expose_client_id,
            }
            .into_response()
        }
    }
}
