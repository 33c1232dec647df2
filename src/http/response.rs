//! Response shaping for limiter decisions.
//!
//! # Responsibilities
//! - Stamp quota headers on admitted responses
//! - Build the 429 rejection payload
//!
//! # Design Decisions
//! - Header names and the payload shape live here, in one place
//! - The client id appears in the payload only when configured; it is
//!   client network metadata

use axum::http::header::{HeaderName, HeaderValue, RETRY_AFTER};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Configured quota, on every admitted response.
pub const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
/// Slots left in the window, on every admitted response.
pub const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// Stamp quota headers onto an admitted response.
pub fn set_rate_limit_headers(response: &mut Response, limit: u32, remaining: u32) {
    let headers = response.headers_mut();
    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(limit));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(remaining));
}

/// The 429 response for a client that exhausted its quota.
#[derive(Debug)]
pub struct RateLimitRejection {
    /// Seconds until the oldest counted request ages out.
    pub retry_after_secs: u64,
    /// The identity the limiter keyed on.
    pub client_id: String,
    /// Whether to include `client_id` in the body.
    pub expose_client_id: bool,
}

impl IntoResponse for RateLimitRejection {
    fn into_response(self) -> Response {
        let mut body = json!({
            "error": "Too Many Requests",
            "message": format!("Try again in {} seconds", self.retry_after_secs),
        });
        if self.expose_client_id {
            body["clientID"] = json!(self.client_id);
        }

        (
            StatusCode::TOO_MANY_REQUESTS,
            [(RETRY_AFTER, self.retry_after_secs.to_string())],
            Json(body),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_carries_status_and_retry_header() {
        let response = RateLimitRejection {
            retry_after_secs: 42,
            client_id: "203.0.113.5".to_string(),
            expose_client_id: false,
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(RETRY_AFTER).unwrap(),
            &HeaderValue::from_static("42")
        );
    }

    #[test]
    fn test_quota_headers_are_set() {
        let mut response = Response::new(axum::body::Body::empty());
        set_rate_limit_headers(&mut response, 5, 3);

        assert_eq!(
            response.headers().get(&X_RATELIMIT_LIMIT).unwrap(),
            &HeaderValue::from_static("5")
        );
        assert_eq!(
            response.headers().get(&X_RATELIMIT_REMAINING).unwrap(),
            &HeaderValue::from_static("3")
        );
    }
}
