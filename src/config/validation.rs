//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject non-positive quota and window values before the limiter exists
//! - Validate addresses and the trust-policy shape
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system; a misconfigured
//!   limiter refuses to start rather than running degraded

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{GatewayConfig, ProxyHeaderTrust};

/// A single semantic problem in the configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("rate_limit.requests_per_window must be positive")]
    ZeroQuota,

    #[error("rate_limit.window_minutes must be a positive finite number, got {0}")]
    InvalidWindow(f64),

    #[error("listener.bind_address is not a valid socket address: {0:?}")]
    InvalidBindAddress(String),

    #[error("trust.proxy_headers = \"proxies\" requires a non-empty trusted_proxies list")]
    EmptyProxyAllowlist,

    #[error("observability.metrics_address is not a valid socket address: {0:?}")]
    InvalidMetricsAddress(String),

    #[error("timeouts.request_secs must be positive")]
    ZeroRequestTimeout,
}

/// Check a parsed configuration for semantic errors, collecting every
/// problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.rate_limit.requests_per_window == 0 {
        errors.push(ValidationError::ZeroQuota);
    }

    let minutes = config.rate_limit.window_minutes;
    if !(minutes.is_finite() && minutes > 0.0) {
        errors.push(ValidationError::InvalidWindow(minutes));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.trust.proxy_headers == ProxyHeaderTrust::Proxies
        && config.trust.trusted_proxies.is_empty()
    {
        errors.push(ValidationError::EmptyProxyAllowlist);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
