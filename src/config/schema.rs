//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so a minimal (or absent) config file works.

use std::net::IpAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::limiter::TrustPolicy;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Rate limiting quota and window.
    pub rate_limit: RateLimitConfig,

    /// Proxy-header trust policy.
    pub trust: TrustConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

impl ListenerConfig {
    /// Replace the port of `bind_address`, keeping the host part.
    ///
    /// No-op when the address does not parse; validation reports that case
    /// separately.
    pub fn set_port(&mut self, port: u16) {
        if let Ok(mut addr) = self.bind_address.parse::<std::net::SocketAddr>() {
            addr.set_port(port);
            self.bind_address = addr.to_string();
        }
    }
}

/// Rate limiting quota and window.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum admitted requests per client per window. Must be positive.
    pub requests_per_window: u32,

    /// Window length in minutes. Must be positive and finite; fractional
    /// values are allowed.
    pub window_minutes: f64,

    /// Include the resolved client id in 429 response bodies. Intended for
    /// development; leaks client network metadata when enabled.
    pub expose_client_id: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_window: 5,
            window_minutes: 1.0,
            expose_client_id: false,
        }
    }
}

impl RateLimitConfig {
    /// The window as a `Duration`.
    ///
    /// This is the only place minutes are converted; everything past the
    /// config boundary works in `Duration`/`Instant`.
    pub fn window(&self) -> Duration {
        Duration::from_secs_f64(self.window_minutes * 60.0)
    }
}

/// Which peers may supply `X-Forwarded-For` / `X-Real-IP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProxyHeaderTrust {
    /// Never honor forwarding headers.
    #[default]
    Never,
    /// Honor forwarding headers from every peer. Only safe behind a
    /// controlled reverse proxy that overwrites them.
    Always,
    /// Honor forwarding headers only from `trusted_proxies` peers.
    Proxies,
}

/// Proxy-header trust configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TrustConfig {
    /// Trust mode for forwarding headers.
    pub proxy_headers: ProxyHeaderTrust,

    /// Proxy peer addresses honored in `proxies` mode.
    pub trusted_proxies: Vec<IpAddr>,
}

impl TrustConfig {
    /// Build the limiter-facing trust policy.
    pub fn policy(&self) -> TrustPolicy {
        match self.proxy_headers {
            ProxyHeaderTrust::Never => TrustPolicy::Never,
            ProxyHeaderTrust::Always => TrustPolicy::Always,
            ProxyHeaderTrust::Proxies => TrustPolicy::Proxies(self.trusted_proxies.clone()),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
