//! Client identity resolution.
//!
//! # Responsibilities
//! - Derive one stable ClientID string per request origin
//! - Apply the configured trust policy for proxy-supplied headers
//! - Fall back to the transport peer address
//!
//! # Design Decisions
//! - Pure function of headers, peer address, and policy; never fails
//! - Header values are not validated as addresses: whatever the nearest
//!   trusted proxy declared is taken at face value, so the resolved id is a
//!   trust boundary, not an identity guarantee
//! - Untrusted peers are keyed by their socket IP only

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderMap;

/// Original client as declared by the nearest proxy chain.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
/// Single-client variant set by some reverse proxies.
pub const X_REAL_IP: &str = "x-real-ip";

/// How much to believe proxy-supplied client-address headers.
///
/// `Always` reproduces classic "trust proxy" behavior: any direct client can
/// claim an arbitrary identity by sending the headers itself. Only safe when
/// a controlled reverse proxy in front overwrites them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustPolicy {
    /// Ignore forwarding headers; the transport peer is the client.
    Never,
    /// Honor forwarding headers from every peer.
    Always,
    /// Honor forwarding headers only when the transport peer is one of the
    /// listed proxy addresses.
    Proxies(Vec<IpAddr>),
}

impl TrustPolicy {
    fn trusts(&self, peer: IpAddr) -> bool {
        match self {
            TrustPolicy::Never => false,
            TrustPolicy::Always => true,
            TrustPolicy::Proxies(proxies) => proxies.contains(&peer),
        }
    }
}

/// Resolve the rate-limiting identity for a request.
///
/// Precedence, first match wins: the first comma-separated element of
/// `X-Forwarded-For` (trimmed), then `X-Real-IP` verbatim, then the peer IP.
/// The header steps are skipped entirely when `policy` does not trust the
/// peer. A degenerate (even empty) identity is still a valid bucket key.
pub fn resolve_client_id(headers: &HeaderMap, peer: SocketAddr, policy: &TrustPolicy) -> String {
    if policy.trusts(peer.ip()) {
        if let Some(forwarded) = header_str(headers, X_FORWARDED_FOR) {
            if !forwarded.is_empty() {
                return forwarded
                    .split(',')
                    .next()
                    .unwrap_or("")
                    .trim()
                    .to_string();
            }
        }
        if let Some(real_ip) = header_str(headers, X_REAL_IP) {
            if !real_ip.is_empty() {
                return real_ip.to_string();
            }
        }
    }
    peer.ip().to_string()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
