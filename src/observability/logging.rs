//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Configure the log level from config, overridable via RUST_LOG
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - Rate-limit rejections are expected traffic shaping and log at debug,
//!   never as errors

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_level` applies to the
/// gateway and its HTTP layers.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "rate_gate={default_level},tower_http={default_level}"
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
