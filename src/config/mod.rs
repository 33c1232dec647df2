//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared with the HTTP server at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no runtime reload
//! - All fields have defaults so the gateway runs without a config file
//! - Validation separates syntactic (serde) from semantic checks and must
//!   pass before the limiter is constructed

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
pub use schema::RateLimitConfig;
pub use schema::TrustConfig;
