//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Initialize subsystems → Start listener
//!
//! Shutdown:
//!     signals.rs (SIGTERM/SIGINT) → shutdown.rs broadcast
//!     → server stops accepting → in-flight requests drain → exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then observability, then the listener
//! - A validation failure is fatal; the gateway never starts misconfigured

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
