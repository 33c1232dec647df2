//! Rate limiting core.
//!
//! # Data Flow
//! ```text
//! request headers + peer address
//!     → identity.rs (resolve ClientID under the trust policy)
//!     → admission.rs (purge, count, admit or reject)
//!     → window.rs (per-client timestamp log)
//!     → Decision consumed by the HTTP middleware
//! ```
//!
//! # Design Decisions
//! - One coarse lock over the whole client map; no lock-free structures
//! - Monotonic instants internally; minutes exist only at the config boundary
//! - Idle client buckets swept at most once per window

pub mod admission;
pub mod identity;
pub mod window;

pub use admission::{Decision, RateLimiter};
pub use identity::{resolve_client_id, TrustPolicy};
