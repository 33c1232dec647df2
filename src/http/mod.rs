//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, connect info)
//!     → middleware/rate_limit.rs (admit or 429)
//!     → application handlers
//!     → response.rs (quota headers, rejection payload)
//!     → Send to client
//! ```

pub mod middleware;
pub mod response;
pub mod server;

pub use server::HttpServer;
