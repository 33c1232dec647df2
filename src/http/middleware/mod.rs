//! Middleware stages applied ahead of application handlers.

pub mod rate_limit;
