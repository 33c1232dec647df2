//! Admission control against a fixed quota and trailing window.
//!
//! # Responsibilities
//! - Own the client-id -> request-log map
//! - Purge, count, and admit or reject each request atomically
//! - Compute the retry hint for rejected requests
//! - Sweep idle client buckets so memory tracks recently-active clients
//!
//! # Design Decisions
//! - One mutex over the whole map: request-rate arithmetic is not a hot
//!   numeric path, and a coarse lock keeps the read-purge-count-append
//!   sequence a single critical section
//! - Decisions for one client are linearizable in lock-acquisition order
//! - Rejections never append; the purge runs regardless of outcome

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::limiter::window::RequestLog;

/// Outcome of one admission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Request admitted and recorded against quota.
    Admitted {
        /// Configured quota, echoed for the `X-RateLimit-Limit` header.
        limit: u32,
        /// Slots left in the window after this admission.
        remaining: u32,
    },
    /// Quota exhausted; nothing was recorded.
    Rejected {
        /// Whole seconds until the oldest counted request ages out,
        /// rounded up so the hint never undershoots.
        retry_after_secs: u64,
    },
}

struct LimiterState {
    logs: HashMap<String, RequestLog>,
    last_sweep: Instant,
}

/// Stateful gatekeeper: at most `max_requests` admissions per client per
/// trailing `window`.
///
/// Each instance owns its state; separately constructed limiters are fully
/// independent. Quota and window are fixed for the life of the limiter and
/// must be positive, which the configuration layer enforces before
/// construction.
pub struct RateLimiter {
    state: Mutex<LimiterState>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    /// Create a limiter admitting `max_requests` per `window`.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            state: Mutex::new(LimiterState {
                logs: HashMap::new(),
                last_sweep: Instant::now(),
            }),
            max_requests,
            window,
        }
    }

    /// Decide admission for `client_id` at the current instant.
    pub fn check(&self, client_id: &str) -> Decision {
        self.check_at(client_id, Instant::now())
    }

    /// Decide admission for `client_id` as of `now`.
    ///
    /// The purge-count-append sequence runs under one lock acquisition, so
    /// two concurrent checks for the same client can never both claim the
    /// last remaining slot.
    pub fn check_at(&self, client_id: &str, now: Instant) -> Decision {
        let mut state = self.state.lock().expect("limiter mutex poisoned");

        if now.saturating_duration_since(state.last_sweep) >= self.window {
            state
                .logs
                .retain(|_, log| {
                    log.purge(now, self.window);
                    !log.is_empty()
                });
            state.last_sweep = now;
        }

        let log = state.logs.entry(client_id.to_string()).or_default();
        log.purge(now, self.window);

        if (log.len() as u32) < self.max_requests {
            log.record(now);
            Decision::Admitted {
                limit: self.max_requests,
                remaining: self.max_requests - log.len() as u32,
            }
        } else {
            // max_requests > 0, so a full log has an oldest entry.
            let oldest = log.oldest().expect("full request log has no entries");
            let wait = (oldest + self.window).saturating_duration_since(now);
            Decision::Rejected {
                retry_after_secs: wait.as_secs() + u64::from(wait.subsec_nanos() > 0),
            }
        }
    }

    /// Number of client buckets currently held.
    pub fn tracked_clients(&self) -> usize {
        self.state.lock().expect("limiter mutex poisoned").logs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max: u32, window_secs: u64) -> RateLimiter {
        RateLimiter::new(max, Duration::from_secs(window_secs))
    }

    #[test]
    fn test_quota_sequence_then_reject() {
        let rl = limiter(5, 60);
        let now = Instant::now();

        for expected_remaining in [4, 3, 2, 1, 0] {
            assert_eq!(
                rl.check_at("10.0.0.1", now),
                Decision::Admitted {
                    limit: 5,
                    remaining: expected_remaining
                }
            );
        }

        assert!(matches!(
            rl.check_at("10.0.0.1", now),
            Decision::Rejected { .. }
        ));
    }

    #[test]
    fn test_clients_are_independent() {
        let rl = limiter(2, 60);
        let now = Instant::now();

        assert!(matches!(rl.check_at("a", now), Decision::Admitted { .. }));
        assert!(matches!(rl.check_at("b", now), Decision::Admitted { .. }));
        assert!(matches!(rl.check_at("a", now), Decision::Admitted { .. }));
        assert!(matches!(rl.check_at("b", now), Decision::Admitted { .. }));

        // Both clients filled their own quota; neither borrowed a slot.
        assert!(matches!(rl.check_at("a", now), Decision::Rejected { .. }));
        assert!(matches!(rl.check_at("b", now), Decision::Rejected { .. }));
    }

    #[test]
    fn test_rejection_does_not_consume_quota() {
        let rl = limiter(1, 60);
        let start = Instant::now();

        assert!(matches!(rl.check_at("c", start), Decision::Admitted { .. }));

        // Repeated rejections at the same instant never double-count.
        assert!(matches!(rl.check_at("c", start), Decision::Rejected { .. }));
        assert!(matches!(rl.check_at("c", start), Decision::Rejected { .. }));

        // One window later the single admitted entry has aged out.
        assert!(matches!(
            rl.check_at("c", start + Duration::from_secs(60)),
            Decision::Admitted { .. }
        ));
    }

    #[test]
    fn test_retry_hint_counts_down_from_oldest_entry() {
        let rl = limiter(1, 60);
        let start = Instant::now();

        rl.check_at("d", start);

        let decision = rl.check_at("d", start + Duration::from_secs(20));
        assert_eq!(
            decision,
            Decision::Rejected {
                retry_after_secs: 40
            }
        );
    }

    #[test]
    fn test_retry_hint_rounds_up() {
        let rl = limiter(1, 60);
        let start = Instant::now();

        rl.check_at("e", start);

        // 39.5s remain on the oldest entry; the hint must not undershoot.
        let decision = rl.check_at("e", start + Duration::from_millis(20_500));
        assert_eq!(
            decision,
            Decision::Rejected {
                retry_after_secs: 40
            }
        );
    }

    #[test]
    fn test_admission_after_window_boundary() {
        let rl = limiter(2, 60);
        let start = Instant::now();

        rl.check_at("f", start);
        rl.check_at("f", start + Duration::from_secs(10));
        assert!(matches!(
            rl.check_at("f", start + Duration::from_secs(30)),
            Decision::Rejected { .. }
        ));

        // Exactly one window after the first request its slot is free again.
        assert_eq!(
            rl.check_at("f", start + Duration::from_secs(60)),
            Decision::Admitted {
                limit: 2,
                remaining: 0
            }
        );
    }

    #[test]
    fn test_sweep_drops_idle_clients() {
        let rl = limiter(3, 60);
        let start = Instant::now();

        rl.check_at("idle", start);
        rl.check_at("active", start);
        assert_eq!(rl.tracked_clients(), 2);

        // A full window later a check from any client triggers the sweep;
        // both old buckets are fully stale by then.
        rl.check_at("active", start + Duration::from_secs(61));
        assert_eq!(rl.tracked_clients(), 1);
    }

    #[test]
    fn test_independent_limiters_share_nothing() {
        let a = limiter(1, 60);
        let b = limiter(1, 60);
        let now = Instant::now();

        assert!(matches!(a.check_at("x", now), Decision::Admitted { .. }));
        assert!(matches!(b.check_at("x", now), Decision::Admitted { .. }));
        assert!(matches!(a.check_at("x", now), Decision::Rejected { .. }));
    }
}
