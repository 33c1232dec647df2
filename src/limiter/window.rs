//! Per-client request log for the sliding window.
//!
//! # Responsibilities
//! - Record the instant of each admitted request, oldest first
//! - Drop entries that have aged out of the active window
//! - Report the count and oldest entry for admission decisions
//!
//! # Design Decisions
//! - Entries are monotonic `Instant`s; wall clock is never consulted
//! - An entry aged exactly one window no longer counts (strict comparison)
//! - Entries are only ever removed by the staleness purge

use std::time::{Duration, Instant};

/// Timestamps of admitted requests from a single client, in admission order.
#[derive(Debug, Default)]
pub struct RequestLog {
    entries: Vec<Instant>,
}

impl RequestLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Drop every entry whose age has reached `window`.
    ///
    /// Survival requires `now - t < window`: an entry exactly one window old
    /// is dropped, freeing its quota slot.
    pub fn purge(&mut self, now: Instant, window: Duration) {
        self.entries
            .retain(|&t| now.saturating_duration_since(t) < window);
    }

    /// Record an admitted request.
    pub fn record(&mut self, now: Instant) {
        self.entries.push(now);
    }

    /// Number of in-window entries (valid immediately after a purge).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries remain after a purge.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The least-recent entry, if any. This is the next slot to age out.
    pub fn oldest(&self) -> Option<Instant> {
        self.entries.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purge_drops_stale_entries() {
        let window = Duration::from_secs(60);
        let start = Instant::now();

        let mut log = RequestLog::new();
        log.record(start);
        log.record(start + Duration::from_secs(30));

        let mut fresh = RequestLog::new();
        fresh.record(start);
        fresh.record(start + Duration::from_secs(30));

        // Half a window later both entries survive.
        fresh.purge(start + Duration::from_secs(45), window);
        assert_eq!(fresh.len(), 2);

        // 70s later only the 30s entry is inside the window.
        log.purge(start + Duration::from_secs(70), window);
        assert_eq!(log.len(), 1);
        assert_eq!(log.oldest(), Some(start + Duration::from_secs(30)));
    }

    #[test]
    fn test_entry_aged_exactly_one_window_is_dropped() {
        let window = Duration::from_secs(60);
        let start = Instant::now();

        let mut log = RequestLog::new();
        log.record(start);

        log.purge(start + window, window);
        assert!(log.is_empty());
    }

    #[test]
    fn test_entry_just_inside_window_survives() {
        let window = Duration::from_secs(60);
        let start = Instant::now();

        let mut log = RequestLog::new();
        log.record(start);

        log.purge(start + window - Duration::from_millis(1), window);
        assert_eq!(log.len(), 1);
    }
}
