use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::config::RateLimitSettings;

/// Sliding-window limiter keyed by client and scope.
///
/// Client keys come from unauthenticated headers, so buckets whose hits have
/// all expired are swept at most once per window.
#[derive(Debug, Clone)]
pub struct PublicRateLimiter {
    window: Duration,
    max_requests: u32,
    buckets: Arc<DashMap<String, Vec<Instant>>>,
    started: Instant,
    /// Milliseconds after `started` at which the last sweep ran.
    last_sweep_ms: Arc<AtomicU64>,
}

impl PublicRateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            buckets: Arc::new(DashMap::new()),
            started: Instant::now(),
            last_sweep_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn from_settings(settings: &RateLimitSettings) -> Self {
        Self::new(
            Duration::from_secs(u64::from(settings.window_seconds.get())),
            settings.max_requests.get(),
        )
    }

    /// Record one request for `client` within `scope`. Returns `false` once
    /// the window is full.
    pub fn allow(&self, client: &str, scope: &str) -> bool {
        self.allow_at(client, scope, Instant::now())
    }

    fn allow_at(&self, client: &str, scope: &str, now: Instant) -> bool {
        // Must run before any entry guard is held.
        self.sweep_if_due(now);

        let bucket_key = format!("{client}:{scope}");
        let window = self.window;

        let mut entry = self.buckets.entry(bucket_key).or_default();
        entry.retain(|instant| now.duration_since(*instant) < window);

        if entry.len() as u32 >= self.max_requests {
            return false;
        }

        entry.push(now);
        true
    }

    fn sweep_if_due(&self, now: Instant) {
        let elapsed_ms = millis(now.saturating_duration_since(self.started));
        let last = self.last_sweep_ms.load(Ordering::Relaxed);
        if elapsed_ms.saturating_sub(last) < millis(self.window) {
            return;
        }
        if self
            .last_sweep_ms
            .compare_exchange(last, elapsed_ms, Ordering::AcqRel, Ordering::Relaxed)
            .is_err()
        {
            return;
        }

        let window = self.window;
        self.buckets.retain(|_, hits| {
            hits.retain(|instant| now.saturating_duration_since(*instant) < window);
            !hits.is_empty()
        });
    }

    #[cfg(test)]
    fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn retry_after_secs(&self) -> u64 {
        self.window.as_secs().max(1)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_after_ceiling_within_window() {
        let limiter = PublicRateLimiter::new(Duration::from_secs(60), 2);
        let now = Instant::now();

        assert!(limiter.allow_at("203.0.113.7", "contact", now));
        assert!(limiter.allow_at("203.0.113.7", "contact", now));
        assert!(!limiter.allow_at("203.0.113.7", "contact", now));
    }

    #[test]
    fn buckets_are_per_client_and_scope() {
        let limiter = PublicRateLimiter::new(Duration::from_secs(60), 1);
        let now = Instant::now();

        assert!(limiter.allow_at("a", "contact", now));
        assert!(limiter.allow_at("b", "contact", now));
        assert!(limiter.allow_at("a", "subscribe", now));
        assert!(!limiter.allow_at("a", "contact", now));
    }

    #[test]
    fn old_requests_expire() {
        let limiter = PublicRateLimiter::new(Duration::from_secs(1), 1);
        let start = Instant::now();

        assert!(limiter.allow_at("a", "login", start));
        assert!(!limiter.allow_at("a", "login", start));
        assert!(limiter.allow_at("a", "login", start + Duration::from_secs(2)));
    }

    #[test]
    fn expired_buckets_are_evicted() {
        let limiter = PublicRateLimiter::new(Duration::from_secs(1), 5);
        let start = Instant::now();

        for client in 0..10_000 {
            assert!(limiter.allow_at(&format!("198.51.100.{client}"), "contact", start));
        }
        assert_eq!(limiter.bucket_count(), 10_000);

        assert!(limiter.allow_at("203.0.113.1", "contact", start + Duration::from_secs(3600)));
        assert_eq!(limiter.bucket_count(), 1);
    }

    #[test]
    fn live_buckets_survive_a_sweep() {
        let limiter = PublicRateLimiter::new(Duration::from_secs(10), 1);
        let start = Instant::now();

        assert!(limiter.allow_at("old", "login", start));
        assert!(limiter.allow_at("recent", "login", start + Duration::from_secs(8)));
        assert!(limiter.allow_at("other", "login", start + Duration::from_secs(12)));

        assert_eq!(limiter.bucket_count(), 2);
        assert!(!limiter.allow_at("recent", "login", start + Duration::from_secs(12)));
    }

    #[test]
    fn retry_after_is_at_least_one_second() {
        let limiter = PublicRateLimiter::new(Duration::from_millis(200), 1);
        assert_eq!(limiter.retry_after_secs(), 1);
    }
}
