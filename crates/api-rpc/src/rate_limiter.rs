//! Token-bucket limiter for the intake surface.
//!
//! Caps the mutating RPC surface. The bucket holds fractional tokens
//! so sub-integer refill rates work; a mutex is fine at the request
//! volumes a single intake endpoint sees.

use std::time::Instant;
use tokio::sync::Mutex;

/// Token bucket: `burst` capacity, refilled at `rate_per_sec`
pub struct RateLimiter {
    state: Mutex<BucketState>,
    burst: f64,
    rate_per_sec: f64,
}

struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    /// The bucket starts full, so the first `burst` requests always pass.
    pub fn new(burst: u32, rate_per_sec: f64) -> Self {
        Self {
            state: Mutex::new(BucketState {
                tokens: burst as f64,
                last_refill: Instant::now(),
            }),
            burst: burst as f64,
            rate_per_sec,
        }
    }

    /// Take one token. `false` means the caller is over the limit and
    /// the request must be rejected.
    pub async fn check(&self) -> bool {
        let mut state = self.state.lock().await;

        let now = Instant::now();
        let elapsed = now.duration_since(state.last_refill).as_secs_f64();
        state.tokens = (state.tokens + elapsed * self.rate_per_sec).min(self.burst);
        state.last_refill = now;

        if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Duration};

    #[tokio::test]
    async fn test_burst_capacity_is_honored() {
        let limiter = RateLimiter::new(10, 10.0);

        for i in 0..10 {
            assert!(limiter.check().await, "request {} within burst", i);
        }

        // Bucket drained, next request is rejected
        assert!(!limiter.check().await);
    }

    #[tokio::test]
    async fn test_tokens_refill_over_time() {
        // 10 tokens/sec, bucket of 5
        let limiter = RateLimiter::new(5, 10.0);

        while limiter.check().await {}

        // 300ms at 10/sec puts ~3 tokens back
        sleep(Duration::from_millis(300)).await;
        assert!(limiter.check().await);
    }

    #[tokio::test]
    async fn test_concurrent_checks_never_exceed_burst() {
        use std::sync::Arc;

        // Zero refill makes the outcome exact: 100 grants, no more.
        let limiter = Arc::new(RateLimiter::new(100, 0.0));

        let tasks: Vec<_> = (0..10)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move {
                    let mut granted = 0u32;
                    for _ in 0..20 {
                        if limiter.check().await {
                            granted += 1;
                        }
                    }
                    granted
                })
            })
            .collect();

        let mut total = 0;
        for task in tasks {
            total += task.await.unwrap();
        }

        assert_eq!(total, 100);
    }
}
