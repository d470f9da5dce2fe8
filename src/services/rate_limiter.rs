use governor::{Quota, RateLimiter, Jitter};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use std::sync::Arc;
use nonzero_ext::*;
use std::time::Duration;

/// Paces Gemini API calls: a per-minute quota plus a small burst limit,
/// with jitter so parallel workflow runs do not align.
#[derive(Clone)]
pub struct ApiRateLimiter {
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    burst_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl ApiRateLimiter {
    pub fn new() -> Self {
        let limiter = Arc::new(RateLimiter::direct(Quota::per_minute(nonzero!(30u32))));
        let burst_limiter = Arc::new(RateLimiter::direct(Quota::per_second(nonzero!(2u32))));

        Self {
            limiter,
            burst_limiter,
        }
    }

    pub async fn acquire(&self) {
        self.burst_limiter.until_ready().await;
        self.limiter
            .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(100)))
            .await;
    }
}

impl Default for ApiRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
