//! Retry with exponential backoff for transient backend rejections.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY_MS: u64 = 1000;

/// How many times to call an operation and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Wait after the first failure; doubles after each further failure
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay after the `attempt`-th failure (1-based): base, 2×base, 4×base, ...
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1u32 << exponent)
    }
}

/// Run `operation` until it succeeds, fails with an error `is_retryable` rejects,
/// or the policy's attempts are spent. The last error is returned unchanged.
///
/// `operation` receives the 1-based attempt number.
pub async fn retry_with_backoff<T, E, F, Fut, C>(
    policy: &RetryPolicy,
    is_retryable: C,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: Fn(&E) -> bool,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts && is_retryable(&e) => {
                let delay = policy.delay_after(attempt);
                tracing::warn!(
                    error = %e,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "Rate limited, retrying after backoff"
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                if attempt > 1 {
                    tracing::error!(error = %e, attempts = attempt, "Giving up after retries");
                }
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    #[derive(Debug, PartialEq)]
    enum FakeError {
        RateLimited,
        Fatal,
    }

    impl Display for FakeError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    fn is_rate_limited(e: &FakeError) -> bool {
        *e == FakeError::RateLimited
    }

    /// Calls `operation` through the retry loop and returns (result, call instants).
    async fn run(
        policy: RetryPolicy,
        outcomes: Vec<Result<&'static str, FakeError>>,
    ) -> (Result<&'static str, FakeError>, Vec<Instant>) {
        let outcomes = Arc::new(Mutex::new(outcomes));
        let calls = Arc::new(Mutex::new(Vec::new()));

        let result = retry_with_backoff(&policy, is_rate_limited, |_attempt| {
            let outcomes = outcomes.clone();
            let calls = calls.clone();
            async move {
                calls.lock().unwrap().push(Instant::now());
                outcomes.lock().unwrap().remove(0)
            }
        })
        .await;

        let calls = calls.lock().unwrap().clone();
        (result, calls)
    }

    fn gaps(calls: &[Instant]) -> Vec<Duration> {
        calls.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Paused time advances to timer deadlines, which land on millisecond ticks.
    fn assert_close(actual: Duration, expected: Duration) {
        assert!(
            actual >= expected && actual < expected + Duration::from_millis(5),
            "expected ~{:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn delays_double_from_base() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_after(2), Duration::from_millis(2000));
        assert_eq!(policy.delay_after(3), Duration::from_millis(4000));
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limited_twice_then_success() {
        let (result, calls) = run(
            RetryPolicy::default(),
            vec![
                Err(FakeError::RateLimited),
                Err(FakeError::RateLimited),
                Ok("done"),
            ],
        )
        .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(calls.len(), 3);
        let gaps = gaps(&calls);
        assert_close(gaps[0], Duration::from_millis(1000));
        assert_close(gaps[1], Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn non_retryable_error_fails_immediately() {
        let start = Instant::now();
        let (result, calls) = run(RetryPolicy::default(), vec![Err(FakeError::Fatal)]).await;

        assert_eq!(result, Err(FakeError::Fatal));
        assert_eq!(calls.len(), 1);
        assert!(start.elapsed() < Duration::from_millis(1));
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_returns_last_error() {
        let (result, calls) = run(
            RetryPolicy::default(),
            vec![
                Err(FakeError::RateLimited),
                Err(FakeError::RateLimited),
                Err(FakeError::RateLimited),
                Ok("never reached"),
            ],
        )
        .await;

        assert_eq!(result, Err(FakeError::RateLimited));
        assert_eq!(calls.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn fatal_after_rate_limit_stops_retrying() {
        let (result, calls) = run(
            RetryPolicy::default(),
            vec![Err(FakeError::RateLimited), Err(FakeError::Fatal), Ok("unused")],
        )
        .await;

        assert_eq!(result, Err(FakeError::Fatal));
        assert_eq!(calls.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_attempts_still_calls_once() {
        let policy = RetryPolicy {
            max_attempts: 0,
            base_delay: Duration::from_millis(10),
        };
        let (result, calls) = run(policy, vec![Err(FakeError::RateLimited)]).await;

        assert_eq!(result, Err(FakeError::RateLimited));
        assert_eq!(calls.len(), 1);
    }
}
