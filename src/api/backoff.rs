use super::error::ClientError;
use std::{future::Future, time::Duration};

/// Retry schedule for rate-limited completion calls.
///
/// Only [`ClientError::RateLimited`] is retried; every other error propagates
/// on the first attempt. A long batch run sits behind a single rate limiter,
/// so the schedule keeps widening until the limiter clears or the budget is
/// spent.
#[derive(Clone, Debug)]
pub struct BackoffPolicy {
    pub initial_delay: Duration,
    pub exponential_base: f64,
    pub jitter: bool,
    pub max_retries: u32,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            exponential_base: 2.0,
            jitter: true,
            max_retries: 10,
        }
    }
}

impl BackoffPolicy {
    /// Drive `operation` until it succeeds, fails with a non-retryable error,
    /// or exceeds `max_retries` rate-limited attempts. Exactly
    /// `max_retries + 1` attempts are made before [`ClientError::RetriesExhausted`].
    pub async fn retry<T, F, Fut>(&self, mut operation: F) -> Result<T, ClientError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let mut num_retries: u32 = 0;
        let mut delay = self.initial_delay.as_secs_f64();

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(ClientError::RateLimited { message }) => {
                    num_retries += 1;
                    if num_retries > self.max_retries {
                        return Err(ClientError::RetriesExhausted {
                            retries: self.max_retries,
                        });
                    }
                    let jitter = if self.jitter {
                        rand::random::<f64>()
                    } else {
                        0.0
                    };
                    delay *= self.exponential_base * (1.0 + jitter);
                    crate::warn!(
                        "Rate limited: {message}. Retrying in {delay:.1}s (attempt {num_retries}/{})",
                        self.max_retries
                    );
                    tokio::time::sleep(Duration::from_secs_f64(delay)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn rate_limited() -> ClientError {
        ClientError::RateLimited {
            message: "slow down".to_string(),
        }
    }

    fn no_jitter(max_retries: u32) -> BackoffPolicy {
        BackoffPolicy {
            initial_delay: Duration::from_secs(1),
            exponential_base: 2.0,
            jitter: false,
            max_retries,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_max_retries_rate_limits() {
        let policy = no_jitter(3);
        let attempts = Cell::new(0u32);

        let started = tokio::time::Instant::now();
        let result = policy
            .retry(|| {
                let attempt = attempts.get() + 1;
                attempts.set(attempt);
                async move {
                    if attempt <= 3 {
                        Err(rate_limited())
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(result, 4);
        assert_eq!(attempts.get(), 4);
        // delay is multiplied before each sleep: 2s, 4s, 8s
        assert_eq!(started.elapsed(), Duration::from_secs(14));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_retry_budget() {
        let policy = no_jitter(3);
        let attempts = Cell::new(0u32);

        let result: Result<(), ClientError> = policy
            .retry(|| {
                attempts.set(attempts.get() + 1);
                async { Err(rate_limited()) }
            })
            .await;

        assert_eq!(attempts.get(), 4);
        assert!(matches!(
            result,
            Err(ClientError::RetriesExhausted { retries: 3 })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn other_errors_are_not_retried() {
        let policy = no_jitter(10);
        let attempts = Cell::new(0u32);

        let result: Result<(), ClientError> = policy
            .retry(|| {
                attempts.set(attempts.get() + 1);
                async {
                    Err(ClientError::GenericError {
                        message: "bad request".to_string(),
                    })
                }
            })
            .await;

        assert_eq!(attempts.get(), 1);
        assert!(matches!(result, Err(ClientError::GenericError { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn jittered_delays_keep_widening() {
        let policy = BackoffPolicy {
            jitter: true,
            ..no_jitter(5)
        };
        let attempts = Cell::new(0u32);

        let started = tokio::time::Instant::now();
        policy
            .retry(|| {
                let attempt = attempts.get() + 1;
                attempts.set(attempt);
                async move {
                    if attempt <= 5 {
                        Err(rate_limited())
                    } else {
                        Ok(())
                    }
                }
            })
            .await
            .unwrap();

        // With base 2 and jitter in [0, 1), every delay at least doubles, so
        // the total is bounded below by the jitter-free schedule.
        assert!(started.elapsed() >= Duration::from_secs(2 + 4 + 8 + 16 + 32));
    }
}
