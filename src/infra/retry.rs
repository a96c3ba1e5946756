//! Retry and timeout utilities for provider calls

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::ProviderError;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
            backoff_factor: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn with_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Default::default()
        }
    }

    pub fn no_retry() -> Self {
        Self::with_attempts(1)
    }

    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let delay_ms = self.initial_delay.as_millis() as f64
            * self.backoff_factor.powi(attempt.saturating_sub(1) as i32);
        Duration::from_millis(delay_ms as u64).min(self.max_delay)
    }
}

/// Run `fut` unless `token` fires or `limit` elapses first
pub async fn with_timeout<T, Fut>(
    limit: Duration,
    token: &CancellationToken,
    fut: Fut,
) -> Result<T, ProviderError>
where
    Fut: Future<Output = Result<T, ProviderError>>,
{
    tokio::select! {
        _ = token.cancelled() => Err(ProviderError::Cancelled),
        result = tokio::time::timeout(limit, fut) => match result {
            Ok(inner) => inner,
            Err(_) => Err(ProviderError::Timeout(limit)),
        },
    }
}

/// Execute an async operation with retry and exponential backoff.
/// Cancellation stops the loop immediately and is never retried.
pub async fn with_retry<F, T, Fut>(
    config: &RetryConfig,
    token: &CancellationToken,
    mut op: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        if attempt > 0 {
            let delay = config.delay_for_attempt(attempt);
            tracing::debug!(
                "Retry attempt {}/{} after {:?}",
                attempt + 1,
                max_attempts,
                delay
            );
            tokio::select! {
                _ = token.cancelled() => return Err(ProviderError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }

        match op().await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_recoverable() && attempt + 1 < max_attempts => {
                tracing::warn!(
                    "Symbol query failed (attempt {}/{}): {}",
                    attempt + 1,
                    max_attempts,
                    e
                );
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_successful_first_attempt() {
        let config = RetryConfig::default();
        let token = CancellationToken::new();
        let result = with_retry(&config, &token, || async { Ok::<_, ProviderError>(42) }).await;
        assert_eq!(tokio_test::assert_ok!(result), 42);
    }

    #[tokio::test]
    async fn test_retry_on_recoverable_error() {
        let config = RetryConfig {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1),
            ..Default::default()
        };
        let token = CancellationToken::new();

        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = with_retry(&config, &token, || {
            let c = counter_clone.clone();
            async move {
                let attempt = c.fetch_add(1, Ordering::SeqCst);
                if attempt < 2 {
                    Err(ProviderError::Unavailable("warming up".to_string()))
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_no_retry_on_non_recoverable_error() {
        let config = RetryConfig::with_attempts(5);
        let token = CancellationToken::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = with_retry(&config, &token, || {
            let c = counter_clone.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<i32, _>(ProviderError::malformed("x", "not recoverable"))
            }
        })
        .await;

        tokio_test::assert_err!(result);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let config = RetryConfig {
            max_attempts: 2,
            initial_delay: Duration::from_millis(1),
            ..Default::default()
        };
        let token = CancellationToken::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = with_retry(&config, &token, || {
            let c = counter_clone.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<i32, _>(ProviderError::Timeout(Duration::from_millis(5)))
            }
        })
        .await;

        assert!(matches!(result, Err(ProviderError::Timeout(_))));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_timeout_fires() {
        let token = CancellationToken::new();
        let result: Result<(), _> = with_timeout(Duration::from_millis(10), &token, async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(ProviderError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_cancelled_token_wins() {
        let token = CancellationToken::new();
        token.cancel();
        let result: Result<(), _> = with_timeout(Duration::from_secs(5), &token, async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(ProviderError::Cancelled)));
    }

    #[test]
    fn test_delay_calculation() {
        let config = RetryConfig {
            max_attempts: 5,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(1000),
            backoff_factor: 2.0,
        };

        assert_eq!(config.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(200));
        assert_eq!(config.delay_for_attempt(4), Duration::from_millis(800));
        assert_eq!(config.delay_for_attempt(5), Duration::from_millis(1000)); // capped
    }
}
