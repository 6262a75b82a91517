//! Bounded exponential backoff.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Run `operation` until it succeeds or `max_attempts` attempts have failed.
///
/// The delay starts at `initial_delay` and doubles after every failure, capped
/// at `max_delay`. The last error is returned when attempts run out. At least
/// one attempt is always made.
pub async fn retry_with_backoff<F, Fut, T, E>(
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = max_attempts.max(1);
    let mut delay = initial_delay.min(max_delay);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(e) => {
                debug!(
                    attempt,
                    max_attempts,
                    "Attempt failed ({}), retrying in {:?}",
                    e,
                    delay
                );
                sleep(delay).await;
                delay = delay.saturating_mul(2).min(max_delay);
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Instant;

    #[tokio::test]
    async fn test_succeeds_first_try() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> =
            retry_with_backoff(5, Duration::from_millis(1), Duration::from_millis(5), || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(7) }
            })
            .await;
        assert_eq!(result, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_succeeds_after_failures() {
        let calls = AtomicU32::new(0);
        let result: Result<&str, String> =
            retry_with_backoff(5, Duration::from_millis(1), Duration::from_millis(5), || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err(format!("not ready ({n})"))
                    } else {
                        Ok("ready")
                    }
                }
            })
            .await;
        assert_eq!(result, Ok("ready"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_with_last_error() {
        let calls = AtomicU32::new(0);
        let result: Result<(), String> =
            retry_with_backoff(3, Duration::from_millis(1), Duration::from_millis(2), || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move { Err(format!("failure {n}")) }
            })
            .await;
        assert_eq!(result, Err("failure 2".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_runs_once() {
        let calls = AtomicU32::new(0);
        let result: Result<(), String> =
            retry_with_backoff(0, Duration::from_millis(1), Duration::from_millis(1), || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err("down".to_string()) }
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_delay_is_capped() {
        let start = Instant::now();
        let _: Result<(), String> =
            retry_with_backoff(4, Duration::from_millis(10), Duration::from_millis(15), || async {
                Err("down".to_string())
            })
            .await;
        // Three sleeps: 10 + 15 + 15 once the cap applies
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
