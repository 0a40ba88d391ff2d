//! Retry with exponential back-off and jitter for catalog requests.
//!
//! Only transient failures are retried: transport errors, 429 and 5xx.
//! A malformed body or a 4xx will not improve on a second attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::CatalogError;

const MAX_DELAY_MS: u64 = 30_000;

/// Returns `true` for errors that are worth retrying after a back-off delay.
pub(crate) fn is_retriable(err: &CatalogError) -> bool {
    match err {
        CatalogError::Http(e) => {
            e.is_timeout()
                || e.is_connect()
                || e.is_request()
                || e.status().is_some_and(|s| s.is_server_error())
        }
        CatalogError::RateLimited { .. } => true,
        CatalogError::UnexpectedStatus { status, .. } => (500..600).contains(status),
        CatalogError::Deserialize { .. }
        | CatalogError::NotFound { .. }
        | CatalogError::InvalidBaseUrl { .. } => false,
    }
}

/// Delay before retry number `attempt` (1-based), before jitter.
///
/// A server-provided `Retry-After` wins when it is longer than the computed
/// back-off. The result is capped at 30 s.
pub(crate) fn backoff_delay_ms(attempt: u32, backoff_base_ms: u64, err: &CatalogError) -> u64 {
    let computed = backoff_base_ms.saturating_mul(1u64 << attempt.saturating_sub(1).min(10));
    let requested = match err {
        CatalogError::RateLimited {
            retry_after_secs: Some(secs),
            ..
        } => secs.saturating_mul(1_000),
        _ => 0,
    };
    computed.max(requested).min(MAX_DELAY_MS)
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 250`:
///
/// | Retry | Sleep before it            |
/// |-------|----------------------------|
/// | 1     | 250 ms × 2⁰ ± 25 % jitter  |
/// | 2     | 250 ms × 2¹ ± 25 % jitter  |
/// | 3     | 250 ms × 2² ± 25 % jitter  |
///
/// Non-retriable errors are returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, CatalogError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CatalogError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let capped = backoff_delay_ms(attempt, backoff_base_ms, &err);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "catalog transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn server_error() -> CatalogError {
        CatalogError::UnexpectedStatus {
            status: 503,
            url: "http://catalog/products".to_owned(),
        }
    }

    fn deserialize_err() -> CatalogError {
        let src = serde_json::from_str::<()>("invalid").unwrap_err();
        CatalogError::Deserialize {
            context: "test".to_owned(),
            source: src,
        }
    }

    #[test]
    fn server_errors_and_rate_limits_are_retriable() {
        assert!(is_retriable(&server_error()));
        assert!(is_retriable(&CatalogError::RateLimited {
            url: "u".to_owned(),
            retry_after_secs: None,
        }));
    }

    #[test]
    fn client_errors_are_not_retriable() {
        assert!(!is_retriable(&deserialize_err()));
        assert!(!is_retriable(&CatalogError::NotFound {
            url: "u".to_owned()
        }));
        assert!(!is_retriable(&CatalogError::UnexpectedStatus {
            status: 403,
            url: "u".to_owned(),
        }));
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let err = server_error();
        assert_eq!(backoff_delay_ms(1, 250, &err), 250);
        assert_eq!(backoff_delay_ms(2, 250, &err), 500);
        assert_eq!(backoff_delay_ms(3, 250, &err), 1_000);
        assert_eq!(backoff_delay_ms(30, 250, &err), MAX_DELAY_MS);
    }

    #[test]
    fn retry_after_header_extends_delay() {
        let err = CatalogError::RateLimited {
            url: "u".to_owned(),
            retry_after_secs: Some(2),
        };
        assert_eq!(backoff_delay_ms(1, 100, &err), 2_000);
    }

    #[tokio::test]
    async fn retries_until_success() {
        let calls = AtomicU32::new(0);
        let result = retry_with_backoff(3, 0, || async {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(server_error())
            } else {
                Ok(7)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = retry_with_backoff(2, 0, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(server_error())
        })
        .await;
        assert!(matches!(result, Err(CatalogError::UnexpectedStatus { status: 503, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn non_retriable_error_returns_immediately() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = retry_with_backoff(5, 0, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(deserialize_err())
        })
        .await;
        assert!(matches!(result, Err(CatalogError::Deserialize { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
