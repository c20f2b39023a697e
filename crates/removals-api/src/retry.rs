//! Retry with exponential back-off and jitter for idempotent backend calls.
//!
//! Only lookups go through [`retry_with_backoff`]: price, distance,
//! autocomplete, postcode and the read-only GETs. Quote, booking and checkout
//! creation are sent once, since a retried POST can create a duplicate order.

use std::future::Future;
use std::time::Duration;

use crate::error::ApiError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** timeouts, connection failures, HTTP 429 and 5xx.
///
/// **Not retriable:** 404 and other 4xx, malformed bodies, responses missing a
/// required field, and a bad base URL.
pub(crate) fn is_retriable(err: &ApiError) -> bool {
    match err {
        ApiError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        ApiError::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
        ApiError::NotFound { .. }
        | ApiError::Deserialize { .. }
        | ApiError::MissingField { .. }
        | ApiError::InvalidBaseUrl { .. } => false,
    }
}

/// Longest pause between two attempts, however many retries came before.
const MAX_DELAY_MS: u64 = 10_000;

/// Calls `operation` until it succeeds, fails permanently, or has been
/// retried `max_retries` times.
///
/// Each pause doubles from `backoff_base_ms` and is spread by a random
/// factor in `[0.75, 1.25)` so that several wizards hitting a flaky backend
/// do not retry in lockstep.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut retries = 0u32;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if retries == max_retries || !is_retriable(&err) {
            return Err(err);
        }
        retries += 1;
        let delay = backoff_delay(backoff_base_ms, retries, rand::random::<f64>());
        tracing::warn!(
            retry = retries,
            max_retries,
            delay_ms = delay.as_millis(),
            error = %err,
            "backend lookup failed, retrying"
        );
        tokio::time::sleep(delay).await;
    }
}

/// Pause before retry number `retry` (1-based); `spread` is a sample from `[0, 1)`.
fn backoff_delay(base_ms: u64, retry: u32, spread: f64) -> Duration {
    let doublings = retry.saturating_sub(1).min(10);
    let ceiling = base_ms.saturating_mul(1u64 << doublings).min(MAX_DELAY_MS);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let millis = (ceiling as f64 * (0.75 + spread * 0.5)) as u64;
    Duration::from_millis(millis)
}
