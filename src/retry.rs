//! Retry policy and the bounded retry loop.
//!
//! Classification per attempt: 2xx/3xx succeed, 4xx are terminal (a client
//! error will not change outcome), >= 500 and transport failures are
//! retryable. A timeout is terminal: the attempt already consumed its full
//! budget, and retrying it would silently multiply user-visible latency.

use std::time::Duration;

use crate::executor::RequestExecutor;
use crate::observe::Observer;
use crate::resolve;
use crate::{ClientError, RawResponse, RequestDescriptor, Result};

/// Retry policy configuration.
///
/// The backoff schedule is derived, not stored:
/// `delay(retry) = base_delay * 2^retry`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,
    /// Base delay doubled per retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with no retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Create an exponential policy with a custom base delay.
    pub fn exponential(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Calculate the delay before a given retry (0-indexed per retry).
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

/// Classified outcome of a single attempt. Produced fresh per attempt and
/// never persisted.
pub(crate) enum AttemptOutcome {
    Success(RawResponse),
    Retryable(ClientError),
    Terminal(ClientError),
}

impl AttemptOutcome {
    pub(crate) fn classify(result: Result<RawResponse>) -> Self {
        match result {
            Ok(response) if response.status().as_u16() < 400 => Self::Success(response),
            Ok(response) => {
                let retryable = response.status().is_server_error();
                let err = resolve::api_error(&response);
                if retryable {
                    Self::Retryable(err)
                } else {
                    Self::Terminal(err)
                }
            }
            Err(err) if err.is_retryable() => Self::Retryable(err),
            Err(err) => Self::Terminal(err),
        }
    }
}

/// Bounded retry loop around [`RequestExecutor`].
pub(crate) struct RetryCoordinator<'a> {
    executor: &'a RequestExecutor,
    policy: &'a RetryPolicy,
    observer: &'a dyn Observer,
}

impl<'a> RetryCoordinator<'a> {
    pub(crate) fn new(
        executor: &'a RequestExecutor,
        policy: &'a RetryPolicy,
        observer: &'a dyn Observer,
    ) -> Self {
        Self {
            executor,
            policy,
            observer,
        }
    }

    /// Attempt the descriptor up to `max_retries + 1` times. On exhaustion
    /// the last observed typed error is returned unchanged, never a
    /// generic wrapper.
    pub(crate) async fn run(&self, descriptor: &RequestDescriptor) -> Result<RawResponse> {
        let label = descriptor.label();
        let mut retry = 0u32;

        loop {
            self.observer
                .log("http", &format!("request issued: {label}"), None);

            let outcome = AttemptOutcome::classify(self.executor.execute(descriptor).await);

            match outcome {
                AttemptOutcome::Success(response) => return Ok(response),
                AttemptOutcome::Retryable(err) if retry < self.policy.max_retries => {
                    let delay = self.policy.delay_for_retry(retry);
                    tracing::warn!(
                        error = %err,
                        retry = retry + 1,
                        delay_ms = delay.as_millis() as u64,
                        "retrying request"
                    );
                    self.observer.error(
                        "http",
                        &format!("attempt failed, retrying: {label}: {err}"),
                        None,
                    );
                    retry += 1;
                    tokio::time::sleep(delay).await;
                }
                AttemptOutcome::Retryable(err) | AttemptOutcome::Terminal(err) => {
                    return Err(err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_backoff_doubles_from_base() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.delay_for_retry(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for_retry(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for_retry(2), Duration::from_secs(4));
    }

    #[test]
    fn test_backoff_with_custom_base() {
        let policy = RetryPolicy::exponential(3, Duration::from_millis(5));

        assert_eq!(policy.delay_for_retry(0), Duration::from_millis(5));
        assert_eq!(policy.delay_for_retry(1), Duration::from_millis(10));
        assert_eq!(policy.delay_for_retry(2), Duration::from_millis(20));
    }

    #[test]
    fn test_no_retries_policy() {
        let policy = RetryPolicy::none();
        assert_eq!(policy.max_retries, 0);
    }

    #[test]
    fn test_success_statuses_classify_as_success() {
        for status in [StatusCode::OK, StatusCode::CREATED, StatusCode::FOUND] {
            let outcome = AttemptOutcome::classify(Ok(RawResponse::fake(status, "")));
            assert!(matches!(outcome, AttemptOutcome::Success(_)));
        }
    }

    #[test]
    fn test_client_errors_are_terminal() {
        let outcome = AttemptOutcome::classify(Ok(RawResponse::fake(
            StatusCode::NOT_FOUND,
            r#"{"detail": "not found"}"#,
        )));

        match outcome {
            AttemptOutcome::Terminal(ClientError::Api { status, .. }) => assert_eq!(status, 404),
            _ => panic!("expected terminal api error"),
        }
    }

    #[test]
    fn test_server_errors_are_retryable() {
        let outcome =
            AttemptOutcome::classify(Ok(RawResponse::fake(StatusCode::SERVICE_UNAVAILABLE, "")));

        match outcome {
            AttemptOutcome::Retryable(ClientError::Api { status, .. }) => assert_eq!(status, 503),
            _ => panic!("expected retryable api error"),
        }
    }

    #[test]
    fn test_timeout_is_terminal() {
        let outcome = AttemptOutcome::classify(Err(ClientError::Timeout {
            budget: Duration::from_secs(10),
        }));

        assert!(matches!(
            outcome,
            AttemptOutcome::Terminal(ClientError::Timeout { .. })
        ));
    }
}
