//! Bounded retry with exponential backoff for rate-limited Okta calls.

use std::time::Duration;

use super::client::{OktaClient, OktaError};
use crate::models::SearchResult;

/// Retry schedule for rate-limited upstream calls.
///
/// Attempt `n` (zero-based) backs off `base_delay * 2^n` before the next
/// try: 1s, 2s, 4s with the defaults.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
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
    /// Whether another attempt should be scheduled after `err`. Only
    /// rate-limited failures within the retry bound qualify.
    pub fn should_retry(&self, err: &OktaError, attempt: u32) -> bool {
        err.is_rate_limited() && attempt < self.max_retries
    }

    /// Backoff to wait after attempt `attempt` failed.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

impl OktaClient {
    /// [`fetch_users`](OktaClient::fetch_users) wrapped in the retry policy.
    ///
    /// Each call carries its own attempt counter; concurrent searches back
    /// off independently. Non-rate-limit errors propagate unchanged on the
    /// first attempt, and exhaustion propagates the last upstream error
    /// rather than wrapping it.
    pub async fn fetch_users_with_retry(
        &self,
        query: Option<&str>,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<SearchResult, OktaError> {
        let policy = self.retry_policy();
        let mut attempt = 0;
        loop {
            match self.fetch_users(query, limit, cursor).await {
                Ok(result) => return Ok(result),
                Err(err) if policy.should_retry(&err, attempt) => {
                    let delay = policy.delay_for(attempt);
                    tracing::warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Okta rate limited, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule_is_one_two_four_seconds() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
    }

    #[test]
    fn test_retries_rate_limits_up_to_the_bound() {
        let policy = RetryPolicy::default();
        let rate_limited = OktaError::Api { status: 429 };
        assert!(policy.should_retry(&rate_limited, 0));
        assert!(policy.should_retry(&rate_limited, 1));
        assert!(policy.should_retry(&rate_limited, 2));
        // Fourth attempt failed: give up.
        assert!(!policy.should_retry(&rate_limited, 3));
    }

    #[test]
    fn test_other_errors_are_not_retried() {
        let policy = RetryPolicy::default();
        assert!(!policy.should_retry(&OktaError::Api { status: 500 }, 0));
        assert!(!policy.should_retry(&OktaError::Request("connection refused".to_string()), 0));
        assert!(!policy.should_retry(&OktaError::Config("OKTA_API_TOKEN is required"), 0));
    }
}
