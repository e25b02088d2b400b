//! # Bounded retries
//!
//! Re-runs an async operation while it fails with an error the caller marks
//! as transient. Attempt `n` is followed by a pause of `n * delay` (linear
//! backoff). Permanent errors are returned on the spot.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use parkeasy::client::retry::{with_retry, RetryPolicy};
//! use std::time::Duration;
//!
//! # async fn example() {
//! let policy = RetryPolicy::new(3, Duration::from_millis(200));
//! let result: Result<u32, _> = with_retry(
//!     &policy,
//!     |err: &std::io::Error| err.kind() == std::io::ErrorKind::TimedOut,
//!     || async { Ok(42) },
//! )
//! .await;
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::shared::config::AppConfig;

/// How many times to try and how long to wait in between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first (at least 1)
    pub attempts: u32,
    /// Base delay
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.retry_attempts, config.retry_delay)
    }

    /// Single attempt, no waiting
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Pause after failed attempt number `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.delay.saturating_mul(attempt)
    }
}

/// Why [`with_retry`] gave up
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// Every attempt failed with a transient error; `last` is the final one
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: E },

    /// The operation failed with an error that retrying cannot fix
    #[error("{0}")]
    Permanent(E),
}

impl<E> RetryError<E> {
    /// The underlying error, whichever way the retries ended
    pub fn into_inner(self) -> E {
        match self {
            Self::Exhausted { last, .. } => last,
            Self::Permanent(err) => err,
        }
    }
}

/// Run `operation` until it succeeds, fails permanently, or runs out of
/// attempts.
///
/// `is_transient` decides per error whether another attempt is made.
pub async fn with_retry<T, E, F, Fut, C>(
    policy: &RetryPolicy,
    is_transient: C,
    mut operation: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!("Succeeded on attempt {}/{}", attempt, attempts);
                }
                return Ok(value);
            }
            Err(err) if !is_transient(&err) => return Err(RetryError::Permanent(err)),
            Err(err) if attempt >= attempts => {
                warn!("Giving up after {} attempts: {}", attempts, err);
                return Err(RetryError::Exhausted {
                    attempts,
                    last: err,
                });
            }
            Err(err) => {
                let pause = policy.delay_for(attempt);
                warn!(
                    "Attempt {}/{} failed: {}; retrying in {:?}",
                    attempt, attempts, err, pause
                );
                tokio::time::sleep(pause).await;
                attempt += 1;
            }
        }
    }
}
