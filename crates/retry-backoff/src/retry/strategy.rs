//! The backoff capability shared by every strategy.

use super::attempts::AttemptCounter;
use super::session;
use crate::error::RetryError;
use crate::jitter::Jitter;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// A strategy for retrying failed operations with backoff.
///
/// Implementations decide how long to wait before each attempt and how many
/// attempts a session may make. The retry loop itself is shared: every
/// strategy gets [`retry`](BackoffStrategy::retry) for free and only supplies
/// the formula, the limits and its attempt counter.
///
/// # State
///
/// A strategy owns a mutable attempt counter. `retry` takes `&mut self`, so
/// one instance can serve many sessions one after another but never two at
/// once. Give concurrent callers their own instance.
///
/// # Examples
///
/// ```rust
/// use retry_backoff::prelude::*;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut backoff = LinearBackoff::builder()
///     .max_attempts(5)
///     .delta(2)
///     .build();
///
/// backoff
///     .retry(|| async {
///         // Your fallible operation here
///         Ok::<_, std::io::Error>(())
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait BackoffStrategy: Send {
    /// Pre-jitter wait before the given attempt (1-indexed).
    ///
    /// Pure: depends only on `attempt` and the strategy's settings.
    fn interval_for(&self, attempt: u32) -> Duration;

    /// Jitter applied on top of [`interval_for`](Self::interval_for).
    fn jitter(&self) -> Jitter;

    /// The attempt counter for the current session.
    fn attempts(&self) -> &AttemptCounter;

    /// Mutable access to the attempt counter.
    fn attempts_mut(&mut self) -> &mut AttemptCounter;

    /// Attempts a session may make before failing.
    fn max_attempts(&self) -> u32;

    /// Ceiling raced against every wait, if this strategy has one.
    fn interval_ceiling(&self) -> Option<IntervalCeiling> {
        None
    }

    /// Attempts made so far in the current session.
    fn current_attempt(&self) -> u32 {
        self.attempts().current()
    }

    /// Record the start of a new attempt and return its number.
    fn advance(&mut self) -> u32 {
        self.attempts_mut().advance()
    }

    /// Return to the state immediately after construction.
    ///
    /// Zeroes the attempt counter. Settings never change after construction,
    /// so nothing else needs restoring.
    fn reset(&mut self) {
        self.attempts_mut().reset();
    }

    /// Pre-jitter wait for the current attempt.
    fn base_backoff(&self) -> Duration {
        self.interval_for(self.current_attempt())
    }

    /// Wait to use before the current attempt, jitter included.
    ///
    /// Never negative: jitter that would push the wait below zero is clamped.
    fn next_backoff(&self) -> Duration {
        self.jitter().apply(self.base_backoff())
    }

    /// Run `operation` until it succeeds or a limit is reached.
    ///
    /// Each iteration advances the attempt counter, waits for
    /// [`next_backoff`](Self::next_backoff) and then invokes the operation.
    /// An `Err` from the operation is logged and triggers another iteration;
    /// it is never returned to the caller. The strategy is reset before this
    /// returns, whatever the outcome.
    ///
    /// # Returns
    /// - `Ok(())`: the operation succeeded
    /// - `Err(RetryError::AttemptsExhausted)`: every permitted attempt failed
    /// - `Err(RetryError::IntervalExceeded)`: a wait lost to the interval ceiling
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retry_backoff::prelude::*;
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicU32, Ordering};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut backoff = ExponentialBackoff::builder().max_attempts(10).build();
    ///
    /// let calls = Arc::new(AtomicU32::new(0));
    /// backoff
    ///     .retry(|| {
    ///         let calls = Arc::clone(&calls);
    ///         async move {
    ///             if calls.fetch_add(1, Ordering::SeqCst) < 2 {
    ///                 Err(std::io::Error::other("retry me"))
    ///             } else {
    ///                 Ok(())
    ///             }
    ///         }
    ///     })
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    async fn retry<F, Fut, E>(&mut self, operation: F) -> Result<(), RetryError>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<(), E>> + Send,
        E: Display + Send,
    {
        session::run(self, operation).await
    }
}

/// Limit on how long waits may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalCeiling {
    /// Maximum wait before the session fails.
    pub limit: Duration,
    /// What the limit is measured against.
    pub scope: CeilingScope,
}

/// What an [`IntervalCeiling`] is measured against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CeilingScope {
    /// A fresh ceiling timer is raced against each individual wait.
    ///
    /// Sessions of many short waits never trip it.
    #[default]
    PerAttempt,

    /// One deadline is fixed when the session starts and every wait races it.
    ///
    /// Bounds the total time a session spends waiting, plus however long the
    /// operations in between take.
    Session,
}
