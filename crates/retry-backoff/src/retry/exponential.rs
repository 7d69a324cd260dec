//! Exponential backoff with jitter and an interval ceiling.

use super::attempts::AttemptCounter;
use super::defaults::{count_above, positive_duration};
use super::strategy::{BackoffStrategy, CeilingScope, IntervalCeiling};
use crate::jitter::Jitter;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const INITIAL_INTERVAL_DEFAULT: Duration = Duration::from_millis(500);
const MAX_INTERVAL_DEFAULT: Duration = Duration::from_secs(60);
const MAX_ATTEMPTS_DEFAULT: u32 = 3;
const SCALING_FACTOR_DEFAULT: u32 = 2;

/// Caller-supplied configuration for [`ExponentialBackoff`].
///
/// Zero, negative or otherwise out-of-range fields fall back to their
/// defaults when the strategy is constructed, so `ExponentialOptions::default()`
/// yields a fully defaulted strategy.
///
/// | Field | Default | Rule |
/// |---|---|---|
/// | `initial_interval` | 500ms | must be non-zero |
/// | `max_interval` | 60s | must be non-zero |
/// | `max_attempts` | 3 | must be > 0 |
/// | `scaling_factor` | 2 | must be > 1 |
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExponentialOptions {
    /// Base wait, multiplied by `scaling_factor^attempt`.
    #[serde(with = "crate::serde_millis")]
    pub initial_interval: Duration,
    /// Interval ceiling raced against waits.
    #[serde(with = "crate::serde_millis")]
    pub max_interval: Duration,
    /// Attempts allowed before the session fails.
    pub max_attempts: i64,
    /// Exponent base.
    pub scaling_factor: i64,
    /// Whether the ceiling applies per wait or to the whole session.
    pub ceiling_scope: CeilingScope,
    /// Jitter added to each wait.
    pub jitter: Jitter,
}

/// Normalized configuration held by an [`ExponentialBackoff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentialSettings {
    /// Base wait.
    pub initial_interval: Duration,
    /// Interval ceiling.
    pub max_interval: Duration,
    /// Attempt ceiling.
    pub max_attempts: u32,
    /// Exponent base, always at least 2.
    pub scaling_factor: u32,
    /// Scope of the interval ceiling.
    pub ceiling_scope: CeilingScope,
    /// Jitter added to each wait.
    pub jitter: Jitter,
}

impl ExponentialSettings {
    /// Apply defaults to every out-of-range field of `options`.
    pub fn normalize(options: &ExponentialOptions) -> Self {
        Self {
            initial_interval: positive_duration(
                "initial_interval",
                options.initial_interval,
                INITIAL_INTERVAL_DEFAULT,
            ),
            max_interval: positive_duration(
                "max_interval",
                options.max_interval,
                MAX_INTERVAL_DEFAULT,
            ),
            max_attempts: count_above(
                "max_attempts",
                options.max_attempts,
                0,
                MAX_ATTEMPTS_DEFAULT,
            ),
            scaling_factor: count_above(
                "scaling_factor",
                options.scaling_factor,
                1,
                SCALING_FACTOR_DEFAULT,
            ),
            ceiling_scope: options.ceiling_scope,
            jitter: options.jitter,
        }
    }
}

impl Default for ExponentialSettings {
    fn default() -> Self {
        Self::normalize(&ExponentialOptions::default())
    }
}

/// Exponential backoff strategy with jitter and an interval ceiling.
///
/// The wait before attempt `k` grows geometrically:
///
/// ```text
/// base_wait(k) = initial_interval * scaling_factor^k
/// wait(k)      = max(0, base_wait(k) + jitter)
/// ```
///
/// Every wait is raced against `max_interval`; if the ceiling fires first the
/// session fails with [`RetryError::IntervalExceeded`](crate::RetryError).
///
/// # Examples
///
/// ```rust
/// use retry_backoff::prelude::*;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Default configuration (max_attempts=3, initial=500ms, max=60s, scaling_factor=2)
/// let defaults = ExponentialBackoff::default();
/// assert_eq!(defaults.max_attempts(), 3);
///
/// // Custom configuration
/// let mut backoff = ExponentialBackoff::builder()
///     .max_attempts(10)
///     .initial_interval(Duration::from_millis(250))
///     .max_interval(Duration::from_secs(10))
///     .scaling_factor(3)
///     .build();
///
/// backoff
///     .retry(|| async {
///         // Your operation here
///         Ok::<_, std::io::Error>(())
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    settings: ExponentialSettings,
    attempts: AttemptCounter,
}

impl ExponentialBackoff {
    /// Build a strategy from caller options, defaulting out-of-range fields.
    pub fn new(options: ExponentialOptions) -> Self {
        Self {
            settings: ExponentialSettings::normalize(&options),
            attempts: AttemptCounter::new(),
        }
    }

    /// Create a new builder for configuring exponential backoff.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retry_backoff::ExponentialBackoff;
    ///
    /// let backoff = ExponentialBackoff::builder()
    ///     .max_attempts(5)
    ///     .build();
    /// ```
    pub fn builder() -> ExponentialBackoffBuilder {
        ExponentialBackoffBuilder::default()
    }

    /// The normalized settings this strategy was built with.
    pub fn settings(&self) -> &ExponentialSettings {
        &self.settings
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self::new(ExponentialOptions::default())
    }
}

impl From<ExponentialOptions> for ExponentialBackoff {
    fn from(options: ExponentialOptions) -> Self {
        Self::new(options)
    }
}

impl BackoffStrategy for ExponentialBackoff {
    fn interval_for(&self, attempt: u32) -> Duration {
        self.settings
            .scaling_factor
            .checked_pow(attempt)
            .and_then(|factor| self.settings.initial_interval.checked_mul(factor))
            .unwrap_or(Duration::MAX)
    }

    fn jitter(&self) -> Jitter {
        self.settings.jitter
    }

    fn attempts(&self) -> &AttemptCounter {
        &self.attempts
    }

    fn attempts_mut(&mut self) -> &mut AttemptCounter {
        &mut self.attempts
    }

    fn max_attempts(&self) -> u32 {
        self.settings.max_attempts
    }

    fn interval_ceiling(&self) -> Option<IntervalCeiling> {
        Some(IntervalCeiling {
            limit: self.settings.max_interval,
            scope: self.settings.ceiling_scope,
        })
    }
}

/// Builder for configuring [`ExponentialBackoff`].
///
/// Unset fields take their defaults, exactly as zeroed
/// [`ExponentialOptions`] fields do.
#[derive(Debug, Default)]
pub struct ExponentialBackoffBuilder {
    options: ExponentialOptions,
}

impl ExponentialBackoffBuilder {
    /// Set the base wait.
    ///
    /// Default: 500ms
    pub fn initial_interval(mut self, interval: Duration) -> Self {
        self.options.initial_interval = interval;
        self
    }

    /// Set the interval ceiling.
    ///
    /// Default: 60s
    pub fn max_interval(mut self, interval: Duration) -> Self {
        self.options.max_interval = interval;
        self
    }

    /// Set the attempt ceiling.
    ///
    /// Default: 3
    pub fn max_attempts(mut self, max_attempts: i64) -> Self {
        self.options.max_attempts = max_attempts;
        self
    }

    /// Set the exponent base. Values of 1 or less fall back to 2.
    ///
    /// Default: 2
    pub fn scaling_factor(mut self, scaling_factor: i64) -> Self {
        self.options.scaling_factor = scaling_factor;
        self
    }

    /// Set what the interval ceiling is measured against.
    ///
    /// Default: [`CeilingScope::PerAttempt`]
    pub fn ceiling_scope(mut self, scope: CeilingScope) -> Self {
        self.options.ceiling_scope = scope;
        self
    }

    /// Set the jitter source.
    ///
    /// Default: uniform ±1000ms
    pub fn jitter(mut self, jitter: Jitter) -> Self {
        self.options.jitter = jitter;
        self
    }

    /// Build the `ExponentialBackoff` instance.
    pub fn build(self) -> ExponentialBackoff {
        ExponentialBackoff::new(self.options)
    }
}
