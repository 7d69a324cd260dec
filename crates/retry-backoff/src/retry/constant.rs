//! Constant backoff: every attempt waits the same nominal interval.

use super::attempts::AttemptCounter;
use super::defaults::{count_above, positive_duration};
use super::strategy::BackoffStrategy;
use crate::jitter::Jitter;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const CONSTANT_DEFAULT: Duration = Duration::from_secs(5);
const MAX_ATTEMPTS_DEFAULT: u32 = 10;

/// Caller-supplied configuration for [`ConstantBackoff`].
///
/// A zero `constant` falls back to 5s and a non-positive `max_attempts` to 10.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstantOptions {
    /// Wait before every attempt.
    #[serde(with = "crate::serde_millis")]
    pub constant: Duration,
    /// Attempts allowed before the session fails.
    pub max_attempts: i64,
    /// Jitter added to each wait.
    pub jitter: Jitter,
}

/// Normalized configuration held by a [`ConstantBackoff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantSettings {
    /// Wait before every attempt.
    pub constant: Duration,
    /// Attempt ceiling.
    pub max_attempts: u32,
    /// Jitter added to each wait.
    pub jitter: Jitter,
}

impl ConstantSettings {
    /// Apply defaults to every out-of-range field of `options`.
    pub fn normalize(options: &ConstantOptions) -> Self {
        Self {
            constant: positive_duration("constant", options.constant, CONSTANT_DEFAULT),
            max_attempts: count_above(
                "max_attempts",
                options.max_attempts,
                0,
                MAX_ATTEMPTS_DEFAULT,
            ),
            jitter: options.jitter,
        }
    }
}

impl Default for ConstantSettings {
    fn default() -> Self {
        Self::normalize(&ConstantOptions::default())
    }
}

/// Constant backoff strategy.
///
/// Waits `constant` plus jitter before each attempt. There is no interval
/// ceiling; only the attempt ceiling ends a failing session.
///
/// ```rust
/// use retry_backoff::prelude::*;
/// use std::time::Duration;
///
/// let backoff = ConstantBackoff::builder()
///     .constant(Duration::from_secs(2))
///     .max_attempts(4)
///     .build();
///
/// assert_eq!(backoff.interval_for(1), backoff.interval_for(4));
/// ```
#[derive(Debug, Clone)]
pub struct ConstantBackoff {
    settings: ConstantSettings,
    attempts: AttemptCounter,
}

impl ConstantBackoff {
    /// Build a strategy from caller options, defaulting out-of-range fields.
    pub fn new(options: ConstantOptions) -> Self {
        Self {
            settings: ConstantSettings::normalize(&options),
            attempts: AttemptCounter::new(),
        }
    }

    /// Create a new builder for configuring constant backoff.
    pub fn builder() -> ConstantBackoffBuilder {
        ConstantBackoffBuilder::default()
    }

    /// The normalized settings this strategy was built with.
    pub fn settings(&self) -> &ConstantSettings {
        &self.settings
    }
}

impl Default for ConstantBackoff {
    fn default() -> Self {
        Self::new(ConstantOptions::default())
    }
}

impl From<ConstantOptions> for ConstantBackoff {
    fn from(options: ConstantOptions) -> Self {
        Self::new(options)
    }
}

impl BackoffStrategy for ConstantBackoff {
    fn interval_for(&self, _attempt: u32) -> Duration {
        self.settings.constant
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
}

/// Builder for configuring [`ConstantBackoff`].
#[derive(Debug, Default)]
pub struct ConstantBackoffBuilder {
    options: ConstantOptions,
}

impl ConstantBackoffBuilder {
    /// Set the wait used before every attempt. Default: 5s
    pub fn constant(mut self, interval: Duration) -> Self {
        self.options.constant = interval;
        self
    }

    /// Set the attempt ceiling. Default: 10
    pub fn max_attempts(mut self, max_attempts: i64) -> Self {
        self.options.max_attempts = max_attempts;
        self
    }

    /// Set the jitter source.
    pub fn jitter(mut self, jitter: Jitter) -> Self {
        self.options.jitter = jitter;
        self
    }

    /// Build the `ConstantBackoff` instance.
    pub fn build(self) -> ConstantBackoff {
        ConstantBackoff::new(self.options)
    }
}
