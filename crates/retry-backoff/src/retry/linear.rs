//! Linear backoff: waits grow by a fixed step per attempt.

use super::attempts::AttemptCounter;
use super::defaults::{count_above, positive_duration};
use super::strategy::{BackoffStrategy, CeilingScope, IntervalCeiling};
use crate::jitter::Jitter;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MAX_INTERVAL_DEFAULT: Duration = Duration::from_secs(60);
const MAX_ATTEMPTS_DEFAULT: u32 = 3;
const DELTA_DEFAULT: u32 = 2;

/// Caller-supplied configuration for [`LinearBackoff`].
///
/// | Field | Default | Rule |
/// |---|---|---|
/// | `max_interval` | 60s | must be non-zero |
/// | `max_attempts` | 3 | must be > 0 |
/// | `delta` | 2 (seconds) | must be > 1 |
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearOptions {
    /// Interval ceiling raced against waits.
    #[serde(with = "crate::serde_millis")]
    pub max_interval: Duration,
    /// Attempts allowed before the session fails.
    pub max_attempts: i64,
    /// Growth step in whole seconds.
    pub delta: i64,
    /// Whether the ceiling applies per wait or to the whole session.
    pub ceiling_scope: CeilingScope,
    /// Jitter added to each wait.
    pub jitter: Jitter,
}

/// Normalized configuration held by a [`LinearBackoff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearSettings {
    /// Interval ceiling.
    pub max_interval: Duration,
    /// Attempt ceiling.
    pub max_attempts: u32,
    /// Growth step in whole seconds, always at least 2.
    pub delta: u32,
    /// Scope of the interval ceiling.
    pub ceiling_scope: CeilingScope,
    /// Jitter added to each wait.
    pub jitter: Jitter,
}

impl LinearSettings {
    /// Apply defaults to every out-of-range field of `options`.
    pub fn normalize(options: &LinearOptions) -> Self {
        Self {
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
            delta: count_above("delta", options.delta, 1, DELTA_DEFAULT),
            ceiling_scope: options.ceiling_scope,
            jitter: options.jitter,
        }
    }
}

impl Default for LinearSettings {
    fn default() -> Self {
        Self::normalize(&LinearOptions::default())
    }
}

/// Linear backoff strategy.
///
/// Attempt `k` waits `delta * k` seconds plus jitter, so the first attempt
/// waits `delta` seconds. Waits race `max_interval` the same way
/// [`ExponentialBackoff`](super::ExponentialBackoff) does.
#[derive(Debug, Clone)]
pub struct LinearBackoff {
    settings: LinearSettings,
    attempts: AttemptCounter,
}

impl LinearBackoff {
    /// Build a strategy from caller options, defaulting out-of-range fields.
    pub fn new(options: LinearOptions) -> Self {
        Self {
            settings: LinearSettings::normalize(&options),
            attempts: AttemptCounter::new(),
        }
    }

    /// Create a new builder for configuring linear backoff.
    pub fn builder() -> LinearBackoffBuilder {
        LinearBackoffBuilder::default()
    }

    /// The normalized settings this strategy was built with.
    pub fn settings(&self) -> &LinearSettings {
        &self.settings
    }
}

impl Default for LinearBackoff {
    fn default() -> Self {
        Self::new(LinearOptions::default())
    }
}

impl From<LinearOptions> for LinearBackoff {
    fn from(options: LinearOptions) -> Self {
        Self::new(options)
    }
}

impl BackoffStrategy for LinearBackoff {
    fn interval_for(&self, attempt: u32) -> Duration {
        let secs = u64::from(self.settings.delta).saturating_mul(u64::from(attempt));
        Duration::from_secs(secs)
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

/// Builder for configuring [`LinearBackoff`].
#[derive(Debug, Default)]
pub struct LinearBackoffBuilder {
    options: LinearOptions,
}

impl LinearBackoffBuilder {
    /// Set the interval ceiling. Default: 60s
    pub fn max_interval(mut self, interval: Duration) -> Self {
        self.options.max_interval = interval;
        self
    }

    /// Set the attempt ceiling. Default: 3
    pub fn max_attempts(mut self, max_attempts: i64) -> Self {
        self.options.max_attempts = max_attempts;
        self
    }

    /// Growth step in seconds. Values of 1 or less fall back to 2.
    pub fn delta(mut self, delta: i64) -> Self {
        self.options.delta = delta;
        self
    }

    /// Set what the interval ceiling is measured against.
    pub fn ceiling_scope(mut self, scope: CeilingScope) -> Self {
        self.options.ceiling_scope = scope;
        self
    }

    /// Set the jitter source.
    pub fn jitter(mut self, jitter: Jitter) -> Self {
        self.options.jitter = jitter;
        self
    }

    /// Build the `LinearBackoff` instance.
    pub fn build(self) -> LinearBackoff {
        LinearBackoff::new(self.options)
    }
}
