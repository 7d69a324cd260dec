//! Terminal outcomes of a retry session.
//!
//! Failures returned by the retried operation never surface here. They are
//! observed by the retry loop to decide whether another attempt follows and
//! are logged; a caller that needs the last failure must capture it through
//! the operation closure.

use std::time::Duration;
use thiserror::Error;

/// Result type for retry sessions.
pub type Result<T> = std::result::Result<T, RetryError>;

/// Errors that end a retry session.
///
/// Both kinds are terminal. The strategy has already been reset by the time
/// one of these is returned, so it can be reused immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetryError {
    /// The operation failed on every permitted attempt.
    #[error("max retry attempts reached")]
    AttemptsExhausted {
        /// Number of times the operation was invoked.
        attempts: u32,
    },

    /// A wait lost its race against the interval ceiling.
    #[error("max retry interval reached")]
    IntervalExceeded {
        /// The attempt whose wait was interrupted (1-indexed).
        attempt: u32,
        /// The ceiling that fired.
        ceiling: Duration,
    },
}

impl RetryError {
    /// Whether the session ended because the attempt ceiling was reached.
    pub fn is_attempts_exhausted(&self) -> bool {
        matches!(self, Self::AttemptsExhausted { .. })
    }

    /// Whether the session ended because the interval ceiling fired.
    pub fn is_interval_exceeded(&self) -> bool {
        matches!(self, Self::IntervalExceeded { .. })
    }
}
