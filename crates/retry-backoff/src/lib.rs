#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Retry-with-backoff primitives.
//!
//! This crate repeatedly invokes a caller-supplied async operation until it
//! succeeds, an attempt ceiling is reached, or a wait runs past an interval
//! ceiling. It is meant to be embedded in API clients and other network code
//! to smooth over transient failures.
//!
//! - **One capability** via the `BackoffStrategy` trait, with the retry loop
//!   shared by every implementation
//! - **Three strategies**: constant, linear and exponential
//! - **Jitter** on every wait (uniform ±1000ms by default)
//! - **Forgiving configuration**: out-of-range options fall back to defaults
//! - **Reusable instances**: a strategy resets itself at the end of every
//!   session
//!
//! # Examples
//!
//! Using the prelude for convenient imports:
//!
//! ```rust
//! use retry_backoff::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut backoff = ExponentialBackoff::builder()
//!     .max_attempts(5)
//!     .initial_interval(Duration::from_millis(250))
//!     .build();
//!
//! // Results travel through the closure, not the retry channel.
//! let mut fetched = None;
//! backoff.retry(|| {
//!     fetched = Some(42);
//!     async { Ok::<_, std::io::Error>(()) }
//! }).await?;
//! assert_eq!(fetched, Some(42));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod jitter;
pub mod retry;
mod serde_millis;
pub mod wait;

pub use error::{Result, RetryError};
pub use jitter::Jitter;
pub use retry::{
    AttemptCounter, BackoffStrategy, CeilingScope, ConstantBackoff, ConstantOptions,
    ExponentialBackoff, ExponentialOptions, IntervalCeiling, LinearBackoff, LinearOptions,
};

/// Convenient re-exports of commonly used items.
///
/// Import all core abstractions with:
///
/// ```rust
/// use retry_backoff::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::RetryError;
    pub use crate::jitter::Jitter;
    pub use crate::retry::{
        AttemptCounter, BackoffStrategy, CeilingScope, ConstantBackoff, ConstantOptions,
        ExponentialBackoff, ExponentialOptions, LinearBackoff, LinearOptions,
    };
}
