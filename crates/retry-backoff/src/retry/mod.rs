//! Retry strategies and backoff implementations.
//!
//! This module provides one capability, [`BackoffStrategy`], and three
//! interchangeable implementations of it.
//!
//! # Key Types
//!
//! - [`BackoffStrategy`] - Core trait; supplies the shared retry loop
//! - [`ConstantBackoff`] - Same wait before every attempt
//! - [`LinearBackoff`] - Wait grows by a fixed step per attempt
//! - [`ExponentialBackoff`] - Wait grows geometrically per attempt
//!
//! # Examples
//!
//! ```rust
//! use retry_backoff::retry::{BackoffStrategy, LinearBackoff, LinearOptions};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut backoff = LinearBackoff::new(LinearOptions {
//!     max_interval: Duration::from_secs(30),
//!     max_attempts: 5,
//!     ..Default::default()
//! });
//!
//! backoff.retry(|| async {
//!     // Your operation here
//!     Ok::<_, std::io::Error>(())
//! }).await?;
//! # Ok(())
//! # }
//! ```

mod attempts;
mod constant;
mod defaults;
mod exponential;
mod linear;
mod session;
mod strategy;

pub use attempts::AttemptCounter;
pub use constant::{ConstantBackoff, ConstantBackoffBuilder, ConstantOptions, ConstantSettings};
pub use exponential::{
    ExponentialBackoff, ExponentialBackoffBuilder, ExponentialOptions, ExponentialSettings,
};
pub use linear::{LinearBackoff, LinearBackoffBuilder, LinearOptions, LinearSettings};
pub use strategy::{BackoffStrategy, CeilingScope, IntervalCeiling};
