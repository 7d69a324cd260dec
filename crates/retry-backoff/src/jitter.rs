//! Random perturbation of computed waits.
//!
//! Every wait produced by a strategy is shifted by a uniformly distributed
//! offset so that callers retrying the same dependency at the same time
//! drift apart instead of hitting it in lockstep.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Jitter source applied to every computed wait.
///
/// # Examples
///
/// ```rust
/// use retry_backoff::Jitter;
/// use std::time::Duration;
///
/// let base = Duration::from_secs(5);
/// let jittered = Jitter::default().apply(base);
/// assert!(jittered >= Duration::from_secs(4));
/// assert!(jittered < Duration::from_secs(6));
///
/// assert_eq!(Jitter::Disabled.apply(base), base);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Jitter {
    /// No perturbation; waits are exactly the computed interval.
    Disabled,

    /// Offset sampled uniformly from `[-spread, +spread)` at millisecond
    /// granularity.
    Uniform {
        /// Half-width of the sampling range.
        #[serde(with = "crate::serde_millis")]
        spread: Duration,
    },
}

impl Jitter {
    /// Spread used by [`Jitter::default`].
    pub const DEFAULT_SPREAD: Duration = Duration::from_millis(1000);

    /// Uniform jitter with the given half-width.
    pub fn uniform(spread: Duration) -> Self {
        Self::Uniform { spread }
    }

    /// Draw one offset in milliseconds.
    ///
    /// Returns 0 when jitter is disabled or the spread is below one
    /// millisecond.
    pub fn sample_millis(&self) -> i64 {
        match self {
            Self::Disabled => 0,
            Self::Uniform { spread } => {
                let spread = i64::try_from(spread.as_millis()).unwrap_or(i64::MAX);
                if spread == 0 {
                    return 0;
                }
                rand::thread_rng().gen_range(-spread..spread)
            }
        }
    }

    /// Shift `base` by one sampled offset, flooring the result at zero.
    pub fn apply(&self, base: Duration) -> Duration {
        let offset = self.sample_millis();
        let magnitude = Duration::from_millis(offset.unsigned_abs());
        if offset >= 0 {
            base.saturating_add(magnitude)
        } else {
            base.saturating_sub(magnitude)
        }
    }
}

impl Default for Jitter {
    /// Uniform jitter of ±1000ms.
    fn default() -> Self {
        Self::Uniform {
            spread: Self::DEFAULT_SPREAD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_disabled_is_identity() {
        let base = Duration::from_millis(1234);
        for _ in 0..20 {
            assert_eq!(Jitter::Disabled.apply(base), base);
            assert_eq!(Jitter::Disabled.sample_millis(), 0);
        }
    }

    #[test]
    fn test_default_sample_range() {
        let jitter = Jitter::default();
        for _ in 0..1000 {
            let offset = jitter.sample_millis();
            assert!(
                (-1000..1000).contains(&offset),
                "offset {}ms outside [-1000, 1000)",
                offset
            );
        }
    }

    #[test]
    fn test_zero_spread_never_panics() {
        let jitter = Jitter::uniform(Duration::ZERO);
        assert_eq!(jitter.sample_millis(), 0);
        assert_eq!(jitter.apply(Duration::from_secs(1)), Duration::from_secs(1));
    }

    #[test]
    fn test_negative_offset_floors_at_zero() {
        let jitter = Jitter::default();
        for _ in 0..200 {
            // Any negative offset exceeds a zero base; the result must clamp.
            let waited = jitter.apply(Duration::ZERO);
            assert!(waited < Duration::from_secs(1));
        }
    }

    #[test]
    fn test_samples_vary() {
        let jitter = Jitter::default();
        let samples: Vec<i64> = (0..20).map(|_| jitter.sample_millis()).collect();
        let all_same = samples.windows(2).all(|w| w[0] == w[1]);
        assert!(!all_same, "With randomization, samples should vary");
    }

    #[test]
    fn test_deserialize_from_toml() {
        #[derive(Deserialize)]
        struct Holder {
            jitter: Jitter,
        }

        let holder: Holder = toml::from_str(
            r#"
            [jitter]
            kind = "uniform"
            spread = 250
            "#,
        )
        .unwrap();
        assert_eq!(holder.jitter, Jitter::uniform(Duration::from_millis(250)));

        let holder: Holder = toml::from_str(
            r#"
            [jitter]
            kind = "disabled"
            "#,
        )
        .unwrap();
        assert_eq!(holder.jitter, Jitter::Disabled);
    }

    proptest! {
        #[test]
        fn prop_jitter_within_one_second(base_ms in 1_000u64..10_000_000) {
            let base = Duration::from_millis(base_ms);
            let waited = Jitter::default().apply(base);
            prop_assert!(waited >= base - Duration::from_millis(1000));
            prop_assert!(waited < base + Duration::from_millis(1000));
        }
    }
}
