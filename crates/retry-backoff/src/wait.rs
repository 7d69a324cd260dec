//! Waiting between attempts.
//!
//! All strategies wait through [`wait`]: a wait timer optionally raced
//! against a ceiling deadline. Whichever timer loses is dropped when the race
//! resolves, so no timer outlives the wait that created it.

use std::time::Duration;
use tokio::time::{Instant, sleep, sleep_until};

/// How a wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The full wait elapsed; the next attempt may run.
    Elapsed,
    /// The ceiling deadline fired before the wait completed.
    CeilingReached,
}

/// Sleep for `duration`, bailing out early if `deadline` passes first.
///
/// Without a deadline this is a plain sleep. When both timers are due at the
/// same instant the wait wins.
///
/// # Examples
///
/// ```rust
/// use retry_backoff::wait::{WaitOutcome, wait};
/// use std::time::Duration;
/// use tokio::time::Instant;
///
/// # async fn example() {
/// let deadline = Instant::now() + Duration::from_millis(10);
/// let outcome = wait(Duration::from_secs(5), Some(deadline)).await;
/// assert_eq!(outcome, WaitOutcome::CeilingReached);
/// # }
/// ```
pub async fn wait(duration: Duration, deadline: Option<Instant>) -> WaitOutcome {
    let Some(deadline) = deadline else {
        sleep(duration).await;
        return WaitOutcome::Elapsed;
    };

    tokio::select! {
        biased;
        _ = sleep(duration) => WaitOutcome::Elapsed,
        _ = sleep_until(deadline) => WaitOutcome::CeilingReached,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_wait_without_deadline_sleeps_full_duration() {
        let start = Instant::now();
        let outcome = wait(Duration::from_secs(5), None).await;

        assert_eq!(outcome, WaitOutcome::Elapsed);
        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_finishes_before_deadline() {
        let start = Instant::now();
        let outcome = wait(Duration::from_secs(2), Some(start + Duration::from_secs(60))).await;

        assert_eq!(outcome, WaitOutcome::Elapsed);
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_interrupts_long_wait() {
        let start = Instant::now();
        let outcome = wait(Duration::from_secs(30), Some(start + Duration::from_secs(1))).await;

        assert_eq!(outcome, WaitOutcome::CeilingReached);
        assert_eq!(start.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tie_favors_wait() {
        let start = Instant::now();
        let outcome = wait(Duration::from_secs(1), Some(start + Duration::from_secs(1))).await;

        assert_eq!(outcome, WaitOutcome::Elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_past_deadline_fires_immediately() {
        let start = Instant::now();
        let outcome = wait(Duration::from_secs(1), Some(start)).await;

        assert_eq!(outcome, WaitOutcome::CeilingReached);
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
