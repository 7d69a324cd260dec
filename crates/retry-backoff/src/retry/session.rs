//! The retry loop shared by all strategies.

use super::strategy::{BackoffStrategy, CeilingScope};
use crate::error::RetryError;
use crate::wait::{self, WaitOutcome};
use std::fmt::Display;
use std::future::Future;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Drive `operation` through `strategy` until success or a terminal limit.
///
/// The strategy is reset on every exit path.
pub(crate) async fn run<S, F, Fut, E>(
    strategy: &mut S,
    mut operation: F,
) -> Result<(), RetryError>
where
    S: BackoffStrategy + ?Sized,
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = Result<(), E>> + Send,
    E: Display + Send,
{
    let ceiling = strategy.interval_ceiling();
    let session_deadline = ceiling
        .filter(|c| c.scope == CeilingScope::Session)
        .and_then(|c| Instant::now().checked_add(c.limit));

    loop {
        let attempt = strategy.advance();
        let max_attempts = strategy.max_attempts();
        if attempt > max_attempts {
            strategy.reset();
            warn!(attempts = max_attempts, "max retry attempts reached");
            return Err(RetryError::AttemptsExhausted {
                attempts: max_attempts,
            });
        }

        let delay = strategy.next_backoff();
        // A ceiling too large to represent as an instant never fires.
        let deadline = ceiling.and_then(|c| match c.scope {
            CeilingScope::PerAttempt => Instant::now().checked_add(c.limit),
            CeilingScope::Session => session_deadline,
        });

        debug!(attempt, max_attempts, delay = ?delay, "waiting before attempt");

        if wait::wait(delay, deadline).await == WaitOutcome::CeilingReached {
            let limit = ceiling.map(|c| c.limit).unwrap_or_default();
            strategy.reset();
            warn!(attempt, ceiling = ?limit, "max retry interval reached");
            return Err(RetryError::IntervalExceeded {
                attempt,
                ceiling: limit,
            });
        }

        match operation().await {
            Ok(()) => {
                strategy.reset();
                debug!(attempt, "operation succeeded");
                return Ok(());
            }
            Err(err) => {
                warn!(
                    attempt,
                    max_attempts,
                    error = %err,
                    "operation failed, retrying after next interval"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jitter::Jitter;
    use crate::retry::attempts::AttemptCounter;
    use crate::retry::strategy::IntervalCeiling;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Fixed-step strategy with an optional ceiling.
    struct FixedStep {
        attempts: AttemptCounter,
        max_attempts: u32,
        step: Duration,
        ceiling: Option<IntervalCeiling>,
        resets: u32,
    }

    impl FixedStep {
        fn new(max_attempts: u32) -> Self {
            Self {
                attempts: AttemptCounter::new(),
                max_attempts,
                step: Duration::from_secs(1),
                ceiling: None,
                resets: 0,
            }
        }
    }

    impl BackoffStrategy for FixedStep {
        fn interval_for(&self, _attempt: u32) -> Duration {
            self.step
        }

        fn jitter(&self) -> Jitter {
            Jitter::Disabled
        }

        fn attempts(&self) -> &AttemptCounter {
            &self.attempts
        }

        fn attempts_mut(&mut self) -> &mut AttemptCounter {
            &mut self.attempts
        }

        fn max_attempts(&self) -> u32 {
            self.max_attempts
        }

        fn interval_ceiling(&self) -> Option<IntervalCeiling> {
            self.ceiling
        }

        fn reset(&mut self) {
            self.attempts.reset();
            self.resets += 1;
        }
    }

    fn failing_until(
        calls: &Arc<AtomicU32>,
        succeed_on: u32,
    ) -> impl FnMut() -> std::future::Ready<Result<(), String>> + Send {
        let calls = Arc::clone(calls);
        move || {
            let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call >= succeed_on {
                std::future::ready(Ok(()))
            } else {
                std::future::ready(Err(format!("call {} failed", call)))
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_on_first_attempt() {
        let mut strategy = FixedStep::new(3);
        let calls = Arc::new(AtomicU32::new(0));

        let result = run(&mut strategy, failing_until(&calls, 1)).await;

        assert_eq!(result, Ok(()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(strategy.current_attempt(), 0);
        assert_eq!(strategy.resets, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_on_nth_attempt_waits_before_each() {
        let mut strategy = FixedStep::new(5);
        let calls = Arc::new(AtomicU32::new(0));
        let start = Instant::now();

        let result = run(&mut strategy, failing_until(&calls, 4)).await;

        assert_eq!(result, Ok(()));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        // One wait precedes every attempt, including the first.
        assert_eq!(start.elapsed(), Duration::from_secs(4));
        assert_eq!(strategy.current_attempt(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempts_exhausted() {
        let mut strategy = FixedStep::new(3);
        let calls = Arc::new(AtomicU32::new(0));

        let result = run(&mut strategy, failing_until(&calls, u32::MAX)).await;

        assert_eq!(result, Err(RetryError::AttemptsExhausted { attempts: 3 }));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(strategy.current_attempt(), 0);
        assert_eq!(strategy.resets, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_per_attempt_ceiling_interrupts_wait() {
        let mut strategy = FixedStep::new(3);
        strategy.step = Duration::from_secs(10);
        strategy.ceiling = Some(IntervalCeiling {
            limit: Duration::from_secs(1),
            scope: CeilingScope::PerAttempt,
        });
        let calls = Arc::new(AtomicU32::new(0));
        let start = Instant::now();

        let result = run(&mut strategy, failing_until(&calls, 1)).await;

        assert_eq!(
            result,
            Err(RetryError::IntervalExceeded {
                attempt: 1,
                ceiling: Duration::from_secs(1),
            })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(start.elapsed(), Duration::from_secs(1));
        assert_eq!(strategy.current_attempt(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_per_attempt_ceiling_never_accumulates() {
        let mut strategy = FixedStep::new(10);
        strategy.ceiling = Some(IntervalCeiling {
            limit: Duration::from_secs(2),
            scope: CeilingScope::PerAttempt,
        });
        let calls = Arc::new(AtomicU32::new(0));

        let result = run(&mut strategy, failing_until(&calls, u32::MAX)).await;

        // Ten one-second waits, each under the two-second ceiling.
        assert_eq!(result, Err(RetryError::AttemptsExhausted { attempts: 10 }));
        assert_eq!(calls.load(Ordering::SeqCst), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_ceiling_accumulates() {
        let mut strategy = FixedStep::new(10);
        strategy.ceiling = Some(IntervalCeiling {
            limit: Duration::from_millis(3500),
            scope: CeilingScope::Session,
        });
        let calls = Arc::new(AtomicU32::new(0));
        let start = Instant::now();

        let result = run(&mut strategy, failing_until(&calls, u32::MAX)).await;

        assert_eq!(
            result,
            Err(RetryError::IntervalExceeded {
                attempt: 4,
                ceiling: Duration::from_millis(3500),
            })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(start.elapsed(), Duration::from_millis(3500));
        assert_eq!(strategy.current_attempt(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_strategy_reusable_after_failure() {
        let mut strategy = FixedStep::new(2);
        let calls = Arc::new(AtomicU32::new(0));

        let first = run(&mut strategy, failing_until(&calls, u32::MAX)).await;
        assert!(first.unwrap_err().is_attempts_exhausted());

        calls.store(0, Ordering::SeqCst);
        let second = run(&mut strategy, failing_until(&calls, 2)).await;

        assert_eq!(second, Ok(()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(strategy.resets, 2);
    }
}
