//! Example: retrying a flaky counter with each backoff strategy
//!
//! This example demonstrates:
//! 1. Capturing an operation's result through the closure
//! 2. Reusing one strategy for a second session
//! 3. A session that runs out of attempts
//! 4. A session stopped by the interval ceiling
//!
//! Run with:
//! ```bash
//! cargo run -p retry-backoff --example retry_example
//! ```

use retry_backoff::prelude::*;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

/// A counter that reports an error until it has been bumped to 5.
struct FlakyCounter {
    value: Arc<AtomicU32>,
    advances: bool,
}

impl FlakyCounter {
    fn new() -> Self {
        Self {
            value: Arc::new(AtomicU32::new(0)),
            advances: true,
        }
    }

    /// A counter stuck below 5, so every call fails.
    fn stuck() -> Self {
        Self {
            advances: false,
            ..Self::new()
        }
    }

    async fn count(&self) -> Result<String, String> {
        let n = self.value.load(Ordering::SeqCst);
        if n != 5 {
            if self.advances {
                self.value.fetch_add(1, Ordering::SeqCst);
            }
            return Err(format!("number is not 5, number is {}", n));
        }
        Ok("counted to 5 successfully".to_string())
    }
}

/// Example 1: happy path, capturing the value outside the retry channel
async fn example_happy_path() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n=== Example 1: Happy Path ===\n");

    let mut backoff = ExponentialBackoff::builder()
        .max_attempts(10)
        .initial_interval(Duration::from_millis(100))
        .jitter(Jitter::uniform(Duration::from_millis(50)))
        .build();

    let counter = FlakyCounter::new();
    let start = Instant::now();
    let value = Arc::new(Mutex::new(String::new()));

    backoff
        .retry(|| {
            let counter = &counter;
            let value = Arc::clone(&value);
            println!("  attempt at {:?}", start.elapsed());
            async move {
                let counted = counter.count().await?;
                if let Ok(mut slot) = value.lock() {
                    *slot = counted;
                }
                Ok::<_, String>(())
            }
        })
        .await?;

    if let Ok(value) = value.lock() {
        println!("\nResult: {}", value);
    }
    println!("Total time: {:?}", start.elapsed());

    // Example 2: the same strategy is reset and ready for another session
    println!("\n=== Example 2: Reuse ===\n");
    let counter = FlakyCounter::new();
    backoff
        .retry(|| {
            let counter = &counter;
            async move { counter.count().await.map(|_| ()) }
        })
        .await?;
    println!("Second session succeeded");

    Ok(())
}

/// Example 3: every attempt fails
async fn example_attempts_exhausted() {
    println!("\n=== Example 3: Attempts Exhausted ===\n");

    let mut backoff = LinearBackoff::builder()
        .max_attempts(3)
        .jitter(Jitter::Disabled)
        .build();
    let counter = FlakyCounter::stuck();

    let result = backoff
        .retry(|| {
            let counter = &counter;
            async move { counter.count().await.map(|_| ()) }
        })
        .await;

    if let Err(err) = result {
        println!("Session ended: {}", err);
    }
}

/// Example 4: the wait outgrows the interval ceiling
async fn example_interval_exceeded() {
    println!("\n=== Example 4: Interval Exceeded ===\n");

    let mut backoff = ExponentialBackoff::builder()
        .max_attempts(10)
        .initial_interval(Duration::from_millis(200))
        .max_interval(Duration::from_secs(1))
        .jitter(Jitter::Disabled)
        .build();
    let counter = FlakyCounter::stuck();
    let start = Instant::now();

    let result = backoff
        .retry(|| {
            let counter = &counter;
            async move { counter.count().await.map(|_| ()) }
        })
        .await;

    if let Err(err) = result {
        println!("Session ended after {:?}: {}", start.elapsed(), err);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    example_happy_path().await?;
    example_attempts_exhausted().await;
    example_interval_exceeded().await;

    Ok(())
}
