//! Per-session attempt bookkeeping.

/// Counts the attempts made in the current retry session.
///
/// Starts at zero. [`advance`](Self::advance) is called once at the top of
/// every iteration, so the value is the 1-indexed number of the attempt
/// about to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttemptCounter {
    current: u32,
}

impl AttemptCounter {
    /// A counter at zero.
    pub const fn new() -> Self {
        Self { current: 0 }
    }

    /// Attempts made so far.
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Record a new attempt and return its number. Saturates at `u32::MAX`.
    pub fn advance(&mut self) -> u32 {
        self.current = self.current.saturating_add(1);
        self.current
    }

    /// Back to zero.
    pub fn reset(&mut self) {
        self.current = 0;
    }
}
