//! Session time budget - remaining time is computed on demand

use serde::Serialize;
use std::time::Duration;

/// Fixed time allowance for a session
///
/// Never reads the clock itself: the caller measures elapsed time and asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    budget: Duration,
}

impl Countdown {
    pub fn new(budget: Duration) -> Self {
        Self { budget }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    #[inline]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Time left, clamped at zero
    #[inline]
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.budget.saturating_sub(elapsed)
    }

    /// Whole seconds left, counting elapsed time in whole seconds
    ///
    /// Goes negative once the budget is overrun; saturates at the `i64` range.
    pub fn remaining_secs(&self, elapsed: Duration) -> i64 {
        let budget = i64::try_from(self.budget.as_secs()).unwrap_or(i64::MAX);
        let elapsed = i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX);
        budget.saturating_sub(elapsed)
    }

    #[inline]
    pub fn is_expired(&self, elapsed: Duration) -> bool {
        self.remaining_secs(elapsed) <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining() {
        let countdown = Countdown::from_secs(120);
        assert_eq!(countdown.remaining(Duration::from_secs(20)), Duration::from_secs(100));
        assert_eq!(countdown.remaining(Duration::from_secs(500)), Duration::ZERO);
    }

    #[test]
    fn test_remaining_secs_truncates_elapsed() {
        let countdown = Countdown::from_secs(120);
        assert_eq!(countdown.remaining_secs(Duration::from_millis(999)), 120);
        assert_eq!(countdown.remaining_secs(Duration::from_millis(1500)), 119);
        assert_eq!(countdown.remaining_secs(Duration::from_secs(130)), -10);
    }

    #[test]
    fn test_expiry_boundary() {
        let countdown = Countdown::from_secs(120);
        assert!(!countdown.is_expired(Duration::from_millis(119_999)));
        assert!(countdown.is_expired(Duration::from_secs(120)));
        assert!(countdown.is_expired(Duration::from_secs(121)));
    }

    #[test]
    fn test_huge_budget_does_not_wrap() {
        let countdown = Countdown::from_secs(u64::MAX);
        assert_eq!(countdown.remaining_secs(Duration::ZERO), i64::MAX);
        assert!(!countdown.is_expired(Duration::ZERO));

        let countdown = Countdown::from_secs(i64::MAX as u64);
        assert_eq!(countdown.remaining_secs(Duration::from_secs(1)), i64::MAX - 1);
        assert_eq!(Countdown::from_secs(5).remaining_secs(Duration::from_secs(u64::MAX)), 5 - i64::MAX);
    }
}
