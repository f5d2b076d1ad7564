//! Per-session request budget.
//!
//! [`RequestGate`] tracks how many question/answer round-trips a session
//! has performed against a fixed ceiling. Once the ceiling is reached,
//! further consume attempts are rejected without mutating state. There is
//! no replenishment: this is a per-session cap, not a calendar-day cap,
//! and it resets only by starting a new session.

use crate::error::AskError;

/// Default round-trip ceiling per session.
pub const DEFAULT_MAX_REQUESTS: u32 = 100;

/// Counter/ceiling pair bounding the number of accepted questions.
///
/// Owned by the session and mutated through `&mut self`; per-session
/// isolation is by ownership. A multi-session server holds one gate per
/// session.
#[derive(Debug, Clone)]
pub struct RequestGate {
    used: u32,
    ceiling: u32,
}

impl RequestGate {
    pub fn new(ceiling: u32) -> Self {
        Self { used: 0, ceiling }
    }

    /// Consume one request if the budget allows.
    ///
    /// Increments the counter and returns `Ok(())` while `used < ceiling`;
    /// otherwise returns [`AskError::QuotaExceeded`] and leaves the
    /// counter untouched.
    pub fn try_consume(&mut self) -> Result<(), AskError> {
        if self.used < self.ceiling {
            self.used += 1;
            Ok(())
        } else {
            Err(AskError::QuotaExceeded {
                used: self.used,
                ceiling: self.ceiling,
            })
        }
    }

    /// Requests consumed so far.
    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Round-trips still available in this session.
    pub fn remaining(&self) -> u32 {
        self.ceiling - self.used
    }
}

impl Default for RequestGate {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_until_ceiling() {
        let mut gate = RequestGate::new(3);
        for _ in 0..3 {
            assert!(gate.try_consume().is_ok());
        }
        assert_eq!(gate.used(), 3);
        assert_eq!(gate.remaining(), 0);
    }

    #[test]
    fn test_rejects_past_ceiling_without_mutation() {
        let mut gate = RequestGate::new(2);
        gate.try_consume().unwrap();
        gate.try_consume().unwrap();

        for _ in 0..5 {
            let err = gate.try_consume().unwrap_err();
            assert!(matches!(
                err,
                AskError::QuotaExceeded { used: 2, ceiling: 2 }
            ));
        }
        assert_eq!(gate.used(), 2);
    }

    #[test]
    fn test_default_ceiling() {
        let gate = RequestGate::default();
        assert_eq!(gate.ceiling(), DEFAULT_MAX_REQUESTS);
        assert_eq!(gate.remaining(), DEFAULT_MAX_REQUESTS);
    }

    #[test]
    fn test_zero_ceiling_rejects_immediately() {
        let mut gate = RequestGate::new(0);
        assert!(gate.try_consume().is_err());
    }
}
