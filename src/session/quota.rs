//! Bounded-usage guard for the demo quote flow

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Free demo quotes allowed per session
pub const DEMO_QUOTE_LIMIT: u32 = 5;

/// Whether the session can still produce quotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotaState {
    Available,
    Exhausted,
}

/// Refusal emitted when a consume is attempted past the limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("demo limit reached: {limit} quotes used in this session")]
pub struct QuotaExhausted {
    /// The session's quote limit
    pub limit: u32,
}

/// Counts demo quotes produced in the current session
///
/// The count only ever moves forward; it is capped at the limit and is
/// reset solely by starting a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaGuard {
    used: u32,
    limit: u32,
}

impl Default for QuotaGuard {
    fn default() -> Self {
        Self::new(DEMO_QUOTE_LIMIT)
    }
}

impl QuotaGuard {
    /// Create a fresh guard with the given limit
    pub fn new(limit: u32) -> Self {
        Self { used: 0, limit }
    }

    /// Quotes produced so far
    pub fn used(&self) -> u32 {
        self.used
    }

    /// The session's quote limit
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Quotes left before the limit
    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used)
    }

    /// Current state
    pub fn state(&self) -> QuotaState {
        if self.used >= self.limit {
            QuotaState::Exhausted
        } else {
            QuotaState::Available
        }
    }

    /// Spend one quote from the quota
    ///
    /// Increments the count while available; refuses without any state
    /// change once the limit is reached.
    pub fn try_consume(&mut self) -> Result<(), QuotaExhausted> {
        match self.state() {
            QuotaState::Available => {
                self.used += 1;
                Ok(())
            }
            QuotaState::Exhausted => Err(QuotaExhausted { limit: self.limit }),
        }
    }

    /// Clamp a deserialized count back into range
    ///
    /// A hand-edited session file must not make `used` exceed the limit.
    pub fn normalized(self) -> Self {
        Self {
            used: self.used.min(self.limit),
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_guard_is_available() {
        let guard = QuotaGuard::default();
        assert_eq!(guard.state(), QuotaState::Available);
        assert_eq!(guard.used(), 0);
        assert_eq!(guard.remaining(), DEMO_QUOTE_LIMIT);
    }

    #[test]
    fn test_consume_increments_until_limit() {
        let mut guard = QuotaGuard::default();
        for expected_used in 1..=DEMO_QUOTE_LIMIT {
            guard.try_consume().unwrap();
            assert_eq!(guard.used(), expected_used);
        }
        assert_eq!(guard.state(), QuotaState::Exhausted);
    }

    #[test]
    fn test_final_consume_transitions_to_exhausted() {
        let mut guard = QuotaGuard::new(2);
        guard.try_consume().unwrap();
        assert_eq!(guard.state(), QuotaState::Available);
        guard.try_consume().unwrap();
        assert_eq!(guard.state(), QuotaState::Exhausted);
    }

    #[test]
    fn test_sixth_consume_is_refused_without_state_change() {
        let mut guard = QuotaGuard::default();
        for _ in 0..DEMO_QUOTE_LIMIT {
            guard.try_consume().unwrap();
        }

        let refusal = guard.try_consume().unwrap_err();
        assert_eq!(refusal.limit, DEMO_QUOTE_LIMIT);
        assert_eq!(guard.used(), DEMO_QUOTE_LIMIT);
        assert_eq!(guard.remaining(), 0);

        // Repeated refusals never push the count past the limit
        assert!(guard.try_consume().is_err());
        assert_eq!(guard.used(), DEMO_QUOTE_LIMIT);
    }

    #[test]
    fn test_normalized_clamps_tampered_count() {
        let tampered: QuotaGuard = serde_yml::from_str("used: 99\nlimit: 5\n").unwrap();
        let guard = tampered.normalized();
        assert_eq!(guard.used(), 5);
        assert_eq!(guard.state(), QuotaState::Exhausted);
        assert_eq!(guard.remaining(), 0);
    }
}
