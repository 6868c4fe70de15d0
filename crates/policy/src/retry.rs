//! Retry tiers: how long a lead rests between repeat attempts.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Two-tier retry spacing. The wait after the first attempt is
/// `tier1_minutes`; the wait after every later attempt is `tier2_minutes`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetryTiers {
    pub tier1_minutes: u32,
    pub tier2_minutes: u32,
}

impl RetryTiers {
    pub fn new(tier1_minutes: u32, tier2_minutes: u32) -> Self {
        Self {
            tier1_minutes,
            tier2_minutes,
        }
    }

    /// Required wait before the next attempt, given how many attempts have
    /// already completed. Nothing to wait for before the first attempt.
    pub fn delay_after(&self, attempts_completed: u32) -> Duration {
        match attempts_completed {
            0 => Duration::zero(),
            1 => Duration::minutes(i64::from(self.tier1_minutes)),
            _ => Duration::minutes(i64::from(self.tier2_minutes)),
        }
    }
}

impl Default for RetryTiers {
    fn default() -> Self {
        Self {
            tier1_minutes: 15,
            tier2_minutes: 60,
        }
    }
}
