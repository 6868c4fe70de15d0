//! Quiet hours: blocks dialing during the campaign's do-not-call window.

use chrono::{DateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A daily do-not-call window, evaluated on the campaign timezone's wall
/// clock. `start > end` wraps past midnight (22:00 to 06:00 covers late
/// evening and early morning); `start == end` disables the window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuietHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl QuietHours {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Whether the instant falls inside the window on `tz`'s wall clock.
    pub fn contains(&self, now: DateTime<Utc>, tz: Tz) -> bool {
        self.contains_local(now.with_timezone(&tz).time())
    }

    /// Window test on an already-localized time of day. The end bound is
    /// exclusive, so a window may end exactly at the next one's start.
    pub fn contains_local(&self, t: NaiveTime) -> bool {
        if self.start <= self.end {
            t >= self.start && t < self.end
        } else {
            t >= self.start || t < self.end
        }
    }
}
