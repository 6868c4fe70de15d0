//! Dispatch gate: campaign-scoped concurrency and pacing control.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use crate::DialPolicy;

/// Live dispatch state for one campaign. The in-flight count and the
/// pacing stamp change together under one lock, so a dispatch decision
/// never observes half of an update.
#[derive(Debug)]
pub struct DispatchGate {
    max_concurrent: u32,
    pacing: Duration,
    state: Mutex<GateState>,
}

#[derive(Debug)]
struct GateState {
    in_progress: u32,
    last_dispatch: Option<DateTime<Utc>>,
}

impl DispatchGate {
    pub fn new(max_concurrent: u32, pacing_secs: u32) -> Self {
        Self {
            max_concurrent,
            pacing: Duration::seconds(i64::from(pacing_secs)),
            state: Mutex::new(GateState {
                in_progress: 0,
                last_dispatch: None,
            }),
        }
    }

    pub fn for_policy(policy: &DialPolicy) -> Self {
        Self::new(policy.max_concurrent, policy.pacing_secs)
    }

    /// Claim a dispatch slot at `now`. Fails when the campaign is at its
    /// concurrency ceiling or a call started less than one pacing interval
    /// ago. On success the slot is held and the pacing clock restarts.
    pub fn try_acquire(&self, now: DateTime<Utc>) -> bool {
        let mut state = self.state.lock();
        if state.in_progress >= self.max_concurrent {
            return false;
        }
        if let Some(last) = state.last_dispatch {
            if now - last < self.pacing {
                return false;
            }
        }
        state.in_progress += 1;
        state.last_dispatch = Some(now);
        true
    }

    /// Give a slot back once the call finishes.
    pub fn release(&self) {
        let mut state = self.state.lock();
        state.in_progress = state.in_progress.saturating_sub(1);
    }

    pub fn in_progress(&self) -> u32 {
        self.state.lock().in_progress
    }
}
