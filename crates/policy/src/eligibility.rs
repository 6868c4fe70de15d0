//! Entry eligibility: the per-entry half of the dispatch decision.
//!
//! Everything the entry and the wall clock can answer is judged here;
//! concurrency and pacing belong to the [`crate::DispatchGate`], which the
//! engine consults in the same breath as this predicate.

use chrono::{DateTime, Datelike, Utc};
use outdial_core::types::QueueEntry;

use crate::DialPolicy;

/// Whether `entry` may be dialed at `now` under `policy`. Checks status,
/// attempt ceiling, allowed days, quiet hours, and retry spacing, in the
/// policy's timezone.
pub fn is_dispatchable(entry: &QueueEntry, policy: &DialPolicy, now: DateTime<Utc>) -> bool {
    if !entry.status.is_dialable() {
        return false;
    }
    if entry.attempt >= entry.max_attempts {
        return false;
    }

    let local = now.with_timezone(&policy.timezone);
    if !policy.allows_weekday(local.weekday()) {
        return false;
    }
    if let Some(quiet) = policy.quiet_hours {
        if quiet.contains_local(local.time()) {
            return false;
        }
    }

    retry_delay_elapsed(entry, policy, now)
}

/// True once the tiered wait since the last attempt has passed. Entries
/// with no completed attempt have nothing to wait for.
pub fn retry_delay_elapsed(entry: &QueueEntry, policy: &DialPolicy, now: DateTime<Utc>) -> bool {
    if entry.attempt == 0 {
        return true;
    }
    match entry.last_attempt_time {
        Some(last) => now - last >= policy.retry.delay_after(entry.attempt),
        None => true,
    }
}
