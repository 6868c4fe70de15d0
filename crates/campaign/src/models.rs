//! Campaign records held by the engine.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use outdial_core::types::{CampaignStatus, EntryStatus, Lead, QueueEntry};
use outdial_policy::DialPolicy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lifecycle::StatusChange;

/// A configured outbound campaign with its dial queue. Owned by the
/// engine; callers work with snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub status: CampaignStatus,
    pub policy: DialPolicy,
    /// Validated leads, in ingest order.
    pub leads: Vec<Lead>,
    /// Outbound caller IDs, shared read-only by every entry.
    pub dids: Vec<String>,
    /// Queue in lead order; dispatch scans it front to back.
    pub queue: Vec<QueueEntry>,
    pub scheduled_for: Option<ScheduledLaunch>,
    pub created_at: DateTime<Utc>,
    /// Ordered record of every applied status transition.
    pub history: Vec<StatusChange>,
}

/// When a scheduled campaign should go live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledLaunch {
    pub launch_at: DateTime<Utc>,
    /// Zone the operator picked the timestamp in, kept for display.
    pub timezone: Tz,
}

/// Point-in-time queue counts for one campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignProgress {
    pub total: usize,
    pub queued: usize,
    pub in_progress: usize,
    pub retry_pending: usize,
    pub completed: usize,
    pub exhausted: usize,
}

impl CampaignProgress {
    pub fn all_terminal(&self) -> bool {
        self.completed + self.exhausted == self.total
    }
}

impl Campaign {
    /// Tally the queue by entry status.
    pub fn progress(&self) -> CampaignProgress {
        let mut progress = CampaignProgress {
            total: self.queue.len(),
            queued: 0,
            in_progress: 0,
            retry_pending: 0,
            completed: 0,
            exhausted: 0,
        };
        for entry in &self.queue {
            match entry.status {
                EntryStatus::Queued => progress.queued += 1,
                EntryStatus::InProgress => progress.in_progress += 1,
                EntryStatus::RetryPending => progress.retry_pending += 1,
                EntryStatus::Completed => progress.completed += 1,
                EntryStatus::Exhausted => progress.exhausted += 1,
            }
        }
        progress
    }
}
