use crate::error::{DialerError, DialerResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dialable contact from an ingested lead list. Immutable after validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub first_name: String,
    pub last_name: String,
    /// 11-digit numeric string, e.g. `15551234567`.
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// One dialable work item: a lead bound to the outbound DID that calls it.
/// Entries are created in bulk by the queue builder and mutated only by the
/// dialer engine; they are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: Uuid,
    pub lead_phone: String,
    pub did: String,
    /// Attempts completed so far. Never exceeds `max_attempts`.
    pub attempt: u32,
    /// Copied from the campaign policy when the queue is built.
    pub max_attempts: u32,
    pub status: EntryStatus,
    pub disposition: Option<String>,
    pub last_attempt_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub recording_url: Option<String>,
}

impl QueueEntry {
    /// Fresh entry for one lead, ready for its first attempt.
    pub fn new(lead_phone: impl Into<String>, did: impl Into<String>, max_attempts: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            lead_phone: lead_phone.into(),
            did: did.into(),
            attempt: 0,
            max_attempts,
            status: EntryStatus::Queued,
            disposition: None,
            last_attempt_time: None,
            notes: None,
            recording_url: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Queued,
    InProgress,
    Completed,
    RetryPending,
    Exhausted,
}

impl EntryStatus {
    /// Terminal entries are finished for good; a campaign completes once
    /// every entry is terminal.
    pub fn is_terminal(self) -> bool {
        matches!(self, EntryStatus::Completed | EntryStatus::Exhausted)
    }

    /// Only waiting entries may be picked up by the dispatcher.
    pub fn is_dialable(self) -> bool {
        matches!(self, EntryStatus::Queued | EntryStatus::RetryPending)
    }
}

/// Campaign lifecycle state. Transitions are validated by the campaign
/// state machine; `Completed` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    Launched,
    Running,
    Completed,
}

impl CampaignStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, CampaignStatus::Completed)
    }
}

/// Operator-defined mapping from a classified call outcome to a follow-up
/// action. Dispositions are global settings shared by all campaigns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Disposition {
    /// Unique, case-sensitive.
    pub name: String,
    pub tags: Vec<String>,
    pub action: FollowUpAction,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpAction {
    SendToCrm,
    MarkDnc,
    LogOnly,
    AddToRetryQueue,
    Custom,
}

impl FollowUpAction {
    /// Operator-facing label, as shown in the disposition manager.
    pub fn label(self) -> &'static str {
        match self {
            FollowUpAction::SendToCrm => "Send to CRM",
            FollowUpAction::MarkDnc => "Mark DNC",
            FollowUpAction::LogOnly => "Log Only",
            FollowUpAction::AddToRetryQueue => "Add to Retry Queue",
            FollowUpAction::Custom => "Custom",
        }
    }

    /// Parse an operator-facing label. The action set is fixed; anything
    /// outside it is rejected.
    pub fn from_label(label: &str) -> DialerResult<Self> {
        match label {
            "Send to CRM" => Ok(FollowUpAction::SendToCrm),
            "Mark DNC" => Ok(FollowUpAction::MarkDnc),
            "Log Only" => Ok(FollowUpAction::LogOnly),
            "Add to Retry Queue" => Ok(FollowUpAction::AddToRetryQueue),
            "Custom" => Ok(FollowUpAction::Custom),
            other => Err(DialerError::InvalidAction(other.to_string())),
        }
    }

    /// Every action except a retry finishes the entry.
    pub fn is_terminal(self) -> bool {
        !matches!(self, FollowUpAction::AddToRetryQueue)
    }
}

/// Activity event emitted by the engine for dashboards and audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialerEvent {
    pub event_id: Uuid,
    pub event_type: EventType,
    pub campaign_id: Uuid,
    pub lead_phone: Option<String>,
    pub did: Option<String>,
    pub disposition: Option<String>,
    pub attempt: Option<u32>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    CampaignCreated,
    CampaignScheduled,
    CampaignLaunched,
    CampaignRunning,
    CampaignCompleted,
    EntryDispatched,
    AttemptRecorded,
    RetryScheduled,
    EntryExhausted,
}
