use std::sync::Arc;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

use outdial_core::event_bus::{make_event, EventSink};
use outdial_core::types::{CampaignStatus, EntryStatus, EventType, Lead, QueueEntry};
use outdial_core::{DialerError, DialerResult};
use outdial_dispositions::DispositionRegistry;
use outdial_policy::{is_dispatchable, DialPolicy, DispatchGate};

use crate::lifecycle::{advance, CampaignAction, StatusChange};
use crate::models::{Campaign, CampaignProgress, ScheduledLaunch};
use crate::queue::build_queue;

/// Core dial engine: owns campaigns, their dispatch gates, and the
/// injected disposition registry.
#[derive(Clone)]
pub struct DialerEngine {
    campaigns: Arc<DashMap<Uuid, Campaign>>,
    gates: Arc<DashMap<Uuid, Arc<DispatchGate>>>,
    registry: Arc<DispositionRegistry>,
    event_sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for DialerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialerEngine")
            .field("campaigns", &self.campaigns.len())
            .field("dispositions", &self.registry.len())
            .finish()
    }
}

impl DialerEngine {
    /// Creates a new engine around the given disposition registry.
    pub fn new(registry: Arc<DispositionRegistry>) -> Self {
        Self {
            campaigns: Arc::new(DashMap::new()),
            gates: Arc::new(DashMap::new()),
            registry,
            event_sink: outdial_core::event_bus::noop_sink(),
        }
    }

    /// Attach an event sink for emitting dialer activity events.
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = sink;
        self
    }

    /// The disposition registry this engine records results against.
    pub fn registry(&self) -> &Arc<DispositionRegistry> {
        &self.registry
    }

    /// Validates the policy, builds the round-robin queue, and stores the
    /// campaign in Draft.
    pub fn create_campaign(
        &self,
        name: impl Into<String>,
        policy: DialPolicy,
        leads: Vec<Lead>,
        dids: Vec<String>,
    ) -> DialerResult<Campaign> {
        policy.validate()?;
        let queue = build_queue(&leads, &dids, policy.max_attempts)?;

        let id = Uuid::new_v4();
        let campaign = Campaign {
            id,
            name: name.into(),
            status: CampaignStatus::Draft,
            policy: policy.clone(),
            leads,
            dids,
            queue,
            scheduled_for: None,
            created_at: Utc::now(),
            history: Vec::new(),
        };

        info!(
            campaign_id = %id,
            name = %campaign.name,
            leads = campaign.leads.len(),
            dids = campaign.dids.len(),
            "Creating campaign"
        );
        metrics::counter!("dialer.campaigns_created").increment(1);
        self.event_sink
            .emit(make_event(EventType::CampaignCreated, id, None, None));

        self.gates.insert(id, Arc::new(DispatchGate::for_policy(&policy)));
        self.campaigns.insert(id, campaign.clone());
        Ok(campaign)
    }

    /// Returns a clone of the campaign with the given id, if it exists.
    pub fn get_campaign(&self, id: &Uuid) -> Option<Campaign> {
        self.campaigns.get(id).map(|r| r.clone())
    }

    /// Returns all campaigns, newest first.
    pub fn list_campaigns(&self) -> Vec<Campaign> {
        let mut campaigns: Vec<Campaign> =
            self.campaigns.iter().map(|r| r.value().clone()).collect();
        campaigns.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        campaigns
    }

    /// Draft -> Scheduled. `launch_at` must lie in the future relative to
    /// `now`; the pair is kept on the campaign for the external scheduler.
    pub fn schedule(
        &self,
        id: &Uuid,
        launch_at: DateTime<Utc>,
        timezone: Tz,
        now: DateTime<Utc>,
    ) -> DialerResult<Campaign> {
        if launch_at <= now {
            return Err(DialerError::Validation(vec![
                "scheduled launch must be in the future".to_string(),
            ]));
        }

        let mut campaign = self
            .campaigns
            .get_mut(id)
            .ok_or(DialerError::CampaignNotFound(*id))?;
        let from = campaign.status;
        let next = advance(from, CampaignAction::Schedule)?;
        campaign.history.push(StatusChange {
            from,
            to: next,
            action: CampaignAction::Schedule,
            at: now,
        });
        campaign.status = next;
        campaign.scheduled_for = Some(ScheduledLaunch { launch_at, timezone });

        info!(campaign_id = %id, launch_at = %launch_at, timezone = %timezone, "Campaign scheduled");
        self.event_sink
            .emit(make_event(EventType::CampaignScheduled, *id, None, None));
        Ok(campaign.clone())
    }

    /// Draft -> Launched.
    pub fn launch(&self, id: &Uuid, now: DateTime<Utc>) -> DialerResult<Campaign> {
        let mut campaign = self
            .campaigns
            .get_mut(id)
            .ok_or(DialerError::CampaignNotFound(*id))?;
        let from = campaign.status;
        let next = advance(from, CampaignAction::Launch)?;
        campaign.history.push(StatusChange {
            from,
            to: next,
            action: CampaignAction::Launch,
            at: now,
        });
        campaign.status = next;

        info!(campaign_id = %id, name = %campaign.name, "Campaign launched");
        self.event_sink
            .emit(make_event(EventType::CampaignLaunched, *id, None, None));
        Ok(campaign.clone())
    }

    /// Scheduled | Launched -> Running. Dispatch only happens in Running.
    pub fn promote_to_running(&self, id: &Uuid, now: DateTime<Utc>) -> DialerResult<Campaign> {
        let mut campaign = self
            .campaigns
            .get_mut(id)
            .ok_or(DialerError::CampaignNotFound(*id))?;
        let from = campaign.status;
        let next = advance(from, CampaignAction::PromoteToRunning)?;
        campaign.history.push(StatusChange {
            from,
            to: next,
            action: CampaignAction::PromoteToRunning,
            at: now,
        });
        campaign.status = next;

        info!(campaign_id = %id, name = %campaign.name, "Campaign running");
        self.event_sink
            .emit(make_event(EventType::CampaignRunning, *id, None, None));
        Ok(campaign.clone())
    }

    /// Claims the next dispatchable queue entry, if any.
    ///
    /// Scans in insertion order and returns the first entry that passes the
    /// policy checks AND wins gate acquisition, marked InProgress before the
    /// map reference is released. The gate is campaign-wide, so a failed
    /// acquisition ends the scan: later entries cannot dial either.
    pub fn next_dispatchable_entry(
        &self,
        id: &Uuid,
        now: DateTime<Utc>,
    ) -> DialerResult<Option<QueueEntry>> {
        let gate = self
            .gates
            .get(id)
            .map(|g| g.value().clone())
            .ok_or(DialerError::CampaignNotFound(*id))?;
        let mut campaign = self
            .campaigns
            .get_mut(id)
            .ok_or(DialerError::CampaignNotFound(*id))?;

        if campaign.status != CampaignStatus::Running {
            return Ok(None);
        }

        let policy = campaign.policy.clone();
        for entry in campaign.queue.iter_mut() {
            if !is_dispatchable(entry, &policy, now) {
                continue;
            }
            if !gate.try_acquire(now) {
                return Ok(None);
            }
            entry.status = EntryStatus::InProgress;
            let snapshot = entry.clone();

            info!(
                campaign_id = %id,
                lead = %snapshot.lead_phone,
                did = %snapshot.did,
                attempt = snapshot.attempt + 1,
                "Dispatching entry"
            );
            metrics::counter!("dialer.dispatched").increment(1);
            let mut event = make_event(
                EventType::EntryDispatched,
                *id,
                Some(snapshot.lead_phone.clone()),
                None,
            );
            event.did = Some(snapshot.did.clone());
            self.event_sink.emit(event);

            return Ok(Some(snapshot));
        }
        Ok(None)
    }

    /// Records the outcome of a dispatched attempt.
    ///
    /// The disposition is looked up in the injected registry; its follow-up
    /// action decides whether the entry is done (`Completed`), retried
    /// (`RetryPending`), or out of attempts (`Exhausted`). Releases the
    /// dispatch gate and completes the campaign once every entry is terminal.
    pub fn record_attempt_result(
        &self,
        id: &Uuid,
        entry_id: &Uuid,
        disposition_name: &str,
        completed_at: DateTime<Utc>,
    ) -> DialerResult<QueueEntry> {
        let disposition = self
            .registry
            .get(disposition_name)
            .ok_or_else(|| DialerError::DispositionNotFound(disposition_name.to_string()))?;
        let gate = self
            .gates
            .get(id)
            .map(|g| g.value().clone())
            .ok_or(DialerError::CampaignNotFound(*id))?;
        let mut campaign = self
            .campaigns
            .get_mut(id)
            .ok_or(DialerError::CampaignNotFound(*id))?;

        let entry = campaign
            .queue
            .iter_mut()
            .find(|e| e.id == *entry_id)
            .ok_or(DialerError::EntryNotFound(*entry_id))?;
        if entry.status != EntryStatus::InProgress {
            return Err(anyhow!("entry {} is not awaiting a result", entry_id).into());
        }

        entry.attempt += 1;
        entry.last_attempt_time = Some(completed_at);
        entry.disposition = Some(disposition.name.clone());
        entry.status = if disposition.action.is_terminal() {
            EntryStatus::Completed
        } else if entry.attempt >= entry.max_attempts {
            EntryStatus::Exhausted
        } else {
            EntryStatus::RetryPending
        };
        let updated = entry.clone();
        gate.release();

        info!(
            campaign_id = %id,
            lead = %updated.lead_phone,
            disposition = %disposition.name,
            attempt = updated.attempt,
            status = ?updated.status,
            "Attempt recorded"
        );
        metrics::counter!("dialer.attempts").increment(1);
        if updated.status == EntryStatus::Exhausted {
            metrics::counter!("dialer.exhausted").increment(1);
        }

        let event_type = match updated.status {
            EntryStatus::RetryPending => EventType::RetryScheduled,
            EntryStatus::Exhausted => EventType::EntryExhausted,
            _ => EventType::AttemptRecorded,
        };
        let mut event = make_event(
            event_type,
            *id,
            Some(updated.lead_phone.clone()),
            updated.disposition.clone(),
        );
        event.attempt = Some(updated.attempt);
        self.event_sink.emit(event);

        // Completion is checked after every recorded result, never polled.
        if campaign.status == CampaignStatus::Running && campaign.progress().all_terminal() {
            let from = campaign.status;
            let next = advance(from, CampaignAction::Complete)?;
            campaign.history.push(StatusChange {
                from,
                to: next,
                action: CampaignAction::Complete,
                at: completed_at,
            });
            campaign.status = next;
            info!(campaign_id = %id, "All queue entries terminal; campaign completed");
            self.event_sink
                .emit(make_event(EventType::CampaignCompleted, *id, None, None));
        }

        Ok(updated)
    }

    /// Per-status entry counts for the given campaign.
    pub fn progress(&self, id: &Uuid) -> DialerResult<CampaignProgress> {
        let campaign = self
            .campaigns
            .get(id)
            .ok_or(DialerError::CampaignNotFound(*id))?;
        Ok(campaign.progress())
    }

    /// Seeds a small Draft campaign for development and demos.
    pub fn seed_demo_campaign(&self) -> DialerResult<Campaign> {
        info!("Seeding demo campaign");

        let leads = vec![
            demo_lead("Maria", "Gonzalez", "15125550141", "901 Barton Springs Rd", "78704"),
            demo_lead("James", "Whitfield", "15125550172", "2200 S Lamar Blvd", "78704"),
            demo_lead("Priya", "Natarajan", "15125550108", "4700 Burnet Rd", "78756"),
            demo_lead("Derek", "Olsen", "15125550196", "1600 E 6th St", "78702"),
            demo_lead("Hannah", "Brooks", "15125550133", "7801 N Lamar Blvd", "78752"),
        ];
        let dids = vec![
            "15551234567".to_string(),
            "15552345678".to_string(),
            "15553456789".to_string(),
        ];

        self.create_campaign("Austin Pressure Washing", DialPolicy::default(), leads, dids)
    }
}

fn demo_lead(first: &str, last: &str, phone: &str, address: &str, zip: &str) -> Lead {
    Lead {
        first_name: first.to_string(),
        last_name: last.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
        city: "Austin".to_string(),
        state: "TX".to_string(),
        zip: zip.to_string(),
    }
}
