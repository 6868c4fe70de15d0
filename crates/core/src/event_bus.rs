//! Event bus: trait for emitting dialer activity events from any module.
//!
//! The engine accepts an `Arc<dyn EventSink>` so campaign lifecycle and
//! per-attempt activity can be routed to dashboards or logs without
//! coupling to either.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::types::{DialerEvent, EventType};

/// Emits dialer events. Implementations route them to the operator
/// console, log files, or test capture buffers.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: DialerEvent);
}

/// Sink that drops every event; the engine default.
pub struct NoOpSink;

impl EventSink for NoOpSink {
    fn emit(&self, _event: DialerEvent) {}
}

/// In-memory sink that records every emitted event, for assertions in
/// tests and for the demo summary.
#[derive(Default)]
pub struct CaptureSink {
    captured: RwLock<Vec<DialerEvent>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far, in emission order.
    pub fn events(&self) -> Vec<DialerEvent> {
        self.captured.read().clone()
    }

    pub fn count(&self) -> usize {
        self.captured.read().len()
    }

    /// How many captured events have the given type.
    pub fn count_type(&self, event_type: EventType) -> usize {
        self.captured
            .read()
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }

    pub fn clear(&self) {
        self.captured.write().clear();
    }
}

impl EventSink for CaptureSink {
    fn emit(&self, event: DialerEvent) {
        self.captured.write().push(event);
    }
}

/// Build a [`DialerEvent`] stamped with a fresh id and the current time.
/// The dispatch-specific fields (`did`, `attempt`) start unset; callers
/// fill them where they are meaningful.
pub fn make_event(
    event_type: EventType,
    campaign_id: Uuid,
    lead_phone: Option<String>,
    disposition: Option<String>,
) -> DialerEvent {
    DialerEvent {
        event_id: Uuid::new_v4(),
        event_type,
        campaign_id,
        lead_phone,
        did: None,
        disposition,
        attempt: None,
        timestamp: Utc::now(),
    }
}

/// A shared no-op sink.
pub fn noop_sink() -> Arc<dyn EventSink> {
    Arc::new(NoOpSink)
}

/// A shared capturing sink, kept concretely typed so callers can read it
/// back after handing a clone to the engine.
pub fn capture_sink() -> Arc<CaptureSink> {
    Arc::new(CaptureSink::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_sink_records_in_order() {
        let sink = capture_sink();
        assert_eq!(sink.count(), 0);

        let campaign_id = Uuid::new_v4();
        sink.emit(make_event(EventType::CampaignCreated, campaign_id, None, None));
        sink.emit(make_event(
            EventType::AttemptRecorded,
            campaign_id,
            Some("15551234567".into()),
            Some("Qualified".into()),
        ));

        assert_eq!(sink.count(), 2);
        assert_eq!(sink.count_type(EventType::CampaignCreated), 1);
        assert_eq!(sink.count_type(EventType::AttemptRecorded), 1);
        assert_eq!(sink.count_type(EventType::CampaignCompleted), 0);

        let events = sink.events();
        assert_eq!(events[0].event_type, EventType::CampaignCreated);
        assert_eq!(events[0].campaign_id, campaign_id);
        assert_eq!(events[1].disposition.as_deref(), Some("Qualified"));
        assert!(events[1].did.is_none());

        sink.clear();
        assert_eq!(sink.count(), 0);
    }

    #[test]
    fn test_noop_sink_swallows_events() {
        let sink = noop_sink();
        sink.emit(make_event(EventType::CampaignCompleted, Uuid::new_v4(), None, None));
    }
}
