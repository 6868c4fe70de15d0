//! Campaign queue engine: round-robin queue building, the campaign
//! lifecycle state machine, and the dialer engine that drives entries
//! through attempts under policy.

pub mod engine;
pub mod lifecycle;
pub mod models;
pub mod queue;

pub use engine::DialerEngine;
pub use lifecycle::{advance, CampaignAction, StatusChange};
pub use models::{Campaign, CampaignProgress, ScheduledLaunch};
pub use queue::build_queue;
