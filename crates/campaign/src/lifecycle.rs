//! Campaign lifecycle transitions.
//!
//! Every status change goes through [`advance`], which is the single
//! source of truth for which moves are legal. Callers keep an audit
//! trail of [`StatusChange`] records alongside the campaign.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use outdial_core::types::CampaignStatus;
use outdial_core::{DialerError, DialerResult};

/// Actions an operator or the engine can take on a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignAction {
    /// Draft -> Scheduled
    Schedule,
    /// Draft -> Launched
    Launch,
    /// Scheduled | Launched -> Running
    PromoteToRunning,
    /// Running -> Completed
    Complete,
}

/// One recorded lifecycle transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    pub from: CampaignStatus,
    pub to: CampaignStatus,
    pub action: CampaignAction,
    pub at: DateTime<Utc>,
}

/// Apply `action` to a campaign in status `current`, returning the new
/// status or a [`DialerError::IllegalTransition`] naming both ends.
pub fn advance(current: CampaignStatus, action: CampaignAction) -> DialerResult<CampaignStatus> {
    match (current, action) {
        (CampaignStatus::Draft, CampaignAction::Schedule) => Ok(CampaignStatus::Scheduled),
        (CampaignStatus::Draft, CampaignAction::Launch) => Ok(CampaignStatus::Launched),
        (CampaignStatus::Scheduled, CampaignAction::PromoteToRunning) => Ok(CampaignStatus::Running),
        (CampaignStatus::Launched, CampaignAction::PromoteToRunning) => Ok(CampaignStatus::Running),
        (CampaignStatus::Running, CampaignAction::Complete) => Ok(CampaignStatus::Completed),
        (from, _) => Err(DialerError::IllegalTransition {
            from,
            to: target_of(action),
        }),
    }
}

fn target_of(action: CampaignAction) -> CampaignStatus {
    match action {
        CampaignAction::Schedule => CampaignStatus::Scheduled,
        CampaignAction::Launch => CampaignStatus::Launched,
        CampaignAction::PromoteToRunning => CampaignStatus::Running,
        CampaignAction::Complete => CampaignStatus::Completed,
    }
}
