use anyhow::anyhow;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use uuid::Uuid;

use outdial_campaign::DialerEngine;
use outdial_core::config::SimulatorConfig;
use outdial_core::types::CampaignStatus;
use outdial_core::{DialerError, DialerResult};

/// Outcome summary of one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Loop iterations consumed, dialing or idle.
    pub ticks: u32,
    /// Attempts recorded against the campaign.
    pub attempts: u32,
    /// Whether the campaign reached Completed within the tick budget.
    pub completed: bool,
    /// Simulated clock when the run stopped.
    pub finished_at: DateTime<Utc>,
}

/// Stand-in for a real dial worker: claims entries through the engine the
/// way a dialer would and records dispositions drawn at random from the
/// registry. The RNG is seeded, so a given seed replays the same outcomes.
///
/// Time is simulated. Each recorded attempt completes after a random talk
/// duration; when nothing is dialable the clock steps forward by the
/// campaign's pacing interval. The tick budget bounds runs against
/// campaigns that can never finish (a permanent quiet window, say).
pub struct FakeDialWorker {
    engine: DialerEngine,
    rng: StdRng,
    max_ticks: u32,
}

impl FakeDialWorker {
    pub fn new(engine: DialerEngine, config: &SimulatorConfig) -> Self {
        Self {
            engine,
            rng: StdRng::seed_from_u64(config.seed),
            max_ticks: config.max_ticks,
        }
    }

    /// Drives the campaign from `start` until it completes or the tick
    /// budget runs out. The campaign must already be Running.
    pub fn run(
        &mut self,
        campaign_id: &Uuid,
        start: DateTime<Utc>,
    ) -> DialerResult<SimulationReport> {
        let campaign = self
            .engine
            .get_campaign(campaign_id)
            .ok_or(DialerError::CampaignNotFound(*campaign_id))?;
        if campaign.status != CampaignStatus::Running {
            return Err(anyhow!("campaign {} is not running", campaign_id).into());
        }

        let names: Vec<String> = self
            .engine
            .registry()
            .list()
            .into_iter()
            .map(|d| d.name)
            .collect();
        if names.is_empty() {
            return Err(anyhow!("disposition registry is empty").into());
        }

        let pacing = i64::from(campaign.policy.pacing_secs.max(1));
        info!(
            campaign_id = %campaign_id,
            entries = campaign.queue.len(),
            max_ticks = self.max_ticks,
            "Starting simulated dial run"
        );

        let mut now = start;
        let mut ticks = 0u32;
        let mut attempts = 0u32;
        let mut completed = false;

        while ticks < self.max_ticks {
            ticks += 1;
            match self.engine.next_dispatchable_entry(campaign_id, now)? {
                Some(entry) => {
                    let name = &names[self.rng.gen_range(0..names.len())];
                    let talk_secs = self.rng.gen_range(15..=120);
                    let completed_at = now + Duration::seconds(talk_secs);
                    self.engine
                        .record_attempt_result(campaign_id, &entry.id, name, completed_at)?;
                    attempts += 1;
                    debug!(
                        tick = ticks,
                        lead = %entry.lead_phone,
                        disposition = %name,
                        "Simulated attempt"
                    );
                    now = completed_at;
                }
                None => {
                    now += Duration::seconds(pacing);
                }
            }

            let status = self
                .engine
                .get_campaign(campaign_id)
                .map(|c| c.status)
                .ok_or(DialerError::CampaignNotFound(*campaign_id))?;
            if status.is_terminal() {
                completed = true;
                break;
            }
        }

        info!(
            campaign_id = %campaign_id,
            ticks,
            attempts,
            completed,
            "Simulated dial run finished"
        );
        Ok(SimulationReport {
            ticks,
            attempts,
            completed,
            finished_at: now,
        })
    }
}
