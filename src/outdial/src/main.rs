//! Outdial: outbound call campaign queue engine.
//!
//! Builds a campaign from a lead CSV and a DID pool, launches or schedules
//! it, and can drive it to completion with the simulated dial worker.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Duration, Utc};
use clap::Parser;
use tracing::{error, info};

use outdial_campaign::DialerEngine;
use outdial_core::config::AppConfig;
use outdial_dispositions::DispositionRegistry;
use outdial_intake::records::normalize_header;
use outdial_intake::{extract_dids, extract_leads, validate_dids, validate_leads, RecordSet};
use outdial_policy::DialPolicy;
use outdial_simulator::FakeDialWorker;

#[derive(Parser, Debug)]
#[command(name = "outdial")]
#[command(about = "Outbound call campaign queue engine")]
#[command(version)]
struct Cli {
    /// Campaign name
    #[arg(long, default_value = "Untitled Campaign")]
    name: String,

    /// Lead list CSV (first_name,last_name,phone,address,city,state,zip)
    #[arg(long)]
    leads: Option<PathBuf>,

    /// DID pool file, one 11-digit number per line
    #[arg(long)]
    dids: Option<PathBuf>,

    /// Build the seeded demo campaign instead of reading files
    #[arg(long, default_value_t = false)]
    demo: bool,

    /// Schedule the launch this many minutes out instead of launching now
    #[arg(long)]
    schedule_in: Option<i64>,

    /// Drive the campaign to completion with the simulated worker
    #[arg(long, default_value_t = false)]
    simulate: bool,

    /// Max concurrent calls (overrides config)
    #[arg(long, env = "OUTDIAL__POLICY__MAX_CONCURRENT")]
    max_concurrent: Option<u32>,

    /// Seconds between call starts (overrides config)
    #[arg(long, env = "OUTDIAL__POLICY__PACING_SECS")]
    pacing_secs: Option<u32>,

    /// Attempt ceiling per lead (overrides config)
    #[arg(long, env = "OUTDIAL__POLICY__MAX_ATTEMPTS")]
    max_attempts: Option<u32>,

    /// Campaign timezone (overrides config)
    #[arg(long, env = "OUTDIAL__POLICY__TIMEZONE")]
    timezone: Option<String>,

    /// Simulator seed (overrides config)
    #[arg(long, env = "OUTDIAL__SIMULATOR__SEED")]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "outdial=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("Outdial starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(max_concurrent) = cli.max_concurrent {
        config.policy.max_concurrent = max_concurrent;
    }
    if let Some(pacing_secs) = cli.pacing_secs {
        config.policy.pacing_secs = pacing_secs;
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.policy.max_attempts = max_attempts;
    }
    if let Some(timezone) = cli.timezone.clone() {
        config.policy.timezone = timezone;
    }
    if let Some(seed) = cli.seed {
        config.simulator.seed = seed;
    }

    info!(
        max_concurrent = config.policy.max_concurrent,
        pacing_secs = config.policy.pacing_secs,
        max_attempts = config.policy.max_attempts,
        timezone = %config.policy.timezone,
        "Configuration loaded"
    );

    let registry = Arc::new(DispositionRegistry::with_defaults());
    let engine = DialerEngine::new(registry);

    let campaign = if cli.demo {
        engine.seed_demo_campaign()?
    } else {
        let (leads_path, dids_path) = match (&cli.leads, &cli.dids) {
            (Some(leads), Some(dids)) => (leads, dids),
            _ => {
                error!("--leads and --dids are required unless --demo is set");
                std::process::exit(2);
            }
        };

        let lead_records = RecordSet::from_csv_file(leads_path)?;
        let did_records = load_dids(dids_path)?;

        let mut errors = validate_leads(&lead_records);
        errors.extend(validate_dids(&did_records));
        if lead_records.is_empty() {
            errors.push("Lead list has no rows.".to_string());
        }
        if did_records.is_empty() {
            errors.push("DID pool has no rows.".to_string());
        }
        if !errors.is_empty() {
            for err in &errors {
                error!(%err, "Input rejected");
            }
            std::process::exit(1);
        }

        let leads = extract_leads(&lead_records);
        let dids = extract_dids(&did_records);
        let policy = DialPolicy::from_defaults(&config.policy)?;
        engine.create_campaign(cli.name.clone(), policy, leads, dids)?
    };

    let campaign_id = campaign.id;
    info!(
        campaign_id = %campaign_id,
        name = %campaign.name,
        entries = campaign.queue.len(),
        "Campaign created"
    );

    let now = Utc::now();
    let dial_from = match cli.schedule_in {
        Some(minutes) => {
            let launch_at = now + Duration::minutes(minutes);
            engine.schedule(&campaign_id, launch_at, campaign.policy.timezone, now)?;
            info!(campaign_id = %campaign_id, launch_at = %launch_at, "Launch scheduled");
            launch_at
        }
        None => {
            engine.launch(&campaign_id, now)?;
            info!(campaign_id = %campaign_id, "Campaign launched");
            now
        }
    };

    if cli.simulate {
        let wait = (dial_from - Utc::now()).to_std().unwrap_or_default();
        if !wait.is_zero() {
            info!(seconds = wait.as_secs(), "Waiting for scheduled launch");
            tokio::time::sleep(wait).await;
        }
        let start = Utc::now();
        engine.promote_to_running(&campaign_id, start)?;

        let mut worker = FakeDialWorker::new(engine.clone(), &config.simulator);
        let report = worker.run(&campaign_id, start)?;
        let progress = engine.progress(&campaign_id)?;
        info!(
            campaign_id = %campaign_id,
            attempts = report.attempts,
            ticks = report.ticks,
            completed = report.completed,
            reached = progress.completed,
            exhausted = progress.exhausted,
            "Simulation finished"
        );
    } else {
        info!(
            campaign_id = %campaign_id,
            "Campaign ready; promote to running when the dial window opens"
        );
    }

    Ok(())
}

/// DID pools arrive either as a bare one-per-line list or as a single
/// `did` column export. Sniff the first non-blank line.
fn load_dids(path: &Path) -> anyhow::Result<RecordSet> {
    let text = std::fs::read_to_string(path)?;
    let first = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let records = if normalize_header(first) == "did" {
        RecordSet::from_delimited(&text, ',')
    } else {
        RecordSet::from_lines("did", &text)
    };
    Ok(records)
}
