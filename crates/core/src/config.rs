use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `OUTDIAL__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub policy: PolicyDefaults,
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

/// Default campaign rules applied when the operator does not override them.
/// Values mirror the campaign builder defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyDefaults {
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: u32,
    #[serde(default = "default_pacing_secs")]
    pub pacing_secs: u32,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_retry_tier1_minutes")]
    pub retry_tier1_minutes: u32,
    #[serde(default = "default_retry_tier2_minutes")]
    pub retry_tier2_minutes: u32,
    /// Full weekday names, lowercase.
    #[serde(default = "default_allowed_days")]
    pub allowed_days: Vec<String>,
    /// `HH:MM`; both unset disables quiet hours.
    #[serde(default)]
    pub quiet_start: Option<String>,
    #[serde(default)]
    pub quiet_end: Option<String>,
    /// IANA timezone identifier for quiet hours and allowed days.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulatorConfig {
    #[serde(default = "default_sim_seed")]
    pub seed: u64,
    /// Hard cap on dispatch loop iterations per run.
    #[serde(default = "default_sim_max_ticks")]
    pub max_ticks: u32,
}

// Default functions
fn default_max_concurrent() -> u32 {
    5
}
fn default_pacing_secs() -> u32 {
    5
}
fn default_max_attempts() -> u32 {
    3
}
fn default_retry_tier1_minutes() -> u32 {
    15
}
fn default_retry_tier2_minutes() -> u32 {
    60
}
fn default_allowed_days() -> Vec<String> {
    [
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
    ]
    .map(String::from)
    .to_vec()
}
fn default_timezone() -> String {
    "US/Central".to_string()
}
fn default_sim_seed() -> u64 {
    42
}
fn default_sim_max_ticks() -> u32 {
    10_000
}

impl Default for PolicyDefaults {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            pacing_secs: default_pacing_secs(),
            max_attempts: default_max_attempts(),
            retry_tier1_minutes: default_retry_tier1_minutes(),
            retry_tier2_minutes: default_retry_tier2_minutes(),
            allowed_days: default_allowed_days(),
            quiet_start: None,
            quiet_end: None,
            timezone: default_timezone(),
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: default_sim_seed(),
            max_ticks: default_sim_max_ticks(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            policy: PolicyDefaults::default(),
            simulator: SimulatorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("OUTDIAL")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_builder_form() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.policy.max_concurrent, 5);
        assert_eq!(cfg.policy.pacing_secs, 5);
        assert_eq!(cfg.policy.max_attempts, 3);
        assert_eq!(cfg.policy.retry_tier1_minutes, 15);
        assert_eq!(cfg.policy.retry_tier2_minutes, 60);
        assert_eq!(cfg.policy.allowed_days.len(), 7);
        assert_eq!(cfg.policy.timezone, "US/Central");
        assert!(cfg.policy.quiet_start.is_none());
        assert!(cfg.policy.quiet_end.is_none());
    }
}
