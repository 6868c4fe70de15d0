//! The dial policy attached to every campaign.

use chrono::{NaiveTime, Weekday};
use chrono_tz::Tz;
use outdial_core::config::PolicyDefaults;
use outdial_core::{DialerError, DialerResult};
use serde::{Deserialize, Serialize};

use crate::{QuietHours, RetryTiers};

/// Campaign dialing rules: concurrency ceiling, pacing between call
/// starts, attempt ceiling, retry spacing, and the calling window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialPolicy {
    pub max_concurrent: u32,
    /// Minimum seconds between call starts across the whole campaign.
    pub pacing_secs: u32,
    pub max_attempts: u32,
    pub retry: RetryTiers,
    pub allowed_days: Vec<Weekday>,
    pub quiet_hours: Option<QuietHours>,
    /// Zone for quiet-hours and allowed-day evaluation.
    pub timezone: Tz,
}

impl DialPolicy {
    /// Check the policy invariants. Campaigns refuse a policy that fails
    /// here, so the dispatch path never re-checks them.
    pub fn validate(&self) -> DialerResult<()> {
        if self.max_attempts == 0 {
            return Err(DialerError::InvalidPolicy(
                "max_attempts must be at least 1".into(),
            ));
        }
        if self.max_concurrent == 0 {
            return Err(DialerError::InvalidPolicy(
                "max_concurrent must be at least 1".into(),
            ));
        }
        if self.pacing_secs == 0 {
            return Err(DialerError::InvalidPolicy(
                "pacing_secs must be at least 1".into(),
            ));
        }
        if self.allowed_days.is_empty() {
            return Err(DialerError::InvalidPolicy(
                "allowed_days must not be empty".into(),
            ));
        }
        if self.retry.tier2_minutes < self.retry.tier1_minutes {
            return Err(DialerError::InvalidPolicy(format!(
                "retry tier 2 ({} min) must be at least retry tier 1 ({} min)",
                self.retry.tier2_minutes, self.retry.tier1_minutes
            )));
        }
        Ok(())
    }

    pub fn allows_weekday(&self, day: Weekday) -> bool {
        self.allowed_days.contains(&day)
    }

    /// Build and validate a policy from the configured defaults.
    pub fn from_defaults(defaults: &PolicyDefaults) -> DialerResult<Self> {
        let timezone: Tz = defaults
            .timezone
            .parse()
            .map_err(|_| DialerError::Config(format!("invalid timezone: {:?}", defaults.timezone)))?;

        let allowed_days = defaults
            .allowed_days
            .iter()
            .map(|raw| {
                raw.parse::<Weekday>()
                    .map_err(|_| DialerError::Config(format!("invalid weekday: {raw:?}")))
            })
            .collect::<DialerResult<Vec<_>>>()?;

        let quiet_hours = match (&defaults.quiet_start, &defaults.quiet_end) {
            (Some(start), Some(end)) => Some(QuietHours::new(
                parse_time_of_day(start)?,
                parse_time_of_day(end)?,
            )),
            (None, None) => None,
            _ => {
                return Err(DialerError::Config(
                    "quiet_start and quiet_end must be set together".into(),
                ))
            }
        };

        let policy = Self {
            max_concurrent: defaults.max_concurrent,
            pacing_secs: defaults.pacing_secs,
            max_attempts: defaults.max_attempts,
            retry: RetryTiers::new(defaults.retry_tier1_minutes, defaults.retry_tier2_minutes),
            allowed_days,
            quiet_hours,
            timezone,
        };
        policy.validate()?;
        Ok(policy)
    }
}

impl Default for DialPolicy {
    fn default() -> Self {
        Self {
            max_concurrent: 5,
            pacing_secs: 5,
            max_attempts: 3,
            retry: RetryTiers::default(),
            allowed_days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ],
            quiet_hours: None,
            timezone: chrono_tz::US::Central,
        }
    }
}

fn parse_time_of_day(raw: &str) -> DialerResult<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| DialerError::Config(format!("invalid time of day: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        assert!(DialPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_retry_tiers_rejected() {
        let policy = DialPolicy {
            retry: RetryTiers::new(60, 15),
            ..DialPolicy::default()
        };
        let err = policy.validate().unwrap_err();
        assert!(matches!(err, DialerError::InvalidPolicy(_)));
    }

    #[test]
    fn test_equal_retry_tiers_accepted() {
        let policy = DialPolicy {
            retry: RetryTiers::new(30, 30),
            ..DialPolicy::default()
        };
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_zero_floors_rejected() {
        for mutate in [
            (|p: &mut DialPolicy| p.max_attempts = 0) as fn(&mut DialPolicy),
            |p| p.max_concurrent = 0,
            |p| p.pacing_secs = 0,
            |p| p.allowed_days.clear(),
        ] {
            let mut policy = DialPolicy::default();
            mutate(&mut policy);
            assert!(policy.validate().is_err());
        }
    }

    #[test]
    fn test_from_defaults() {
        let policy = DialPolicy::from_defaults(&PolicyDefaults::default()).unwrap();
        assert_eq!(policy.max_concurrent, 5);
        assert_eq!(policy.allowed_days.len(), 7);
        assert_eq!(policy.timezone, chrono_tz::US::Central);
        assert!(policy.quiet_hours.is_none());
    }

    #[test]
    fn test_from_defaults_parses_quiet_window() {
        let defaults = PolicyDefaults {
            quiet_start: Some("22:00".into()),
            quiet_end: Some("06:00:00".into()),
            ..PolicyDefaults::default()
        };
        let policy = DialPolicy::from_defaults(&defaults).unwrap();
        let quiet = policy.quiet_hours.unwrap();
        assert_eq!(quiet.start, NaiveTime::from_hms_opt(22, 0, 0).unwrap());
        assert_eq!(quiet.end, NaiveTime::from_hms_opt(6, 0, 0).unwrap());
    }

    #[test]
    fn test_from_defaults_rejects_half_set_quiet_window() {
        let defaults = PolicyDefaults {
            quiet_start: Some("22:00".into()),
            ..PolicyDefaults::default()
        };
        assert!(matches!(
            DialPolicy::from_defaults(&defaults),
            Err(DialerError::Config(_))
        ));
    }

    #[test]
    fn test_from_defaults_rejects_unknown_timezone() {
        let defaults = PolicyDefaults {
            timezone: "Mars/Olympus_Mons".into(),
            ..PolicyDefaults::default()
        };
        assert!(matches!(
            DialPolicy::from_defaults(&defaults),
            Err(DialerError::Config(_))
        ));
    }

    #[test]
    fn test_from_defaults_rejects_unknown_weekday() {
        let defaults = PolicyDefaults {
            allowed_days: vec!["monday".into(), "someday".into()],
            ..PolicyDefaults::default()
        };
        assert!(matches!(
            DialPolicy::from_defaults(&defaults),
            Err(DialerError::Config(_))
        ));
    }
}
