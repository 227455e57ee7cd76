//! Configuration for the batch runner and the outer surfaces
//!
//! The calculators themselves take no configuration; this only controls how
//! requests are executed and how much schedule detail is returned.

use std::env;

/// Environment variable enabling rayon-parallel batches
pub const ENV_PARALLEL: &str = "ENGINE_PARALLEL";
/// Environment variable enabling schedule rows in EMI outcomes
pub const ENV_INCLUDE_SCHEDULE: &str = "ENGINE_INCLUDE_SCHEDULE";
/// Environment variable capping the number of schedule rows returned
pub const ENV_SCHEDULE_PREVIEW: &str = "ENGINE_SCHEDULE_PREVIEW";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Run batches on the rayon thread pool
    pub parallel: bool,

    /// Attach month-by-month rows to EMI outcomes
    pub include_schedule: bool,

    /// Only return the first N schedule rows (None = full tenure)
    pub schedule_preview_months: Option<u32>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            include_schedule: false,
            schedule_preview_months: None,
        }
    }
}

impl RunnerConfig {
    /// Headline figures only, evaluated sequentially
    pub fn quick() -> Self {
        Self {
            parallel: false,
            include_schedule: false,
            schedule_preview_months: None,
        }
    }

    /// Full schedules, parallel batches
    pub fn detailed() -> Self {
        Self {
            parallel: true,
            include_schedule: true,
            schedule_preview_months: None,
        }
    }

    /// Limit returned schedules to the first `months` rows
    pub fn with_preview(mut self, months: u32) -> Self {
        self.include_schedule = true;
        self.schedule_preview_months = Some(months);
        self
    }

    /// Defaults overridden by `ENGINE_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(flag) = env::var(ENV_PARALLEL).ok().and_then(|s| parse_flag(&s)) {
            config.parallel = flag;
        }
        if let Some(flag) = env::var(ENV_INCLUDE_SCHEDULE).ok().and_then(|s| parse_flag(&s)) {
            config.include_schedule = flag;
        }
        if let Some(months) = env::var(ENV_SCHEDULE_PREVIEW).ok().and_then(|s| s.trim().parse().ok()) {
            config = config.with_preview(months);
        }

        config
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_preview_implies_schedule() {
        let config = RunnerConfig::quick().with_preview(12);
        assert!(config.include_schedule);
        assert_eq!(config.schedule_preview_months, Some(12));
        assert!(!config.parallel);
    }
}
