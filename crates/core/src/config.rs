//! Resolver settings read from the environment.

use crate::{
    DEFAULT_LOCATION_PAGE_SIZE, DEFAULT_PROXIMITY_THRESHOLD_DEG, MAX_LOCATION_PAGE_SIZE, MergeMode,
    env_parse_with_default,
};

pub const ENV_THRESHOLD: &str = "SPOTT_DEDUP_THRESHOLD_DEG";
pub const ENV_PAGE_SIZE: &str = "SPOTT_DEDUP_PAGE_SIZE";
pub const ENV_MODE: &str = "SPOTT_DEDUP_MODE";
pub const ENV_AUTO_MIGRATE: &str = "SPOTT_AUTO_MIGRATE";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DedupConfig {
    /// Bounding-box half-width in degrees.
    pub threshold_deg: f64,
    pub page_size: usize,
    pub mode: MergeMode,
    /// Create the resolver schema when connecting.
    pub auto_migrate: bool,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            threshold_deg: DEFAULT_PROXIMITY_THRESHOLD_DEG,
            page_size: DEFAULT_LOCATION_PAGE_SIZE,
            mode: MergeMode::default(),
            auto_migrate: false,
        }
    }
}

impl DedupConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let raw_threshold = env_parse_with_default(ENV_THRESHOLD, defaults.threshold_deg);
        let threshold_deg = if raw_threshold.is_finite() && raw_threshold > 0.0 {
            raw_threshold
        } else {
            tracing::warn!(
                value = raw_threshold,
                default = defaults.threshold_deg,
                "{ENV_THRESHOLD} must be a positive number, using default"
            );
            defaults.threshold_deg
        };

        let raw_page = env_parse_with_default(ENV_PAGE_SIZE, defaults.page_size);
        let page_size = raw_page.clamp(1, MAX_LOCATION_PAGE_SIZE);
        if page_size != raw_page {
            tracing::warn!(
                original = raw_page,
                clamped = page_size,
                "{ENV_PAGE_SIZE} clamped to [1, {MAX_LOCATION_PAGE_SIZE}]"
            );
        }

        Self {
            threshold_deg,
            page_size,
            mode: env_parse_with_default(ENV_MODE, defaults.mode),
            auto_migrate: env_parse_with_default(ENV_AUTO_MIGRATE, defaults.auto_migrate),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: MergeMode) -> Self {
        self.mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, PoisonError};

    use super::*;

    // `from_env` reads fixed variable names, so these tests take turns.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ALL_VARS: [&str; 4] = [ENV_THRESHOLD, ENV_PAGE_SIZE, ENV_MODE, ENV_AUTO_MIGRATE];

    fn from_env_with(vars: &[(&str, &str)]) -> DedupConfig {
        let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        for var in ALL_VARS {
            unsafe { std::env::remove_var(var) };
        }
        for (var, value) in vars {
            unsafe { std::env::set_var(var, value) };
        }
        let cfg = DedupConfig::from_env();
        for var in ALL_VARS {
            unsafe { std::env::remove_var(var) };
        }
        cfg
    }

    fn assert_default_threshold(cfg: &DedupConfig) {
        assert!((cfg.threshold_deg - DEFAULT_PROXIMITY_THRESHOLD_DEG).abs() < f64::EPSILON);
    }

    #[test]
    fn from_env_without_vars_is_default() {
        assert_eq!(from_env_with(&[]), DedupConfig::default());
    }

    #[test]
    fn from_env_reads_every_setting() {
        let cfg = from_env_with(&[
            (ENV_THRESHOLD, "0.0005"),
            (ENV_PAGE_SIZE, "250"),
            (ENV_MODE, "best-effort"),
            (ENV_AUTO_MIGRATE, "true"),
        ]);
        assert!((cfg.threshold_deg - 0.0005).abs() < f64::EPSILON);
        assert_eq!(cfg.page_size, 250);
        assert_eq!(cfg.mode, MergeMode::BestEffort);
        assert!(cfg.auto_migrate);
    }

    #[test]
    fn from_env_rejects_negative_threshold() {
        assert_default_threshold(&from_env_with(&[(ENV_THRESHOLD, "-1")]));
    }

    #[test]
    fn from_env_rejects_zero_threshold() {
        assert_default_threshold(&from_env_with(&[(ENV_THRESHOLD, "0")]));
    }

    #[test]
    fn from_env_rejects_nan_threshold() {
        assert_default_threshold(&from_env_with(&[(ENV_THRESHOLD, "NaN")]));
    }

    #[test]
    fn from_env_clamps_page_size() {
        assert_eq!(from_env_with(&[(ENV_PAGE_SIZE, "0")]).page_size, 1);
        assert_eq!(from_env_with(&[(ENV_PAGE_SIZE, "50000")]).page_size, MAX_LOCATION_PAGE_SIZE);
    }

    #[test]
    fn from_env_ignores_unknown_mode() {
        assert_eq!(from_env_with(&[(ENV_MODE, "sometimes")]).mode, MergeMode::Atomic);
    }

    #[test]
    fn defaults_match_constants() {
        let cfg = DedupConfig::default();
        assert!((cfg.threshold_deg - 0.0001).abs() < f64::EPSILON);
        assert_eq!(cfg.page_size, 1000);
        assert_eq!(cfg.mode, MergeMode::Atomic);
        assert!(!cfg.auto_migrate);
    }

    #[test]
    fn with_mode_overrides_only_mode() {
        let cfg = DedupConfig::default().with_mode(MergeMode::BestEffort);
        assert_eq!(cfg.mode, MergeMode::BestEffort);
        assert_eq!(cfg.page_size, DEFAULT_LOCATION_PAGE_SIZE);
    }
}
