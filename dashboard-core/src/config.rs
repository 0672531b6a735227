use std::time::Duration;

/// Timing and sizing knobs for the simulated chat reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    pub response_delay: Duration,
    pub reveal_interval: Duration,
    pub min_step: usize,
    pub max_step: usize,
    pub persist_delay: Duration,
    pub title_limit: usize,
    pub loading_label_interval: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            response_delay: Duration::from_millis(6000),
            reveal_interval: Duration::from_millis(20),
            min_step: 3,
            max_step: 7,
            persist_delay: Duration::from_millis(2000),
            title_limit: 50,
            loading_label_interval: Duration::from_millis(5000),
        }
    }
}

impl SimulationConfig {
    /// Defaults overridden by `DASHBOARD_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let millis = |key: &str, fallback: Duration| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(fallback)
        };
        // Tick periods must stay positive.
        let period = |key: &str, fallback: Duration| {
            Some(millis(key, fallback))
                .filter(|d| !d.is_zero())
                .unwrap_or(fallback)
        };
        let count = |key: &str, fallback: usize| {
            lookup(key)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(fallback)
        };

        let min_step = count("DASHBOARD_MIN_STEP", defaults.min_step);
        let max_step = count("DASHBOARD_MAX_STEP", defaults.max_step).max(min_step);

        Self {
            response_delay: millis("DASHBOARD_RESPONSE_DELAY_MS", defaults.response_delay),
            reveal_interval: period("DASHBOARD_REVEAL_INTERVAL_MS", defaults.reveal_interval),
            min_step,
            max_step,
            persist_delay: millis("DASHBOARD_PERSIST_DELAY_MS", defaults.persist_delay),
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn lookup_overrides_defaults() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("DASHBOARD_RESPONSE_DELAY_MS", "10"),
            ("DASHBOARD_MIN_STEP", "2"),
            ("DASHBOARD_MAX_STEP", "nope"),
        ]);
        let cfg = SimulationConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.response_delay, Duration::from_millis(10));
        assert_eq!(cfg.min_step, 2);
        assert_eq!(cfg.max_step, 7);
        assert_eq!(cfg.reveal_interval, Duration::from_millis(20));
    }

    #[test]
    fn zero_reveal_interval_keeps_default() {
        let cfg = SimulationConfig::from_lookup(|k| match k {
            "DASHBOARD_REVEAL_INTERVAL_MS" => Some("0".into()),
            "DASHBOARD_PERSIST_DELAY_MS" => Some("0".into()),
            _ => None,
        });
        assert_eq!(cfg.reveal_interval, Duration::from_millis(20));
        assert_eq!(cfg.persist_delay, Duration::ZERO);
    }

    #[test]
    fn max_step_never_below_min_step() {
        let cfg = SimulationConfig::from_lookup(|k| match k {
            "DASHBOARD_MIN_STEP" => Some("9".into()),
            "DASHBOARD_MAX_STEP" => Some("4".into()),
            _ => None,
        });
        assert_eq!(cfg.min_step, 9);
        assert_eq!(cfg.max_step, 9);
    }
}
