use std::path::PathBuf;

use crate::data::model::Statistic;
use crate::data::rank::DEFAULT_TOP_N;

pub const DATASET_ENV: &str = "PREMIER_STATS_DATASET";
pub const TOP_N_ENV: &str = "PREMIER_STATS_TOP_N";
pub const STATISTIC_ENV: &str = "PREMIER_STATS_STATISTIC";

const DEFAULT_DATASET: &str = "dataset.json";

// ---------------------------------------------------------------------------
// Runtime configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// File loaded at startup.
    pub dataset_path: PathBuf,
    /// Leaderboard length.
    pub top_n: usize,
    /// Statistic selected when a session starts.
    pub initial_statistic: Statistic,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            top_n: DEFAULT_TOP_N,
            initial_statistic: Statistic::Goals,
        }
    }
}

impl DashboardConfig {
    /// Resolve from the process: first positional argument, then environment.
    pub fn from_env() -> Self {
        Self::resolve(std::env::args().nth(1), |key| std::env::var(key).ok())
    }

    /// Resolution order: `arg_path`, then `env`, then defaults. Bad values are
    /// logged and replaced by the default.
    pub fn resolve(arg_path: Option<String>, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let dataset_path = arg_path
            .or_else(|| env(DATASET_ENV))
            .map(PathBuf::from)
            .unwrap_or(defaults.dataset_path);

        let top_n = match env(TOP_N_ENV) {
            None => defaults.top_n,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    log::warn!("ignoring {TOP_N_ENV}={raw:?}: expected a positive integer");
                    defaults.top_n
                }
            },
        };

        let initial_statistic = match env(STATISTIC_ENV) {
            None => defaults.initial_statistic,
            Some(raw) => raw.trim().parse::<Statistic>().unwrap_or_else(|e| {
                log::warn!("ignoring {STATISTIC_ENV}: {e}");
                defaults.initial_statistic
            }),
        };

        Self {
            dataset_path,
            top_n,
            initial_statistic,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(DashboardConfig::resolve(None, env_of(&[])), DashboardConfig::default());
    }

    #[test]
    fn argument_beats_environment() {
        let cfg = DashboardConfig::resolve(
            Some("cli.json".to_string()),
            env_of(&[(DATASET_ENV, "env.json")]),
        );
        assert_eq!(cfg.dataset_path, PathBuf::from("cli.json"));

        let cfg = DashboardConfig::resolve(None, env_of(&[(DATASET_ENV, "env.json")]));
        assert_eq!(cfg.dataset_path, PathBuf::from("env.json"));
    }

    #[test]
    fn environment_overrides() {
        let cfg = DashboardConfig::resolve(
            None,
            env_of(&[(TOP_N_ENV, "10"), (STATISTIC_ENV, "Shots on target")]),
        );
        assert_eq!(cfg.top_n, 10);
        assert_eq!(cfg.initial_statistic, Statistic::ShotsOnTarget);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = DashboardConfig::resolve(
            None,
            env_of(&[(TOP_N_ENV, "0"), (STATISTIC_ENV, "Tackles")]),
        );
        assert_eq!(cfg.top_n, DEFAULT_TOP_N);
        assert_eq!(cfg.initial_statistic, Statistic::Goals);
    }
}
