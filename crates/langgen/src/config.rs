use std::{num::NonZeroUsize, time::Duration};

use serde::{Deserialize, Serialize};

/// Tuning for the parallel search. Every field has a default, so an empty
/// TOML table is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of worker threads. Defaults to the hardware concurrency.
    pub workers: Option<NonZeroUsize>,
    /// How long an idle worker waits on the work queue before checking
    /// whether the search is finished.
    pub poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: None,
            poll_interval_ms: 2,
        }
    }
}

impl Config {
    pub fn with_workers(mut self, workers: NonZeroUsize) -> Self {
        self.workers = Some(workers);
        self
    }
    pub fn worker_count(&self) -> NonZeroUsize {
        self.workers
            .unwrap_or_else(stdx::concurrency::available_workers)
    }
    pub fn poll_interval(&self) -> Duration {
        // A zero wait would turn idle workers into busy loops.
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.worker_count().get() >= 1);
    }

    #[test]
    fn explicit_values() {
        let config: Config = toml::from_str("workers = 3\npoll_interval_ms = 10").unwrap();
        assert_eq!(config.worker_count().get(), 3);
        assert_eq!(config.poll_interval(), Duration::from_millis(10));
    }

    #[test]
    fn zero_workers_is_rejected() {
        assert!(toml::from_str::<Config>("workers = 0").is_err());
    }

    #[test]
    fn zero_poll_interval_is_clamped() {
        let config = Config {
            poll_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
    }
}
