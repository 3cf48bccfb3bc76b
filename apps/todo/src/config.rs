//! Configuration management for the todo application.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::reducer::IdStrategy;
use composable_todo_runtime::StoreConfig;
use std::time::Duration;
use thiserror::Error;

/// Default tracing filter when neither `RUST_LOG` nor `TODO_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "todo=info,composable_todo_runtime=info";

/// Errors from loading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `TODO_ID_STRATEGY` named an unknown strategy
    #[error("Unknown id strategy '{0}' (expected 'sequential' or 'max-plus-one')")]
    InvalidIdStrategy(String),

    /// A numeric setting could not be parsed
    #[error("Invalid value '{value}' for {key}: expected a positive integer")]
    InvalidNumber {
        /// Environment variable name
        key: &'static str,
        /// The rejected value
        value: String,
    },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    /// How new todos get their ids
    pub id_strategy: IdStrategy,
    /// Maximum feedback actions per dispatched intent
    pub max_feedback_actions: usize,
    /// Buffer size for action observers
    pub broadcast_capacity: usize,
    /// Reducer runs slower than this are logged
    pub slow_reducer_threshold: Duration,
    /// Tracing filter directive
    pub log_filter: String,
}

impl Default for TodoConfig {
    fn default() -> Self {
        let store = StoreConfig::default();
        Self {
            id_strategy: IdStrategy::default(),
            max_feedback_actions: store.max_feedback_actions,
            broadcast_capacity: store.broadcast_capacity,
            slow_reducer_threshold: store.slow_reducer_threshold,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl TodoConfig {
    /// Load configuration from environment variables
    ///
    /// - `TODO_ID_STRATEGY`: `sequential` (default) or `max-plus-one`
    /// - `TODO_MAX_FEEDBACK_ACTIONS`: positive integer (default 64)
    /// - `TODO_BROADCAST_CAPACITY`: positive integer (default 16)
    /// - `TODO_SLOW_REDUCER_MS`: positive integer milliseconds (default 10)
    /// - `TODO_LOG`: tracing filter (default [`DEFAULT_LOG_FILTER`])
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a key maps to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(strategy) = lookup("TODO_ID_STRATEGY") {
            config.id_strategy = strategy.parse()?;
        }
        if let Some(value) = lookup("TODO_MAX_FEEDBACK_ACTIONS") {
            config.max_feedback_actions = parse_positive("TODO_MAX_FEEDBACK_ACTIONS", value)?;
        }
        if let Some(value) = lookup("TODO_BROADCAST_CAPACITY") {
            config.broadcast_capacity = parse_positive("TODO_BROADCAST_CAPACITY", value)?;
        }
        if let Some(value) = lookup("TODO_SLOW_REDUCER_MS") {
            let millis = parse_positive("TODO_SLOW_REDUCER_MS", value)?;
            config.slow_reducer_threshold = Duration::from_millis(millis as u64);
        }
        if let Some(filter) = lookup("TODO_LOG") {
            config.log_filter = filter;
        }

        Ok(config)
    }

    /// Runtime configuration for the store
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default()
            .with_max_feedback_actions(self.max_feedback_actions)
            .with_broadcast_capacity(self.broadcast_capacity)
            .with_slow_reducer_threshold(self.slow_reducer_threshold)
    }
}

fn parse_positive(key: &'static str, value: String) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = TodoConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, TodoConfig::default());
        assert_eq!(config.id_strategy, IdStrategy::Sequential);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn reads_every_setting() {
        let config = TodoConfig::from_lookup(lookup(&[
            ("TODO_ID_STRATEGY", "max-plus-one"),
            ("TODO_MAX_FEEDBACK_ACTIONS", "8"),
            ("TODO_BROADCAST_CAPACITY", "128"),
            ("TODO_SLOW_REDUCER_MS", "250"),
            ("TODO_LOG", "todo=debug"),
        ]))
        .unwrap();

        assert_eq!(config.id_strategy, IdStrategy::MaxPlusOne);
        assert_eq!(config.max_feedback_actions, 8);
        assert_eq!(config.broadcast_capacity, 128);
        assert_eq!(config.slow_reducer_threshold, Duration::from_millis(250));
        assert_eq!(config.log_filter, "todo=debug");

        let store = config.store_config();
        assert_eq!(store.max_feedback_actions, 8);
        assert_eq!(store.broadcast_capacity, 128);
        assert_eq!(store.slow_reducer_threshold, Duration::from_millis(250));
    }

    #[test]
    fn rejects_bad_strategy() {
        let err = TodoConfig::from_lookup(lookup(&[("TODO_ID_STRATEGY", "uuid")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidIdStrategy("uuid".to_string()));
    }

    #[test]
    fn rejects_zero_and_garbage_numbers() {
        for bad in ["0", "-3", "lots"] {
            let err = TodoConfig::from_lookup(lookup(&[("TODO_MAX_FEEDBACK_ACTIONS", bad)]))
                .unwrap_err();
            assert_eq!(
                err,
                ConfigError::InvalidNumber {
                    key: "TODO_MAX_FEEDBACK_ACTIONS",
                    value: bad.to_string(),
                }
            );
        }
    }
}
