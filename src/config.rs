//! Runtime configuration read from the environment.

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::{RestartPolicy, DROP_INTERVAL_MS};

/// Game configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: u32,
    pub drop_ms: u64,
    pub restart_policy: RestartPolicy,
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            drop_ms: DROP_INTERVAL_MS as u64,
            restart_policy: RestartPolicy::Anytime,
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Create from `BLOCKFALL_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let drop_ms = lookup("BLOCKFALL_DROP_MS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(|ms| ms.max(1))
            .unwrap_or(DROP_INTERVAL_MS as u64);

        let restart_policy = lookup("BLOCKFALL_RESTART")
            .and_then(|s| RestartPolicy::from_str(&s))
            .unwrap_or_default();

        let log_disabled = lookup("BLOCKFALL_DISABLE_LOG")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) })
            .filter(|_| !log_disabled);

        Self {
            seed,
            drop_ms,
            restart_policy,
            log_path,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.as_nanos() as u32) ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
