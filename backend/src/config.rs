use std::fmt::Display;
use std::str::FromStr;
use tracing::{info, warn};

pub const DEFAULT_MUTATION_LIMIT: u32 = 30;
pub const DEFAULT_MUTATION_WINDOW_MINUTES: i64 = 1;
pub const DEFAULT_CORS_ORIGIN_PREFIX: &str = "http://localhost";
pub const DEFAULT_MAINTENANCE_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub mutation_limit: u32,
    pub mutation_window_minutes: i64,
    pub cors_origin_prefix: String,
    pub maintenance_interval_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mutation_limit: DEFAULT_MUTATION_LIMIT,
            mutation_window_minutes: DEFAULT_MUTATION_WINDOW_MINUTES,
            cors_origin_prefix: DEFAULT_CORS_ORIGIN_PREFIX.into(),
            maintenance_interval_secs: DEFAULT_MAINTENANCE_INTERVAL_SECS,
        }
    }
}

impl AppConfig {
    /// Builds the config from any key lookup, e.g. the shuttle secret store.
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            mutation_limit: try_load(&lookup, "MUTATION_LIMIT", DEFAULT_MUTATION_LIMIT),
            mutation_window_minutes: try_load(&lookup, "MUTATION_WINDOW_MINUTES", DEFAULT_MUTATION_WINDOW_MINUTES)
                .max(1),
            cors_origin_prefix: lookup("CORS_ORIGIN_PREFIX")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CORS_ORIGIN_PREFIX.into()),
            maintenance_interval_secs: try_load(&lookup, "MAINTENANCE_INTERVAL_SECS", DEFAULT_MAINTENANCE_INTERVAL_SECS)
                .max(1),
        }
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}
