// src/config.rs

use std::{env, path::PathBuf, time::Duration};

use crate::error::SyncError;

pub const CACHE_DIR_VAR: &str = "UNICORN_CACHE_DIR";
pub const HTTP_TIMEOUT_VAR: &str = "UNICORN_HTTP_TIMEOUT_SECS";

/// Where the cached JSON lands unless overridden.
pub const DEFAULT_CACHE_DIR: &str = "public/cached-data";

/// Run settings. The binary takes no arguments, so everything comes from the
/// environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub cache_dir: PathBuf,
    /// Total per-request timeout. `None` waits forever.
    pub http_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            http_timeout: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, SyncError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SyncError> {
        let mut cfg = Self::default();

        if let Some(dir) = lookup(CACHE_DIR_VAR).filter(|d| !d.trim().is_empty()) {
            cfg.cache_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup(HTTP_TIMEOUT_VAR).filter(|v| !v.trim().is_empty()) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                SyncError::Config(format!("{HTTP_TIMEOUT_VAR} must be a whole number of seconds, got {raw:?}"))
            })?;
            if secs == 0 {
                return Err(SyncError::Config(format!("{HTTP_TIMEOUT_VAR} must be positive")));
            }
            cfg.http_timeout = Some(Duration::from_secs(secs));
        }

        Ok(cfg)
    }
}
