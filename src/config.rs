//! Global Configuration Singleton

use std::sync::OnceLock;
use std::time::Duration;

use crate::models::config::NavConfig;

static CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub provider_timeout: Duration,
    pub retry_attempts: u32,
    pub announce_delay: Duration,
    pub fallback_enabled: bool,
    pub max_file_size_bytes: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::from(&NavConfig::default())
    }
}

impl From<&NavConfig> for RuntimeConfig {
    fn from(config: &NavConfig) -> Self {
        Self {
            provider_timeout: Duration::from_secs(config.provider.timeout_secs.max(1)),
            retry_attempts: config.provider.retry_attempts.max(1),
            announce_delay: Duration::from_millis(config.announce.debounce_ms),
            fallback_enabled: config.fallback.enabled,
            max_file_size_bytes: config.document.max_file_size_bytes(),
        }
    }
}

pub fn init(config: &NavConfig) {
    let _ = CONFIG.set(RuntimeConfig::from(config));
}

pub fn provider_timeout() -> Duration {
    config().provider_timeout
}

pub fn retry_attempts() -> u32 {
    config().retry_attempts
}

pub fn announce_delay() -> Duration {
    config().announce_delay
}

pub fn fallback_enabled() -> bool {
    config().fallback_enabled
}

pub fn max_file_size_bytes() -> u64 {
    config().max_file_size_bytes
}

fn config() -> RuntimeConfig {
    CONFIG.get().cloned().unwrap_or_default()
}
