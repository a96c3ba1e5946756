//! Configuration model for symnav

use serde::{Deserialize, Serialize};

/// symnav configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NavConfig {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub announce: AnnounceConfig,

    #[serde(default)]
    pub fallback: FallbackConfig,

    #[serde(default)]
    pub document: DocumentConfig,
}

/// Symbol provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "defaults::timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "defaults::retry_attempts")]
    pub retry_attempts: u32,

    /// Appended to a document path to locate its saved symbol response
    #[serde(default = "defaults::sidecar_suffix")]
    pub sidecar_suffix: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::timeout_secs(),
            retry_attempts: defaults::retry_attempts(),
            sidecar_suffix: defaults::sidecar_suffix(),
        }
    }
}

/// Spoken announcement settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnounceConfig {
    /// Master switch. When false nothing is spoken or recorded, even with `--speak`
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,

    #[serde(default = "defaults::debounce_ms")]
    pub debounce_ms: u64,

    /// Text-to-speech program; the announcement is passed as the last argument
    #[serde(default)]
    pub command: Option<String>,

    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for AnnounceConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::enabled(),
            debounce_ms: defaults::debounce_ms(),
            command: None,
            args: Vec::new(),
        }
    }
}

/// Degraded-mode scanning settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::enabled(),
        }
    }
}

/// Document loading settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    #[serde(default = "defaults::max_file_size_mb")]
    pub max_file_size_mb: u32,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: defaults::max_file_size_mb(),
        }
    }
}

impl DocumentConfig {
    pub fn max_file_size_bytes(&self) -> u64 {
        u64::from(self.max_file_size_mb) * 1024 * 1024
    }
}

mod defaults {
    // Provider
    pub fn timeout_secs() -> u64 {
        10
    }
    pub fn retry_attempts() -> u32 {
        2
    }
    pub fn sidecar_suffix() -> String {
        ".symbols.json".to_string()
    }

    // Announce / fallback
    pub fn enabled() -> bool {
        true
    }
    pub fn debounce_ms() -> u64 {
        250
    }

    // Document
    pub fn max_file_size_mb() -> u32 {
        5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NavConfig::default();
        assert_eq!(config.provider.timeout_secs, 10);
        assert_eq!(config.provider.retry_attempts, 2);
        assert_eq!(config.provider.sidecar_suffix, ".symbols.json");
        assert!(config.announce.enabled);
        assert_eq!(config.announce.debounce_ms, 250);
        assert!(config.announce.command.is_none());
        assert!(config.fallback.enabled);
        assert_eq!(config.document.max_file_size_bytes(), 5 * 1024 * 1024);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: NavConfig = toml::from_str(
            r#"
            [announce]
            debounce_ms = 80
            command = "espeak"
            args = ["-s", "180"]

            [fallback]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.announce.debounce_ms, 80);
        assert_eq!(config.announce.command.as_deref(), Some("espeak"));
        assert_eq!(config.announce.args, vec!["-s", "180"]);
        assert!(config.announce.enabled);
        assert!(!config.fallback.enabled);
        assert_eq!(config.provider.timeout_secs, 10);
    }

    #[test]
    fn test_zero_size_means_unlimited() {
        let doc = DocumentConfig {
            max_file_size_mb: 0,
        };
        assert_eq!(doc.max_file_size_bytes(), 0);
    }
}
