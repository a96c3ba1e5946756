//! Configuration service for symnav

use std::path::{Path, PathBuf};
use std::process::Command;

use async_trait::async_trait;

use crate::error::ConfigError;
use crate::models::config::NavConfig;

#[async_trait]
pub trait ConfigService: Send + Sync {
    async fn load(&self, global_only: bool) -> Result<NavConfig, ConfigError>;
    fn config_path(&self, global: bool) -> PathBuf;
    async fn init(&self, global: bool, force: bool) -> Result<PathBuf, ConfigError>;
    async fn edit(&self, global: bool) -> Result<PathBuf, ConfigError>;
}

pub struct DefaultConfigService {
    root: PathBuf,
}

impl DefaultConfigService {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn global_config_path() -> PathBuf {
        // XDG standard: ~/.config/symnav/config.toml
        std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("symnav")
            .join("config.toml")
    }

    fn project_config_path(&self) -> PathBuf {
        self.root.join(".symnav").join("config.toml")
    }

    async fn load_table(path: &Path) -> Result<toml::Table, ConfigError> {
        if !path.exists() {
            return Ok(toml::Table::new());
        }
        let content = tokio::fs::read_to_string(path).await?;
        content
            .parse::<toml::Table>()
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))
    }

    async fn write_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let config = NavConfig::default();
        let content =
            toml::to_string_pretty(&config).map_err(|e| ConfigError::Parse(e.to_string()))?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    fn get_editor() -> String {
        std::env::var("EDITOR").unwrap_or_else(|_| {
            if cfg!(target_os = "macos") {
                "open".to_string()
            } else if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "vi".to_string()
            }
        })
    }
}

#[async_trait]
impl ConfigService for DefaultConfigService {
    async fn load(&self, global_only: bool) -> Result<NavConfig, ConfigError> {
        let mut table = Self::load_table(&Self::global_config_path()).await?;
        if !global_only {
            let project = Self::load_table(&self.project_config_path()).await?;
            merge_tables(&mut table, project);
        }

        let config: NavConfig = table
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))?;

        if global_only {
            return Ok(config);
        }
        apply_env_overrides(config, |key| std::env::var(key).ok())
    }

    fn config_path(&self, global: bool) -> PathBuf {
        if global {
            Self::global_config_path()
        } else {
            self.project_config_path()
        }
    }

    async fn init(&self, global: bool, force: bool) -> Result<PathBuf, ConfigError> {
        let path = self.config_path(global);

        if path.exists() && !force {
            return Err(ConfigError::InvalidValue {
                key: "config".to_string(),
                message: format!(
                    "Config already exists: {}. Use --force to overwrite.",
                    path.display()
                ),
            });
        }

        Self::write_default_config(&path).await?;
        Ok(path)
    }

    async fn edit(&self, global: bool) -> Result<PathBuf, ConfigError> {
        let path = self.config_path(global);

        if !path.exists() {
            return Err(ConfigError::NotFound(format!(
                "Config file does not exist: {}\nRun: symnav config init{}",
                path.display(),
                if global { " --global" } else { "" }
            )));
        }

        let editor = Self::get_editor();
        let status =
            Command::new(&editor)
                .arg(&path)
                .status()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "editor".to_string(),
                    message: format!("Failed to launch editor '{}': {}", editor, e),
                })?;

        if !status.success() {
            return Err(ConfigError::InvalidValue {
                key: "editor".to_string(),
                message: "Editor exited with error".to_string(),
            });
        }

        Ok(path)
    }
}

/// Project keys win; sections merge key by key
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Environment variables and the config keys they override
pub const ENV_OVERRIDES: [(&str, &str); 3] = [
    ("SYMNAV_PROVIDER_TIMEOUT", "provider.timeout_secs"),
    ("SYMNAV_DEBOUNCE_MS", "announce.debounce_ms"),
    ("SYMNAV_FALLBACK", "fallback.enabled"),
];

/// `(config key, variable)` for each override currently set
pub fn active_env_overrides(
    env: impl Fn(&str) -> Option<String>,
) -> Vec<(&'static str, &'static str)> {
    ENV_OVERRIDES
        .iter()
        .filter(|&&(var, _)| env(var).is_some())
        .map(|&(var, key)| (key, var))
        .collect()
}

fn apply_env_overrides(
    mut config: NavConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<NavConfig, ConfigError> {
    if let Some(val) = env("SYMNAV_PROVIDER_TIMEOUT") {
        config.provider.timeout_secs = parse_env("SYMNAV_PROVIDER_TIMEOUT", &val)?;
    }
    if let Some(val) = env("SYMNAV_DEBOUNCE_MS") {
        config.announce.debounce_ms = parse_env("SYMNAV_DEBOUNCE_MS", &val)?;
    }
    if let Some(val) = env("SYMNAV_FALLBACK") {
        config.fallback.enabled = match val.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: "SYMNAV_FALLBACK".to_string(),
                    message: format!("expected a boolean, got '{}'", val),
                });
            }
        };
    }
    Ok(config)
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn table(src: &str) -> toml::Table {
        src.parse().unwrap()
    }

    #[test]
    fn test_merge_keeps_global_keys_missing_from_project() {
        let mut base = table("[provider]\ntimeout_secs = 30\nretry_attempts = 4\n[announce]\ncommand = \"say\"\n");
        merge_tables(&mut base, table("[provider]\ntimeout_secs = 5\n"));

        let config: NavConfig = base.try_into().unwrap();
        assert_eq!(config.provider.timeout_secs, 5);
        assert_eq!(config.provider.retry_attempts, 4);
        assert_eq!(config.announce.command.as_deref(), Some("say"));
        assert_eq!(config.announce.debounce_ms, 250);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SYMNAV_PROVIDER_TIMEOUT", "3"),
            ("SYMNAV_DEBOUNCE_MS", "0"),
            ("SYMNAV_FALLBACK", "off"),
        ]
        .into_iter()
        .collect();

        let config = apply_env_overrides(NavConfig::default(), |key| {
            vars.get(key).map(|v| v.to_string())
        })
        .unwrap();

        assert_eq!(config.provider.timeout_secs, 3);
        assert_eq!(config.announce.debounce_ms, 0);
        assert!(!config.fallback.enabled);
    }

    #[test]
    fn test_active_env_overrides_name_their_keys() {
        let active = active_env_overrides(|key| {
            (key == "SYMNAV_DEBOUNCE_MS").then(|| "100".to_string())
        });
        assert_eq!(active, vec![("announce.debounce_ms", "SYMNAV_DEBOUNCE_MS")]);
        assert!(active_env_overrides(|_| None).is_empty());
    }

    #[test]
    fn test_bad_env_value_is_reported() {
        let err = apply_env_overrides(NavConfig::default(), |key| {
            (key == "SYMNAV_DEBOUNCE_MS").then(|| "soon".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "SYMNAV_DEBOUNCE_MS"));
    }

    #[tokio::test]
    async fn test_init_writes_loadable_project_config() {
        let dir = tempfile::tempdir().unwrap();
        let service = DefaultConfigService::new(dir.path());

        let path = service.init(false, false).await.unwrap();
        assert_eq!(path, dir.path().join(".symnav").join("config.toml"));

        let loaded: NavConfig = DefaultConfigService::load_table(&path)
            .await
            .unwrap()
            .try_into()
            .unwrap();
        assert_eq!(loaded.provider.sidecar_suffix, ".symbols.json");

        assert!(service.init(false, false).await.is_err());
        assert!(service.init(false, true).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[provider\n").unwrap();

        let err = DefaultConfigService::load_table(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[tokio::test]
    async fn test_edit_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let service = DefaultConfigService::new(dir.path());
        assert!(matches!(
            service.edit(false).await,
            Err(ConfigError::NotFound(_))
        ));
    }
}
