//! Configuration loading from TOML files
//!
//! Credentials fall back to environment variables so a bare deployment only
//! needs `SHERPA_API_KEY` and `UNPAYWALL_EMAIL` set; a config file can carry
//! `${VAR}` references to keep secrets out of the file itself.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global configuration for oapath
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub credentials: Credentials,
    pub server: ServerSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Sherpa/RoMEO v2 API key. Required for pathway resolution.
    #[serde(deserialize_with = "deserialize_env_var")]
    pub sherpa_api_key: Option<String>,
    /// Contact email the Unpaywall API requires.
    #[serde(deserialize_with = "deserialize_env_var")]
    pub unpaywall_email: Option<String>,
    /// Optional Semantic Scholar partner key.
    #[serde(deserialize_with = "deserialize_env_var")]
    pub s2_api_key: Option<String>,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            sherpa_api_key: std::env::var("SHERPA_API_KEY").ok(),
            unpaywall_email: std::env::var("UNPAYWALL_EMAIL").ok(),
            s2_api_key: std::env::var("S2_API_KEY").ok(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CacheSettings {
    /// Pathway cache file. When unset the cache is memory-only.
    pub path: Option<PathBuf>,
}

/// Deserialize a string that may contain an environment variable reference like ${VAR}
fn deserialize_env_var<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| expand_env_var(&s)))
}

/// Expand ${VAR} to the environment variable's value
fn expand_env_var(s: &str) -> Option<String> {
    if let Some(var_name) = s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
        std::env::var(var_name).ok()
    } else {
        Some(s.to_string())
    }
}

impl Settings {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./oapath.toml (current directory)
    /// 2. ~/.config/oapath/config.toml
    ///
    /// Falls back to env-var defaults when no file is found.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("oapath.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "oapath") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("no config file found, using env-var defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("loaded config from {}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_server_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert!(settings.cache.path.is_none());
    }

    #[test]
    fn expand_env_var_literal() {
        assert_eq!(expand_env_var("literal"), Some("literal".to_string()));
    }

    #[test]
    fn expand_env_var_missing() {
        assert_eq!(expand_env_var("${NONEXISTENT_VAR_54321}"), None);
    }

    #[test]
    fn expand_env_var_set() {
        std::env::set_var("OAPATH_TEST_VAR", "sekrit");
        assert_eq!(expand_env_var("${OAPATH_TEST_VAR}"), Some("sekrit".to_string()));
        std::env::remove_var("OAPATH_TEST_VAR");
    }

    #[test]
    fn parse_settings_toml() {
        let toml = r#"
[credentials]
sherpa_api_key = "abc123"
unpaywall_email = "team@example.org"

[server]
host = "127.0.0.1"
port = 9999

[cache]
path = "/tmp/pathway.json"
"#;
        let settings: Settings = toml::from_str(toml).unwrap();
        assert_eq!(settings.credentials.sherpa_api_key.as_deref(), Some("abc123"));
        assert_eq!(
            settings.credentials.unpaywall_email.as_deref(),
            Some("team@example.org")
        );
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 9999);
        assert_eq!(
            settings.cache.path,
            Some(PathBuf::from("/tmp/pathway.json"))
        );
    }
}
