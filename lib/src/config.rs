use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Scheme and host of the LinkNova server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path prefix of the REST API on that server
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Custom user-agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Logged-in user, sent as the `user-id` header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// API secret, sent as the `secrets` header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secrets: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            user_id: None,
            secrets: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_api_prefix() -> String {
    "/-/ln/v1/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("linknova/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    /// Load configuration from a file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from default location (~/.config/linknova/config.yml)
    /// Falls back to default config if the file doesn't exist or is broken
    pub fn load() -> Self {
        let config_path = crate::utils::get_config_dir().join("config.yml");

        let mut config = if config_path.exists() {
            match Self::load_from_path(&config_path) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Failed to load config from {:?}: {}", config_path, e);
                    log::warn!("Using default configuration");
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Apply `LINKNOVA_*` overrides; `lookup` is normally `std::env::var`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("LINKNOVA_BASE_URL").filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(user) = lookup("LINKNOVA_USER_ID").filter(|v| !v.is_empty()) {
            self.user_id = Some(user);
        }
        if let Some(secrets) = lookup("LINKNOVA_SECRETS").filter(|v| !v.is_empty()) {
            self.secrets = Some(secrets);
        }
    }

    /// Save configuration to a file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Save configuration to default location
    pub fn save(&self) -> Result<()> {
        let config_path = crate::utils::get_config_dir().join("config.yml");
        self.save_to_path(&config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.api_prefix, "/-/ln/v1/api");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.user_agent.starts_with("linknova/"));
        assert!(config.user_id.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        let original = Config {
            base_url: "https://links.example.org".to_string(),
            api_prefix: "/v1/api".to_string(),
            timeout_secs: 3,
            user_id: Some("alice".to_string()),
            ..Config::default()
        };

        original.save_to_path(config_path).unwrap();
        let loaded = Config::load_from_path(config_path).unwrap();

        assert_eq!(original, loaded);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        fs::write(config_path, "invalid: yaml: content:").unwrap();

        let result = Config::load_from_path(config_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_partial_config() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        fs::write(config_path, "api_prefix: /v1/api\n").unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.api_prefix, "/v1/api");
        assert_eq!(config.base_url, default_base_url());
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_apply_overrides() {
        let env: HashMap<&str, &str> = [
            ("LINKNOVA_BASE_URL", "http://10.0.0.2:9000"),
            ("LINKNOVA_USER_ID", "bob"),
            ("LINKNOVA_SECRETS", ""),
        ]
        .into_iter()
        .collect();

        let mut config = Config {
            secrets: Some("keep".to_string()),
            ..Config::default()
        };
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.base_url, "http://10.0.0.2:9000");
        assert_eq!(config.user_id.as_deref(), Some("bob"));
        // empty values never clobber what the file set
        assert_eq!(config.secrets.as_deref(), Some("keep"));
    }
}
