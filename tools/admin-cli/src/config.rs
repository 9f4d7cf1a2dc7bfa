//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use turbo_catalog::BuilderConfig;

/// File names searched for, in order, from the working directory upward.
pub const CONFIG_NAMES: [&str; 3] = ["turbo-admin.toml", ".turbo-admin.toml", "turbo-admin.json"];

/// Overrides `api.base_url`.
pub const ENV_API_URL: &str = "TURBO_ADMIN_API_URL";

/// Overrides `api.client_id`.
pub const ENV_CLIENT_ID: &str = "TURBO_ADMIN_CLIENT_ID";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Admin API connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Variant builder policy.
    #[serde(default)]
    pub builder: BuilderConfig,

    /// Session storage.
    #[serde(default)]
    pub session: SessionConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Apply environment variable overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            self.api.base_url = url;
        }
        if let Ok(id) = std::env::var(ENV_CLIENT_ID) {
            self.api.client_id = Some(id);
        }
        self
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Admin API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the admin API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Client identifier sent as `X-Client-Id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            client_id: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Where the session token is kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Session file path; defaults to the user data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Generate a default turbo-admin.toml.
pub fn generate_default_config() -> String {
    r#"# TurboCommerce admin CLI configuration

[api]
base_url = "http://localhost:3000/api"
# client_id = "admin-cli"
timeout_secs = 30

[builder]
# Axis whose options are paired with images.
image_axis = "Color"
# Require an image per option before the image axis can grow.
enforce_image_coupling = false
# Upload limit in bytes (2 MiB).
max_image_bytes = 2097152

[session]
# path = "/home/me/.local/share/turbo-admin/session.json"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config: CliConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://shop.example.com/admin"
            client_id = "web"

            [builder]
            enforce_image_coupling = true
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://shop.example.com/admin");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.builder.enforce_image_coupling);
        assert_eq!(config.builder.image_axis, "Color");
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turbo-admin.json");
        let mut config = CliConfig::default();
        config.api.client_id = Some("cli".into());
        config.save(&path).unwrap();
        assert_eq!(CliConfig::load(&path).unwrap(), config);
    }
}
