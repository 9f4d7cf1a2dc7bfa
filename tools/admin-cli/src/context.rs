//! CLI execution context.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use turbo_admin::{AdminClient, HttpTransport, ProductForm, SessionStore};
use turbo_catalog::ProductRecord;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration was loaded from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Product draft file.
    pub draft_path: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, draft: &str, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(resolve(&cwd, path)),
            None => find_config(&cwd),
        };
        let config = match &config_path {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        }
        .with_env_overrides();

        let draft_path = resolve(&cwd, draft);
        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            draft_path,
        })
    }

    /// Session store for the configured path.
    pub fn session_store(&self) -> SessionStore {
        let path = self
            .config
            .session
            .path
            .clone()
            .unwrap_or_else(|| data_dir().join("turbo-admin").join("session.json"));
        SessionStore::new(path)
    }

    /// Authenticated API client built from config and the stored session.
    pub fn client(&self) -> Result<AdminClient> {
        let session = self.session_store().require()?;
        let transport = HttpTransport::new(Duration::from_secs(self.config.api.timeout_secs))?;

        let mut client =
            AdminClient::new(self.config.api.base_url.clone(), transport).with_token(session.token);
        if let Some(id) = session.client_id.or_else(|| self.config.api.client_id.clone()) {
            client = client.with_client_id(id);
        }
        Ok(client)
    }

    /// Load the product draft.
    pub fn load_form(&self) -> Result<ProductForm> {
        let content = std::fs::read_to_string(&self.draft_path).with_context(|| {
            format!(
                "Failed to read draft {} (create one with `turbo-admin draft new`)",
                self.draft_path.display()
            )
        })?;
        let record: ProductRecord = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse draft {}", self.draft_path.display()))?;
        Ok(ProductForm::from_record(record, self.config.builder.clone()))
    }

    /// Write the product draft.
    pub fn save_form(&self, form: &ProductForm) -> Result<()> {
        let json = serde_json::to_string_pretty(&form.to_record())?;
        std::fs::write(&self.draft_path, json)
            .with_context(|| format!("Failed to write draft {}", self.draft_path.display()))
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.exists() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

fn resolve(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Get the platform-specific data directory.
fn data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        std::env::temp_dir()
    }
}
