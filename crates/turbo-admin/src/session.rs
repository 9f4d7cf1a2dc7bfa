//! Session token persistence.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AdminError;

/// A logged-in admin session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token issued by the API.
    pub token: String,
    /// Client identifier sent with every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// When the token was stored.
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, client_id: Option<String>) -> Self {
        Self {
            token: token.into(),
            client_id,
            created_at: Utc::now(),
        }
    }
}

/// Stores the current session as a JSON file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session, if any.
    pub fn load(&self) -> Result<Option<Session>, AdminError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Load the stored session or fail with [`AdminError::NotLoggedIn`].
    pub fn require(&self) -> Result<Session, AdminError> {
        self.load()?.ok_or(AdminError::NotLoggedIn)
    }

    /// Persist a session, replacing any previous one.
    pub fn save(&self, session: &Session) -> Result<(), AdminError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Remove the stored session. Returns whether one existed.
    pub fn clear(&self) -> Result<bool, AdminError> {
        if !self.path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)?;
        Ok(true)
    }
}
