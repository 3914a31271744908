//! Persisted login session.

use crate::backend::utils::paths::get_session_path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    pub fn new(username: String, access_token: String, token_type: String) -> Self {
        Self {
            username,
            access_token,
            token_type,
        }
    }

    /// Gets the path to the session file.
    pub fn get_session_path() -> PathBuf {
        get_session_path().unwrap_or_else(|_| PathBuf::from("CellDashboard").join("session.json"))
    }

    /// Saves the session to disk.
    pub async fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::get_session_path()).await
    }

    pub async fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).await?;

        Ok(())
    }

    /// Loads the session from disk, if one was saved.
    pub async fn load() -> Option<Self> {
        Self::load_from(&Self::get_session_path()).await
    }

    pub async fn load_from(path: &Path) -> Option<Self> {
        let json = fs::read_to_string(path).await.ok()?;
        match serde_json::from_str(&json) {
            Ok(session) => Some(session),
            Err(e) => {
                log::warn!("Ignoring unreadable session file {}: {e}", path.display());
                None
            }
        }
    }

    /// Deletes the session file.
    pub async fn delete() -> anyhow::Result<()> {
        Self::delete_at(&Self::get_session_path()).await
    }

    pub async fn delete_at(path: &Path) -> anyhow::Result<()> {
        if fs::try_exists(path).await.unwrap_or(false) {
            fs::remove_file(path).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_or_corrupt_file_loads_as_none() {
        let dir = std::env::temp_dir().join(format!("cell-dashboard-session-{}", std::process::id()));
        let path = dir.join("session.json");
        let _ = std::fs::remove_dir_all(&dir);

        assert_eq!(Session::load_from(&path).await, None);

        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(Session::load_from(&path).await, None);

        let session = Session::new("ada".into(), "tok".into(), "bearer".into());
        session.save_to(&path).await.unwrap();
        assert_eq!(Session::load_from(&path).await, Some(session));

        Session::delete_at(&path).await.unwrap();
        assert!(!path.exists());
        Session::delete_at(&path).await.unwrap();

        let _ = std::fs::remove_dir_all(&dir);
    }
}
