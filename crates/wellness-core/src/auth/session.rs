use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Session file name in the data directory
const SESSION_FILE: &str = "session.json";

/// Get/set/clear contract for the single credential slot.
///
/// `clear` on an already-empty slot must succeed.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn store(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// In-process slot. Lives as long as the process; used as the fake context in tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            slot: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("Token slot lock poisoned"))?;
        Ok(slot.clone())
    }

    fn store(&self, token: &str) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("Token slot lock poisoned"))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("Token slot lock poisoned"))?;
        *slot = None;
        Ok(())
    }
}

/// On-disk form of the credential slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub saved_at: DateTime<Utc>,
}

/// Token slot persisted as JSON so it survives between runs.
pub struct FileTokenStore {
    data_dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn session_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE)
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path).context("Failed to read session file")?;
        let data: SessionData =
            serde_json::from_str(&contents).context("Failed to parse session file")?;
        Ok(Some(data.token))
    }

    fn store(&self, token: &str) -> Result<()> {
        let path = self.session_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = SessionData {
            token: token.to_string(),
            saved_at: Utc::now(),
        };
        let contents = serde_json::to_string_pretty(&data)?;
        std::fs::write(path, contents).context("Failed to write session file")?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path).context("Failed to remove session file")?;
        }
        Ok(())
    }
}

/// Session context shared by the gate and the API client.
///
/// Every read goes to the underlying store, so a clear made through one
/// handle is seen by all clones on their next check.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Session backed by a fresh in-memory slot
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// Get the bearer token if one is present.
    /// Store failures and blank tokens both read as "no credential".
    pub fn token(&self) -> Option<String> {
        match self.store.load() {
            Ok(Some(token)) if !token.trim().is_empty() => Some(token),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read session token, treating as logged out");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Replace the stored credential
    pub fn set(&self, token: &str) -> Result<()> {
        self.store.store(token)?;
        info!("Session credential stored");
        Ok(())
    }

    /// Remove the stored credential. Safe to call when already empty.
    pub fn clear(&self) -> Result<()> {
        self.store.clear()?;
        debug!("Session credential cleared");
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_and_clear() {
        let session = Session::in_memory();
        assert!(!session.is_authenticated());

        session.set("abc123").unwrap();
        assert_eq!(session.token().as_deref(), Some("abc123"));

        session.clear().unwrap();
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_clear_on_empty_slot_is_ok() {
        let session = Session::in_memory();
        assert!(session.clear().is_ok());
        assert!(session.clear().is_ok());
    }

    #[test]
    fn test_blank_token_is_absent() {
        let session = Session::new(Arc::new(MemoryTokenStore::with_token("")));
        assert!(!session.is_authenticated());

        let session = Session::new(Arc::new(MemoryTokenStore::with_token("   ")));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_clones_share_the_slot() {
        let session = Session::in_memory();
        let other = session.clone();
        session.set("abc123").unwrap();
        assert!(other.is_authenticated());
        other.clear().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested"));

        assert_eq!(store.load().unwrap(), None);
        store.store("file-token").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("file-token"));

        // A second store instance sees the persisted slot
        let reopened = FileTokenStore::new(dir.path().join("nested"));
        assert_eq!(reopened.load().unwrap().as_deref(), Some("file-token"));

        store.clear().unwrap();
        assert_eq!(reopened.load().unwrap(), None);
        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_corrupt_session_file_reads_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SESSION_FILE), "not json").unwrap();

        let store = FileTokenStore::new(dir.path().to_path_buf());
        assert!(store.load().is_err());

        let session = Session::new(Arc::new(store));
        assert!(!session.is_authenticated());
    }
}
