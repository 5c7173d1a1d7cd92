//! # Session Persistence
//!
//! The access token is the only persisted state. It lives in
//! `~/.orgdesk/session.json` and is written atomically (`.tmp` + rename).
//!
//! ```text
//! start ──restore()──▶ Session ──token()──▶ ApiClient (every request)
//!                        │  ▲
//!             begin(tok) │  │ end()
//!                        ▼  │
//!                     TokenStore (file or memory)
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// On-disk shape of the session file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub access_token: String,
    pub saved_at: DateTime<Utc>,
}

/// Where the token is kept between runs.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> io::Result<Option<String>>;
    fn save(&self, token: &str) -> io::Result<()>;
    fn clear(&self) -> io::Result<()>;
}

/// Returns `~/.orgdesk/session.json`.
pub fn session_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".orgdesk").join("session.json"))
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        let stored: StoredSession =
            serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        debug!("Loaded token saved at {}", stored.saved_at);
        Ok(Some(stored.access_token).filter(|t| !t.is_empty()))
    }

    fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let stored = StoredSession {
            access_token: token.to_string(),
            saved_at: Utc::now(),
        };
        atomic_write_json(&self.path, &stored)
    }

    fn clear(&self) -> io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Keeps the token in memory only. Used when there is no home directory and in tests.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.token.lock().map(|t| t.clone()).unwrap_or_default())
    }

    fn save(&self, token: &str) -> io::Result<()> {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
        Ok(())
    }
}

/// The signed-in state shared by the API client and the event loop.
///
/// The in-memory token is authoritative; store failures are logged and do
/// not stop a login or logout.
pub struct Session {
    token: RwLock<Option<String>>,
    store: Box<dyn TokenStore>,
}

impl Session {
    /// Starts a session from whatever the store holds.
    pub fn restore(store: Box<dyn TokenStore>) -> Self {
        let token = match store.load() {
            Ok(token) => token,
            Err(e) => {
                warn!("Failed to read stored token: {}", e);
                None
            }
        };
        if token.is_some() {
            info!("Restored stored session");
        }
        Self {
            token: RwLock::new(token),
            store,
        }
    }

    /// Session with no token and an in-memory store.
    pub fn anonymous() -> Self {
        Self::restore(Box::new(MemoryTokenStore::default()))
    }

    pub fn begin(&self, token: String) {
        if let Err(e) = self.store.save(&token) {
            warn!("Failed to persist token: {}", e);
        }
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token);
        }
        info!("Session started");
    }

    pub fn end(&self) {
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear stored token: {}", e);
        }
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
        info!("Session ended");
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    pub fn is_active(&self) -> bool {
        self.token().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("session.json"));

        assert_eq!(store.load().unwrap(), None);
        store.save("tok-1").unwrap();
        assert_eq!(store.load().unwrap(), Some("tok-1".to_string()));
        assert!(!dir.path().join("nested").join("session.tmp").exists());

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();
        let store = FileTokenStore::new(path);
        assert_eq!(store.load().unwrap_err().kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_restore_survives_unreadable_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{").unwrap();
        let session = Session::restore(Box::new(FileTokenStore::new(path)));
        assert!(!session.is_active());
    }

    #[test]
    fn test_begin_persists_and_end_clears() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let session = Session::restore(Box::new(FileTokenStore::new(path.clone())));
        assert_eq!(session.token(), None);
        session.begin("tok-2".to_string());
        assert_eq!(session.token().as_deref(), Some("tok-2"));

        // A fresh start sees the persisted token
        let restored = Session::restore(Box::new(FileTokenStore::new(path.clone())));
        assert_eq!(restored.token().as_deref(), Some("tok-2"));

        restored.end();
        assert!(!restored.is_active());
        assert!(!path.exists());
    }

    #[test]
    fn test_memory_store() {
        let session = Session::restore(Box::new(MemoryTokenStore::with_token("abc")));
        assert_eq!(session.token().as_deref(), Some("abc"));
        session.end();
        assert_eq!(session.token(), None);
    }
}
