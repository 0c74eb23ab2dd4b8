use crate::error::AuthError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

/// Token pair plus admin flag as persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub admin: bool,
}

/// Durable sink for the session credentials. The file store is the source
/// of truth read at startup; the in-memory [`SessionStore`](crate::SessionStore)
/// state is a cache layered over it, so all writes go through this port.
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Result<Option<StoredSession>, AuthError>;
    fn save(&self, session: &StoredSession) -> Result<(), AuthError>;
    fn clear(&self) -> Result<(), AuthError>;
}

pub struct FileTokenStore {
    session_path: PathBuf,
}

impl FileTokenStore {
    pub fn new() -> Result<Self, AuthError> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| AuthError::Storage("Could not find cache directory".to_string()))?
            .join("souk");
        Self::at(cache_dir)
    }

    /// Store the session file under the given directory, creating it if
    /// needed.
    pub fn at(dir: PathBuf) -> Result<Self, AuthError> {
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| {
                AuthError::Storage(format!("Failed to create cache directory: {}", e))
            })?;
        }
        Ok(Self {
            session_path: dir.join("session.json"),
        })
    }
}

impl TokenStorage for FileTokenStore {
    fn load(&self) -> Result<Option<StoredSession>, AuthError> {
        if !self.session_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.session_path)
            .map_err(|e| AuthError::Storage(format!("Failed to read session: {}", e)))?;

        let session: StoredSession = serde_json::from_str(&json)?;
        Ok(Some(session))
    }

    fn save(&self, session: &StoredSession) -> Result<(), AuthError> {
        let json = serde_json::to_string_pretty(session)?;

        fs::write(&self.session_path, json)
            .map_err(|e| AuthError::Storage(format!("Failed to save session: {}", e)))?;

        // Tokens grant account access; owner read/write only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.session_path)
                .map_err(|e| {
                    AuthError::Storage(format!("Failed to get file permissions: {}", e))
                })?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.session_path, perms).map_err(|e| {
                AuthError::Storage(format!("Failed to set file permissions: {}", e))
            })?;
        }

        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        if self.session_path.exists() {
            fs::remove_file(&self.session_path)
                .map_err(|e| AuthError::Storage(format!("Failed to delete session: {}", e)))?;
        }
        Ok(())
    }
}

/// In-memory storage for tests. Clones share the same slot so a test can
/// hold a handle and inspect what the store persisted.
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<StoredSession>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryTokenStore {
    fn load(&self) -> Result<Option<StoredSession>, AuthError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, session: &StoredSession) -> Result<(), AuthError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
