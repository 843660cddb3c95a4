//! Session persistence
//!
//! One YAML file in the user state directory holds the current demo
//! session: its id, start time, and quota counts. A new session (the only
//! thing that resets the quota) is created by replacing the file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::Config;
use crate::core::identity::{RecordId, RecordPrefix};
use crate::session::quota::QuotaGuard;

const SESSION_FILE: &str = "session.yaml";

/// The current demo session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session identifier
    pub id: RecordId,

    /// When the session started
    pub started: DateTime<Utc>,

    /// Quote quota for this session
    pub quota: QuotaGuard,
}

impl Session {
    /// Start a fresh session with a full quota
    pub fn start() -> Self {
        Self {
            id: RecordId::new(RecordPrefix::Ses),
            started: Utc::now(),
            quota: QuotaGuard::default(),
        }
    }
}

/// Loads and saves the session file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Open the store at the configured state directory
    pub fn open() -> Result<Self, SessionError> {
        let dir = Config::state_dir().ok_or(SessionError::NoStateDir)?;
        Ok(Self {
            path: dir.join(SESSION_FILE),
        })
    }

    /// Open a store backed by an explicit directory
    pub fn at_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(SESSION_FILE),
        }
    }

    /// Path of the session file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the current session, or start a fresh one if none exists yet
    ///
    /// The fresh session is not written until the first `save`, so merely
    /// inspecting state never creates files.
    pub fn load_or_start(&self) -> Result<Session, SessionError> {
        if !self.path.exists() {
            return Ok(Session::start());
        }

        let contents =
            std::fs::read_to_string(&self.path).map_err(|source| SessionError::Io {
                path: self.path.clone(),
                source,
            })?;
        let mut session: Session =
            serde_yml::from_str(&contents).map_err(|source| SessionError::Parse {
                path: self.path.clone(),
                source,
            })?;
        session.quota = session.quota.normalized();
        Ok(session)
    }

    /// Write the session back to disk
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SessionError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let yaml = serde_yml::to_string(session).map_err(SessionError::Serialize)?;
        std::fs::write(&self.path, yaml).map_err(|source| SessionError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the current session with a fresh one and persist it
    pub fn reset(&self) -> Result<Session, SessionError> {
        let session = Session::start();
        self.save(&session)?;
        Ok(session)
    }
}

/// Errors from session persistence
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not determine a state directory (set FABQUOTE_STATE_DIR)")]
    NoStateDir,

    #[error("session file i/o failed at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("session file at {path} is corrupt; run `fabquote session reset`")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("failed to serialize session")]
    Serialize(#[source] serde_yml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_without_file_starts_fresh() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::at_dir(tmp.path());

        let session = store.load_or_start().unwrap();
        assert_eq!(session.quota.used(), 0);
        // Inspecting state must not create the file
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::at_dir(tmp.path());

        let mut session = Session::start();
        session.quota.try_consume().unwrap();
        session.quota.try_consume().unwrap();
        store.save(&session).unwrap();

        let loaded = store.load_or_start().unwrap();
        assert_eq!(loaded.id, session.id);
        assert_eq!(loaded.quota.used(), 2);
    }

    #[test]
    fn test_reset_replaces_session() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::at_dir(tmp.path());

        let mut session = Session::start();
        for _ in 0..3 {
            session.quota.try_consume().unwrap();
        }
        store.save(&session).unwrap();

        let fresh = store.reset().unwrap();
        assert_ne!(fresh.id, session.id);
        assert_eq!(fresh.quota.used(), 0);

        let loaded = store.load_or_start().unwrap();
        assert_eq!(loaded.id, fresh.id);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::at_dir(tmp.path());
        std::fs::write(store.path(), "not: [valid").unwrap();

        assert!(matches!(
            store.load_or_start(),
            Err(SessionError::Parse { .. })
        ));
    }

    #[test]
    fn test_tampered_count_is_clamped_on_load() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::at_dir(tmp.path());

        let id = RecordId::new(RecordPrefix::Ses);
        let yaml = format!(
            "id: {}\nstarted: 2026-01-01T00:00:00Z\nquota:\n  used: 42\n  limit: 5\n",
            id
        );
        std::fs::write(store.path(), yaml).unwrap();

        let session = store.load_or_start().unwrap();
        assert_eq!(session.quota.used(), 5);
    }
}
