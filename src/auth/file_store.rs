//! File-backed session storage: one JSON file per session under a
//! configurable directory, keyed by the client-held session id cookie.
//! Expiry is enforced here, not by the handlers — an expired file is
//! indistinguishable from a missing one.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use actix_session::storage::{LoadError, SaveError, SessionKey, SessionStore, UpdateError};
use actix_web::cookie::time::Duration;
use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

#[derive(Serialize, Deserialize)]
struct SessionRecord {
    state: HashMap<String, String>,
    expires_at: i64,
}

impl SessionRecord {
    fn expired(&self) -> bool {
        self.expires_at <= Utc::now().timestamp()
    }
}

fn generate_session_key() -> SessionKey {
    let value: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    SessionKey::try_from(value).expect("64 alphanumeric chars is a valid session key")
}

impl FileSessionStore {
    pub fn new(dir: PathBuf) -> std::io::Result<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Keys arrive from the client cookie; only the alphanumeric shape we
    /// generate may touch the filesystem.
    fn path_for(&self, session_key: &SessionKey) -> Option<PathBuf> {
        let key = session_key.as_ref();
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        Some(self.dir.join(format!("{key}.json")))
    }

    fn read_record(&self, session_key: &SessionKey) -> Result<Option<SessionRecord>, LoadError> {
        let Some(path) = self.path_for(session_key) else {
            return Ok(None);
        };
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LoadError::Other(anyhow::Error::new(e))),
        };
        let record: SessionRecord = serde_json::from_slice(&bytes)
            .map_err(|e| LoadError::Deserialization(anyhow::Error::new(e)))?;
        if record.expired() {
            let _ = std::fs::remove_file(&path);
            return Ok(None);
        }
        Ok(Some(record))
    }

    fn write_record(
        &self,
        session_key: &SessionKey,
        state: HashMap<String, String>,
        ttl: &Duration,
    ) -> anyhow::Result<()> {
        let path = self
            .path_for(session_key)
            .ok_or_else(|| anyhow::anyhow!("invalid session key"))?;
        let record = SessionRecord {
            state,
            expires_at: Utc::now().timestamp() + ttl.whole_seconds(),
        };
        let bytes = serde_json::to_vec(&record)?;
        std::fs::write(&path, bytes)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    async fn load(
        &self,
        session_key: &SessionKey,
    ) -> Result<Option<HashMap<String, String>>, LoadError> {
        Ok(self.read_record(session_key)?.map(|r| r.state))
    }

    async fn save(
        &self,
        session_state: HashMap<String, String>,
        ttl: &Duration,
    ) -> Result<SessionKey, SaveError> {
        let session_key = generate_session_key();
        self.write_record(&session_key, session_state, ttl)
            .map_err(SaveError::Other)?;
        Ok(session_key)
    }

    async fn update(
        &self,
        session_key: SessionKey,
        session_state: HashMap<String, String>,
        ttl: &Duration,
    ) -> Result<SessionKey, UpdateError> {
        self.write_record(&session_key, session_state, ttl)
            .map_err(UpdateError::Other)?;
        Ok(session_key)
    }

    async fn update_ttl(&self, session_key: &SessionKey, ttl: &Duration) -> anyhow::Result<()> {
        // Sliding expiry: refresh the deadline without touching the state.
        let record = self
            .read_record(session_key)
            .map_err(|e| anyhow::anyhow!("{e}"))?;
        if let Some(record) = record {
            self.write_record(session_key, record.state, ttl)?;
        }
        Ok(())
    }

    async fn delete(&self, session_key: &SessionKey) -> anyhow::Result<()> {
        if let Some(path) = self.path_for(session_key) {
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(anyhow::Error::new(e)),
            }
        }
        Ok(())
    }
}
