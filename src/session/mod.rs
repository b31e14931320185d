// Login session persistence
//
// The session context survives restarts as a single JSON blob on disk. Loading is
// tolerant: a missing or unreadable blob means "logged out", never a crash, because a
// corrupt cache must not lock a user out of the portal.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub id: i64,
    pub name: String,
}

/// Everything the portal remembers about the signed-in user between launches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub current_user: Option<UserRecord>,
    #[serde(default)]
    pub selected_company: Option<CompanyRecord>,
    #[serde(default)]
    pub dark_mode: bool,
    /// Per-company user lists, cached so the member picker does not refetch on every
    /// open.
    #[serde(default)]
    pub user_list_cache: HashMap<i64, Vec<UserRecord>>,
}

impl SessionContext {
    pub fn is_authenticated(&self) -> bool {
        self.auth_token.is_some() && self.current_user.is_some()
    }

    pub fn sign_out(&mut self) {
        self.auth_token = None;
        self.current_user = None;
        self.selected_company = None;
        self.user_list_cache.clear();
    }
}

pub trait SessionStore {
    /// Returns the stored context, or a default one when nothing usable is on disk.
    fn load(&self) -> SessionContext;
    fn save(&self, session: &SessionContext) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new() -> Result<Self> {
        let base = dirs::config_dir().context("no user config directory available")?;
        Ok(Self {
            dir: base.join("portal-client"),
        })
    }

    pub fn at(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> SessionContext {
        let path = self.path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => {
                info!("[PHASE: session] [STEP: load] no stored session at {:?}", path);
                return SessionContext::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(err) => {
                warn!(
                    "[PHASE: session] [STEP: load] stored session unreadable, starting signed out: {}",
                    err
                );
                SessionContext::default()
            }
        }
    }

    fn save(&self, session: &SessionContext) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating session directory {:?}", self.dir))?;
        let blob = serde_json::to_string_pretty(session)?;
        fs::write(self.path(), blob)
            .with_context(|| format!("writing session file {:?}", self.path()))?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("removing session file {:?}", path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_session() -> SessionContext {
        SessionContext {
            auth_token: Some("tok-abc".to_string()),
            current_user: Some(UserRecord {
                id: 42,
                email: "sam@example.com".to_string(),
                display_name: "Sam".to_string(),
                role: Some("admin".to_string()),
            }),
            selected_company: Some(CompanyRecord {
                id: 7,
                name: "Solara".to_string(),
            }),
            dark_mode: true,
            user_list_cache: HashMap::new(),
        }
    }

    #[test]
    fn save_then_load_restores_the_session() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::at(dir.path().to_path_buf());

        store.save(&sample_session()).unwrap();
        let loaded = store.load();
        assert_eq!(loaded, sample_session());
        assert!(loaded.is_authenticated());
    }

    #[test]
    fn missing_file_loads_as_signed_out() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::at(dir.path().to_path_buf());

        let loaded = store.load();
        assert!(!loaded.is_authenticated());
        assert_eq!(loaded, SessionContext::default());
    }

    #[test]
    fn corrupt_blob_loads_as_signed_out_instead_of_failing() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::at(dir.path().to_path_buf());
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(dir.path().join(SESSION_FILE), "{not json").unwrap();

        let loaded = store.load();
        assert_eq!(loaded, SessionContext::default());
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::at(dir.path().to_path_buf());

        store.save(&sample_session()).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), SessionContext::default());
    }

    #[test]
    fn sign_out_drops_credentials_and_caches() {
        let mut session = sample_session();
        session
            .user_list_cache
            .insert(7, vec![session.current_user.clone().unwrap()]);

        session.sign_out();

        assert!(!session.is_authenticated());
        assert!(session.user_list_cache.is_empty());
        assert!(session.dark_mode, "display preferences survive sign-out");
    }
}
