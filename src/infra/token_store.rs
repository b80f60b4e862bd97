//! File-backed key-value store holding the authorization token.
//!
//! The file is a flat JSON object so other tools can keep their own entries
//! beside ours; writes preserve unknown keys.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::warn;

use crate::application::ports::CredentialProvider;

use super::error::InfraError;

#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
    key: String,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> Result<Option<String>, InfraError> {
        let entries = self.load()?;
        match entries.get(&self.key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(token)) => Ok(Some(token.clone())),
            Some(other) => Err(InfraError::token_store(format!(
                "entry `{}` is not a string: {other}",
                self.key
            ))),
        }
    }

    pub fn set(&self, token: &str) -> Result<(), InfraError> {
        let mut entries = self.load()?;
        entries.insert(self.key.clone(), Value::String(token.to_string()));
        self.save(&entries)
    }

    /// Returns whether an entry was present.
    pub fn remove(&self) -> Result<bool, InfraError> {
        let mut entries = self.load()?;
        let removed = entries.remove(&self.key).is_some();
        if removed {
            self.save(&entries)?;
        }
        Ok(removed)
    }

    fn load(&self) -> Result<Map<String, Value>, InfraError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&raw).map_err(|err| {
            InfraError::token_store(format!("failed to parse {}: {err}", self.path.display()))
        })
    }

    fn save(&self, entries: &Map<String, Value>) -> Result<(), InfraError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(entries)
            .map_err(|err| InfraError::token_store(format!("failed to encode entries: {err}")))?;
        fs::write(&self.path, body)?;
        Ok(())
    }
}

impl CredentialProvider for TokenStore {
    fn token(&self) -> Option<String> {
        match self.get() {
            Ok(token) => token,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "token store unreadable; sending no credentials");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> TokenStore {
        TokenStore::new(dir.path().join("nested/storage.json"), "token")
    }

    #[test]
    fn missing_file_reads_as_empty() -> Result<(), InfraError> {
        let dir = TempDir::new().expect("tmp dir");
        assert_eq!(store(&dir).get()?, None);
        assert_eq!(store(&dir).token(), None);
        Ok(())
    }

    #[test]
    fn set_then_get_round_trips_and_keeps_other_keys() -> Result<(), InfraError> {
        let dir = TempDir::new().expect("tmp dir");
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"theme":"dark"}"#)?;

        let store = TokenStore::new(&path, "token");
        store.set("secret")?;
        assert_eq!(store.token().as_deref(), Some("secret"));

        let raw = fs::read_to_string(&path)?;
        assert!(raw.contains("\"theme\""));
        Ok(())
    }

    #[test]
    fn remove_reports_presence() -> Result<(), InfraError> {
        let dir = TempDir::new().expect("tmp dir");
        let store = store(&dir);
        assert!(!store.remove()?);
        store.set("secret")?;
        assert!(store.remove()?);
        assert_eq!(store.get()?, None);
        Ok(())
    }

    #[test]
    fn corrupt_file_yields_no_credentials() {
        let dir = TempDir::new().expect("tmp dir");
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").expect("write");

        let store = TokenStore::new(&path, "token");
        assert!(matches!(store.get(), Err(InfraError::TokenStore { .. })));
        assert_eq!(store.token(), None);
    }
}
