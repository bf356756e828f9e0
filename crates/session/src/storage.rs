//! Durable key-value storage backends.
//!
//! The interface is deliberately the shape of browser `localStorage`:
//! synchronous string get/set/remove, no transactions, no watchers. Two
//! processes writing the same keys are last-write-wins.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;

/// Synchronous string key-value storage.
pub trait SessionStorage {
    /// Read a key; `None` when absent (backend read failures are logged
    /// by implementations and reported as absent).
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Remove a key; removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> anyhow::Result<()>;
}

/// In-process storage for tests and the demo walkthrough.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed storage: one file per key under an app-data directory.
///
/// The stored surface is two small keys, so plain files are enough; no
/// database. IO failures on reads are logged and degrade to "absent".
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at `dir`, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create session directory at {dir:?}"))?;
        Ok(Self { dir })
    }

    /// Open storage at the default location: `{app_data_dir}/gestion`.
    pub fn open_default() -> anyhow::Result<Self> {
        Self::open(Self::default_dir()?)
    }

    /// Resolve the default storage directory from the OS app-data dir.
    pub fn default_dir() -> anyhow::Result<PathBuf> {
        let base = dirs::data_dir()
            .or_else(|| {
                dirs::home_dir().map(|mut h| {
                    h.push(".local");
                    h.push("share");
                    h
                })
            })
            .context("failed to resolve OS app data directory")?;
        Ok(base.join("gestion"))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match std::fs::read_to_string(self.key_path(key)) {
            Ok(value) => Some(value),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                tracing::error!(key, "failed to read session key: {err:?}");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        std::fs::write(self.key_path(key), value)
            .with_context(|| format!("failed to write session key '{key}'"))
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("failed to remove session key '{key}'"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trips_keys() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("autenticado"), None);

        storage.set("autenticado", "true").unwrap();
        assert_eq!(storage.get("autenticado").as_deref(), Some("true"));

        storage.remove("autenticado").unwrap();
        storage.remove("autenticado").unwrap();
        assert_eq!(storage.get("autenticado"), None);
    }

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();

        let mut storage = FileStorage::open(dir.path()).unwrap();
        storage.set("usuarioActual", "{}").unwrap();

        let reopened = FileStorage::open(dir.path()).unwrap();
        assert_eq!(reopened.get("usuarioActual").as_deref(), Some("{}"));

        let mut storage = reopened;
        storage.remove("usuarioActual").unwrap();
        assert_eq!(storage.get("usuarioActual"), None);
    }
}
