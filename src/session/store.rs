use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::SessionError;

/// String-valued key-value storage that carries exam data between stages.
pub trait SessionStore {
    fn save(&mut self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Returns `None` when nothing is stored under `key`.
    fn load(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Removes `key`. Clearing a missing key is not an error.
    fn clear(&mut self, key: &str) -> Result<(), SessionError>;
}

/// Keeps values for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn save(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.values.get(key).cloned())
    }

    fn clear(&mut self, key: &str) -> Result<(), SessionError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Stores each key as `<key>.json` under a base directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{key}.json"))
    }
}

impl SessionStore for FileStore {
    fn save(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.base_path).map_err(|source| SessionError::Io {
            path: self.base_path.clone(),
            source,
        })?;
        fs::write(&path, value).map_err(|source| SessionError::Io { path, source })
    }

    fn load(&self, key: &str) -> Result<Option<String>, SessionError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SessionError::Io { path, source }),
        }
    }

    fn clear(&mut self, key: &str) -> Result<(), SessionError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &mut dyn SessionStore) {
        assert_eq!(store.load("examQuestions").unwrap(), None);

        store.save("examQuestions", "[1]").unwrap();
        assert_eq!(store.load("examQuestions").unwrap().as_deref(), Some("[1]"));

        store.save("examQuestions", "[2]").unwrap();
        assert_eq!(store.load("examQuestions").unwrap().as_deref(), Some("[2]"));

        store.clear("examQuestions").unwrap();
        assert_eq!(store.load("examQuestions").unwrap(), None);
        store.clear("examQuestions").unwrap();
    }

    #[test]
    fn test_memory_store() {
        exercise(&mut MemoryStore::new());
    }

    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("session"));
        exercise(&mut store);
    }

    #[test]
    fn test_file_store_writes_one_file_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.save("examAnswers", "{}").unwrap();
        assert!(dir.path().join("examAnswers.json").exists());
    }
}
