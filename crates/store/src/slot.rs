use std::collections::HashMap;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::error::{StoreError, StoreResult};

/// A local key/value slot holding string blobs (the browser's local storage,
/// a directory of files, or a map in memory).
pub trait KeyValueSlot: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<S> KeyValueSlot for Arc<S>
where
    S: KeyValueSlot + ?Sized,
{
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}

/// In-memory slot for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct InMemorySlot {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with existing content (e.g. data from an older install).
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let slot = Self::new();
        if let Ok(mut map) = slot.inner.write() {
            map.insert(key.into(), value.into());
        }
        slot
    }
}

impl KeyValueSlot for InMemorySlot {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key (`<dir>/<key>.json`), replaced atomically on write.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        safe_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueSlot for FileSlot {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        write_atomic_file(&path, value.as_bytes())
    }
}

fn safe_key(key: &str) -> StoreResult<()> {
    if key.is_empty() || key.contains('/') || key.contains('\\') || key.contains("..") {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

fn write_atomic_file(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let parent = path
        .parent()
        .ok_or_else(|| StoreError::InvalidKey(path.display().to_string()))?;
    std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;

    let tmp = parent.join(format!(
        ".{}.tmp.{}",
        path.file_name().and_then(|s| s.to_str()).unwrap_or("slot"),
        std::process::id()
    ));
    {
        let mut f = std::fs::File::create(&tmp).map_err(|e| StoreError::io(&tmp, e))?;
        f.write_all(bytes).map_err(|e| StoreError::io(&tmp, e))?;
        f.sync_all().map_err(|e| StoreError::io(&tmp, e))?;
    }
    std::fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))?;
    Ok(())
}
