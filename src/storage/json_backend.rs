use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use crate::{errors::Result, utils};

use super::KeyValueStore;

const NAMESPACE_EXTENSION: &str = "json";
const TMP_EXTENSION: &str = "tmp";

/// File-backed store keeping one JSON object (key → string value) per
/// namespace under a root directory. Writes stage to a temporary file and
/// rename into place, so a failed write never corrupts the committed file.
pub struct JsonFileStore {
    root: PathBuf,
    // Serializes read-modify-write cycles across callers sharing this store.
    guard: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            guard: Mutex::new(()),
        })
    }

    /// Opens the store in the default application data directory.
    pub fn new_default() -> Result<Self> {
        Self::new(utils::app_data_dir())
    }

    pub fn namespace_path(&self, namespace: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", namespace, NAMESPACE_EXTENSION))
    }

    fn read_namespace(&self, namespace: &str) -> Result<BTreeMap<String, String>> {
        let path = self.namespace_path(namespace);
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn write_namespace(&self, namespace: &str, entries: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        write_atomic(&self.namespace_path(namespace), &json)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        let _guard = self.guard.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_namespace(namespace)?.remove(key))
    }

    fn set(&self, namespace: &str, key: &str, value: &str) -> Result<()> {
        let _guard = self.guard.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_namespace(namespace)?;
        entries.insert(key.to_owned(), value.to_owned());
        self.write_namespace(namespace, &entries)
    }

    // One read-modify-write, so the whole batch commits in a single rename.
    fn set_many(&self, namespace: &str, batch: &[(&str, String)]) -> Result<()> {
        let _guard = self.guard.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_namespace(namespace)?;
        for (key, value) in batch {
            entries.insert((*key).to_owned(), value.clone());
        }
        self.write_namespace(namespace, &entries)
    }
}

/// Writes the payload atomically by staging to a temporary file.
fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let tmp = path.with_extension(TMP_EXTENSION);
    fs::write(&tmp, data)?;
    fs::rename(tmp, path)?;
    Ok(())
}
