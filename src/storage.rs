use crate::errors::AppError;
use std::{collections::BTreeMap, env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub type Entries = BTreeMap<String, String>;

/// Persistent string key-value storage, the server-side stand-in for the
/// browser's local storage. Reads are served from memory; writes persist
/// before returning.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(
        &mut self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), AppError>> + Send;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Entries,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Entries,
}

impl JsonFileStore {
    pub async fn open(path: PathBuf) -> Self {
        let entries = load_entries(&path).await;
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value.to_string());
        persist_entries(&self.path, &next).await?;
        self.entries = next;
        Ok(())
    }
}

/// The store the server runs with; tests use the in-memory variant.
#[derive(Debug, Clone)]
pub enum Store {
    Memory(MemoryStore),
    File(JsonFileStore),
}

impl From<MemoryStore> for Store {
    fn from(store: MemoryStore) -> Self {
        Store::Memory(store)
    }
}

impl From<JsonFileStore> for Store {
    fn from(store: JsonFileStore) -> Self {
        Store::File(store)
    }
}

impl PreferenceStore for Store {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            Store::Memory(store) => store.get(key),
            Store::File(store) => store.get(key),
        }
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        match self {
            Store::Memory(store) => store.set(key, value).await,
            Store::File(store) => store.set(key, value).await,
        }
    }
}

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/preferences.json")
}

pub async fn load_entries(path: &Path) -> Entries {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to parse preferences file: {err}");
                Entries::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Entries::default(),
        Err(err) => {
            error!("failed to read preferences file: {err}");
            Entries::default()
        }
    }
}

pub async fn persist_entries(path: &Path, entries: &Entries) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    let payload = serde_json::to_vec_pretty(entries)?;
    fs::write(path, payload).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = env::temp_dir();
        path.push(format!("prefs_{name}_{}_{nanos}", std::process::id()));
        path.push("preferences.json");
        path
    }

    #[tokio::test]
    async fn file_store_survives_reopen() {
        let path = temp_path("reopen");
        let mut store = JsonFileStore::open(path.clone()).await;
        assert_eq!(store.get("mode"), None);

        store.set("mode", "light").await.unwrap();
        store.set("theme", "ocean").await.unwrap();

        let reopened = JsonFileStore::open(path.clone()).await;
        assert_eq!(reopened.get("mode").as_deref(), Some("light"));
        assert_eq!(reopened.get("theme").as_deref(), Some("ocean"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty() {
        let path = temp_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"not json").unwrap();

        let store = JsonFileStore::open(path.clone()).await;
        assert_eq!(store.get("mode"), None);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
