// steward-service/src/utils/store.rs
use crate::models::ServiceError;
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const EVENTS: &str = "events";
pub const STAFF_EVENT_CATEGORIES: &str = "staff_event_categories";
pub const LOCATIONS: &str = "locations";
pub const LOCATION_BOOKINGS: &str = "location_bookings";
pub const LOCATION_USAGE_ANALYTICS: &str = "location_usage_analytics";

/// JSON document store on the local filesystem.
///
/// Every record is one `{id}.json` file. Tenant data lives under
/// `tenants/{tenant_id}/{collection}`; users are global under `users/`.
#[derive(Debug, Clone)]
pub struct DataStore {
    root: PathBuf,
    // Serializes user writes whose outcome depends on the other users
    users_lock: Arc<Mutex<()>>,
}

impl DataStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            users_lock: Arc::new(Mutex::new(())),
        }
    }

    pub(crate) fn users_lock(&self) -> &Mutex<()> {
        &self.users_lock
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    pub(crate) fn tenant_dir(&self, tenant_id: &Uuid, collection: &str) -> PathBuf {
        self.root
            .join("tenants")
            .join(tenant_id.to_string())
            .join(collection)
    }

    fn ensure_dir(dir: &Path) -> Result<(), ServiceError> {
        if !dir.exists() {
            info!("Creating storage directory: {}", dir.display());
            fs::create_dir_all(dir).map_err(|e| {
                error!("Failed to create directory {}: {:?}", dir.display(), e);
                ServiceError::InternalServerError
            })?;
        }
        Ok(())
    }

    pub(crate) fn write_record<T: Serialize>(
        &self,
        dir: &Path,
        id: &Uuid,
        record: &T,
    ) -> Result<(), ServiceError> {
        Self::ensure_dir(dir)?;

        let record_path = dir.join(format!("{}.json", id));
        let record_json = serde_json::to_string_pretty(record).map_err(|e| {
            error!("Failed to serialize record {}: {:?}", id, e);
            ServiceError::InternalServerError
        })?;

        fs::write(&record_path, record_json).map_err(|e| {
            error!("Failed to save record {}: {:?}", record_path.display(), e);
            ServiceError::InternalServerError
        })?;

        debug!("Saved record: {}", record_path.display());
        Ok(())
    }

    pub(crate) fn read_record<T: DeserializeOwned>(
        &self,
        dir: &Path,
        id: &Uuid,
    ) -> Result<Option<T>, ServiceError> {
        let record_path = dir.join(format!("{}.json", id));

        if !record_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&record_path).map_err(|e| {
            error!("Failed to read record {}: {:?}", record_path.display(), e);
            ServiceError::InternalServerError
        })?;

        match serde_json::from_str(&content) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!("Skipping malformed record {}: {:?}", record_path.display(), e);
                Ok(None)
            }
        }
    }

    // Every parseable record in a collection; malformed files are skipped
    pub(crate) fn read_all<T: DeserializeOwned>(&self, dir: &Path) -> Result<Vec<T>, ServiceError> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();

        for entry_result in fs::read_dir(dir).map_err(|e| {
            error!("Failed to read directory {}: {:?}", dir.display(), e);
            ServiceError::InternalServerError
        })? {
            let entry = entry_result.map_err(|e| {
                error!("Failed to read directory entry: {:?}", e);
                ServiceError::InternalServerError
            })?;

            let path = entry.path();
            if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
                let content = fs::read_to_string(&path).map_err(|e| {
                    error!("Failed to read record {}: {:?}", path.display(), e);
                    ServiceError::InternalServerError
                })?;

                match serde_json::from_str(&content) {
                    Ok(record) => records.push(record),
                    Err(e) => {
                        warn!("Skipping malformed record {}: {:?}", path.display(), e);
                        continue;
                    }
                }
            }
        }

        Ok(records)
    }
}

// Store rooted in a fresh temp directory, removed on drop
#[cfg(test)]
pub(crate) struct TempStore(DataStore);

#[cfg(test)]
impl TempStore {
    pub fn new(prefix: &str) -> Self {
        TempStore(DataStore::new(
            std::env::temp_dir().join(format!("{}-{}", prefix, Uuid::new_v4())),
        ))
    }
}

#[cfg(test)]
impl std::ops::Deref for TempStore {
    type Target = DataStore;

    fn deref(&self) -> &DataStore {
        &self.0
    }
}

#[cfg(test)]
impl Drop for TempStore {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(self.0.root());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Note {
        id: Uuid,
        text: String,
    }

    fn temp_store() -> TempStore {
        TempStore::new("steward-store")
    }

    #[test]
    fn write_then_read_back() {
        let store = temp_store();
        let dir = store.tenant_dir(&Uuid::new_v4(), "notes");
        let note = Note { id: Uuid::new_v4(), text: "Choir practice".to_string() };

        store.write_record(&dir, &note.id, &note).unwrap();
        let loaded: Option<Note> = store.read_record(&dir, &note.id).unwrap();
        assert_eq!(loaded, Some(note));
    }

    #[test]
    fn missing_collection_reads_empty() {
        let store = temp_store();
        let notes: Vec<Note> = store.read_all(&store.tenant_dir(&Uuid::new_v4(), "notes")).unwrap();
        assert!(notes.is_empty());
    }

    #[test]
    fn malformed_files_are_skipped() {
        let store = temp_store();
        let dir = store.tenant_dir(&Uuid::new_v4(), "notes");
        let note = Note { id: Uuid::new_v4(), text: "Vestry".to_string() };
        store.write_record(&dir, &note.id, &note).unwrap();
        fs::write(dir.join(format!("{}.json", Uuid::new_v4())), "{ not json").unwrap();
        fs::write(dir.join("README.txt"), "ignored").unwrap();

        let notes: Vec<Note> = store.read_all(&dir).unwrap();
        assert_eq!(notes, vec![note]);
    }

    #[test]
    fn tenants_do_not_share_collections() {
        let store = temp_store();
        let first = store.tenant_dir(&Uuid::new_v4(), EVENTS);
        let second = store.tenant_dir(&Uuid::new_v4(), EVENTS);
        assert_ne!(first, second);
    }

    #[test]
    fn temp_store_cleans_up_on_drop() {
        let store = temp_store();
        let dir = store.tenant_dir(&Uuid::new_v4(), "notes");
        let note = Note { id: Uuid::new_v4(), text: "Bulletin".to_string() };
        store.write_record(&dir, &note.id, &note).unwrap();

        let root = store.root().to_path_buf();
        assert!(root.exists());
        drop(store);
        assert!(!root.exists());
    }
}
