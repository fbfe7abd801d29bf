//! JSON-file document store

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;

use async_trait::async_trait;
use fs2::FileExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::result::{Error, Result};
use crate::ports::document_store::{run_query, Document, DocumentStore, Query};

const LOCK_FILE: &str = ".lock";

/// Store backend keeping one JSON file per collection in a data directory
///
/// Suited to single-machine shells and offline use. Writes go through a
/// temp file and rename so a crash never leaves a half-written
/// collection, and the directory carries an advisory lock so two
/// processes cannot mutate the same data concurrently. Every filesystem
/// failure surfaces as a store error; an unreadable file is never
/// mistaken for an empty collection.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
    /// Held for the lifetime of the store; dropping releases the lock
    _lock: File,
    /// Serializes read-modify-write cycles within this process
    guard: Mutex<()>,
}

impl JsonFileStore {
    /// Open a data directory, creating it if needed, and take its lock
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            Error::store(format!(
                "cannot create data directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let lock_path = dir.join(LOCK_FILE);
        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&lock_path)
            .map_err(|e| {
                Error::store(format!("cannot open lock file {}: {}", lock_path.display(), e))
            })?;
        lock.try_lock_exclusive().map_err(|_| {
            Error::store(format!(
                "data directory {} is locked by another process",
                dir.display()
            ))
        })?;

        debug!("opened json document store at {}", dir.display());
        Ok(Self {
            dir,
            _lock: lock,
            guard: Mutex::new(()),
        })
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.json", collection))
    }

    fn load(&self, collection: &str) -> Result<BTreeMap<String, Document>> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = fs::read_to_string(&path)
            .map_err(|e| Error::store(format!("cannot read {}: {}", path.display(), e)))?;
        serde_json::from_str(&data).map_err(|e| {
            Error::store(format!("corrupt collection file {}: {}", path.display(), e))
        })
    }

    fn save(&self, collection: &str, records: &BTreeMap<String, Document>) -> Result<()> {
        let path = self.collection_path(collection);
        let tmp = path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(records)?;
        fs::write(&tmp, data)
            .map_err(|e| Error::store(format!("cannot write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path)
            .map_err(|e| Error::store(format!("cannot replace {}: {}", path.display(), e)))?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn put(&self, collection: &str, id: &str, document: Document) -> Result<()> {
        let _guard = self.guard.lock().await;
        let mut records = self.load(collection)?;
        records.insert(id.to_string(), document);
        self.save(collection, &records)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let _guard = self.guard.lock().await;
        Ok(self.load(collection)?.remove(id))
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let _guard = self.guard.lock().await;
        let mut records = self.load(collection)?;
        if records.remove(id).is_some() {
            self.save(collection, &records)?;
        }
        Ok(())
    }

    async fn find(&self, collection: &str, query: Query) -> Result<Vec<Document>> {
        let _guard = self.guard.lock().await;
        let records = self.load(collection)?;
        Ok(run_query(records.values(), &query))
    }
}
