//! JSON file backed lead store

use super::LeadStore;
use crate::Result;
use crate::error::StoreError;
use crate::types::LeadRecord;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Lead store persisted as a pretty-printed JSON array in a single file
///
/// Every call re-reads the file; nothing is cached between requests. Appends
/// are serialized through an async mutex so concurrent requests in this
/// process cannot interleave their read-modify-write cycles, and each rewrite
/// goes to a sibling temporary file that is renamed over the store.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store backed by `path`. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "leads.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Recovering read: anything that is not a readable lead list is empty.
    async fn read_records(&self) -> Vec<LeadRecord> {
        match self.read_existing().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "lead store unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Read used before a rewrite. A missing file or invalid contents start a
    /// fresh list, but any other I/O error is returned so the rewrite never
    /// replaces records it could not see.
    async fn read_existing(&self) -> std::result::Result<Vec<LeadRecord>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match serde_json::from_slice::<Vec<LeadRecord>>(&bytes) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "lead store is not a valid lead list, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn write_records(&self, records: &[LeadRecord]) -> std::result::Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(records)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let temp_path = self.temp_path();
        let write_err = |source: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let mut file = tokio::fs::File::create(&temp_path)
            .await
            .map_err(write_err)?;
        file.write_all(&json).await.map_err(write_err)?;
        file.sync_all().await.map_err(write_err)?;
        drop(file);

        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            tokio::fs::remove_file(&temp_path).await.ok();
            return Err(write_err(e));
        }

        Ok(())
    }
}

#[async_trait]
impl LeadStore for JsonFileStore {
    async fn load_all(&self) -> Vec<LeadRecord> {
        self.read_records().await
    }

    async fn append(&self, record: LeadRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read_existing().await?;
        records.push(record);
        self.write_records(&records).await?;

        tracing::debug!(
            path = %self.path.display(),
            total = records.len(),
            "lead appended"
        );
        Ok(())
    }
}
