//! File-based membership storage adapter.
//!
//! Persists the membership record as a single YAML file under the data
//! directory. The file is created on first save; a missing file is the
//! fresh-install state.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::membership::MembershipRecord;
use crate::ports::{MembershipStorage, StorageError};

const RECORD_FILE: &str = "membership.yaml";

/// File-backed storage for the membership record.
#[derive(Debug, Clone)]
pub struct FileMembershipStorage {
    base_path: PathBuf,
}

impl FileMembershipStorage {
    /// Create a new file storage rooted at the given data directory.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn record_path(&self) -> PathBuf {
        self.base_path.join(RECORD_FILE)
    }

    async fn ensure_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))
    }
}

#[async_trait]
impl MembershipStorage for FileMembershipStorage {
    async fn load(&self) -> Result<Option<MembershipRecord>, StorageError> {
        let path = self.record_path();
        if !path.exists() {
            return Ok(None);
        }

        let yaml = fs::read_to_string(&path)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        let record = serde_yaml::from_str(&yaml)
            .map_err(|e| StorageError::DeserializationFailed(e.to_string()))?;

        Ok(Some(record))
    }

    async fn save(&self, record: &MembershipRecord) -> Result<(), StorageError> {
        self.ensure_dir().await?;

        let yaml = serde_yaml::to_string(record)
            .map_err(|e| StorageError::SerializationFailed(e.to_string()))?;

        fs::write(self.record_path(), yaml)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))
    }
}
