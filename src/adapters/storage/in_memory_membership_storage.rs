//! In-memory membership storage for tests and ephemeral runs.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::membership::MembershipRecord;
use crate::ports::{MembershipStorage, StorageError};

/// Storage that keeps the record in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryMembershipStorage {
    record: Mutex<Option<MembershipRecord>>,
}

impl InMemoryMembershipStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the storage with an existing record.
    pub fn with_record(record: MembershipRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }
}

#[async_trait]
impl MembershipStorage for InMemoryMembershipStorage {
    async fn load(&self) -> Result<Option<MembershipRecord>, StorageError> {
        let guard = self
            .record
            .lock()
            .map_err(|_| StorageError::Io("storage lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    async fn save(&self, record: &MembershipRecord) -> Result<(), StorageError> {
        let mut guard = self
            .record
            .lock()
            .map_err(|_| StorageError::Io("storage lock poisoned".to_string()))?;
        *guard = Some(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::membership::MembershipStatus;

    #[tokio::test]
    async fn starts_empty() {
        let storage = InMemoryMembershipStorage::new();
        assert!(storage.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_returns_the_record() {
        let storage = InMemoryMembershipStorage::new();

        let mut record = MembershipRecord::default();
        record.start_trial(Timestamp::from_unix_secs(1_700_000_000));
        storage.save(&record).await.unwrap();

        let loaded = storage.load().await.unwrap().unwrap();
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn with_record_seeds_initial_state() {
        let mut record = MembershipRecord::default();
        record.activate_premium(30, Timestamp::from_unix_secs(1_700_000_000));

        let storage = InMemoryMembershipStorage::with_record(record);
        let loaded = storage.load().await.unwrap().unwrap();
        assert_eq!(loaded.status, MembershipStatus::Premium);
    }
}
