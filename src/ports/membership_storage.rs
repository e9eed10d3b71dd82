//! Membership storage port.
//!
//! Persists the single membership record. Absence of a record is the valid
//! fresh-install state, not an error, so `load` returns an Option.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::membership::MembershipRecord;

/// Errors that can occur during membership storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to serialize membership record: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize membership record: {0}")]
    DeserializationFailed(String),
}

/// Port for persisting and loading the membership record.
#[async_trait]
pub trait MembershipStorage: Send + Sync {
    /// Load the persisted record. `None` means nothing was ever persisted.
    async fn load(&self) -> Result<Option<MembershipRecord>, StorageError>;

    /// Persist the record, replacing any previous state.
    async fn save(&self, record: &MembershipRecord) -> Result<(), StorageError>;
}
