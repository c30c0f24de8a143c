//! Persistence client contract
//!
//! The engine persists partial profiles best-effort through this trait;
//! the concrete transport (REST, database, ...) lives with the host
//! application. Implementations are expected to provide idempotent upsert
//! semantics by field, since partial and duplicate calls are normal.

use crate::models::{ContactSnapshot, ProfileSlice};
use async_trait::async_trait;
use bookflow_common::Result;
use uuid::Uuid;

/// External store for partial profile saves
#[async_trait]
pub trait PersistenceClient: Send + Sync {
    /// Register a new session keyed by `session_id` with its contact info
    async fn create_session(&self, session_id: Uuid, contact: ContactSnapshot) -> Result<()>;

    /// Upsert the given field slice for an existing session
    async fn save(&self, session_id: Uuid, fields: ProfileSlice) -> Result<()>;
}

/// Persistence client that acknowledges everything and stores nothing
///
/// For hosts that run the questionnaire without a backing store, and for
/// tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPersistenceClient;

#[async_trait]
impl PersistenceClient for NullPersistenceClient {
    async fn create_session(&self, _session_id: Uuid, _contact: ContactSnapshot) -> Result<()> {
        Ok(())
    }

    async fn save(&self, _session_id: Uuid, _fields: ProfileSlice) -> Result<()> {
        Ok(())
    }
}
