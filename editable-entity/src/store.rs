//! Persistence port.
//!
//! The lifecycle never talks to a network itself; it hands payloads to a
//! [`ResourceStore`] injected by the host (an HTTP JSON:API client, a local
//! cache, or [`MemoryStore`](crate::mock::MemoryStore) in tests).

use async_trait::async_trait;
use editable_types::EntityRef;
use serde_json::Value;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors a store may report. All of them are recovered by the lifecycle.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("network error: {0}")]
    Network(String),

    /// The backend refused the request.
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("resource not found: {0}")]
    NotFound(EntityRef),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Creates, updates and deletes resources.
///
/// `create` and `update` may return the identity of the persisted resource;
/// returning `None` is allowed and simply skips the save callbacks.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Persists a brand-new resource built from `payload`.
    async fn create(&self, payload: Value) -> StoreResult<Option<EntityRef>>;

    /// Persists changes; `payload` carries `id`, `type` and the changed fields.
    async fn update(&self, payload: Value) -> StoreResult<Option<EntityRef>>;

    /// Deletes the identified resource.
    async fn delete(&self, target: &EntityRef) -> StoreResult<()>;
}
