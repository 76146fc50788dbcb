//! # Flow Backend Trait
//!
//! This is THE contract between the flow pipeline and the service that owns
//! objects and their relationships. The pipeline never talks to storage
//! directly: fetchers receive a backend handle and go through this trait.
//!
//! ## Implementations
//!
//! | Backend | Module | Description |
//! |---------|--------|-------------|
//! | `MemoryBackend` | `memory` | In-memory for testing/embedding |

pub mod memory;

use async_trait::async_trait;
use crate::model::*;
use crate::Result;

pub use memory::MemoryBackend;

// ============================================================================
// FlowBackend Trait
// ============================================================================

/// Read-side contract for the relationship graph store.
///
/// Errors returned here are upstream failures: the pipeline surfaces them
/// to the caller unchanged and never substitutes partial data.
#[async_trait]
pub trait FlowBackend: Send + Sync + 'static {
    /// Shut down the backend, releasing any connections.
    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    /// All live relationships carrying `predicate`.
    ///
    /// Soft-deleted relationships are never returned.
    async fn relationships_by_predicate(&self, predicate: &str) -> Result<Vec<RelationshipRecord>>;

    /// Relationships touching `object_id`, split by side.
    async fn relationships_for_object(
        &self,
        object_id: &ObjectId,
        predicate: &str,
        include_deleted: bool,
    ) -> Result<ObjectRelationships>;

    /// Objects for the given ids, in request order. Unknown ids are omitted.
    async fn objects_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<ParticipatingObject>>;
}
