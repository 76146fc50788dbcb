//! In-memory flow backend.
//!
//! This is the reference implementation of `FlowBackend`.
//! It uses plain collections protected by RwLock.
//!
//! ## Limitations
//!
//! - **No persistence**: everything is lost on drop.
//! - **Linear scans**: relationship queries walk the whole record list.
//!
//! Use this backend for:
//! - Testing the fetcher, loader and pipeline end to end
//! - Embedding the pipeline where data is already materialized

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::model::*;
use crate::{Error, Result};
use super::FlowBackend;

// ============================================================================
// MemoryBackend
// ============================================================================

/// In-memory object and relationship store.
///
/// Cloning yields another handle to the same store.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    objects: RwLock<HashMap<ObjectId, ParticipatingObject>>,
    relationships: RwLock<Vec<RelationshipRecord>>,
    next_statement_id: AtomicU64,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an object.
    pub fn insert_object(&self, object: ParticipatingObject) {
        self.inner.objects.write().insert(object.id.clone(), object);
    }

    /// Store a relationship, assigning a statement id when it has none.
    /// Returns the statement id.
    pub fn insert_relationship(&self, mut record: RelationshipRecord) -> String {
        let id = match &record.id {
            Some(id) => id.clone(),
            None => {
                let n = self.inner.next_statement_id.fetch_add(1, Ordering::Relaxed) + 1;
                let id = format!("st-{n}");
                record.id = Some(id.clone());
                id
            }
        };
        self.inner.relationships.write().push(record);
        id
    }

    /// Mark a relationship deleted. Returns false if it was already deleted.
    pub fn soft_delete_relationship(&self, statement_id: &str, at: DateTime<Utc>) -> Result<bool> {
        let mut rels = self.inner.relationships.write();
        let rec = rels
            .iter_mut()
            .find(|r| r.id.as_deref() == Some(statement_id))
            .ok_or_else(|| Error::NotFound(format!("Relationship {statement_id}")))?;
        if rec.is_deleted() {
            return Ok(false);
        }
        rec.deleted_at = Some(at);
        Ok(true)
    }

    pub fn relationship_count(&self) -> usize {
        self.inner.relationships.read().len()
    }
}

// ============================================================================
// FlowBackend impl
// ============================================================================

#[async_trait]
impl FlowBackend for MemoryBackend {
    async fn relationships_by_predicate(&self, predicate: &str) -> Result<Vec<RelationshipRecord>> {
        Ok(self
            .inner
            .relationships
            .read()
            .iter()
            .filter(|r| r.predicate == predicate && !r.is_deleted())
            .cloned()
            .collect())
    }

    async fn relationships_for_object(
        &self,
        object_id: &ObjectId,
        predicate: &str,
        include_deleted: bool,
    ) -> Result<ObjectRelationships> {
        let rels = self.inner.relationships.read();
        let visible = rels
            .iter()
            .filter(|r| r.predicate == predicate && (include_deleted || !r.is_deleted()));

        let mut out = ObjectRelationships::default();
        for rec in visible {
            if &rec.subject_id == object_id {
                out.as_subject.push(rec.clone());
            }
            if &rec.object_id == object_id {
                out.as_object.push(rec.clone());
            }
        }
        Ok(out)
    }

    async fn objects_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<ParticipatingObject>> {
        let objects = self.inner.objects.read();
        Ok(ids.iter().filter_map(|id| objects.get(id).cloned()).collect())
    }
}
