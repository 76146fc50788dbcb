//! # Relationship Fetcher
//!
//! Pulls the relationship set and the objects it references out of a
//! `FlowBackend`. This is the only stage of the pipeline that does I/O.
//!
//! ```text
//! FetchScope ─► relationships (by predicate | for one object)
//!                    │ referenced ids
//!                    ▼
//!              objects_by_ids ─► FlowInput { relationships, objects }
//! ```

pub mod loader;

pub use loader::{FlowLoader, LoadOutcome};

use hashbrown::HashSet;

use crate::model::{ObjectId, ParticipatingObject, RelationshipRecord};
use crate::storage::FlowBackend;
use crate::Result;

/// Which part of the relationship graph to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchScope {
    /// Every live relationship with the configured predicate.
    Global,
    /// Relationships touching one object, on either side.
    Object {
        id: ObjectId,
        include_deleted: bool,
    },
}

impl FetchScope {
    pub fn object(id: impl Into<ObjectId>) -> Self {
        FetchScope::Object { id: id.into(), include_deleted: false }
    }
}

/// Raw pipeline input, exactly as fetched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowInput {
    pub relationships: Vec<RelationshipRecord>,
    pub objects: Vec<ParticipatingObject>,
}

/// Fetch the relationship records for `scope`.
///
/// Object scope merges both sides; a record present on both (a self-loop)
/// is kept once.
pub async fn fetch_relationships<B: FlowBackend + ?Sized>(
    backend: &B,
    scope: &FetchScope,
    predicate: &str,
) -> Result<Vec<RelationshipRecord>> {
    match scope {
        FetchScope::Global => backend.relationships_by_predicate(predicate).await,
        FetchScope::Object { id, include_deleted } => {
            let split = backend.relationships_for_object(id, predicate, *include_deleted).await?;
            Ok(merge_sides(split.as_subject, split.as_object))
        }
    }
}

/// Fetch every object referenced by `records`, once each.
pub async fn fetch_participants<B: FlowBackend + ?Sized>(
    backend: &B,
    records: &[RelationshipRecord],
) -> Result<Vec<ParticipatingObject>> {
    let ids = referenced_ids(records);
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    backend.objects_by_ids(&ids).await
}

/// Fetch relationships, then the objects they reference.
pub async fn fetch_flow_input<B: FlowBackend + ?Sized>(
    backend: &B,
    scope: &FetchScope,
    predicate: &str,
) -> Result<FlowInput> {
    let relationships = fetch_relationships(backend, scope, predicate).await?;
    let objects = fetch_participants(backend, &relationships).await?;
    Ok(FlowInput { relationships, objects })
}

/// Distinct subject and object ids in first-seen order.
pub fn referenced_ids(records: &[RelationshipRecord]) -> Vec<ObjectId> {
    let mut seen: HashSet<&ObjectId> = HashSet::new();
    let mut ids = Vec::new();
    for rec in records {
        for id in [&rec.subject_id, &rec.object_id] {
            if seen.insert(id) {
                ids.push(id.clone());
            }
        }
    }
    ids
}

fn merge_sides(
    as_subject: Vec<RelationshipRecord>,
    as_object: Vec<RelationshipRecord>,
) -> Vec<RelationshipRecord> {
    let mut merged: Vec<RelationshipRecord> = Vec::with_capacity(as_subject.len() + as_object.len());
    let mut seen_ids: HashSet<String> = HashSet::new();

    for rec in as_subject.into_iter().chain(as_object) {
        let fresh = match &rec.id {
            Some(id) => seen_ids.insert(id.clone()),
            // No statement id: fall back to full structural equality.
            None => !merged.iter().any(|m| m.id.is_none() && *m == rec),
        };
        if fresh {
            merged.push(rec);
        }
    }
    merged
}
