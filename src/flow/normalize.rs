//! Edge normalization: raw relationship records → deduplicated display edges.

use hashbrown::{HashMap, HashSet};
use serde::Serialize;

use crate::model::{EdgeKey, FlowEdge, ObjectId, ParticipatingObject, RelationshipRecord};

// ============================================================================
// Object lookup
// ============================================================================

/// Id → object index over a borrowed object collection.
///
/// When the collection holds the same id twice, the first entry wins.
#[derive(Debug, Clone, Default)]
pub struct ObjectLookup<'a> {
    by_id: HashMap<&'a str, &'a ParticipatingObject>,
}

impl<'a> ObjectLookup<'a> {
    pub fn new(objects: &'a [ParticipatingObject]) -> Self {
        let mut by_id = HashMap::with_capacity(objects.len());
        for obj in objects {
            by_id.entry(obj.id.as_str()).or_insert(obj);
        }
        Self { by_id }
    }

    pub fn get(&self, id: &ObjectId) -> Option<&'a ParticipatingObject> {
        self.by_id.get(id.as_str()).copied()
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.by_id.contains_key(id.as_str())
    }

    /// Number of distinct ids.
    pub(crate) fn len(&self) -> usize { self.by_id.len() }
}

// ============================================================================
// Skip accounting
// ============================================================================

/// Why a record produced no edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    UnresolvedSubject,
    UnresolvedObject,
    InvalidProcessLabel,
    Duplicate,
}

/// Per-reason counts of records excluded from the edge list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipReport {
    pub unresolved_subject: usize,
    pub unresolved_object: usize,
    pub invalid_process_label: usize,
    pub duplicate: usize,
}

impl SkipReport {
    pub fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::UnresolvedSubject => self.unresolved_subject += 1,
            SkipReason::UnresolvedObject => self.unresolved_object += 1,
            SkipReason::InvalidProcessLabel => self.invalid_process_label += 1,
            SkipReason::Duplicate => self.duplicate += 1,
        }
    }

    pub fn count(&self, reason: SkipReason) -> usize {
        match reason {
            SkipReason::UnresolvedSubject => self.unresolved_subject,
            SkipReason::UnresolvedObject => self.unresolved_object,
            SkipReason::InvalidProcessLabel => self.invalid_process_label,
            SkipReason::Duplicate => self.duplicate,
        }
    }

    pub fn total(&self) -> usize {
        self.unresolved_subject + self.unresolved_object + self.invalid_process_label + self.duplicate
    }
}

// ============================================================================
// Normalization
// ============================================================================

/// Normalized edges plus the accounting of what was dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub edges: Vec<FlowEdge>,
    pub skipped: SkipReport,
}

/// Convert records into display edges.
///
/// Records with an unresolved endpoint or without a usable process label
/// are dropped; later duplicates of an emitted edge are dropped. Output
/// keeps the order of first occurrence. Never fails.
pub fn normalize_edges(
    records: &[RelationshipRecord],
    lookup: &ObjectLookup<'_>,
    unnamed_label: &str,
) -> Normalized {
    let mut out = Normalized::default();
    let mut emitted: HashSet<EdgeKey> = HashSet::new();

    for rec in records {
        match normalize_one(rec, lookup, unnamed_label) {
            Ok(edge) => {
                let key = edge.key();
                if emitted.contains(&key) {
                    tracing::debug!(%key, "dropping duplicate edge");
                    out.skipped.record(SkipReason::Duplicate);
                } else {
                    emitted.insert(key);
                    out.edges.push(edge);
                }
            }
            Err(reason) => skip(&mut out.skipped, rec, reason),
        }
    }

    out
}

fn normalize_one(
    rec: &RelationshipRecord,
    lookup: &ObjectLookup<'_>,
    unnamed_label: &str,
) -> Result<FlowEdge, SkipReason> {
    let subject = lookup.get(&rec.subject_id).ok_or(SkipReason::UnresolvedSubject)?;
    let object = lookup.get(&rec.object_id).ok_or(SkipReason::UnresolvedObject)?;
    let process_name = rec.process_name().ok_or(SkipReason::InvalidProcessLabel)?;

    Ok(FlowEdge {
        subject_id: rec.subject_id.clone(),
        subject_name: subject.display_name(unnamed_label).to_string(),
        object_id: rec.object_id.clone(),
        object_name: object.display_name(unnamed_label).to_string(),
        quantity: rec.quantity(),
        unit: rec.unit().to_string(),
        process_name: process_name.to_string(),
    })
}

fn skip(report: &mut SkipReport, rec: &RelationshipRecord, reason: SkipReason) {
    tracing::debug!(
        subject = %rec.subject_id,
        object = %rec.object_id,
        ?reason,
        "skipping relationship record"
    );
    report.record(reason);
}
