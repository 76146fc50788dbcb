//! Relationship record — a directed "subject is input of object" edge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ObjectId, PropertyMap, Value};

/// Predicate tag for material input relationships.
pub const IS_INPUT_OF: &str = "IS_INPUT_OF";

/// A relationship record as stored by the backend.
///
/// Immutable once fetched. Typed readings of the property bag go through
/// `process_name()`, `quantity()` and `unit()`, which fail closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipRecord {
    /// Backend statement id, when the backend exposes one.
    #[serde(default)]
    pub id: Option<String>,
    pub subject_id: ObjectId,
    pub object_id: ObjectId,
    #[serde(default = "default_predicate")]
    pub predicate: String,
    #[serde(default)]
    pub properties: PropertyMap,
    /// Soft-delete marker.
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

fn default_predicate() -> String {
    IS_INPUT_OF.to_string()
}

impl RelationshipRecord {
    pub fn new(subject_id: impl Into<ObjectId>, object_id: impl Into<ObjectId>) -> Self {
        Self {
            id: None,
            subject_id: subject_id.into(),
            object_id: object_id.into(),
            predicate: default_predicate(),
            properties: PropertyMap::new(),
            deleted_at: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = predicate.into();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn deleted(mut self, at: DateTime<Utc>) -> Self {
        self.deleted_at = Some(at);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn is_self_loop(&self) -> bool {
        self.subject_id == self.object_id
    }

    /// The trimmed process label, or None when absent, non-string or blank.
    pub fn process_name(&self) -> Option<&str> {
        self.get("processName")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Transferred quantity; anything non-numeric reads as `0.0`.
    pub fn quantity(&self) -> f64 {
        self.get("quantity").and_then(Value::to_number).unwrap_or(0.0)
    }

    /// Unit of the quantity; absent or non-string reads as empty.
    pub fn unit(&self) -> &str {
        self.get("unit").and_then(Value::as_str).unwrap_or("")
    }
}

/// Relationships touching one object, split by the side it sits on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRelationships {
    /// Records where the object is the subject (it feeds something).
    pub as_subject: Vec<RelationshipRecord>,
    /// Records where the object is the object (something feeds it).
    pub as_object: Vec<RelationshipRecord>,
}
