//! Participating object — the minimal projection of a backend object.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

/// Opaque backend object identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self { Self(id.to_owned()) }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self { Self(id) }
}

impl Borrow<str> for ObjectId {
    fn borrow(&self) -> &str { &self.0 }
}

/// An object taking part in the flow, used for label lookup only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipatingObject {
    pub id: ObjectId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ParticipatingObject {
    pub fn new(id: impl Into<ObjectId>) -> Self {
        Self { id: id.into(), name: None, description: None }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The display name, or `fallback` when the name is missing or blank.
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => fallback,
        }
    }
}
