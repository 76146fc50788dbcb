//! Material node — a classified object in the flow diagram.

use serde::{Deserialize, Serialize};
use super::ObjectId;

/// Position of an object in the material transformation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Only ever consumed: raw material.
    Input,
    /// Only ever produced: end product.
    Output,
    /// Both produced and consumed.
    Intermediate,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Input => "input",
            Role::Output => "output",
            Role::Intermediate => "intermediate",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the flow diagram. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialNode {
    pub id: ObjectId,
    pub name: String,
    pub role: Role,
    pub category: String,
    pub color: String,
}

impl MaterialNode {
    pub fn new(id: ObjectId, name: impl Into<String>, role: Role, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            category: role.as_str().to_string(),
            color: color.into(),
        }
    }
}
