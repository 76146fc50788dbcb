//! Flow edge — a display-ready, deduplicated relationship.

use serde::{Deserialize, Serialize};
use super::ObjectId;

/// A display-ready edge between two resolved objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEdge {
    pub subject_id: ObjectId,
    pub subject_name: String,
    pub object_id: ObjectId,
    pub object_name: String,
    pub quantity: f64,
    pub unit: String,
    pub process_name: String,
}

impl FlowEdge {
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(&self.subject_id, &self.object_id, &self.process_name, self.quantity, &self.unit)
    }

    pub fn is_self_loop(&self) -> bool {
        self.subject_id == self.object_id
    }
}

/// Identity of an edge for deduplication.
///
/// Quantities compare by bit pattern with `-0.0` folded into `0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    subject_id: ObjectId,
    object_id: ObjectId,
    process_name: String,
    quantity_bits: u64,
    unit: String,
}

impl EdgeKey {
    pub fn new(
        subject_id: &ObjectId,
        object_id: &ObjectId,
        process_name: &str,
        quantity: f64,
        unit: &str,
    ) -> Self {
        let quantity = if quantity == 0.0 { 0.0 } else { quantity };
        Self {
            subject_id: subject_id.clone(),
            object_id: object_id.clone(),
            process_name: process_name.to_string(),
            quantity_bits: quantity.to_bits(),
            unit: unit.to_string(),
        }
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{}",
            self.subject_id,
            self.object_id,
            self.process_name,
            f64::from_bits(self.quantity_bits),
            self.unit,
        )
    }
}
