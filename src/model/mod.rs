//! # Material Graph Model
//!
//! Plain DTOs that cross every boundary: backend ↔ fetcher ↔ pipeline ↔ renderer.
//!
//! Design rule: this module is pure data — no I/O, no state, no async.
//! Loosely typed backend payloads stop at `Value`; everything downstream
//! reads them through fail-closed accessors on `RelationshipRecord`.

pub mod object;
pub mod relationship;
pub mod value;
pub mod property_map;
pub mod node;
pub mod edge;

pub use object::{ObjectId, ParticipatingObject};
pub use relationship::{RelationshipRecord, ObjectRelationships, IS_INPUT_OF};
pub use value::Value;
pub use property_map::PropertyMap;
pub use node::{MaterialNode, Role};
pub use edge::{FlowEdge, EdgeKey};
