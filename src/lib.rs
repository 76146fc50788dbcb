//! # material-flow — Material-Flow Diagrams from Relationship Graphs
//!
//! Turns a directed `IS_INPUT_OF` relationship graph between materials into
//! a flow diagram: classified nodes (Input / Output / Intermediate) and
//! deduplicated, display-ready edges.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `FlowBackend` is the contract between fetcher and storage
//! 2. **Clean DTOs**: `RelationshipRecord`, `ParticipatingObject`, `Value` cross all boundaries
//! 3. **Pipeline owns nothing**: records → diagram is a pure function
//! 4. **Injected handles**: no process-wide client singletons
//!
//! ## Quick Start
//!
//! ```rust
//! use material_flow::{compute_flow, ParticipatingObject, RelationshipRecord, Role};
//!
//! let records = vec![
//!     RelationshipRecord::new("A", "B")
//!         .with_property("processName", "Mix")
//!         .with_property("quantity", 5)
//!         .with_property("unit", "kg"),
//!     RelationshipRecord::new("B", "C")
//!         .with_property("processName", "Pour")
//!         .with_property("quantity", 2)
//!         .with_property("unit", "m³"),
//! ];
//! let objects = vec![
//!     ParticipatingObject::new("A").with_name("Water"),
//!     ParticipatingObject::new("B").with_name("Paste"),
//!     ParticipatingObject::new("C").with_name("Wall"),
//! ];
//!
//! let diagram = compute_flow(&records, &objects);
//! assert_eq!(diagram.node("B").map(|n| n.role), Some(Role::Intermediate));
//! assert_eq!(diagram.edges.len(), 2);
//! ```
//!
//! ## Backends
//!
//! | Backend | Feature | Description |
//! |---------|---------|-------------|
//! | Memory | (default) | In-memory store for testing/embedding |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod config;
pub mod flow;
pub mod fetch;
pub mod storage;
pub mod export;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    ObjectId, ParticipatingObject, RelationshipRecord, ObjectRelationships,
    MaterialNode, Role, FlowEdge, Value, PropertyMap, IS_INPUT_OF,
};

// ============================================================================
// Re-exports: Pipeline
// ============================================================================

pub use config::{FlowConfig, Palette};
pub use flow::{
    compute_flow, compute_flow_with, FlowComputation, FlowDiagram,
    SankeyData, SkipReason, SkipReport,
};

// ============================================================================
// Re-exports: Fetching & Storage
// ============================================================================

pub use fetch::{FetchScope, FlowInput, FlowLoader, LoadOutcome};
pub use storage::{FlowBackend, MemoryBackend};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for failures of the backend collaborator, which callers show
    /// as a "could not load flow data" state.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::Backend(_) | Error::NotFound(_))
    }
}

/// Writer failures inside serde_json surface as `Error::Io`.
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            Error::Io(e.into())
        } else {
            Error::Serialization(e)
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
