//! # Flow Pipeline
//!
//! Pure composition of the two derivations over one relationship set:
//!
//! ```text
//! records ─┬─ classify_roles ──► RoleSets ──┐
//!          │                                ├─► FlowDiagram { nodes, edges }
//!          └─ normalize_edges ─► FlowEdge* ─┘
//! ```
//!
//! No I/O, no state, no async. Same ordered input → same output, order
//! included; first-occurrence dedup makes input order observable.

pub mod classify;
pub mod normalize;
pub mod sankey;

pub use classify::{classify_roles, RoleSets};
pub use normalize::{normalize_edges, Normalized, ObjectLookup, SkipReason, SkipReport};
pub use sankey::{SankeyData, SankeyLink, SankeyNode};

use serde::{Deserialize, Serialize};

use crate::config::FlowConfig;
use crate::model::{FlowEdge, MaterialNode, ParticipatingObject, RelationshipRecord};

/// Renderer-facing result of the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowDiagram {
    pub nodes: Vec<MaterialNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowDiagram {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&MaterialNode> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }
}

/// A diagram together with the accounting of dropped records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowComputation {
    pub diagram: FlowDiagram,
    pub skipped: SkipReport,
}

/// Build the flow diagram with the default configuration.
pub fn compute_flow(
    relationships: &[RelationshipRecord],
    participating_objects: &[ParticipatingObject],
) -> FlowDiagram {
    compute_flow_with(&FlowConfig::default(), relationships, participating_objects).diagram
}

/// Build the flow diagram with an explicit palette and fallback label.
pub fn compute_flow_with(
    config: &FlowConfig,
    relationships: &[RelationshipRecord],
    participating_objects: &[ParticipatingObject],
) -> FlowComputation {
    let lookup = ObjectLookup::new(participating_objects);

    let roles = classify_roles(relationships).restrict_to(|id| lookup.contains(id));
    let nodes: Vec<MaterialNode> = roles
        .iter()
        .filter_map(|(id, role)| {
            let obj = lookup.get(id)?;
            Some(MaterialNode::new(
                id.clone(),
                obj.display_name(&config.unnamed_label),
                role,
                config.palette.color_for(role),
            ))
        })
        .collect();

    let Normalized { edges, skipped } = normalize_edges(relationships, &lookup, &config.unnamed_label);

    tracing::debug!(
        records = relationships.len(),
        objects = lookup.len(),
        nodes = nodes.len(),
        edges = edges.len(),
        skipped = skipped.total(),
        "computed material flow"
    );

    FlowComputation {
        diagram: FlowDiagram { nodes, edges },
        skipped,
    }
}
