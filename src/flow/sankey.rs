//! Sankey projection of a flow diagram.
//!
//! Sankey layouts address nodes by index and need strictly positive link
//! values, so this module reshapes a `FlowDiagram` accordingly:
//! - self-loop edges are dropped
//! - non-positive quantities weigh `1.0` so the link stays visible
//! - parallel edges with the same endpoints and unit merge into one link
//!
//! Only self-loops are removed. Longer cycles (`A → B → A`) pass through
//! unchanged, so layouts that reject cyclic input must break them first.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::FlowDiagram;
use crate::model::Role;

/// Weight given to links whose quantity is zero or negative.
pub const MIN_LINK_VALUE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyNode {
    pub name: String,
    pub role: Role,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyLink {
    pub source: usize,
    pub target: usize,
    pub value: f64,
    /// Process names of the merged edges, joined with `", "`.
    pub label: String,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SankeyData {
    pub nodes: Vec<SankeyNode>,
    pub links: Vec<SankeyLink>,
}

impl SankeyData {
    pub fn from_diagram(diagram: &FlowDiagram) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(diagram.nodes.len());
        let nodes: Vec<SankeyNode> = diagram
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| {
                index.insert(n.id.as_str(), i);
                SankeyNode { name: n.name.clone(), role: n.role, color: n.color.clone() }
            })
            .collect();

        let mut links: Vec<SankeyLink> = Vec::new();
        // Distinct process names per link, first-seen order.
        let mut processes: Vec<Vec<&str>> = Vec::new();
        let mut merged: HashMap<(usize, usize, &str), usize> = HashMap::new();

        for edge in &diagram.edges {
            if edge.is_self_loop() {
                continue;
            }
            let (Some(&source), Some(&target)) =
                (index.get(edge.subject_id.as_str()), index.get(edge.object_id.as_str()))
            else {
                continue;
            };
            let value = if edge.quantity > 0.0 { edge.quantity } else { MIN_LINK_VALUE };

            match merged.get(&(source, target, edge.unit.as_str())) {
                Some(&at) => {
                    links[at].value += value;
                    let names = &mut processes[at];
                    if !names.contains(&edge.process_name.as_str()) {
                        names.push(edge.process_name.as_str());
                    }
                }
                None => {
                    merged.insert((source, target, edge.unit.as_str()), links.len());
                    links.push(SankeyLink {
                        source,
                        target,
                        value,
                        label: String::new(),
                        unit: edge.unit.clone(),
                    });
                    processes.push(vec![edge.process_name.as_str()]);
                }
            }
        }

        for (link, names) in links.iter_mut().zip(&processes) {
            link.label = names.join(", ");
        }

        Self { nodes, links }
    }
}
