// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Node/edge view of a clash report for 3D and graph visualization

use crate::ClashReport;
use modelcheck_model::{Location, Severity};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// One distinct clashing element
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    /// Clash edges at this element, duplicates counted
    pub clash_count: usize,
}

/// One clash
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub severity: Severity,
    pub volume: f64,
    pub location: Option<Location>,
}

/// Deduplicated nodes plus one edge per clash
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualizationGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl VisualizationGraph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

impl ClashReport {
    /// Build the visualization graph
    ///
    /// Nodes appear in first-seen order; edges are not deduplicated.
    pub fn visualization_graph(&self) -> VisualizationGraph {
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut graph = VisualizationGraph::default();

        for clash in self.clashes() {
            let source = clash.element_id_1.key();
            let target = clash.element_id_2.key();

            for key in [&source, &target] {
                if seen.insert(key.clone()) {
                    graph.nodes.push(GraphNode {
                        id: key.clone(),
                        clash_count: self.clash_count_for(key),
                    });
                }
            }

            graph.edges.push(GraphEdge {
                source,
                target,
                severity: clash.severity,
                volume: clash.intersection_volume,
                location: clash.location,
            });
        }
        graph
    }
}
