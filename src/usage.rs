//! Submission usage statistics.
//!
//! The renderer colours nodes and edges by the share of submissions that
//! pass through them.

use crate::ir::StepGraph;
use crate::layout::Layout;
use crate::payload::NodeId;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Start,
    End,
    Process,
}

impl NodeRole {
    pub fn of(layout: &Layout, id: NodeId) -> Self {
        if layout.start == Some(id) {
            Self::Start
        } else if layout.end == Some(id) {
            Self::End
        } else {
            Self::Process
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UsageStats {
    pub total: usize,
    nodes: BTreeMap<NodeId, usize>,
    edges: BTreeMap<(NodeId, NodeId), usize>,
}

impl UsageStats {
    pub fn from_graph(graph: &StepGraph) -> Self {
        let mut nodes: BTreeMap<NodeId, usize> = BTreeMap::new();
        let mut edges: BTreeMap<(NodeId, NodeId), usize> = BTreeMap::new();

        for submission in &graph.submissions {
            let visited: BTreeSet<NodeId> = submission.nodes.iter().copied().collect();
            for id in visited {
                *nodes.entry(id).or_insert(0) += 1;
            }

            let steps: BTreeSet<(NodeId, NodeId)> = submission
                .nodes
                .windows(2)
                .map(|w| (w[0], w[1]))
                .collect();
            for step in steps {
                *edges.entry(step).or_insert(0) += 1;
            }
        }

        Self {
            total: graph.submissions.len(),
            nodes,
            edges,
        }
    }

    pub fn node_count(&self, id: NodeId) -> usize {
        self.nodes.get(&id).copied().unwrap_or(0)
    }

    pub fn edge_count(&self, from: NodeId, to: NodeId) -> usize {
        self.edges.get(&(from, to)).copied().unwrap_or(0)
    }

    pub fn node_share(&self, id: NodeId) -> f64 {
        self.share(self.node_count(id))
    }

    pub fn edge_share(&self, from: NodeId, to: NodeId) -> f64 {
        self.share(self.edge_count(from, to))
    }

    fn share(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Canvas, LayoutMode, LayoutPlanner};
    use crate::payload::GraphPayload;

    fn sample() -> StepGraph {
        let input = r#"{
            "graph": [[0, 1], [1, 2], [2, 3], [3, 4], [1, 5], [5, 6], [4, 6]],
            "submissions": [
                {"submission_uid": "student1_1", "submission_nodes": [0, 1, 2, 3, 4, 6]},
                {"submission_uid": "student2_2", "submission_nodes": [0, 1, 5, 6]},
                {"submission_uid": "student3_3", "submission_nodes": [0, 1, 5, 1, 5, 6]}
            ]
        }"#;
        StepGraph::from_payload(&GraphPayload::from_json(input).unwrap())
    }

    #[test]
    fn test_node_counts() {
        let usage = UsageStats::from_graph(&sample());
        assert_eq!(usage.total, 3);
        assert_eq!(usage.node_count(0), 3);
        assert_eq!(usage.node_count(5), 2);
        assert_eq!(usage.node_count(2), 1);
        assert_eq!(usage.node_count(42), 0);
        assert!((usage.node_share(5) - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_edge_counts_once_per_submission() {
        let usage = UsageStats::from_graph(&sample());
        assert_eq!(usage.edge_count(1, 5), 2);
        assert_eq!(usage.edge_count(5, 1), 1);
        assert_eq!(usage.edge_count(4, 6), 1);
        assert_eq!(usage.edge_share(0, 1), 1.0);
    }

    #[test]
    fn test_no_submissions() {
        let g = StepGraph::from_payload(&GraphPayload::from_edges([(0, 1)]));
        let usage = UsageStats::from_graph(&g);
        assert_eq!(usage.node_share(0), 0.0);
        assert_eq!(usage.edge_share(0, 1), 0.0);
    }

    #[test]
    fn test_roles() {
        let g = sample();
        let layout = LayoutPlanner::default()
            .plan(&g, LayoutMode::Dag, Canvas::default())
            .unwrap();
        assert_eq!(NodeRole::of(&layout, 0), NodeRole::Start);
        assert_eq!(NodeRole::of(&layout, 6), NodeRole::End);
        assert_eq!(NodeRole::of(&layout, 3), NodeRole::Process);
    }
}
