//! Emphasis for a single submission path.

use crate::ir::StepGraph;
use crate::payload::NodeId;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Nodes and edges to emphasize. Edge entries index into `StepGraph::edges`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Highlight {
    pub submission: Option<String>,
    pub nodes: BTreeSet<NodeId>,
    pub edges: Vec<usize>,
}

impl Highlight {
    pub fn empty() -> Self {
        Self::default()
    }

    /// An edge is on the path when its target first appears right after
    /// its source first appears. Revisited nodes keep their first position.
    pub fn for_path(graph: &StepGraph, path: &[NodeId]) -> Self {
        let mut first_seen: BTreeMap<NodeId, usize> = BTreeMap::new();
        for (pos, &id) in path.iter().enumerate() {
            first_seen.entry(id).or_insert(pos);
        }

        let edges = graph
            .edges
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                match (first_seen.get(&e.from), first_seen.get(&e.to)) {
                    (Some(&from), Some(&to)) => to == from + 1,
                    _ => false,
                }
            })
            .map(|(idx, _)| idx)
            .collect();

        Self {
            submission: None,
            nodes: first_seen.into_keys().collect(),
            edges,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::GraphPayload;

    fn graph() -> StepGraph {
        StepGraph::from_payload(&GraphPayload::from_edges([
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (1, 5),
            (5, 6),
            (4, 6),
        ]))
    }

    #[test]
    fn test_path_edges() {
        let h = Highlight::for_path(&graph(), &[0, 1, 5, 6]);
        assert_eq!(h.nodes, BTreeSet::from([0, 1, 5, 6]));
        assert_eq!(h.edges, vec![0, 4, 5]);
        assert!(!h.contains_node(2));
    }

    #[test]
    fn test_non_consecutive_pairs_skipped() {
        // 0 and 2 both on the path but never adjacent
        let g = StepGraph::from_payload(&GraphPayload::from_edges([(0, 2), (0, 1), (1, 2)]));
        let h = Highlight::for_path(&g, &[0, 1, 2]);
        assert_eq!(h.edges, vec![1, 2]);
    }

    #[test]
    fn test_revisited_node_keeps_first_position() {
        let g = StepGraph::from_payload(&GraphPayload::from_edges([
            (0, 1),
            (1, 2),
            (2, 1),
            (1, 3),
        ]));
        let h = Highlight::for_path(&g, &[0, 1, 2, 1, 3]);

        assert_eq!(h.nodes, BTreeSet::from([0, 1, 2, 3]));
        // 1 first appears at 1, 3 at 4: the loop back is not emphasized
        assert_eq!(h.edges, vec![0, 1]);
    }

    #[test]
    fn test_duplicate_edges_all_marked() {
        let g = StepGraph::from_payload(&GraphPayload::from_edges([(0, 1), (0, 1)]));
        let h = Highlight::for_path(&g, &[0, 1]);
        assert_eq!(h.edges, vec![0, 1]);
    }

    #[test]
    fn test_empty() {
        assert!(Highlight::empty().is_empty());
        assert!(Highlight::for_path(&graph(), &[]).is_empty());
    }
}
