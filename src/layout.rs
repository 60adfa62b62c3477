//! Level-based layout planning for step graphs.
//!
//! The planner assigns every node a breadth-first depth from the start step,
//! then turns depths into anchor positions for an external force-directed
//! renderer. Two conventions exist: [`LayoutMode::Dag`] lays levels out left
//! to right between a fixed start and a fixed end, [`LayoutMode::Tree`] lays
//! them out top to bottom below a fixed root.

mod engine;
mod levels;
mod placement;
mod types;

pub use engine::LayoutPlanner;
pub use levels::{LevelAssignment, assign_levels};
pub use types::{Canvas, Layout, LayoutMode, LayoutNode};

use crate::ir::StepGraph;
use crate::payload::{GraphPayload, NodeId};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("No start node: step {0} does not appear in the graph")]
    NoStartNode(NodeId),
    #[error("Unknown end node: step {0} does not appear in the graph")]
    UnknownEndNode(NodeId),
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },
}

/// Plan a layout for a bare edge list with the default planner settings.
pub fn compute_layout(
    edges: &[(NodeId, NodeId)],
    mode: LayoutMode,
    width: f64,
    height: f64,
) -> Result<Vec<LayoutNode>, LayoutError> {
    let graph = StepGraph::from_payload(&GraphPayload::from_edges(edges.iter().copied()));
    let layout = LayoutPlanner::default().plan(&graph, mode, Canvas::new(width, height))?;
    Ok(layout.nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn levels_of(nodes: &[LayoutNode]) -> BTreeMap<NodeId, usize> {
        nodes.iter().map(|n| (n.id, n.level)).collect()
    }

    #[test]
    fn test_empty_edges() {
        for mode in [LayoutMode::Dag, LayoutMode::Tree] {
            let nodes = compute_layout(&[], mode, 800.0, 500.0).unwrap();
            assert!(nodes.is_empty());
        }
    }

    #[test]
    fn test_empty_edges_zero_canvas() {
        for mode in [LayoutMode::Dag, LayoutMode::Tree] {
            assert_eq!(compute_layout(&[], mode, 0.0, 0.0), Ok(vec![]));
        }
    }

    #[test]
    fn test_canvas_smaller_than_margins() {
        let nodes = compute_layout(&[(0, 1)], LayoutMode::Dag, 100.0, 100.0).unwrap();
        assert_eq!(nodes.len(), 2);
        assert!(nodes.iter().all(|n| n.x == 50.0 && n.y == 50.0));

        let nodes = compute_layout(&[(0, 1), (0, 2)], LayoutMode::Tree, 0.0, 0.0).unwrap();
        assert!(nodes.iter().all(|n| n.x.is_finite() && n.y.is_finite()));
    }

    #[test]
    fn test_tree_example() {
        let edges = [(0, 1), (1, 2), (1, 3), (2, 4), (3, 4)];
        let nodes = compute_layout(&edges, LayoutMode::Tree, 800.0, 500.0).unwrap();

        let expected = BTreeMap::from([(0, 0), (1, 1), (2, 2), (3, 2), (4, 3)]);
        assert_eq!(levels_of(&nodes), expected);

        let root = &nodes[0];
        assert!(root.fixed);
        assert_eq!((root.x, root.y), (400.0, 50.0));

        let two = nodes.iter().find(|n| n.id == 2).unwrap();
        let three = nodes.iter().find(|n| n.id == 3).unwrap();
        assert_eq!(two.y, three.y);
        assert!((two.x - 400.0 + (three.x - 400.0)).abs() < 1e-9);
        assert!(two.x < three.x);
    }

    #[test]
    fn test_dag_two_nodes() {
        let nodes = compute_layout(&[(0, 1)], LayoutMode::Dag, 800.0, 500.0).unwrap();
        assert_eq!(levels_of(&nodes), BTreeMap::from([(0, 0), (1, 1)]));

        assert!(nodes[0].fixed);
        assert_eq!((nodes[0].x, nodes[0].y), (50.0, 250.0));
        assert!(nodes[1].fixed);
        assert_eq!((nodes[1].x, nodes[1].y), (750.0, 250.0));
    }

    #[test]
    fn test_unreached_component_trails() {
        let edges = [(0, 1), (1, 2), (5, 6)];
        let nodes = compute_layout(&edges, LayoutMode::Dag, 800.0, 500.0).unwrap();
        let levels = levels_of(&nodes);

        assert_eq!(levels[&5], 3);
        assert_eq!(levels[&6], 3);
        assert_eq!(levels[&2], 2);
    }

    #[test]
    fn test_missing_start_fails_fast() {
        let err = compute_layout(&[(1, 2)], LayoutMode::Tree, 800.0, 500.0).unwrap_err();
        assert_eq!(err, LayoutError::NoStartNode(0));
    }

    #[test]
    fn test_self_loop_and_duplicates() {
        let edges = [(0, 0), (0, 1), (0, 1), (1, 1)];
        let nodes = compute_layout(&edges, LayoutMode::Tree, 800.0, 500.0).unwrap();
        assert_eq!(levels_of(&nodes), BTreeMap::from([(0, 0), (1, 1)]));
    }

    fn arb_edges() -> impl Strategy<Value = Vec<(NodeId, NodeId)>> {
        prop::collection::vec((0u32..12, 0u32..12), 0..30)
    }

    /// Each node 1..n gets exactly one parent with a smaller id.
    fn arb_tree() -> impl Strategy<Value = Vec<(NodeId, NodeId)>> {
        (1usize..15).prop_flat_map(|n| {
            prop::collection::vec(any::<prop::sample::Index>(), n).prop_map(|parents| {
                parents
                    .iter()
                    .enumerate()
                    .map(|(i, p)| (p.index(i + 1) as NodeId, (i + 1) as NodeId))
                    .collect::<Vec<_>>()
            })
        })
    }

    proptest! {
        #[test]
        fn prop_every_node_once(mut edges in arb_edges(), mode in prop_oneof![Just(LayoutMode::Dag), Just(LayoutMode::Tree)]) {
            edges.push((0, 0));
            let nodes = compute_layout(&edges, mode, 800.0, 500.0).unwrap();

            let mut expected: Vec<NodeId> = edges.iter().flat_map(|&(a, b)| [a, b]).collect();
            expected.sort_unstable();
            expected.dedup();
            let ids: Vec<NodeId> = nodes.iter().map(|n| n.id).collect();
            prop_assert_eq!(ids, expected);

            let start = nodes.iter().find(|n| n.id == 0).unwrap();
            prop_assert_eq!(start.level, 0);
            prop_assert!(start.fixed);
            prop_assert!(nodes.iter().all(|n| n.x.is_finite() && n.y.is_finite()));
        }

        #[test]
        fn prop_deterministic(mut edges in arb_edges()) {
            edges.push((0, 1));
            let first = compute_layout(&edges, LayoutMode::Dag, 640.0, 480.0).unwrap();
            let second = compute_layout(&edges, LayoutMode::Dag, 640.0, 480.0).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_unreached_share_one_level(mut edges in arb_edges()) {
            edges.push((0, 1));
            let graph = StepGraph::from_payload(&GraphPayload::from_edges(edges.iter().copied()));
            let levels = assign_levels(&graph, LayoutMode::Tree);
            let nodes = compute_layout(&edges, LayoutMode::Tree, 800.0, 500.0).unwrap();

            let unreached = levels.unreached();
            for node in nodes.iter().filter(|n| unreached.contains(&n.id)) {
                prop_assert_eq!(node.level, levels.reachable_depth());
            }
            for node in nodes.iter().filter(|n| !unreached.contains(&n.id)) {
                prop_assert!(node.level < levels.reachable_depth());
            }
        }

        #[test]
        fn prop_tree_depth_increments(edges in arb_tree()) {
            let nodes = compute_layout(&edges, LayoutMode::Tree, 800.0, 500.0).unwrap();
            let levels = levels_of(&nodes);
            for (a, b) in edges {
                prop_assert_eq!(levels[&b], levels[&a] + 1);
            }
        }
    }
}
