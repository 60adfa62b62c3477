//! Breadth-first level assignment.

use crate::ir::StepGraph;
use crate::payload::NodeId;
use std::collections::{BTreeMap, BTreeSet};

use super::types::LayoutMode;

/// Nodes grouped by depth from the start step.
#[derive(Debug, Clone)]
pub struct LevelAssignment {
    mode: LayoutMode,
    /// Level -> nodes in discovery order. The last bucket holds unreached
    /// nodes when `trailing` is set.
    pub buckets: Vec<Vec<NodeId>>,
    pub trailing: bool,
    /// Node -> level, built level by level. Only filled in tree mode.
    depth: BTreeMap<NodeId, usize>,
}

/// Assign each node of `graph` to a level.
///
/// Level 0 holds the start step. Level L+1 holds every not yet visited
/// successor of a level L node. Edges from nodes that have not been visited
/// when their level is expanded are never revisited. Whatever remains
/// unvisited lands in a single trailing bucket, sorted ascending.
pub fn assign_levels(graph: &StepGraph, mode: LayoutMode) -> LevelAssignment {
    let mut visited: BTreeSet<NodeId> = BTreeSet::new();
    let mut buckets: Vec<Vec<NodeId>> = Vec::new();

    if graph.contains(graph.start) {
        visited.insert(graph.start);
        buckets.push(vec![graph.start]);
    }

    while let Some(current) = buckets.last() {
        let mut next = Vec::new();
        for &node in current {
            for &succ in graph.successors(node) {
                if visited.insert(succ) {
                    next.push(succ);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        buckets.push(next);
    }

    let unreached: Vec<NodeId> = graph
        .nodes
        .iter()
        .copied()
        .filter(|id| !visited.contains(id))
        .collect();
    let trailing = !unreached.is_empty();
    if trailing {
        tracing::warn!(
            count = unreached.len(),
            level = buckets.len(),
            "nodes unreachable from start placed in trailing level"
        );
        buckets.push(unreached);
    }

    let depth: BTreeMap<NodeId, usize> = match mode {
        LayoutMode::Tree => buckets
            .iter()
            .enumerate()
            .flat_map(|(level, nodes)| nodes.iter().map(move |&id| (id, level)))
            .collect(),
        LayoutMode::Dag => BTreeMap::new(),
    };

    tracing::debug!(levels = buckets.len(), trailing, "assigned levels");

    LevelAssignment {
        mode,
        buckets,
        trailing,
        depth,
    }
}

impl LevelAssignment {
    /// Level of `id`. Tree mode reads the direct map, DAG mode scans the
    /// buckets and takes the first match.
    pub fn level_of(&self, id: NodeId) -> Option<usize> {
        match self.mode {
            LayoutMode::Tree => self.depth.get(&id).copied(),
            LayoutMode::Dag => self.buckets.iter().position(|b| b.contains(&id)),
        }
    }

    pub fn max_level(&self) -> usize {
        self.buckets.len().saturating_sub(1)
    }

    /// Number of levels reached from the start; also the trailing level index.
    pub fn reachable_depth(&self) -> usize {
        if self.trailing {
            self.buckets.len() - 1
        } else {
            self.buckets.len()
        }
    }

    pub fn reachable(&self) -> &[Vec<NodeId>] {
        &self.buckets[..self.reachable_depth()]
    }

    pub fn unreached(&self) -> &[NodeId] {
        match (self.trailing, self.buckets.last()) {
            (true, Some(last)) => last,
            _ => &[],
        }
    }
}
