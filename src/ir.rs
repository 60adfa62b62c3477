//! Normalized step graph built from a payload.

use crate::payload::{GraphPayload, NodeId};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
pub struct StepGraph {
    /// Distinct node ids, ascending.
    pub nodes: Vec<NodeId>,
    /// Edges in input order. Duplicates are kept.
    pub edges: Vec<Edge>,
    pub labels: BTreeMap<NodeId, String>,
    pub correct: BTreeMap<NodeId, bool>,
    pub submissions: Vec<SubmissionPath>,
    pub start: NodeId,
    pub end_hint: Option<NodeId>,
    successors: BTreeMap<NodeId, Vec<NodeId>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPath {
    pub uid: String,
    pub nodes: Vec<NodeId>,
}

impl StepGraph {
    pub fn from_payload(payload: &GraphPayload) -> Self {
        let edges: Vec<Edge> = payload
            .graph
            .iter()
            .map(|e| {
                let (from, to) = e.endpoints();
                Edge { from, to }
            })
            .collect();

        let nodes: Vec<NodeId> = edges
            .iter()
            .flat_map(|e| [e.from, e.to])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut successors: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
        for edge in &edges {
            successors.entry(edge.from).or_default().push(edge.to);
        }

        let labels = nodes
            .iter()
            .map(|&id| {
                let label = payload
                    .step_summary
                    .get(id as usize)
                    .cloned()
                    .unwrap_or_else(|| format!("Step {id}"));
                (id, label)
            })
            .collect();

        let correct = nodes
            .iter()
            .filter_map(|&id| {
                payload
                    .step_is_correct
                    .get(id as usize)
                    .map(|&flag| (id, flag))
            })
            .collect();

        let submissions = payload
            .submissions
            .iter()
            .map(|s| SubmissionPath {
                uid: s.submission_uid.clone(),
                nodes: s.submission_nodes.clone(),
            })
            .collect();

        StepGraph {
            nodes,
            edges,
            labels,
            correct,
            submissions,
            start: payload.start_step.unwrap_or(0),
            end_hint: payload.end_step,
            successors,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.binary_search(&id).is_ok()
    }

    /// Outgoing targets of `id` in edge-list order.
    pub fn successors(&self, id: NodeId) -> &[NodeId] {
        self.successors.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }

    pub fn submission(&self, uid: &str) -> Option<&SubmissionPath> {
        self.submissions.iter().find(|s| s.uid == uid)
    }
}
