//! Graph payload as delivered by the host page.

use serde::{Deserialize, Serialize};

/// Node identifier. By convention `0` is the start step.
pub type NodeId = u32;

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Invalid graph payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// One directed edge, accepted either as `{"from": a, "to": b}` or `[a, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeRecord {
    Named { from: NodeId, to: NodeId },
    Pair(NodeId, NodeId),
}

impl EdgeRecord {
    pub fn endpoints(self) -> (NodeId, NodeId) {
        match self {
            Self::Named { from, to } | Self::Pair(from, to) => (from, to),
        }
    }
}

/// One learner's traversal through the steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub submission_uid: String,
    #[serde(default)]
    pub submission_nodes: Vec<NodeId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphPayload {
    pub graph: Vec<EdgeRecord>,
    /// Index = node id.
    #[serde(default)]
    pub step_summary: Vec<String>,
    /// Index = node id.
    #[serde(default)]
    pub step_is_correct: Vec<bool>,
    #[serde(default)]
    pub submissions: Vec<Submission>,
    #[serde(default)]
    pub start_step: Option<NodeId>,
    /// Explicit end node for left-to-right layouts.
    #[serde(default)]
    pub end_step: Option<NodeId>,
}

impl GraphPayload {
    pub fn from_json(source: &str) -> Result<Self, PayloadError> {
        let payload: GraphPayload = serde_json::from_str(source)?;
        tracing::debug!(
            edges = payload.graph.len(),
            submissions = payload.submissions.len(),
            "parsed graph payload"
        );
        Ok(payload)
    }

    /// Build a payload from a bare edge list.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        Self {
            graph: edges
                .into_iter()
                .map(|(from, to)| EdgeRecord::Named { from, to })
                .collect(),
            ..Self::default()
        }
    }
}
