//! Per-load graph context shared by the renderer, highlight and click handlers.

use crate::highlight::Highlight;
use crate::interaction::{Effect, InteractionConfig, NodeInteraction, PointerEvent};
use crate::ir::StepGraph;
use crate::layout::{Canvas, Layout, LayoutError, LayoutMode, LayoutPlanner};
use crate::measure::LabelMetrics;
use crate::payload::{GraphPayload, NodeId};
use crate::usage::{NodeRole, UsageStats};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("Unknown submission: {0}")]
    UnknownSubmission(String),
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),
}

/// Everything a tooltip or side panel shows about one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDetail {
    pub id: NodeId,
    pub caption: String,
    /// Rendered caption width in pixels.
    pub caption_px: f64,
    pub label: String,
    pub correct: Option<bool>,
    pub level: usize,
    pub role: NodeRole,
    pub usage_count: usize,
    pub usage_share: f64,
    pub selected: bool,
}

pub struct GraphContext {
    graph: StepGraph,
    layout: Layout,
    usage: UsageStats,
    metrics: LabelMetrics,
    highlight: Highlight,
    selected: Option<NodeId>,
    interactions: BTreeMap<NodeId, NodeInteraction>,
}

impl GraphContext {
    /// Build the context for one graph load.
    pub fn load(
        payload: &GraphPayload,
        mode: LayoutMode,
        canvas: Canvas,
        planner: &LayoutPlanner,
    ) -> Result<Self, ContextError> {
        Self::load_with(payload, mode, canvas, planner, InteractionConfig::default())
    }

    pub fn load_with(
        payload: &GraphPayload,
        mode: LayoutMode,
        canvas: Canvas,
        planner: &LayoutPlanner,
        interaction: InteractionConfig,
    ) -> Result<Self, ContextError> {
        let graph = StepGraph::from_payload(payload);
        let layout = planner.plan(&graph, mode, canvas)?;
        let usage = UsageStats::from_graph(&graph);
        let interactions = graph
            .nodes
            .iter()
            .map(|&id| (id, NodeInteraction::new(interaction)))
            .collect();

        tracing::info!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            submissions = usage.total,
            mode = mode.as_str(),
            "graph loaded"
        );

        Ok(Self {
            graph,
            layout,
            usage,
            metrics: LabelMetrics::default(),
            highlight: Highlight::empty(),
            selected: None,
            interactions,
        })
    }

    pub fn graph(&self) -> &StepGraph {
        &self.graph
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn usage(&self) -> &UsageStats {
        &self.usage
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn set_label_metrics(&mut self, metrics: LabelMetrics) {
        self.metrics = metrics;
    }

    /// Emphasize the path of one submission, replacing any previous highlight.
    pub fn highlight_submission(&mut self, uid: &str) -> Result<&Highlight, ContextError> {
        let submission = self
            .graph
            .submission(uid)
            .ok_or_else(|| ContextError::UnknownSubmission(uid.to_string()))?;

        let mut highlight = Highlight::for_path(&self.graph, &submission.nodes);
        highlight.submission = Some(uid.to_string());
        tracing::debug!(uid, nodes = highlight.nodes.len(), "highlight submission");

        self.highlight = highlight;
        Ok(&self.highlight)
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = Highlight::empty();
    }

    /// Toggle selection of `id`. Returns the selection afterwards.
    pub fn select(&mut self, id: NodeId) -> Result<Option<NodeId>, ContextError> {
        if !self.graph.contains(id) {
            return Err(ContextError::UnknownNode(id));
        }
        self.selected = if self.selected == Some(id) {
            None
        } else {
            Some(id)
        };
        Ok(self.selected)
    }

    /// Route a pointer event to the state machine of node `id`.
    pub fn pointer(&mut self, id: NodeId, event: PointerEvent) -> Result<Vec<Effect>, ContextError> {
        let effects = self
            .interactions
            .get_mut(&id)
            .ok_or(ContextError::UnknownNode(id))?
            .handle(event);

        if effects.contains(&Effect::Click) {
            self.select(id)?;
        }
        Ok(effects)
    }

    pub fn node_detail(&self, id: NodeId) -> Result<NodeDetail, ContextError> {
        let node = self.layout.node(id).ok_or(ContextError::UnknownNode(id))?;
        let label = self.graph.label(id).unwrap_or_default().to_string();

        let caption = self.metrics.caption(&label);

        Ok(NodeDetail {
            id,
            caption_px: self.metrics.text_width(&caption),
            caption,
            label,
            correct: self.graph.correct.get(&id).copied(),
            level: node.level,
            role: NodeRole::of(&self.layout, id),
            usage_count: self.usage.node_count(id),
            usage_share: self.usage.node_share(id),
            selected: self.selected == Some(id),
        })
    }
}
