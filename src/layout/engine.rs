//! Layout planner core implementation.

use crate::ir::StepGraph;
use crate::payload::NodeId;

use super::LayoutError;
use super::levels::{LevelAssignment, assign_levels};
use super::placement::{place_dag, place_tree};
use super::types::{Canvas, Layout, LayoutMode};

/// Layout planner configuration and computation.
#[derive(Debug, Clone)]
pub struct LayoutPlanner {
    pub(crate) margin: f64,
}

impl Default for LayoutPlanner {
    fn default() -> Self {
        Self { margin: 50.0 }
    }
}

impl LayoutPlanner {
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Compute the layout for the given graph.
    pub fn plan(
        &self,
        graph: &StepGraph,
        mode: LayoutMode,
        canvas: Canvas,
    ) -> Result<Layout, LayoutError> {
        if graph.is_empty() {
            return Ok(Layout::empty(mode, canvas));
        }
        let margin = self.effective_margin(canvas)?;
        if !graph.contains(graph.start) {
            return Err(LayoutError::NoStartNode(graph.start));
        }

        // Phase 1: Level assignment
        let levels = assign_levels(graph, mode);

        // Phase 2: Positioning
        let (end, nodes) = match mode {
            LayoutMode::Dag => {
                let end = resolve_end(graph, &levels)?;
                let nodes = place_dag(&levels, graph.start, end, canvas, margin);
                (end, nodes)
            }
            LayoutMode::Tree => (
                None,
                place_tree(&levels, graph.start, canvas, margin),
            ),
        };

        tracing::debug!(
            mode = mode.as_str(),
            nodes = nodes.len(),
            start = graph.start,
            end = ?end,
            "planned layout"
        );

        Ok(Layout {
            mode,
            width: canvas.width,
            height: canvas.height,
            start: Some(graph.start),
            end,
            nodes,
        })
    }

    /// The configured margin, shrunk to fit canvases smaller than two margins.
    fn effective_margin(&self, canvas: Canvas) -> Result<f64, LayoutError> {
        let usable = |extent: f64| extent.is_finite() && extent >= 0.0;
        if !(usable(canvas.width) && usable(canvas.height)) {
            return Err(LayoutError::InvalidCanvas {
                width: canvas.width,
                height: canvas.height,
            });
        }
        Ok(self
            .margin
            .max(0.0)
            .min(canvas.center_x())
            .min(canvas.center_y()))
    }
}

/// The explicit end step when one is given, otherwise the highest-valued
/// node reached from the start.
fn resolve_end(
    graph: &StepGraph,
    levels: &LevelAssignment,
) -> Result<Option<NodeId>, LayoutError> {
    if let Some(end) = graph.end_hint {
        if !graph.contains(end) {
            return Err(LayoutError::UnknownEndNode(end));
        }
        return Ok((end != graph.start).then_some(end));
    }

    Ok(levels
        .reachable()
        .iter()
        .flatten()
        .copied()
        .filter(|&id| id != graph.start)
        .max())
}
