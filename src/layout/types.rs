//! Data structures for layout computation.

use crate::payload::NodeId;
use serde::{Deserialize, Serialize};

/// Which leveling and positioning convention to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Left to right, fixed start and fixed end.
    Dag,
    /// Top to bottom, fixed root.
    Tree,
}

impl LayoutMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dag" => Some(Self::Dag),
            "tree" => Some(Self::Tree),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dag => "dag",
            Self::Tree => "tree",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.height / 2.0
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(800.0, 500.0)
    }
}

/// A placement hint for one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: NodeId,
    pub level: usize,
    pub x: f64,
    pub y: f64,
    /// Must not be moved by the downstream physics simulation.
    pub fixed: bool,
}

/// The complete layout result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub mode: LayoutMode,
    pub width: f64,
    pub height: f64,
    pub start: Option<NodeId>,
    /// Only resolved in [`LayoutMode::Dag`].
    pub end: Option<NodeId>,
    /// Sorted by id.
    pub nodes: Vec<LayoutNode>,
}

impl Layout {
    pub fn empty(mode: LayoutMode, canvas: Canvas) -> Self {
        Self {
            mode,
            width: canvas.width,
            height: canvas.height,
            start: None,
            end: None,
            nodes: Vec::new(),
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&LayoutNode> {
        self.nodes
            .binary_search_by_key(&id, |n| n.id)
            .ok()
            .map(|idx| &self.nodes[idx])
    }

    pub fn max_level(&self) -> usize {
        self.nodes.iter().map(|n| n.level).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!(LayoutMode::from_str("dag"), Some(LayoutMode::Dag));
        assert_eq!(LayoutMode::from_str("TREE"), Some(LayoutMode::Tree));
        assert_eq!(LayoutMode::from_str("radial"), None);
    }

    #[test]
    fn test_node_serializes_flat() {
        let node = LayoutNode {
            id: 3,
            level: 2,
            x: 10.0,
            y: 20.5,
            fixed: false,
        };
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"id":3,"level":2,"x":10.0,"y":20.5,"fixed":false}"#);
    }
}
