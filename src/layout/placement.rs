//! Anchor positions from level assignments.

use crate::payload::NodeId;

use super::levels::LevelAssignment;
use super::types::{Canvas, LayoutNode};

/// Left-to-right placement. The start sits on the left margin and the end on
/// the right margin, both vertically centered. Every other node is spread
/// horizontally by level and vertically within its level.
pub fn place_dag(
    levels: &LevelAssignment,
    start: NodeId,
    end: Option<NodeId>,
    canvas: Canvas,
    margin: f64,
) -> Vec<LayoutNode> {
    let max_level = levels.max_level();
    let inner_w = canvas.width - 2.0 * margin;
    let inner_h = canvas.height - 2.0 * margin;
    let mut nodes = Vec::new();

    for (bucket_level, bucket) in levels.buckets.iter().enumerate() {
        let free: Vec<NodeId> = bucket
            .iter()
            .copied()
            .filter(|&id| id != start && Some(id) != end)
            .collect();
        let count = free.len();

        for (idx, &id) in free.iter().enumerate() {
            let level = levels.level_of(id).unwrap_or(bucket_level);
            let x = if max_level == 0 {
                canvas.center_x()
            } else {
                margin + inner_w * level as f64 / max_level as f64
            };
            let y = margin + inner_h * (idx + 1) as f64 / (count + 1) as f64;
            nodes.push(LayoutNode {
                id,
                level,
                x,
                y,
                fixed: false,
            });
        }
    }

    nodes.push(LayoutNode {
        id: start,
        level: 0,
        x: margin,
        y: canvas.center_y(),
        fixed: true,
    });
    if let Some(end) = end {
        nodes.push(LayoutNode {
            id: end,
            level: levels.level_of(end).unwrap_or(max_level),
            x: canvas.width - margin,
            y: canvas.center_y(),
            fixed: true,
        });
    }

    nodes.sort_by_key(|n| n.id);
    nodes
}

/// Top-to-bottom placement. The root is fixed at the top center; each level
/// is a row, centered and evenly spread across the available width.
pub fn place_tree(
    levels: &LevelAssignment,
    start: NodeId,
    canvas: Canvas,
    margin: f64,
) -> Vec<LayoutNode> {
    let max_level = levels.max_level();
    let inner_w = canvas.width - 2.0 * margin;
    let inner_h = canvas.height - 2.0 * margin;
    let mut nodes = Vec::new();

    for (bucket_level, bucket) in levels.buckets.iter().enumerate() {
        let row: Vec<NodeId> = bucket.iter().copied().filter(|&id| id != start).collect();
        let count = row.len();
        if count == 0 {
            continue;
        }
        let spacing = inner_w / count as f64;
        let center_offset = (count - 1) as f64 / 2.0;

        for (idx, &id) in row.iter().enumerate() {
            let level = levels.level_of(id).unwrap_or(bucket_level);
            let y = if max_level == 0 {
                margin
            } else {
                margin + inner_h * level as f64 / max_level as f64
            };
            let x = canvas.center_x() + (idx as f64 - center_offset) * spacing;
            nodes.push(LayoutNode {
                id,
                level,
                x,
                y,
                fixed: false,
            });
        }
    }

    nodes.push(LayoutNode {
        id: start,
        level: 0,
        x: canvas.center_x(),
        y: margin,
        fixed: true,
    });

    nodes.sort_by_key(|n| n.id);
    nodes
}
