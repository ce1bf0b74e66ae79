use compact_str::CompactString;

use super::normalize::LayoutNode;
use super::squarify::Cell;
use super::{LayoutConfig, TreemapBox};

/// Turn partitioned cells into output boxes: inset for padding, snap to the
/// pixel grid and drop the empty slice. Order follows `nodes`.
pub(crate) fn extract_boxes(
    nodes: &[LayoutNode<'_>],
    cells: &[Cell],
    canvas: Cell,
    config: &LayoutConfig,
) -> Vec<TreemapBox> {
    let half_pad = config.padding / 2.0;
    nodes
        .iter()
        .zip(cells)
        .filter(|(node, _)| !node.is_empty_slice())
        .map(|(node, cell)| {
            let mut cell = cell.inset(half_pad);
            if config.round {
                cell = snap(cell, canvas);
            }
            TreemapBox {
                name: CompactString::new(node.name),
                value: node.value,
                color: node.color.map(CompactString::new),
                x0: cell.x0,
                y0: cell.y0,
                x1: cell.x1,
                y1: cell.y1,
                width: cell.width(),
                height: cell.height(),
            }
        })
        .collect()
}

/// Round each coordinate on its own, kept inside the whole-pixel part of the
/// canvas. Rounding is monotonic, so edges that were shared stay shared and
/// ordered edges stay ordered.
fn snap(cell: Cell, canvas: Cell) -> Cell {
    let sx = |v: f64| v.round().clamp(canvas.x0.ceil(), canvas.x1.floor().max(canvas.x0.ceil()));
    let sy = |v: f64| v.round().clamp(canvas.y0.ceil(), canvas.y1.floor().max(canvas.y0.ceil()));
    Cell::new(sx(cell.x0), sy(cell.y0), sx(cell.x1), sy(cell.y1))
}
