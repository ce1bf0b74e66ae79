//! Squarified treemap layout for a single level of budget items.
//!
//! Two canvas policies are exposed as separate entry points:
//! [`calculate_treemap`] draws on a fixed canvas and reserves the unused
//! budget as an invisible empty slice, while [`calculate_scaled_treemap`]
//! shrinks a square canvas to the filled share and reports its side.

mod extract;
mod normalize;
mod squarify;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};
use self::normalize::LayoutNode;
use self::squarify::Cell;

/// Reserved name of the synthetic slice standing for unallocated budget.
/// Items carrying this name are laid out but never emitted as boxes.
pub const EMPTY_SLICE_NAME: &str = "_empty";

/// One leaf to lay out. Names should be unique within a call; consumers that
/// key boxes by name will otherwise collapse duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutItem {
    pub name: CompactString,
    pub value: f64,
    /// Opaque tag copied onto the item's box (a CSS colour in practice)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<CompactString>,
}

impl LayoutItem {
    pub fn new(name: impl Into<CompactString>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<CompactString>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// A laid-out item. Coordinates are whole pixels when rounding is enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapBox {
    pub name: CompactString,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<CompactString>,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub width: f64,
    pub height: f64,
}

impl TreemapBox {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Area shared with `other` (zero for neighbours that only touch).
    pub fn intersection_area(&self, other: &TreemapBox) -> f64 {
        let w = (self.x1.min(other.x1) - self.x0.max(other.x0)).max(0.0);
        let h = (self.y1.min(other.y1) - self.y0.max(other.y0)).max(0.0);
        w * h
    }
}

/// Result of the scaled-canvas policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledTreemap {
    pub boxes: Vec<TreemapBox>,
    /// Side of the square actually filled; the caller pads the rest.
    pub resolved_size: f64,
}

/// Configuration for treemap layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Gap between neighbouring boxes and along the canvas border (px)
    pub padding: f64,
    /// Snap box edges to whole pixels
    pub round: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 2.0,
            round: true,
        }
    }
}

/// Fixed-canvas layout. Unused budget (`total` minus the item sum) becomes an
/// empty slice placed last, so it lands in the bottom/right remainder and is
/// left out of the returned boxes. Over-budget items fill the whole canvas.
pub fn calculate_treemap(
    items: &[LayoutItem],
    total: f64,
    width: f64,
    height: f64,
    config: &LayoutConfig,
) -> LayoutResult<Vec<TreemapBox>> {
    validate(items, total, config)?;
    validate_canvas("width", width)?;
    validate_canvas("height", height)?;

    let sum = normalize::items_sum(items);
    if sum > total {
        tracing::warn!("Items exceed budget ({} > {}), filling the canvas", sum, total);
    }

    let nodes = normalize::with_empty_slice(items, total);
    tracing::debug!(
        "Fixed treemap: {} items (+{} empty) in {:.0}x{:.0}, total={}",
        items.len(),
        nodes.len() - items.len(),
        width,
        height,
        total
    );

    Ok(layout_nodes(&nodes, Cell::new(0.0, 0.0, width, height), config))
}

/// Scaled-canvas layout. The square container shrinks to side
/// `sqrt(min(sum, total) / total) * container_size` and the items fill it
/// completely; no empty slice is involved.
pub fn calculate_scaled_treemap(
    items: &[LayoutItem],
    total: f64,
    container_size: f64,
    config: &LayoutConfig,
) -> LayoutResult<ScaledTreemap> {
    validate(items, total, config)?;
    validate_canvas("size", container_size)?;

    let sum = normalize::items_sum(items);
    let resolved_size = normalize::resolved_side(sum, total, container_size);
    if sum > total {
        tracing::warn!("Items exceed budget ({} > {}), using full container", sum, total);
    }

    let nodes = normalize::sorted_descending(items);
    tracing::debug!(
        "Scaled treemap: {} items, share={:.3}, resolved {:.1} of {:.1}",
        items.len(),
        sum.min(total) / total,
        resolved_size,
        container_size
    );

    let boxes = layout_nodes(&nodes, Cell::new(0.0, 0.0, resolved_size, resolved_size), config);
    Ok(ScaledTreemap {
        boxes,
        resolved_size,
    })
}

fn layout_nodes(nodes: &[LayoutNode<'_>], canvas: Cell, config: &LayoutConfig) -> Vec<TreemapBox> {
    // Outer half of the padding comes off the canvas, inner half off each box
    let inner = canvas.inset(config.padding / 2.0);
    let weights: Vec<f64> = nodes.iter().map(|n| n.weight).collect();
    let cells = squarify::squarify(&weights, inner);
    extract::extract_boxes(nodes, &cells, canvas, config)
}

fn validate(items: &[LayoutItem], total: f64, config: &LayoutConfig) -> LayoutResult<()> {
    if !total.is_finite() || total <= 0.0 {
        return Err(LayoutError::InvalidTotal(total));
    }
    if !config.padding.is_finite() || config.padding < 0.0 {
        return Err(LayoutError::InvalidPadding(config.padding));
    }
    if let Some(bad) = items.iter().find(|i| !i.value.is_finite() || i.value < 0.0) {
        return Err(LayoutError::value(bad.name.as_str(), bad.value));
    }
    Ok(())
}

fn validate_canvas(axis: &'static str, value: f64) -> LayoutResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(LayoutError::canvas(axis, value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unpadded() -> LayoutConfig {
        LayoutConfig {
            padding: 0.0,
            round: true,
        }
    }

    fn total_area(boxes: &[TreemapBox]) -> f64 {
        boxes.iter().map(TreemapBox::area).sum()
    }

    #[test]
    fn full_budget_splits_three_to_one() {
        let items = vec![LayoutItem::new("A", 3.0), LayoutItem::new("B", 1.0)];
        let boxes = calculate_treemap(&items, 4.0, 100.0, 100.0, &unpadded()).unwrap();
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].name, "A");
        assert_eq!(boxes[0].area(), 7500.0);
        assert_eq!(boxes[1].name, "B");
        assert_eq!(boxes[1].area(), 2500.0);
        assert!(boxes.iter().all(|b| b.name != EMPTY_SLICE_NAME));
    }

    #[test]
    fn partial_budget_leaves_empty_remainder() {
        let items = vec![LayoutItem::new("A", 1.0)];
        let boxes = calculate_treemap(&items, 4.0, 100.0, 100.0, &unpadded()).unwrap();
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].area(), 2500.0);
        assert_eq!((boxes[0].x0, boxes[0].y0), (0.0, 0.0));
    }

    #[test]
    fn scaled_canvas_shrinks_to_share() {
        let items = vec![LayoutItem::new("A", 1.0)];
        let scaled = calculate_scaled_treemap(&items, 4.0, 100.0, &unpadded()).unwrap();
        assert!((scaled.resolved_size - 50.0).abs() < 1e-9);
        let a = &scaled.boxes[0];
        assert_eq!((a.x0, a.y0, a.x1, a.y1), (0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn default_padding_separates_neighbours() {
        let items = vec![LayoutItem::new("A", 3.0), LayoutItem::new("B", 1.0)];
        let boxes = calculate_treemap(&items, 4.0, 100.0, 100.0, &LayoutConfig::default()).unwrap();
        let (a, b) = (&boxes[0], &boxes[1]);
        assert_eq!((a.x0, a.y0, a.y1), (2.0, 2.0, 98.0));
        assert_eq!(b.x1, 98.0);
        assert_eq!(b.x0 - a.x1, 2.0);
    }

    #[test]
    fn empty_items_give_empty_boxes() {
        let config = LayoutConfig::default();
        assert!(calculate_treemap(&[], 4.0, 100.0, 100.0, &config).unwrap().is_empty());
        let scaled = calculate_scaled_treemap(&[], 4.0, 100.0, &config).unwrap();
        assert!(scaled.boxes.is_empty());
        assert_eq!(scaled.resolved_size, 0.0);
    }

    #[test]
    fn zero_values_yield_degenerate_boxes() {
        let items = vec![LayoutItem::new("A", 0.0), LayoutItem::new("B", 0.0)];
        let boxes = calculate_treemap(&items, 4.0, 100.0, 100.0, &unpadded()).unwrap();
        assert_eq!(boxes.len(), 2);
        for b in &boxes {
            assert_eq!(b.area(), 0.0);
            assert!(b.x0.is_finite() && b.y0.is_finite());
        }

        let scaled = calculate_scaled_treemap(&items, 4.0, 100.0, &unpadded()).unwrap();
        assert_eq!(scaled.boxes.len(), 2);
        assert_eq!(total_area(&scaled.boxes), 0.0);
    }

    #[test]
    fn over_budget_fills_the_canvas() {
        let items = vec![LayoutItem::new("A", 5.0), LayoutItem::new("B", 3.0)];
        let boxes = calculate_treemap(&items, 4.0, 80.0, 80.0, &unpadded()).unwrap();
        assert_eq!(total_area(&boxes), 6400.0);
        let scaled = calculate_scaled_treemap(&items, 4.0, 80.0, &unpadded()).unwrap();
        assert_eq!(scaled.resolved_size, 80.0);
    }

    #[test]
    fn overflowing_item_sum_still_fills_the_canvas() {
        let items = vec![LayoutItem::new("A", 1e308), LayoutItem::new("B", 1e308)];
        let boxes = calculate_treemap(&items, 1.0, 100.0, 100.0, &unpadded()).unwrap();
        assert_eq!(boxes[0].area(), 5000.0);
        assert_eq!(boxes[1].area(), 5000.0);

        let scaled = calculate_scaled_treemap(&items, 1.0, 100.0, &unpadded()).unwrap();
        assert_eq!(scaled.resolved_size, 100.0);
        assert_eq!(total_area(&scaled.boxes), 10_000.0);
    }

    #[test]
    fn invalid_input_is_rejected() {
        let ok = vec![LayoutItem::new("A", 1.0)];
        let config = LayoutConfig::default();
        assert_eq!(
            calculate_treemap(&ok, 0.0, 10.0, 10.0, &config),
            Err(LayoutError::InvalidTotal(0.0))
        );
        assert!(matches!(
            calculate_treemap(&ok, 1.0, 0.0, 10.0, &config),
            Err(LayoutError::InvalidCanvas { axis: "width", .. })
        ));
        assert!(matches!(
            calculate_scaled_treemap(&ok, 1.0, f64::INFINITY, &config),
            Err(LayoutError::InvalidCanvas { axis: "size", .. })
        ));
        let bad = vec![LayoutItem::new("A", 1.0), LayoutItem::new("B", -1.0)];
        assert!(matches!(
            calculate_scaled_treemap(&bad, 1.0, 10.0, &config),
            Err(LayoutError::InvalidValue { ref name, .. }) if name == "B"
        ));
        let nan = vec![LayoutItem::new("C", f64::NAN)];
        assert!(calculate_treemap(&nan, 1.0, 10.0, 10.0, &config).is_err());
        let negative_pad = LayoutConfig {
            padding: -1.0,
            round: true,
        };
        assert_eq!(
            calculate_treemap(&ok, 1.0, 10.0, 10.0, &negative_pad),
            Err(LayoutError::InvalidPadding(-1.0))
        );
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let items = vec![
            LayoutItem::new("Transportation", 3.2).with_color("#34D399"),
            LayoutItem::new("Housing", 2.8).with_color("#60A5FA"),
            LayoutItem::new("Food", 2.5).with_color("#FBBF24"),
            LayoutItem::new("Goods & Services", 2.0).with_color("#F87171"),
            LayoutItem::new("Digital Consumption", 0.5).with_color("#A78BFA"),
        ];
        let config = LayoutConfig::default();
        let first = calculate_treemap(&items, 16.3, 640.0, 480.0, &config).unwrap();
        let second = calculate_treemap(&items, 16.3, 640.0, 480.0, &config).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].color.as_deref(), Some("#34D399"));
    }
}
