use super::{LayoutItem, EMPTY_SLICE_NAME};

/// One entry of the working list handed to the partitioner.
/// Borrows from the caller's items; the empty slice borrows nothing.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LayoutNode<'a> {
    pub name: &'a str,
    pub value: f64,
    pub color: Option<&'a str>,
    pub weight: f64,
}

impl<'a> LayoutNode<'a> {
    fn from_item(item: &'a LayoutItem) -> Self {
        Self {
            name: item.name.as_str(),
            value: item.value,
            color: item.color.as_deref(),
            weight: item.value,
        }
    }

    fn empty_slice(value: f64) -> Self {
        Self {
            name: EMPTY_SLICE_NAME,
            value,
            color: None,
            weight: value,
        }
    }

    pub fn is_empty_slice(&self) -> bool {
        self.name == EMPTY_SLICE_NAME
    }
}

pub(crate) fn items_sum(items: &[LayoutItem]) -> f64 {
    items.iter().map(|item| item.value).sum()
}

/// Fixed-canvas working list: appends the empty slice when the items leave
/// part of `total` unallocated, then sorts by value descending with the
/// empty slice pinned last.
pub(crate) fn with_empty_slice(items: &[LayoutItem], total: f64) -> Vec<LayoutNode<'_>> {
    let sum = items_sum(items);
    let mut nodes: Vec<LayoutNode<'_>> = items.iter().map(LayoutNode::from_item).collect();
    if sum < total {
        nodes.push(LayoutNode::empty_slice(total - sum));
    }

    // Stable sort: equal values keep input order
    nodes.sort_by(|a, b| match (a.is_empty_slice(), b.is_empty_slice()) {
        (true, false) => std::cmp::Ordering::Greater,
        (false, true) => std::cmp::Ordering::Less,
        _ => b.weight.total_cmp(&a.weight),
    });
    nodes
}

/// Scaled-canvas working list: items only, value descending.
pub(crate) fn sorted_descending(items: &[LayoutItem]) -> Vec<LayoutNode<'_>> {
    let mut nodes: Vec<LayoutNode<'_>> = items.iter().map(LayoutNode::from_item).collect();
    nodes.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    nodes
}

/// Side of the square that holds the filled share of the budget:
/// `sqrt(min(total, sum) / total) * container`.
pub(crate) fn resolved_side(items_sum: f64, total: f64, container_size: f64) -> f64 {
    if items_sum >= total {
        return container_size;
    }
    let share = items_sum / total;
    (share * container_size * container_size).sqrt()
}
