/// An axis-aligned cell produced by the partitioner, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Cell {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Cell {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Shrink by `pad` on every side. Sides that would cross collapse to
    /// their midpoint.
    pub fn inset(self, pad: f64) -> Self {
        let (x0, x1) = inset_span(self.x0, self.x1, pad);
        let (y0, y1) = inset_span(self.y0, self.y1, pad);
        Self { x0, y0, x1, y1 }
    }
}

fn inset_span(lo: f64, hi: f64, pad: f64) -> (f64, f64) {
    let (a, b) = (lo + pad, hi - pad);
    if b < a {
        let mid = (lo + hi) / 2.0;
        (mid, mid)
    } else {
        (a, b)
    }
}

/// Squarified layout (Bruls, Huizing, van Wijk) of `weights` inside `bounds`.
///
/// `weights` must already be in layout order. Returns one cell per weight,
/// same order. Rows are laid along the shorter side of the remaining space;
/// every edge between two neighbours is written from a single cumulative
/// coordinate, so rounding later keeps shared edges shared.
pub(crate) fn squarify(weights: &[f64], bounds: Cell) -> Vec<Cell> {
    let mut result = Vec::with_capacity(weights.len());
    if weights.is_empty() {
        return result;
    }

    // Finite weights can still overflow when summed; rescale by the largest first
    let unit = if weights.iter().sum::<f64>().is_finite() {
        1.0
    } else {
        weights.iter().copied().fold(0.0, f64::max)
    };
    let total_weight: f64 = weights.iter().map(|w| w / unit).sum();
    let canvas_area = bounds.area();
    if total_weight <= 0.0 || canvas_area <= 0.0 {
        tracing::debug!(
            "Squarify: degenerate input (weight={}, area={}), collapsing {} cells",
            total_weight,
            canvas_area,
            weights.len()
        );
        let origin = Cell::new(bounds.x0, bounds.y0, bounds.x0, bounds.y0);
        result.resize(weights.len(), origin);
        return result;
    }

    // Normalized areas
    let scale = canvas_area / total_weight;
    let areas: Vec<f64> = weights.iter().map(|w| w / unit * scale).collect();

    let mut rest = bounds;
    let mut start = 0;
    while start < areas.len() {
        // A wide remainder gets a column on its left edge, a tall one a row on top
        let column = rest.width() >= rest.height();
        let side = if column { rest.height() } else { rest.width() };

        let mut end = start + 1;
        let mut row_sum = areas[start];
        let mut worst = worst_aspect_ratio(&areas[start..end], row_sum, side);
        while end < areas.len() {
            let candidate_sum = row_sum + areas[end];
            let candidate = worst_aspect_ratio(&areas[start..=end], candidate_sum, side);
            if candidate > worst {
                break;
            }
            worst = candidate;
            row_sum = candidate_sum;
            end += 1;
        }

        // The final row takes whatever is left so float drift never leaves a gap
        let (origin, far) = if column { (rest.x0, rest.x1) } else { (rest.y0, rest.y1) };
        let band_end = if end == areas.len() || side <= 0.0 {
            far
        } else {
            (origin + row_sum / side).min(far)
        };

        lay_row(&areas[start..end], row_sum, rest, column, band_end, &mut result);

        if column {
            rest.x0 = band_end;
        } else {
            rest.y0 = band_end;
        }
        start = end;
    }

    result
}

/// Place one row. `band_end` is the far edge of the band across the short
/// axis; the row's length is split proportionally among `row`.
fn lay_row(row: &[f64], row_sum: f64, rest: Cell, column: bool, band_end: f64, out: &mut Vec<Cell>) {
    let (mut pos, end) = if column { (rest.y0, rest.y1) } else { (rest.x0, rest.x1) };
    let length = end - pos;
    let last = row.len() - 1;

    for (i, &area) in row.iter().enumerate() {
        let next = if row_sum <= 0.0 {
            pos
        } else if i == last {
            end
        } else {
            (pos + length * (area / row_sum)).min(end)
        };

        let cell = if column {
            Cell::new(rest.x0, pos, band_end, next)
        } else {
            Cell::new(pos, rest.y0, next, band_end)
        };
        out.push(cell);
        pos = next;
    }
}

/// Worst aspect ratio of a row of `areas` (summing to `sum`) laid against `side`.
/// A zero-area member makes the row infinitely bad.
fn worst_aspect_ratio(row: &[f64], sum: f64, side: f64) -> f64 {
    if row.is_empty() || sum <= 0.0 || side <= 0.0 {
        return f64::INFINITY;
    }
    let max_r = row.iter().copied().fold(0.0, f64::max);
    let min_r = row.iter().copied().fold(f64::INFINITY, f64::min);
    if min_r <= 0.0 {
        return f64::INFINITY;
    }
    let side_sq = side * side;
    let sum_sq = sum * sum;
    let a = (side_sq * max_r) / sum_sq;
    let b = sum_sq / (side_sq * min_r);
    a.max(b)
}

#[cfg(test)]
mod tests {
    use super::{squarify, worst_aspect_ratio, Cell};

    fn canvas(w: f64, h: f64) -> Cell {
        Cell::new(0.0, 0.0, w, h)
    }

    #[test]
    fn single_item_fills_viewport_without_axis_swap() {
        let cells = squarify(&[7.0], canvas(1920.0, 1080.0));
        assert_eq!(cells, vec![canvas(1920.0, 1080.0)]);
    }

    #[test]
    fn layout_preserves_area_for_simple_case() {
        let weights = [4.0, 3.0, 2.0, 1.0];
        let cells = squarify(&weights, canvas(50.0, 20.0));
        assert_eq!(cells.len(), 4);
        let total_out: f64 = cells.iter().map(Cell::area).sum();
        assert!((total_out - 1000.0).abs() < 1e-6);
        for (cell, w) in cells.iter().zip(weights) {
            assert!((cell.area() - w * 100.0).abs() < 1e-6, "{:?}", cell);
        }
    }

    #[test]
    fn three_to_one_splits_into_columns() {
        let cells = squarify(&[3.0, 1.0], canvas(100.0, 100.0));
        assert_eq!(cells[0], Cell::new(0.0, 0.0, 75.0, 100.0));
        assert_eq!(cells[1], Cell::new(75.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn neighbours_share_exact_edges() {
        let cells = squarify(&[6.0, 6.0, 4.0, 3.0, 2.0, 2.0, 1.0], canvas(600.0, 400.0));
        let mut shared = 0;
        for pair in cells.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.x0 == b.x0 && a.x1 == b.x1 && (a.y1 - b.y0).abs() < 1e-9 {
                assert_eq!(a.y1, b.y0);
                shared += 1;
            }
            if a.y0 == b.y0 && a.y1 == b.y1 && (a.x1 - b.x0).abs() < 1e-9 {
                assert_eq!(a.x1, b.x0);
                shared += 1;
            }
        }
        assert!(shared > 0);
        let total: f64 = cells.iter().map(Cell::area).sum();
        assert!((total - 240_000.0).abs() < 1e-6);
    }

    #[test]
    fn zero_weights_get_zero_extent_cells() {
        let cells = squarify(&[2.0, 0.0, 0.0], canvas(10.0, 10.0));
        assert_eq!(cells.len(), 3);
        assert!((cells[0].area() - 100.0).abs() < 1e-9);
        for cell in &cells[1..] {
            assert_eq!(cell.area(), 0.0);
            assert!(cell.x0.is_finite() && cell.y0.is_finite());
        }
    }

    #[test]
    fn huge_weights_do_not_overflow_to_empty_cells() {
        let cells = squarify(&[1e308, 1e308], canvas(100.0, 100.0));
        assert_eq!(cells[0], Cell::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(cells[1], Cell::new(0.0, 50.0, 100.0, 100.0));
    }

    #[test]
    fn all_zero_weights_collapse_to_origin() {
        let cells = squarify(&[0.0, 0.0], Cell::new(3.0, 4.0, 10.0, 10.0));
        assert_eq!(cells, vec![Cell::new(3.0, 4.0, 3.0, 4.0); 2]);
    }

    #[test]
    fn zero_area_canvas_collapses_every_cell() {
        let cells = squarify(&[1.0, 2.0], canvas(0.0, 0.0));
        assert!(cells.iter().all(|c| c.area() == 0.0));
    }

    #[test]
    fn worst_ratio_of_square_is_one() {
        assert!((worst_aspect_ratio(&[100.0], 100.0, 10.0) - 1.0).abs() < 1e-12);
        assert_eq!(worst_aspect_ratio(&[5.0, 0.0], 5.0, 10.0), f64::INFINITY);
    }

    #[test]
    fn inset_collapses_thin_cells_to_midline() {
        let cell = Cell::new(10.0, 0.0, 11.0, 50.0).inset(1.0);
        assert_eq!(cell.x0, 10.5);
        assert_eq!(cell.x1, 10.5);
        assert_eq!(cell.y0, 1.0);
        assert_eq!(cell.y1, 49.0);
    }
}
