/// Exhaustive layout validation tool
/// Checks every selection combination against the layout invariants, in parallel
use std::time::Instant;

use anyhow::bail;
use rayon::prelude::*;

use carbon_treemap::budget::categories::{self, CategoryKey};
use carbon_treemap::budget::{BudgetState, BudgetStore};
use carbon_treemap::{
    calculate_scaled_treemap, calculate_treemap, LayoutConfig, LayoutItem, TreemapBox,
    EMPTY_SLICE_NAME,
};

const OPTIONS_PER_CATEGORY: usize = 5;
const CANVAS_W: f64 = 640.0;
const CANVAS_H: f64 = 480.0;
const CONTAINER: f64 = 480.0;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("carbon_treemap=warn".parse()?),
        )
        .init();

    let budget = std::env::args()
        .nth(1)
        .map(|s| s.parse::<f64>())
        .transpose()?
        .unwrap_or_else(categories::max_footprint);

    println!("=== LAYOUT VALIDATION: every selection, both policies ===");
    println!("Budget: {:.2} t CO2e", budget);

    let states = all_states();
    println!("Selections: {}", states.len());

    let start = Instant::now();
    let failures: Vec<String> = states
        .par_iter()
        .flat_map_iter(|state| {
            let store = BudgetStore::new(*state);
            let items = store.layout_items();
            check_selection(&items, budget)
                .into_iter()
                .map(move |msg| format!("{:?}: {}", state, msg))
        })
        .collect();
    let elapsed = start.elapsed();

    println!(
        "Checked {} layouts in {:.2}ms",
        states.len() * 2,
        elapsed.as_secs_f64() * 1000.0
    );

    if failures.is_empty() {
        println!("✓ All invariants hold");
        return Ok(());
    }

    for failure in failures.iter().take(10) {
        println!("  ✗ {}", failure);
    }
    if failures.len() > 10 {
        println!("  ... (truncated, {} more)", failures.len() - 10);
    }
    bail!("{} invariant violations", failures.len());
}

fn all_states() -> Vec<BudgetState> {
    let n = CategoryKey::ALL.len() as u32;
    (0..OPTIONS_PER_CATEGORY.pow(n))
        .map(|mut code| {
            let mut state = BudgetState::default();
            for key in CategoryKey::ALL {
                state.set(key, code % OPTIONS_PER_CATEGORY);
                code /= OPTIONS_PER_CATEGORY;
            }
            state
        })
        .collect()
}

fn check_selection(items: &[LayoutItem], budget: f64) -> Vec<String> {
    let mut errors = Vec::new();
    let padded = LayoutConfig::default();
    let flush = LayoutConfig {
        padding: 0.0,
        ..LayoutConfig::default()
    };
    let sum: f64 = items.iter().map(|i| i.value).sum();

    match calculate_treemap(items, budget, CANVAS_W, CANVAS_H, &padded) {
        Ok(boxes) => check_boxes("fixed", &boxes, items.len(), CANVAS_W, CANVAS_H, &mut errors),
        Err(e) => errors.push(format!("fixed: {}", e)),
    }

    match calculate_scaled_treemap(items, budget, CONTAINER, &padded) {
        Ok(scaled) => {
            let size = scaled.resolved_size;
            check_boxes("scaled", &scaled.boxes, items.len(), size, size, &mut errors);
            if sum >= budget && size != CONTAINER {
                errors.push(format!("scaled: full budget resolved to {}", size));
            }
        }
        Err(e) => errors.push(format!("scaled: {}", e)),
    }

    if let Ok(boxes) = calculate_treemap(items, budget, CANVAS_W, CANVAS_H, &flush) {
        let expected = CANVAS_W * CANVAS_H * (sum / budget).min(1.0);
        let actual: f64 = boxes.iter().map(TreemapBox::area).sum();
        let tolerance: f64 = boxes.iter().map(|b| b.width + b.height + 2.0).sum();
        if (actual - expected).abs() > tolerance {
            errors.push(format!(
                "fixed: area {} differs from {} by more than {}",
                actual, expected, tolerance
            ));
        }
    }

    if let Ok(scaled) = calculate_scaled_treemap(items, budget, CONTAINER, &flush) {
        let expected = scaled.resolved_size * scaled.resolved_size;
        let actual: f64 = scaled.boxes.iter().map(TreemapBox::area).sum();
        // Clamping to a fractional side can move far edges by a whole pixel
        let tolerance: f64 = scaled.boxes.iter().map(|b| 2.0 * (b.width + b.height + 2.0)).sum();
        if (actual - expected).abs() > tolerance {
            errors.push(format!(
                "scaled: area {} differs from {} by more than {}",
                actual, expected, tolerance
            ));
        }
    }

    errors
}

fn check_boxes(policy: &str, boxes: &[TreemapBox], expected: usize, w: f64, h: f64, errors: &mut Vec<String>) {
    if boxes.len() != expected {
        errors.push(format!("{}: {} boxes for {} items", policy, boxes.len(), expected));
    }
    for (i, b) in boxes.iter().enumerate() {
        if b.name == EMPTY_SLICE_NAME {
            errors.push(format!("{}: empty slice emitted", policy));
        }
        let coords = [b.x0, b.y0, b.x1, b.y1];
        if coords.iter().any(|c| !c.is_finite()) {
            errors.push(format!("{}: non-finite box '{}'", policy, b.name));
            continue;
        }
        if b.x0 < 0.0 || b.y0 < 0.0 || b.x1 > w || b.y1 > h || b.x1 < b.x0 || b.y1 < b.y0 {
            errors.push(format!(
                "{}: '{}' at ({}, {})-({}, {}) escapes {}x{}",
                policy, b.name, b.x0, b.y0, b.x1, b.y1, w, h
            ));
        }
        for other in &boxes[i + 1..] {
            if b.intersection_area(other) > 0.0 {
                errors.push(format!("{}: '{}' overlaps '{}'", policy, b.name, other.name));
            }
        }
    }
}
