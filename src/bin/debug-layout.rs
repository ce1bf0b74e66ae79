/// Diagnostic tool to verify selection → footprint → layout pipeline
use carbon_treemap::budget::categories::{self, CategoryKey};
use carbon_treemap::budget::BudgetStore;
use carbon_treemap::{calculate_scaled_treemap, calculate_treemap, LayoutConfig, TreemapBox};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("carbon_treemap=debug".parse()?),
        )
        .init();

    // Optional option indices, one per category in display order
    let mut store = BudgetStore::default();
    for (key, arg) in CategoryKey::ALL.into_iter().zip(std::env::args().skip(1)) {
        store.select(key, arg.parse()?);
    }

    println!("=== DIAGNOSTIC: Selection → Layout Pipeline ===");

    println!("\n[1] Footprint by category:");
    for entry in store.footprint() {
        let index = store.state().get(entry.id);
        let label = categories::category(entry.id)
            .options
            .get(index)
            .map(|o| o.label)
            .unwrap_or("(out of range)");
        println!(
            "    {:<20} [{}] {:<40} {:.2} t",
            entry.name, index, label, entry.value
        );
    }
    let budget = categories::max_footprint();
    println!(
        "    Total: {:.2} t (min {:.2}, max {:.2})",
        store.total(),
        categories::min_footprint(),
        budget
    );

    let items = store.layout_items();
    let config = LayoutConfig::default();

    // Fixed canvas
    let (w, h) = (1920.0, 1080.0);
    let boxes = calculate_treemap(&items, budget, w, h, &config)?;
    println!("\n[2] Fixed canvas {}x{}: {} boxes", w, h, boxes.len());
    print_boxes(&boxes);
    report_coverage(&boxes, w * h, store.total() / budget);

    // Scaled canvas
    let container = 1080.0;
    let scaled = calculate_scaled_treemap(&items, budget, container, &config)?;
    println!(
        "\n[3] Scaled canvas: resolved {:.1} of {:.1} container",
        scaled.resolved_size, container
    );
    print_boxes(&scaled.boxes);
    report_coverage(
        &scaled.boxes,
        scaled.resolved_size * scaled.resolved_size,
        1.0,
    );

    // Aspect ratios (squarified should keep these close to 1)
    println!("\n[4] Aspect ratios (fixed canvas):");
    for b in &boxes {
        let ratio = if b.width > 0.0 && b.height > 0.0 {
            (b.width / b.height).max(b.height / b.width)
        } else {
            f64::INFINITY
        };
        println!("    '{}' - {:.2}", b.name, ratio);
    }

    Ok(())
}

fn print_boxes(boxes: &[TreemapBox]) {
    for (i, b) in boxes.iter().enumerate() {
        println!(
            "    [{}] '{}' - rect: {}x{} ({}px²) at ({}, {}) - {:.2} t {}",
            i,
            b.name,
            b.width,
            b.height,
            b.area(),
            b.x0,
            b.y0,
            b.value,
            b.color.as_deref().unwrap_or("")
        );
    }
}

fn report_coverage(boxes: &[TreemapBox], canvas_area: f64, expected_share: f64) {
    let area: f64 = boxes.iter().map(TreemapBox::area).sum();
    let coverage = if canvas_area > 0.0 { area / canvas_area } else { 0.0 };
    println!(
        "    Coverage: {:.1}% (expected ≈{:.1}% before padding)",
        coverage * 100.0,
        expected_share.min(1.0) * 100.0
    );
}
