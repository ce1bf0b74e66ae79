use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use carbon_treemap::budget::categories::{self, CategoryKey};
use carbon_treemap::budget::{BudgetState, BudgetStore};
use carbon_treemap::{
    calculate_scaled_treemap, calculate_treemap, LayoutConfig, LayoutItem, TreemapBox,
};

/// How unused budget is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Policy {
    /// Fixed canvas, unused budget left as an empty region inside it
    Fixed,
    /// Square canvas shrunk to the filled share of the budget
    Scaled,
}

#[derive(Debug, Parser)]
#[command(name = "carbon-treemap", version, about = "Estimate a yearly carbon footprint and lay it out as a treemap")]
struct Cli {
    /// Option index for transportation (0 = highest impact)
    #[arg(long, default_value_t = 1)]
    transportation: usize,
    /// Option index for housing
    #[arg(long, default_value_t = 1)]
    housing: usize,
    /// Option index for food
    #[arg(long, default_value_t = 1)]
    food: usize,
    /// Option index for goods & services
    #[arg(long, default_value_t = 1)]
    goods: usize,
    /// Option index for digital consumption
    #[arg(long, default_value_t = 1)]
    digital: usize,

    /// Lay out items from a JSON array of {name, value, color?} instead
    #[arg(long)]
    items: Option<PathBuf>,

    /// Reference total in t CO₂e (defaults to the highest attainable footprint)
    #[arg(long)]
    budget: Option<f64>,

    #[arg(long, value_enum, default_value_t = Policy::Scaled)]
    policy: Policy,

    /// Canvas width for the fixed policy
    #[arg(long, default_value_t = 640.0)]
    width: f64,
    /// Canvas height for the fixed policy
    #[arg(long, default_value_t = 480.0)]
    height: f64,
    /// Container side for the scaled policy
    #[arg(long, default_value_t = 480.0)]
    size: f64,

    #[arg(long, default_value_t = 2.0)]
    padding: f64,
    /// Keep fractional coordinates
    #[arg(long)]
    no_round: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Print the category tables and exit
    #[arg(long)]
    list: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    total: f64,
    budget: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolved_size: Option<f64>,
    boxes: &'a [TreemapBox],
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("carbon_treemap=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    if cli.list {
        print_categories();
        return Ok(());
    }

    let items = match &cli.items {
        Some(path) => read_items(path)?,
        None => {
            let store = BudgetStore::new(BudgetState {
                transportation: cli.transportation,
                housing: cli.housing,
                food: cli.food,
                goods: cli.goods,
                digital: cli.digital,
            });
            tracing::info!("Footprint for selection: {:.2} t CO2e/year", store.total());
            store.layout_items()
        }
    };

    let total: f64 = items.iter().map(|i| i.value).sum();
    let budget = cli.budget.unwrap_or_else(categories::max_footprint);
    let config = LayoutConfig {
        padding: cli.padding,
        round: !cli.no_round,
    };

    let (boxes, resolved_size) = match cli.policy {
        Policy::Fixed => (
            calculate_treemap(&items, budget, cli.width, cli.height, &config)?,
            None,
        ),
        Policy::Scaled => {
            let scaled = calculate_scaled_treemap(&items, budget, cli.size, &config)?;
            (scaled.boxes, Some(scaled.resolved_size))
        }
    };
    tracing::info!("Laid out {} boxes ({:?} policy)", boxes.len(), cli.policy);

    if cli.json {
        let output = Output {
            total,
            budget,
            resolved_size,
            boxes: &boxes,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_table(&boxes, total, budget, resolved_size);
    }

    Ok(())
}

fn read_items(path: &Path) -> Result<Vec<LayoutItem>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading items from {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing items in {}", path.display()))
}

fn print_categories() {
    for c in categories::categories() {
        println!("{} ({}) [{}]", c.name, c.id.as_str(), c.color);
        for (i, o) in c.options.iter().enumerate() {
            println!("  [{}] {:<40} {:>5.2} t  {}", i, o.label, o.value, o.description);
        }
    }
    let keys: Vec<&str> = CategoryKey::ALL.iter().map(|k| k.as_str()).collect();
    println!("\nSelect with --{} <INDEX>", keys.join(" / --"));
}

fn print_table(boxes: &[TreemapBox], total: f64, budget: f64, resolved_size: Option<f64>) {
    println!(
        "Footprint {:.2} t of {:.2} t budget ({:.0}%)",
        total,
        budget,
        total / budget * 100.0
    );
    if let Some(size) = resolved_size {
        println!("Resolved canvas: {:.1} x {:.1}", size, size);
    }
    println!();
    println!("{:<22} {:>7} {:>19} {:>11}", "name", "t CO2e", "x0,y0 - x1,y1", "w x h");
    for b in boxes {
        println!(
            "{:<22} {:>7.2} {:>19} {:>11}",
            b.name,
            b.value,
            format!("{},{} - {},{}", b.x0, b.y0, b.x1, b.y1),
            format!("{}x{}", b.width, b.height)
        );
    }
}
