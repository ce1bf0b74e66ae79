pub mod categories;

use serde::{Deserialize, Serialize};

use self::categories::{category, option_value, CategoryKey};
use crate::layout::LayoutItem;

/// Selected option index per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetState {
    pub transportation: usize,
    pub housing: usize,
    pub food: usize,
    pub goods: usize,
    pub digital: usize,
}

impl Default for BudgetState {
    /// Average Western lifestyle: the second option everywhere.
    fn default() -> Self {
        Self {
            transportation: 1,
            housing: 1,
            food: 1,
            goods: 1,
            digital: 1,
        }
    }
}

impl BudgetState {
    pub fn get(&self, key: CategoryKey) -> usize {
        match key {
            CategoryKey::Transportation => self.transportation,
            CategoryKey::Housing => self.housing,
            CategoryKey::Food => self.food,
            CategoryKey::Goods => self.goods,
            CategoryKey::Digital => self.digital,
        }
    }

    pub fn set(&mut self, key: CategoryKey, index: usize) {
        let slot = match key {
            CategoryKey::Transportation => &mut self.transportation,
            CategoryKey::Housing => &mut self.housing,
            CategoryKey::Food => &mut self.food,
            CategoryKey::Goods => &mut self.goods,
            CategoryKey::Digital => &mut self.digital,
        };
        *slot = index;
    }
}

/// Derived footprint of one category under the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FootprintEntry {
    pub id: CategoryKey,
    pub name: &'static str,
    pub color: &'static str,
    pub value: f64,
}

impl From<&FootprintEntry> for LayoutItem {
    fn from(entry: &FootprintEntry) -> Self {
        LayoutItem::new(entry.name, entry.value).with_color(entry.color)
    }
}

/// Per-category footprint in category order. An out-of-range selection
/// contributes 0 instead of failing.
pub fn current_footprint(state: &BudgetState) -> Vec<FootprintEntry> {
    CategoryKey::ALL
        .into_iter()
        .map(|key| {
            let table = category(key);
            let index = state.get(key);
            let value = option_value(key, index).unwrap_or_else(|| {
                tracing::debug!(
                    "Option {} out of range for '{}' ({} options), counting 0",
                    index,
                    key.as_str(),
                    table.options.len()
                );
                0.0
            });
            FootprintEntry {
                id: key,
                name: table.name,
                color: table.color,
                value,
            }
        })
        .collect()
}

pub fn total_footprint(entries: &[FootprintEntry]) -> f64 {
    entries.iter().map(|e| e.value).sum()
}

/// Selection state plus its derived footprint, recomputed on every change.
#[derive(Debug, Clone)]
pub struct BudgetStore {
    state: BudgetState,
    footprint: Vec<FootprintEntry>,
    total: f64,
}

impl Default for BudgetStore {
    fn default() -> Self {
        Self::new(BudgetState::default())
    }
}

impl BudgetStore {
    pub fn new(state: BudgetState) -> Self {
        let footprint = current_footprint(&state);
        let total = total_footprint(&footprint);
        Self {
            state,
            footprint,
            total,
        }
    }

    pub fn state(&self) -> &BudgetState {
        &self.state
    }

    pub fn footprint(&self) -> &[FootprintEntry] {
        &self.footprint
    }

    /// Total tonnes CO₂e per year.
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn select(&mut self, key: CategoryKey, index: usize) {
        self.state.set(key, index);
        self.recompute();
    }

    pub fn reset(&mut self) {
        self.state = BudgetState::default();
        self.recompute();
    }

    /// Footprint entries as layout items, colour tags included.
    pub fn layout_items(&self) -> Vec<LayoutItem> {
        self.footprint.iter().map(LayoutItem::from).collect()
    }

    fn recompute(&mut self) {
        self.footprint = current_footprint(&self.state);
        self.total = total_footprint(&self.footprint);
    }
}
