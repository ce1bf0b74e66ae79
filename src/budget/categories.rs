use serde::{Deserialize, Serialize};

/// Lifestyle categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    /// Commuting, errands, travel
    Transportation,
    /// Heating, cooling, household electricity
    Housing,
    /// Diet
    Food,
    /// Goods & services purchased
    Goods,
    /// Devices, streaming, cloud
    Digital,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 5] = [
        CategoryKey::Transportation,
        CategoryKey::Housing,
        CategoryKey::Food,
        CategoryKey::Goods,
        CategoryKey::Digital,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKey::Transportation => "transportation",
            CategoryKey::Housing => "housing",
            CategoryKey::Food => "food",
            CategoryKey::Goods => "goods",
            CategoryKey::Digital => "digital",
        }
    }

    /// Position in [`CategoryKey::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// One selectable lifestyle choice. `value` is tonnes CO₂e per person per year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryOption {
    pub label: &'static str,
    pub value: f64,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Category {
    pub id: CategoryKey,
    pub name: &'static str,
    pub color: &'static str,
    /// Highest impact first
    pub options: &'static [CategoryOption],
}

const fn opt(label: &'static str, value: f64, description: &'static str) -> CategoryOption {
    CategoryOption {
        label,
        value,
        description,
    }
}

static TRANSPORTATION: Category = Category {
    id: CategoryKey::Transportation,
    name: "Transportation",
    color: "#34D399",
    options: &[
        opt("Car-dependent (15,000+ km/year)", 4.5, "Daily car commute, frequent driving"),
        opt("Regular car use (10,000 km/year)", 3.2, "Car for commute and errands"),
        opt("Occasional car use (5,000 km/year)", 1.6, "Mostly public transport, some car trips"),
        opt("Public transport & cycling", 0.5, "Bus, train, bike for daily transport"),
        opt("Walking & cycling only", 0.1, "No motorized transport"),
    ],
};

static HOUSING: Category = Category {
    id: CategoryKey::Housing,
    name: "Housing",
    color: "#60A5FA",
    options: &[
        opt("Large house, gas heating", 4.2, "200+ m², fossil fuel heating/cooling"),
        opt("Average house, mixed energy", 2.8, "100-200 m², grid electricity + gas"),
        opt("Small apartment, electric heating", 1.8, "50-100 m², standard grid electricity"),
        opt("Efficient apartment, renewable energy", 0.8, "Well-insulated, green energy contract"),
        opt("Passive house, solar panels", 0.3, "Ultra-efficient, self-generated renewable"),
    ],
};

static FOOD: Category = Category {
    id: CategoryKey::Food,
    name: "Food",
    color: "#FBBF24",
    options: &[
        opt("High meat diet (daily beef)", 3.3, "Red meat daily, high dairy consumption"),
        opt("Average Western diet", 2.5, "Meat 4-5 times/week, regular dairy"),
        opt("Low meat diet (poultry & fish)", 1.7, "Mostly chicken/fish, reduced dairy"),
        opt("Vegetarian", 1.2, "No meat, eggs and dairy included"),
        opt("Vegan, local & seasonal", 0.8, "Plant-based, locally sourced"),
    ],
};

static GOODS: Category = Category {
    id: CategoryKey::Goods,
    name: "Goods & Services",
    color: "#F87171",
    options: &[
        opt("High consumption lifestyle", 3.5, "Frequent shopping, latest gadgets, fast fashion"),
        opt("Average consumption", 2.0, "Regular purchases, some new electronics"),
        opt("Mindful consumption", 1.2, "Buy less, prioritize quality over quantity"),
        opt("Minimalist lifestyle", 0.6, "Buy only necessities, repair & reuse"),
        opt("Second-hand & sharing economy", 0.3, "Used goods, sharing, minimal new purchases"),
    ],
};

static DIGITAL: Category = Category {
    id: CategoryKey::Digital,
    name: "Digital Consumption",
    color: "#A78BFA",
    options: &[
        opt("Heavy user (streaming 4K, gaming)", 0.8, "Multiple devices, high-res streaming, cloud gaming"),
        opt("Average digital lifestyle", 0.5, "Daily streaming, social media, video calls"),
        opt("Moderate use", 0.3, "Selective streaming, efficient devices"),
        opt("Low digital footprint", 0.15, "Minimal streaming, keep devices longer"),
        opt("Minimal digital use", 0.05, "Basic internet use, old devices"),
    ],
};

/// Static table for a category.
pub fn category(key: CategoryKey) -> &'static Category {
    match key {
        CategoryKey::Transportation => &TRANSPORTATION,
        CategoryKey::Housing => &HOUSING,
        CategoryKey::Food => &FOOD,
        CategoryKey::Goods => &GOODS,
        CategoryKey::Digital => &DIGITAL,
    }
}

/// All categories in display order.
pub fn categories() -> impl Iterator<Item = &'static Category> {
    CategoryKey::ALL.into_iter().map(category)
}

/// Option value at `index`, or `None` when out of range.
pub fn option_value(key: CategoryKey, index: usize) -> Option<f64> {
    category(key).options.get(index).map(|o| o.value)
}

/// Footprint when every category picks its highest-impact option.
pub fn max_footprint() -> f64 {
    categories()
        .map(|c| c.options.iter().map(|o| o.value).fold(0.0, f64::max))
        .sum()
}

/// Footprint when every category picks its lowest-impact option.
pub fn min_footprint() -> f64 {
    categories()
        .map(|c| c.options.iter().map(|o| o.value).fold(f64::INFINITY, f64::min))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_sorted_by_impact() {
        for c in categories() {
            assert_eq!(c.options.len(), 5, "{}", c.name);
            for pair in c.options.windows(2) {
                assert!(pair[0].value > pair[1].value, "{} not descending", c.name);
            }
        }
    }

    #[test]
    fn keys_map_to_their_own_table() {
        for key in CategoryKey::ALL {
            assert_eq!(category(key).id, key);
            assert_eq!(CategoryKey::ALL[key.index()], key);
        }
    }

    #[test]
    fn extremes_sum_first_and_last_options() {
        assert!((max_footprint() - 16.3).abs() < 1e-9);
        assert!((min_footprint() - 1.55).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_option_is_none() {
        assert_eq!(option_value(CategoryKey::Food, 3), Some(1.2));
        assert_eq!(option_value(CategoryKey::Food, 5), None);
    }
}
