// Public library interface for carbon-treemap
// The CLI and the diagnostic tools under src/bin use these modules

pub mod budget;
pub mod error;
pub mod layout;

pub use error::{LayoutError, LayoutResult};
pub use layout::{
    calculate_scaled_treemap, calculate_treemap, LayoutConfig, LayoutItem, ScaledTreemap,
    TreemapBox, EMPTY_SLICE_NAME,
};
