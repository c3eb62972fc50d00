pub mod options;
pub mod state;

pub use options::{load_builds, load_targets, FilterOptions, OptionSource, TargetOptions};
pub use state::{ActiveFilters, FilterEffect, FilterField, FilterState, QuickFilter};
