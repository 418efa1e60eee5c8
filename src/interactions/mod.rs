//! The interaction detection engine: atom selection, pairwise distance
//! aggregation, and threshold filtering.

pub mod aggregate;
pub mod filter;
pub mod selection;
pub mod structs;

// Re-exports
pub use aggregate::{aggregate_distances, InteractionGroups, RunningStats};
pub use filter::filter_groups;
pub use selection::select_atoms;
pub use structs::*;
