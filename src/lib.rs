#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

//! # Catpi Library
//!
//! This library screens a protein structure for candidate cation-π
//! interactions: spatial proximity between cationic side-chain atoms ("bait")
//! and aromatic ring atoms ("prey"). Distances are accumulated per residue
//! pair with an online mean/variance algorithm and the aggregated groups are
//! reduced to the pairs that clear the configured thresholds.
//!
//! The library returns results as a Polars DataFrame, which can be easily
//! converted to various output formats, or as plain [`InteractionRecord`]
//! values for programmatic use.

mod config;
mod interactions;
mod residues;
mod utils;

// Re-export key public types
pub use config::{ConfigError, ScreenConfig};
pub use interactions::{
    aggregate_distances, filter_groups, select_atoms, InteractionGroups, InteractionRecord,
    RunningStats, SelectedAtom,
};
pub use residues::{is_backbone_atom, ResidueExt, ResidueId};
pub use utils::{load_model, run_with_threads, write_df_to_file, DataFrameFileType};

use pdbtbx::PDB;
use polars::prelude::*;
use tracing::debug;

/// Screen a structure and return the qualifying residue pairs as records.
///
/// Validates the configuration first, then runs the selector, the pairwise
/// distance aggregator, and the threshold filter. An empty structure, an
/// empty bait set, or an empty prey set is not an error and yields an empty
/// record list.
///
/// # Example
///
/// ```no_run
/// use catpi::{load_model, screen, ScreenConfig};
///
/// let input_file = "path/to/structure.pdb".to_string();
/// let (pdb, _errors) = load_model(&input_file);
/// let records = screen(&pdb, &ScreenConfig::default()).unwrap();
/// for rec in &records {
///     println!("{rec}");
/// }
/// ```
pub fn screen(pdb: &PDB, config: &ScreenConfig) -> Result<Vec<InteractionRecord>, ConfigError> {
    config.validate()?;

    let (bait, prey) = select_atoms(pdb, config);
    debug!(
        "Selected {n_bait} bait and {n_prey} prey atoms",
        n_bait = bait.len(),
        n_prey = prey.len()
    );

    let groups = aggregate_distances(&bait, &prey);
    debug!("Aggregated {} residue-pair groups", groups.len());

    Ok(filter_groups(groups, config))
}

/// Screen a structure for candidate cation-π interactions.
///
/// # Arguments
///
/// * `pdb` - Reference to a PDB structure
/// * `config` - Selection criteria and thresholds for the run
///
/// # Returns
///
/// A Polars DataFrame with one row per qualifying residue pair and columns:
/// - cation_chain, cation_resn, cation_resi, cation_insertion
/// - pi_chain, pi_resn, pi_resi, pi_insertion
/// - n, mean_dist, std_dist
///
/// Rows are ordered by the cation residue, then the aromatic residue.
///
/// # Example
///
/// ```no_run
/// use catpi::{find_interactions, load_model, ScreenConfig};
///
/// let input_file = "path/to/structure.pdb".to_string();
/// let (pdb, _errors) = load_model(&input_file);
/// let df = find_interactions(&pdb, &ScreenConfig::default()).unwrap();
/// println!("Found {} candidate interactions", df.height());
/// ```
pub fn find_interactions(pdb: &PDB, config: &ScreenConfig) -> Result<DataFrame, ConfigError> {
    let records = screen(pdb, config)?;
    Ok(records_to_df(&records))
}

// Helper functions (kept private)

fn records_to_df(res: &[InteractionRecord]) -> DataFrame {
    df!(
        "cation_chain" => res.iter().map(|x| x.bait.chain.to_owned()).collect::<Vec<String>>(),
        "cation_resn" => res.iter().map(|x| x.bait.resn.to_owned()).collect::<Vec<String>>(),
        "cation_resi" => res.iter().map(|x| x.bait.resi as i64).collect::<Vec<i64>>(),
        "cation_insertion" => res.iter().map(|x| x.bait.insertion.to_owned()).collect::<Vec<String>>(),
        "pi_chain" => res.iter().map(|x| x.prey.chain.to_owned()).collect::<Vec<String>>(),
        "pi_resn" => res.iter().map(|x| x.prey.resn.to_owned()).collect::<Vec<String>>(),
        "pi_resi" => res.iter().map(|x| x.prey.resi as i64).collect::<Vec<i64>>(),
        "pi_insertion" => res.iter().map(|x| x.prey.insertion.to_owned()).collect::<Vec<String>>(),
        "n" => res.iter().map(|x| x.count as u32).collect::<Vec<u32>>(),
        "mean_dist" => res.iter().map(|x| x.mean_dist).collect::<Vec<f64>>(),
        "std_dist" => res.iter().map(|x| x.std_dist).collect::<Vec<f64>>(),
    )
    .unwrap()
}
