use std::collections::HashSet;
use thiserror::Error;

/// Errors raised during configuration validation, before any computation runs.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    /// `min_interactions` of zero would make every group pass the count gate.
    #[error("`min_interactions` must be at least 1, got {0}")]
    InvalidMinInteractions(usize),

    /// A distance threshold was negative, NaN, or infinite.
    #[error("`{name}` must be a non-negative finite number, got {value}")]
    InvalidThreshold {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Selection criteria and thresholds for one screening run.
///
/// Immutable for the duration of a run; concurrent runs with different
/// configurations cannot interfere with each other.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenConfig {
    /// Residue names eligible for consideration at all. An atom whose residue
    /// is not listed here is dropped entirely, even if `bait_atoms` or
    /// `prey_atoms` name it.
    pub residues: HashSet<String>,

    /// When true, backbone atoms (N, CA, C, O, OXT) are dropped before any
    /// other filter.
    pub exclude_backbone: bool,

    /// Atom names always dropped, regardless of residue.
    pub exclude_atoms: HashSet<String>,

    /// (residue name, atom name) pairs acting as bait, i.e. the cationic side.
    pub bait_atoms: Vec<(String, String)>,

    /// (residue name, atom names) entries acting as prey, typically the
    /// aromatic ring atoms of a residue.
    pub prey_atoms: Vec<(String, Vec<String>)>,

    /// Chains to restrict the search to. `None` includes all chains.
    pub chains: Option<HashSet<String>>,

    /// Minimum number of bait-prey atom distances for a residue pair to be
    /// reported.
    pub min_interactions: usize,

    /// Maximum mean distance (Å) for a residue pair to be reported.
    pub mean_threshold: f64,

    /// Maximum population standard deviation (Å) of the distances for a
    /// residue pair to be reported.
    pub std_threshold: f64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            residues: ["LYS", "ARG", "PHE", "TRP", "TYR"]
                .map(String::from)
                .into(),
            exclude_backbone: false,
            exclude_atoms: ["CB", "NH1", "NH2", "NE1", "NE2", "OH"]
                .map(String::from)
                .into(),
            bait_atoms: vec![
                ("ARG".to_string(), "CZ".to_string()),
                ("LYS".to_string(), "NZ".to_string()),
            ],
            prey_atoms: vec![
                (
                    "TRP".to_string(),
                    ["CD2", "CE2", "CE3", "CZ2", "CZ3", "CH2"]
                        .map(String::from)
                        .to_vec(),
                ),
                (
                    "PHE".to_string(),
                    ["CG", "CD1", "CD2", "CE1", "CE2", "CZ"]
                        .map(String::from)
                        .to_vec(),
                ),
                (
                    "TYR".to_string(),
                    ["CG", "CD1", "CD2", "CE1", "CE2", "CZ"]
                        .map(String::from)
                        .to_vec(),
                ),
            ],
            chains: None,
            min_interactions: 6,
            mean_threshold: 5.0,
            std_threshold: 0.75,
        }
    }
}

impl ScreenConfig {
    /// Check the thresholds before any computation begins.
    ///
    /// Empty bait or prey configurations are not an error; they
    /// deterministically yield an empty result downstream.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_interactions == 0 {
            return Err(ConfigError::InvalidMinInteractions(self.min_interactions));
        }
        for (name, value) in [
            ("mean_threshold", self.mean_threshold),
            ("std_threshold", self.std_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }
}
