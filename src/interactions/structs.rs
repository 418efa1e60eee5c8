use crate::residues::ResidueId;
use core::fmt;
use nalgebra as na;
use pdbtbx::*;

/// An atom that passed selection, annotated with its residue identity.
#[derive(Debug, Clone)]
pub struct SelectedAtom {
    /// The residue occurrence this atom belongs to
    pub residue: ResidueId,
    /// Atom name
    pub atomn: String,
    /// Atom coordinates
    pub pos: na::Vector3<f64>,
}

impl SelectedAtom {
    /// Helper function to convert an [`pdbtbx::AtomConformerResidueChainModel`] to a selected atom
    pub fn from_hier(hier: &AtomConformerResidueChainModel) -> Self {
        let (x, y, z) = hier.atom().pos();
        Self {
            residue: ResidueId::from_hier(hier),
            atomn: hier.atom().name().to_string(),
            pos: na::Vector3::new(x, y, z),
        }
    }
}

/// One qualifying residue pair in the final report.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionRecord {
    /// The cationic residue
    pub bait: ResidueId,
    /// The aromatic residue
    pub prey: ResidueId,
    /// Number of bait-prey atom distances observed
    pub count: usize,
    /// Mean of the observed distances (Å)
    pub mean_dist: f64,
    /// Population standard deviation of the observed distances (Å)
    pub std_dist: f64,
}

impl fmt::Display for InteractionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cation [{bait}] near ring [{prey}]: n={n}, mean={mean:.3}, std={std:.3}",
            bait = self.bait,
            prey = self.prey,
            n = self.count,
            mean = self.mean_dist,
            std = self.std_dist
        )
    }
}
