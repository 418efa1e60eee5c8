use super::structs::SelectedAtom;
use crate::config::ScreenConfig;
use crate::residues::is_backbone_atom;

use pdbtbx::*;

/// Split the structure's atoms into bait and prey sets.
///
/// An atom survives the common filters when its residue name is in
/// `residues`, its chain is allowed, its name is not in `exclude_atoms`, and
/// it is not a backbone atom while `exclude_backbone` is set. The surviving
/// atom is then assigned the bait role, the prey role, both, or neither,
/// from `bait_atoms` and `prey_atoms`.
///
/// Iteration follows the input atom order, so the result is deterministic
/// for a given structure. Empty outputs are valid and simply propagate to an
/// empty report.
pub fn select_atoms(pdb: &PDB, config: &ScreenConfig) -> (Vec<SelectedAtom>, Vec<SelectedAtom>) {
    let mut bait: Vec<SelectedAtom> = Vec::new();
    let mut prey: Vec<SelectedAtom> = Vec::new();

    for hier in pdb.atoms_with_hierarchy() {
        let resn = hier.residue().name().unwrap_or("");
        let atomn = hier.atom().name();

        // The allow-list applies regardless of role: a residue configured as
        // bait or prey but omitted from `residues` yields no atoms.
        if !config.residues.contains(resn) {
            continue;
        }
        if let Some(chains) = &config.chains {
            if !chains.contains(hier.chain().id()) {
                continue;
            }
        }
        if config.exclude_atoms.contains(atomn) {
            continue;
        }
        if config.exclude_backbone && is_backbone_atom(atomn) {
            continue;
        }

        let is_bait = config
            .bait_atoms
            .iter()
            .any(|(r, a)| r == resn && a == atomn);
        let is_prey = config
            .prey_atoms
            .iter()
            .any(|(r, atoms)| r == resn && atoms.iter().any(|a| a == atomn));
        if !is_bait && !is_prey {
            continue;
        }

        let atom = SelectedAtom::from_hier(&hier);
        if is_bait {
            bait.push(atom.clone());
        }
        if is_prey {
            prey.push(atom);
        }
    }

    (bait, prey)
}
