use pdbtbx::*;

/// Identifier of one residue occurrence in the structure.
///
/// Field order matters: the derived ordering (chain, then sequence number,
/// then insertion code) is what keeps report output stable and diffable.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub struct ResidueId {
    /// Chain identifier
    pub chain: String,
    /// Residue sequence number
    pub resi: isize,
    /// Residue insertion code
    pub insertion: String,
    /// Residue name
    pub resn: String,
}

impl ResidueId {
    /// Helper function to convert an [`pdbtbx::AtomConformerResidueChainModel`] to a residue identifier
    pub fn from_hier(hier: &AtomConformerResidueChainModel) -> Self {
        let (resi, insertion) = hier.residue().id();
        Self {
            chain: hier.chain().id().to_string(),
            resi,
            insertion: insertion.unwrap_or("").to_string(),
            resn: hier.residue().name().unwrap_or("").to_string(),
        }
    }
}

impl std::fmt::Display for ResidueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{resn} {chain}{resi}{insertion}",
            resn = self.resn,
            chain = self.chain,
            resi = self.resi,
            insertion = self.insertion
        )
    }
}

/// Check if the atom name belongs to the standard main-chain set.
///
/// OXT is the carboxylate oxygen found on C-terminal residues.
pub fn is_backbone_atom(atom_name: &str) -> bool {
    matches!(atom_name, "N" | "CA" | "C" | "O" | "OXT")
}

/// Extra lookups on [`pdbtbx::Residue`].
pub trait ResidueExt {
    /// The residue one-letter code, or `None` if it's not an amino acid.
    fn resn(&self) -> Option<&str>;
}

impl ResidueExt for Residue {
    fn resn(&self) -> Option<&str> {
        let aa_code = match self.name().unwrap().to_uppercase().as_str() {
            "ALA" => "A",
            "ARG" => "R",
            "ASN" => "N",
            "ASP" => "D",
            "CYS" => "C",
            "GLN" => "Q",
            "GLU" => "E",
            "GLY" => "G",
            "HIS" => "H",
            "ILE" => "I",
            "LEU" => "L",
            "LYS" => "K",
            "MET" => "M",
            "PHE" => "F",
            "PRO" => "P",
            "SER" => "S",
            "THR" => "T",
            "TRP" => "W",
            "TYR" => "Y",
            "VAL" => "V",
            _ => "X",
        };

        match aa_code {
            "X" => None,
            _ => Some(aa_code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backbone_atom_names() {
        for name in ["N", "CA", "C", "O", "OXT"] {
            assert!(is_backbone_atom(name), "{name} should be backbone");
        }
        for name in ["CB", "CZ", "NZ", "CD1", "NE1", "OH"] {
            assert!(!is_backbone_atom(name), "{name} should not be backbone");
        }
    }

    #[test]
    fn residue_id_ordering() {
        let a10 = ResidueId {
            chain: "A".to_string(),
            resi: 10,
            insertion: "".to_string(),
            resn: "LYS".to_string(),
        };
        let a25 = ResidueId {
            chain: "A".to_string(),
            resi: 25,
            insertion: "".to_string(),
            resn: "ARG".to_string(),
        };
        let b5 = ResidueId {
            chain: "B".to_string(),
            resi: 5,
            insertion: "".to_string(),
            resn: "TYR".to_string(),
        };

        let mut ids = vec![b5.clone(), a25.clone(), a10.clone()];
        ids.sort();
        assert_eq!(ids, vec![a10, a25, b5]);
    }
}
