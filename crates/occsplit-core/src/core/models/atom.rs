use nalgebra::Point3;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Represents a single atom of the input model.
///
/// Atoms are produced once by the parsing layer and never mutated afterwards. Only the
/// fields needed for spatial clash detection are retained: the chain the atom belongs to,
/// the residue sequence number, the atom name, and its Cartesian position.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The identifier of the chain this atom belongs to (e.g., "A", "BA").
    pub chain: String,
    /// The residue sequence number within the chain.
    pub residue: i32,
    /// The name of the atom (e.g., "P", "C4'", "CA").
    pub name: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom`.
    ///
    /// # Arguments
    ///
    /// * `chain` - The chain identifier.
    /// * `residue` - The residue sequence number.
    /// * `name` - The atom name.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(chain: &str, residue: i32, name: &str, position: Point3<f64>) -> Self {
        Self {
            chain: chain.to_string(),
            residue,
            name: name.to_string(),
            position,
        }
    }
}

/// Groups the representative atoms of the requested chains by chain id.
///
/// Only atoms whose name equals `atom_name` and whose chain is in `chains` are kept, and at
/// most one atom per (chain, residue) pair survives: the first one encountered. Alternate
/// locations of the same representative atom therefore collapse onto the first record.
/// Chains in `chains` that have no representative atom at all still get an (empty) entry, so
/// downstream graph construction sees every requested chain as a vertex.
///
/// # Arguments
///
/// * `atoms` - All atoms of the model, in file order.
/// * `atom_name` - The representative atom name (e.g., "P" for nucleic-acid backbones).
/// * `chains` - The chain ids to collect atoms for.
///
/// # Return
///
/// An ordered map from chain id to that chain's representative atoms, in file order.
pub fn representative_atoms(
    atoms: &[Atom],
    atom_name: &str,
    chains: &BTreeSet<String>,
) -> BTreeMap<String, Vec<Atom>> {
    let mut by_chain: BTreeMap<String, Vec<Atom>> = chains
        .iter()
        .map(|chain| (chain.clone(), Vec::new()))
        .collect();
    let mut seen: HashSet<(&str, i32)> = HashSet::new();

    for atom in atoms {
        if atom.name != atom_name {
            continue;
        }
        let Some(bucket) = by_chain.get_mut(&atom.chain) else {
            continue;
        };
        if seen.insert((atom.chain.as_str(), atom.residue)) {
            bucket.push(atom.clone());
        }
    }

    by_chain
}
