use crate::core::models::atom::Atom;
use nalgebra::distance_squared;

/// Van der Waals radius of phosphorus in Angstroms, the default clash distance.
pub const PHOSPHORUS_VDW_RADIUS: f64 = 1.85;

/// Closest pair of atoms between two chains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestApproach<'a> {
    pub distance: f64,
    pub atom_a: &'a Atom,
    pub atom_b: &'a Atom,
}

/// Pure spatial predicate deciding whether two chains overlap.
///
/// Two chains clash if any pair of atoms, one from each chain, lies strictly closer than the
/// configured distance. Callers are expected to pass representative atoms only (one per
/// residue); the detector itself compares every atom it is given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialClashDetector {
    threshold_sq: f64,
}

impl SpatialClashDetector {
    pub fn new(clash_distance: f64) -> Self {
        Self {
            threshold_sq: clash_distance * clash_distance,
        }
    }

    pub fn clash_distance(&self) -> f64 {
        self.threshold_sq.sqrt()
    }

    /// Returns `true` if any atom pair is closer than the clash distance.
    ///
    /// The comparison is done on squared distances and is strict, so atoms exactly at the
    /// clash distance do not clash.
    pub fn clashes(&self, chain_a: &[Atom], chain_b: &[Atom]) -> bool {
        chain_a.iter().any(|a| {
            chain_b
                .iter()
                .any(|b| distance_squared(&a.position, &b.position) < self.threshold_sq)
        })
    }

    /// Finds the minimum inter-chain distance and the atoms realizing it.
    ///
    /// Returns `None` when either chain has no atoms.
    pub fn closest_approach<'a>(
        &self,
        chain_a: &'a [Atom],
        chain_b: &'a [Atom],
    ) -> Option<ClosestApproach<'a>> {
        let mut best: Option<(f64, &'a Atom, &'a Atom)> = None;
        for a in chain_a {
            for b in chain_b {
                let d2 = distance_squared(&a.position, &b.position);
                if best.is_none_or(|(current, _, _)| d2 < current) {
                    best = Some((d2, a, b));
                }
            }
        }
        best.map(|(d2, atom_a, atom_b)| ClosestApproach {
            distance: d2.sqrt(),
            atom_a,
            atom_b,
        })
    }
}

impl Default for SpatialClashDetector {
    fn default() -> Self {
        Self::new(PHOSPHORUS_VDW_RADIUS)
    }
}
