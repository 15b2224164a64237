use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Occupancy at or above which a chain is considered fully present.
pub const FULL_OCCUPANCY: f64 = 1.0;

/// Minimum observed occupancy for every chain of a model.
///
/// A chain is *fractional* when any of its atoms reports an occupancy below
/// [`FULL_OCCUPANCY`]. Keeping the minimum per chain is enough to make that decision, so
/// duplicate observations fold with `min`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainOccupancy {
    minimum: BTreeMap<String, f64>,
}

impl ChainOccupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table from (chain, occupancy) observations, keeping the minimum per chain.
    pub fn from_records<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for (chain, occupancy) in records {
            table.observe(chain.as_ref(), occupancy);
        }
        table
    }

    /// Records one observation for `chain`.
    pub fn observe(&mut self, chain: &str, occupancy: f64) {
        self.minimum
            .entry(chain.to_string())
            .and_modify(|current| *current = current.min(occupancy))
            .or_insert(occupancy);
    }

    pub fn get(&self, chain: &str) -> Option<f64> {
        self.minimum.get(chain).copied()
    }

    pub fn is_fractional(&self, chain: &str) -> bool {
        self.get(chain).is_some_and(|occ| occ < FULL_OCCUPANCY)
    }

    /// All known chain ids, sorted.
    pub fn chains(&self) -> BTreeSet<String> {
        self.minimum.keys().cloned().collect()
    }

    pub fn fractional_chains(&self) -> BTreeSet<String> {
        self.minimum
            .iter()
            .filter(|(_, occ)| **occ < FULL_OCCUPANCY)
            .map(|(chain, _)| chain.clone())
            .collect()
    }

    pub fn full_chains(&self) -> BTreeSet<String> {
        self.minimum
            .iter()
            .filter(|(_, occ)| **occ >= FULL_OCCUPANCY)
            .map(|(chain, _)| chain.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.minimum.iter().map(|(chain, occ)| (chain.as_str(), *occ))
    }

    pub fn len(&self) -> usize {
        self.minimum.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minimum.is_empty()
    }
}
