use std::collections::BTreeSet;
use std::fmt;

/// Separator used when a chain selection is turned into a name.
pub const NAME_SEPARATOR: &str = "-";

/// A set of chain ids forming one self-consistent, clash-free selection.
///
/// Chain ids are kept in a sorted set, so iteration order, equality, ordering, and the
/// derived [`name`](Self::name) are all deterministic regardless of how the selection was
/// assembled. Ordering between selections is lexicographic over their sorted chain ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClashFreeChains {
    chains: BTreeSet<String>,
}

impl ClashFreeChains {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chains(&self) -> &BTreeSet<String> {
        &self.chains
    }

    pub fn into_chains(self) -> BTreeSet<String> {
        self.chains
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn contains(&self, chain: &str) -> bool {
        self.chains.contains(chain)
    }

    /// Returns `true` if every chain of `other` is also part of this selection.
    pub fn contains_all(&self, other: &ClashFreeChains) -> bool {
        self.chains.is_superset(&other.chains)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.chains.iter().map(String::as_str)
    }

    /// Merges another selection into this one.
    pub fn extend(&mut self, other: &ClashFreeChains) {
        self.chains.extend(other.chains.iter().cloned());
    }

    /// Sorted chain ids joined with [`NAME_SEPARATOR`], e.g. `"B-D"`.
    pub fn name(&self) -> String {
        self.iter().collect::<Vec<_>>().join(NAME_SEPARATOR)
    }
}

impl<S: Into<String>> FromIterator<S> for ClashFreeChains {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            chains: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<BTreeSet<String>> for ClashFreeChains {
    fn from(chains: BTreeSet<String>) -> Self {
        Self { chains }
    }
}

impl fmt::Display for ClashFreeChains {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.iter().collect::<Vec<_>>().join(", "))
    }
}
