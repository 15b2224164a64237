use crate::core::graph::ClashGraph;
use crate::core::models::selection::ClashFreeChains;
use std::collections::BTreeSet;

/// One whole-structure chain selection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Solution {
    /// The alternate chains chosen by the search, one maximal subset per component.
    pub accepted: ClashFreeChains,
    /// Every chain to keep in the output: `accepted` plus all full-occupancy chains.
    pub retained: BTreeSet<String>,
}

impl Solution {
    /// Deterministic solution name: sorted accepted chain ids joined with hyphens.
    pub fn name(&self) -> String {
        self.accepted.name()
    }
}

/// Search results for one connected component of the clash graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSolutions {
    pub chains: BTreeSet<String>,
    /// Full-occupancy chains of this component that every admissible subset must contain.
    pub pinned: BTreeSet<String>,
    /// Zero for components of full-occupancy chains only, which are never searched.
    pub clash_free_subsets: usize,
    pub maximal: Vec<ClashFreeChains>,
}

/// Terminal result of a split run.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitOutcome {
    /// The considered chains never clash; nothing needs to be written.
    AlreadyClashFree { graph: ClashGraph },
    Resolved {
        graph: ClashGraph,
        components: Vec<ComponentSolutions>,
        solutions: Vec<Solution>,
    },
}

impl SplitOutcome {
    pub fn graph(&self) -> &ClashGraph {
        match self {
            SplitOutcome::AlreadyClashFree { graph } | SplitOutcome::Resolved { graph, .. } => {
                graph
            }
        }
    }

    /// Solutions to write; empty for the clash-free outcome.
    pub fn solutions(&self) -> &[Solution] {
        match self {
            SplitOutcome::AlreadyClashFree { .. } => &[],
            SplitOutcome::Resolved { solutions, .. } => solutions,
        }
    }

    pub fn is_clash_free(&self) -> bool {
        matches!(self, SplitOutcome::AlreadyClashFree { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solution_name_uses_accepted_chains_only() {
        let solution = Solution {
            accepted: ["C", "B"].into_iter().collect(),
            retained: ["A", "B", "C"].iter().map(|s| s.to_string()).collect(),
        };
        assert_eq!(solution.name(), "B-C");
    }

    #[test]
    fn clash_free_outcome_has_no_solutions() {
        let outcome = SplitOutcome::AlreadyClashFree {
            graph: ClashGraph::new(),
        };
        assert!(outcome.is_clash_free());
        assert!(outcome.solutions().is_empty());
        assert!(outcome.graph().is_empty());
    }
}
