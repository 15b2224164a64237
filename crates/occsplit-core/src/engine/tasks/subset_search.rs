use crate::core::graph::ClashGraph;
use crate::core::models::selection::ClashFreeChains;
use crate::engine::context::SplitContext;
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Strategy for enumerating clash-free chain subsets of one connected component.
pub trait SubsetSearch: Send + Sync {
    /// Returns every subset of the component's vertices that induces a clash-free subgraph.
    ///
    /// # Errors
    ///
    /// Implementations fail instead of returning a partial answer when the component is
    /// beyond what they can enumerate.
    fn search(&self, component: &ClashGraph) -> Result<Vec<ClashFreeChains>, EngineError>;
}

/// Power-set enumeration: tries all 2^n subsets and keeps the clash-free ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExhaustiveSearch {
    max_component_size: usize,
}

impl ExhaustiveSearch {
    pub fn new(max_component_size: usize) -> Self {
        Self { max_component_size }
    }

    pub fn max_component_size(&self) -> usize {
        self.max_component_size
    }
}

impl SubsetSearch for ExhaustiveSearch {
    fn search(&self, component: &ClashGraph) -> Result<Vec<ClashFreeChains>, EngineError> {
        let vertices: Vec<&str> = component.vertices().collect();
        let n = vertices.len();
        if n > self.max_component_size || n >= u64::BITS as usize {
            return Err(EngineError::ComponentTooLarge {
                size: n,
                limit: self.max_component_size,
                chains: vertices.join(", "),
            });
        }

        let mut clash_free = Vec::new();
        for mask in 0..(1u64 << n) {
            let subset: BTreeSet<String> = vertices
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1u64 << bit) != 0)
                .map(|(_, v)| v.to_string())
                .collect();
            if component.induce_subgraph(&subset).is_clash_free() {
                clash_free.push(ClashFreeChains::from(subset));
            }
        }

        debug!(
            component_size = n,
            clash_free = clash_free.len(),
            "Enumerated component subsets."
        );
        Ok(clash_free)
    }
}

/// Runs `strategy` on every component graph, preserving component order.
///
/// With the `parallel` feature the components are searched on the rayon pool; the result
/// order is the same either way.
#[instrument(skip_all, name = "subset_search_task")]
pub fn run<S: SubsetSearch>(
    context: &SplitContext,
    strategy: &S,
    components: &[ClashGraph],
) -> Result<Vec<Vec<ClashFreeChains>>, EngineError> {
    info!(
        num_components = components.len(),
        "Searching clash-free subsets."
    );
    context.reporter.report(Progress::TaskStart {
        total_steps: components.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = components.iter();

    #[cfg(feature = "parallel")]
    let iterator = components.par_iter();

    let results = iterator
        .map(|component| {
            let result = strategy.search(component);
            context.reporter.report(Progress::TaskIncrement);
            result
        })
        .collect::<Result<Vec<_>, _>>();

    context.reporter.report(Progress::TaskFinish);
    results
}
