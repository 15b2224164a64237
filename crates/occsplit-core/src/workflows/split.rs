use crate::core::graph::ClashGraph;
use crate::core::models::atom::{Atom, representative_atoms};
use crate::core::models::occupancy::ChainOccupancy;
use crate::core::models::selection::ClashFreeChains;
use crate::engine::config::{GraphMode, SplitConfig};
use crate::engine::context::SplitContext;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::{ComponentSolutions, Solution, SplitOutcome};
use crate::engine::tasks::{self, composition, maximal_filter, subset_search::SubsetSearch};
use std::collections::BTreeSet;
use tracing::{info, instrument, warn};

/// Runs the split workflow with the default exhaustive search.
///
/// # Arguments
///
/// * `atoms` - All atoms of the model, in file order.
/// * `occupancy` - Minimum occupancy per chain.
/// * `config` - Detection and search parameters.
/// * `reporter` - Receives progress events.
///
/// # Return
///
/// [`SplitOutcome::AlreadyClashFree`] when the considered chains never clash, otherwise
/// [`SplitOutcome::Resolved`] with one [`Solution`] per combination of maximal per-component
/// selections.
///
/// # Errors
///
/// Returns [`EngineError::ComponentTooLarge`] when a connected component exceeds the search
/// limit, and [`EngineError::UnresolvableClash`] when chains that must always be kept clash.
#[instrument(skip_all, name = "split_workflow")]
pub fn run(
    atoms: &[Atom],
    occupancy: &ChainOccupancy,
    config: &SplitConfig,
    reporter: &ProgressReporter,
) -> Result<SplitOutcome, EngineError> {
    let context = SplitContext::new(config, reporter);
    let strategy = context.search_strategy();
    run_with_strategy(atoms, occupancy, &context, &strategy)
}

/// Chains that become vertices of the clash graph under `mode`.
pub fn candidate_chains(occupancy: &ChainOccupancy, mode: GraphMode) -> BTreeSet<String> {
    match mode {
        GraphMode::FractionalOnly => occupancy.fractional_chains(),
        GraphMode::AllChains => occupancy.chains(),
    }
}

/// Runs the split workflow with a caller-supplied subset search strategy.
pub fn run_with_strategy<S: SubsetSearch>(
    atoms: &[Atom],
    occupancy: &ChainOccupancy,
    context: &SplitContext,
    strategy: &S,
) -> Result<SplitOutcome, EngineError> {
    let config = context.config;
    let full_chains = occupancy.full_chains();
    let candidates = candidate_chains(occupancy, config.search.graph_mode);
    info!(
        total_chains = occupancy.len(),
        candidate_chains = candidates.len(),
        mode = %config.search.graph_mode,
        "Starting split workflow."
    );

    // === Phase 1: Clash graph ===
    let graph = context.reporter.phase("Detecting clashes", || {
        let by_chain =
            representative_atoms(atoms, &config.detection.representative_atom, &candidates);
        tasks::clash_detection::run(context, &by_chain)
    });

    if graph.is_clash_free() {
        info!("No clashes between candidate chains; nothing to split.");
        context
            .reporter
            .report(Progress::Message("No clashes detected.".to_string()));
        return Ok(SplitOutcome::AlreadyClashFree { graph });
    }
    if !candidates.iter().any(|chain| occupancy.is_fractional(chain)) {
        warn!(
            num_clashes = graph.edge_count(),
            "Only full-occupancy chains clash; there are no alternates to split."
        );
        context.reporter.report(Progress::Message(
            "No alternate chains to split.".to_string(),
        ));
        return Ok(SplitOutcome::AlreadyClashFree { graph });
    }

    // === Phase 2: Per-component search ===
    let component_sets = graph.connected_components();
    let component_graphs: Vec<ClashGraph> = component_sets
        .iter()
        .filter(|chains| has_alternates(chains, &full_chains))
        .map(|chains| graph.induce_subgraph(chains))
        .collect();
    info!(
        num_components = component_sets.len(),
        searched = component_graphs.len(),
        largest = component_graphs.iter().map(ClashGraph::vertex_count).max().unwrap_or(0),
        "Decomposed clash graph."
    );

    let raw_subsets = context.reporter.phase("Searching components", || {
        tasks::subset_search::run(context, strategy, &component_graphs)
    })?;

    // === Phase 3: Maximal filtering ===
    let mut raw_subsets = raw_subsets.into_iter();
    let mut components = Vec::with_capacity(component_sets.len());
    for chains in component_sets {
        let component = if has_alternates(&chains, &full_chains) {
            let subsets = raw_subsets.next().unwrap_or_default();
            select_maximal(chains, subsets, &full_chains)?
        } else {
            keep_pinned(chains, &graph)
        };
        components.push(component);
    }

    // === Phase 4: Cross-component composition ===
    let solutions = context.reporter.phase("Composing solutions", || {
        let per_component: Vec<Vec<ClashFreeChains>> =
            components.iter().map(|c| c.maximal.clone()).collect();
        composition::compose(&per_component)
            .into_iter()
            .map(|combined| build_solution(combined, &full_chains))
            .collect::<Vec<_>>()
    });

    info!(
        num_solutions = solutions.len(),
        "Split workflow complete."
    );
    Ok(SplitOutcome::Resolved {
        graph,
        components,
        solutions,
    })
}

fn select_maximal(
    chains: BTreeSet<String>,
    subsets: Vec<ClashFreeChains>,
    full_chains: &BTreeSet<String>,
) -> Result<ComponentSolutions, EngineError> {
    let clash_free_subsets = subsets.len();
    let pinned: BTreeSet<String> = chains.intersection(full_chains).cloned().collect();
    let pinned_selection = ClashFreeChains::from(pinned.clone());

    let admissible: Vec<ClashFreeChains> = subsets
        .into_iter()
        .filter(|subset| subset.contains_all(&pinned_selection))
        .collect();
    if admissible.is_empty() {
        warn!(chains = %pinned_selection, "Pinned chains clash with each other.");
        return Err(EngineError::UnresolvableClash {
            chains: pinned.into_iter().collect::<Vec<_>>().join(", "),
        });
    }

    Ok(ComponentSolutions {
        chains,
        pinned,
        clash_free_subsets,
        maximal: maximal_filter::filter_maximal(admissible),
    })
}

/// Whether a component holds at least one fractional chain and therefore needs branching.
fn has_alternates(chains: &BTreeSet<String>, full_chains: &BTreeSet<String>) -> bool {
    !chains.is_subset(full_chains)
}

/// Carries a component of full-occupancy chains through unchanged.
fn keep_pinned(chains: BTreeSet<String>, graph: &ClashGraph) -> ComponentSolutions {
    let selection = ClashFreeChains::from(chains.clone());
    if !graph.induce_subgraph(&chains).is_clash_free() {
        warn!(chains = %selection, "Full-occupancy chains clash; keeping all of them.");
    }
    ComponentSolutions {
        pinned: chains.clone(),
        chains,
        clash_free_subsets: 0,
        maximal: vec![selection],
    }
}

fn build_solution(combined: ClashFreeChains, full_chains: &BTreeSet<String>) -> Solution {
    let mut retained = full_chains.clone();
    retained.extend(combined.iter().map(str::to_string));
    let accepted = combined
        .into_chains()
        .into_iter()
        .filter(|chain| !full_chains.contains(chain))
        .collect();
    Solution { accepted, retained }
}
