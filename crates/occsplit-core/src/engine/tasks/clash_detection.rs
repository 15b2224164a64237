use crate::core::graph::ClashGraph;
use crate::core::models::atom::Atom;
use crate::engine::context::SplitContext;
use crate::engine::progress::Progress;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Builds the clash graph over the chains in `atoms_by_chain`.
///
/// Every chain key becomes a vertex, including chains without representative atoms (those
/// can never clash and end up as isolated vertices).
#[instrument(skip_all, name = "clash_detection_task")]
pub fn run(context: &SplitContext, atoms_by_chain: &BTreeMap<String, Vec<Atom>>) -> ClashGraph {
    let detector = context.detector();
    info!(
        chains = atoms_by_chain.len(),
        clash_distance = detector.clash_distance(),
        "Detecting chain clashes."
    );

    let n = atoms_by_chain.len() as u64;
    context.reporter.report(Progress::TaskStart {
        total_steps: n * n.saturating_sub(1) / 2,
    });

    let graph = ClashGraph::build(atoms_by_chain.keys().cloned(), |a, b| {
        let clashing = match (atoms_by_chain.get(a), atoms_by_chain.get(b)) {
            (Some(atoms_a), Some(atoms_b)) => detector.clashes(atoms_a, atoms_b),
            _ => false,
        };
        if clashing {
            debug!(chain_a = a, chain_b = b, "Chains clash.");
        }
        context.reporter.report(Progress::TaskIncrement);
        clashing
    });

    context.reporter.report(Progress::TaskFinish);
    info!(
        num_clashes = graph.edge_count(),
        "Clash detection complete."
    );

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{GraphMode, SplitConfigBuilder};
    use crate::engine::progress::ProgressReporter;
    use nalgebra::Point3;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn config() -> crate::engine::config::SplitConfig {
        SplitConfigBuilder::new()
            .representative_atom("P")
            .clash_distance(1.85)
            .graph_mode(GraphMode::FractionalOnly)
            .max_component_size(20)
            .build()
            .unwrap()
    }

    fn atoms(chain: &str, xs: &[f64]) -> Vec<Atom> {
        xs.iter()
            .enumerate()
            .map(|(i, &x)| Atom::new(chain, i as i32 + 1, "P", Point3::new(x, 0.0, 0.0)))
            .collect()
    }

    #[test]
    fn builds_edges_only_between_overlapping_chains() {
        let config = config();
        let reporter = ProgressReporter::new();
        let context = SplitContext::new(&config, &reporter);

        let mut by_chain = BTreeMap::new();
        by_chain.insert("B".to_string(), atoms("B", &[0.0, 6.0]));
        by_chain.insert("C".to_string(), atoms("C", &[0.5]));
        by_chain.insert("D".to_string(), atoms("D", &[20.0]));
        by_chain.insert("E".to_string(), Vec::new());

        let graph = run(&context, &by_chain);

        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edges(), vec![("B", "C")]);
        assert!(graph.contains_vertex("E"));
    }

    #[test]
    fn reports_one_increment_per_chain_pair() {
        let config = config();
        let total = AtomicU64::new(0);
        let increments = AtomicU64::new(0);
        let finished = Mutex::new(false);
        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::TaskStart { total_steps } => total.store(total_steps, Ordering::SeqCst),
            Progress::TaskIncrement => {
                increments.fetch_add(1, Ordering::SeqCst);
            }
            Progress::TaskFinish => *finished.lock().unwrap() = true,
            _ => {}
        }));
        let context = SplitContext::new(&config, &reporter);

        let by_chain: BTreeMap<String, Vec<Atom>> = ["A", "B", "C", "D"]
            .iter()
            .map(|c| (c.to_string(), atoms(c, &[0.0])))
            .collect();
        let graph = run(&context, &by_chain);

        assert_eq!(graph.edge_count(), 6);
        assert_eq!(total.load(Ordering::SeqCst), 6);
        assert_eq!(increments.load(Ordering::SeqCst), 6);
        assert!(*finished.lock().unwrap());
    }
}
