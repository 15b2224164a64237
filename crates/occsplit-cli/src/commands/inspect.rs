use crate::cli::InspectArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use occsplit::{
    core::{io::cif::CifDocument, models::atom::representative_atoms},
    engine::{
        config::SplitConfig, context::SplitContext, progress::ProgressReporter,
        tasks::clash_detection,
    },
    workflows::split::candidate_chains,
};
use std::io::Write;
use tracing::info;

pub fn run(args: InspectArgs, show_progress: bool) -> Result<()> {
    let (config, document) = super::load_inputs(&args.input, &args.settings)?;

    let progress_handler = CliProgressHandler::new(show_progress);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render(&mut out, &document, &config, &reporter)?;
    out.flush()?;
    Ok(())
}

/// Writes the occupancy table, the clash edges and the connected components.
fn render(
    out: &mut impl Write,
    document: &CifDocument,
    config: &SplitConfig,
    reporter: &ProgressReporter,
) -> Result<()> {
    let occupancy = document.chain_occupancy();
    let mode = config.search.graph_mode;
    let candidates = candidate_chains(&occupancy, mode);

    writeln!(out, "Chains ({}):", occupancy.len())?;
    for (chain, minimum) in occupancy.iter() {
        let kind = if occupancy.is_fractional(chain) {
            "fractional"
        } else {
            "full"
        };
        writeln!(out, "  {:<6} occupancy {:.2}  {}", chain, minimum, kind)?;
    }

    let candidate_list = candidates.iter().cloned().collect::<Vec<_>>().join(", ");
    writeln!(out, "Candidate chains ({}): {}", mode, candidate_list)?;

    let atom_name = &config.detection.representative_atom;
    let by_chain = representative_atoms(&document.atoms(), atom_name, &candidates);
    let context = SplitContext::new(config, reporter);
    let graph = reporter.phase("Detecting clashes", || {
        clash_detection::run(&context, &by_chain)
    });
    info!(
        chains = graph.vertex_count(),
        clashes = graph.edge_count(),
        "Inspection graph built."
    );

    if graph.is_clash_free() {
        writeln!(out, "No clashes detected.")?;
        return Ok(());
    }

    let detector = context.detector();
    writeln!(out, "Clashes ({}):", graph.edge_count())?;
    for (a, b) in graph.edges() {
        let closest = match (by_chain.get(a), by_chain.get(b)) {
            (Some(atoms_a), Some(atoms_b)) => detector.closest_approach(atoms_a, atoms_b),
            _ => None,
        };
        match closest {
            Some(approach) => writeln!(
                out,
                "  {} -- {}  closest {} {:.3} A ({}:{} / {}:{})",
                a,
                b,
                atom_name,
                approach.distance,
                approach.atom_a.chain,
                approach.atom_a.residue,
                approach.atom_b.chain,
                approach.atom_b.residue
            )?,
            None => writeln!(out, "  {} -- {}", a, b)?,
        }
    }

    let components = graph.connected_components();
    writeln!(out, "Connected components ({}):", components.len())?;
    for (i, component) in components.iter().enumerate() {
        let subset_count = 1u128.checked_shl(component.len() as u32);
        let chains = component.iter().cloned().collect::<Vec<_>>().join(", ");
        match subset_count {
            Some(count) => writeln!(
                out,
                "  {}. {{{}}}  {} chains, {} subsets",
                i + 1,
                chains,
                component.len(),
                count
            )?,
            None => writeln!(out, "  {}. {{{}}}  {} chains", i + 1, chains, component.len())?,
        }
        if component.len() > config.search.max_component_size {
            writeln!(
                out,
                "     exceeds the component limit of {}",
                config.search.max_component_size
            )?;
        }
    }

    Ok(())
}
