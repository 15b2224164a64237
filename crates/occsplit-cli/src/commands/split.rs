use crate::cli::SplitArgs;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use occsplit::{
    core::io::{
        cif::{CifDocument, CifFile},
        report::{self, SolutionRow},
        traits::StructureFile,
    },
    engine::{progress::ProgressReporter, state::Solution},
    workflows,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn run(args: SplitArgs, show_progress: bool) -> Result<()> {
    let (config, document) = super::load_inputs(&args.input, &args.settings)?;

    let progress_handler = CliProgressHandler::new(show_progress);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the core split workflow...");
    let outcome = workflows::split::run(
        &document.atoms(),
        &document.chain_occupancy(),
        &config,
        &reporter,
    )?;

    if outcome.is_clash_free() {
        println!("No clashes detected! Nothing to split.");
        if let Some(report_path) = &args.report {
            report::write_report_to_path(report_path, &[])?;
        }
        return Ok(());
    }

    let solutions = outcome.solutions();
    info!("Workflow finished with {} solution(s).", solutions.len());

    let output_dir = resolve_output_dir(&args.input, args.output_dir.as_deref());
    let stem = args
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "structure".to_string());

    if args.dry_run {
        println!(
            "Dry run: {} solution(s) found, no files written.",
            solutions.len()
        );
    } else {
        std::fs::create_dir_all(&output_dir)?;
        println!("Writing {} solution(s)...", solutions.len());
    }

    let mut rows = Vec::with_capacity(solutions.len());
    for solution in solutions {
        let path = output_path(&output_dir, &stem, solution);
        if args.dry_run {
            println!("  {} -> {}", describe(solution), path.display());
            rows.push(report_row(solution, None));
            continue;
        }

        write_solution(&args.input, &document, solution, &path)?;
        println!("  ✓ {} written to: {}", describe(solution), path.display());
        rows.push(report_row(solution, Some(&path)));
    }

    if let Some(report_path) = &args.report {
        info!("Writing solution report to {:?}", report_path);
        report::write_report_to_path(report_path, &rows)?;
        println!("Report written to: {}", report_path.display());
    }

    Ok(())
}

fn resolve_output_dir(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        },
    }
}

/// Suffix used for a solution that keeps no alternate chain at all.
const PINNED_ONLY_NAME: &str = "pinned";

/// `<dir>/<stem>-<name>.cif`, with [`PINNED_ONLY_NAME`] standing in for an empty name.
fn output_path(dir: &Path, stem: &str, solution: &Solution) -> PathBuf {
    let name = solution.name();
    if name.is_empty() {
        warn!("Solution accepts no alternate chains; naming it '{PINNED_ONLY_NAME}'.");
        dir.join(format!("{stem}-{PINNED_ONLY_NAME}.cif"))
    } else {
        dir.join(format!("{stem}-{name}.cif"))
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn write_solution(
    input: &Path,
    document: &CifDocument,
    solution: &Solution,
    path: &Path,
) -> Result<()> {
    if is_same_file(input, path) {
        return Err(CliError::OutputOverwritesInput {
            path: path.to_path_buf(),
        });
    }
    info!(
        "Writing solution {} ({} chains) to {:?}",
        solution.name(),
        solution.retained.len(),
        path
    );
    CifFile::write_selection_to_path(document, &solution.retained, path).map_err(|e| {
        CliError::FileWriting {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

fn report_row(solution: &Solution, path: Option<&Path>) -> SolutionRow {
    SolutionRow::new(
        &solution.name(),
        solution.accepted.iter(),
        solution.retained.iter().map(String::as_str),
        path,
    )
}

fn describe(solution: &Solution) -> String {
    format!("Solution {}", solution.accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SettingsArgs;
    use std::fs;

    const HEADER: &str = "\
data_MODEL
#
loop_
_atom_site.group_PDB
_atom_site.id
_atom_site.label_atom_id
_atom_site.label_comp_id
_atom_site.label_asym_id
_atom_site.label_seq_id
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
_atom_site.occupancy
";

    fn write_model(dir: &Path, rows: &[&str]) -> PathBuf {
        let mut content = HEADER.to_string();
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        content.push_str("#\n");
        let path = dir.join("model.cif");
        fs::write(&path, content).unwrap();
        path
    }

    fn clashing_model(dir: &Path) -> PathBuf {
        write_model(
            dir,
            &[
                "ATOM 1 P G A 1 10.000 0.000 0.000 1.00",
                "ATOM 2 P C B 1 0.000 0.000 0.000 0.50",
                "ATOM 3 P C C 1 0.500 0.000 0.000 0.50",
            ],
        )
    }

    fn args(input: PathBuf, output_dir: Option<PathBuf>) -> SplitArgs {
        SplitArgs {
            input,
            output_dir,
            report: None,
            dry_run: false,
            settings: SettingsArgs::default(),
        }
    }

    fn chain_ids(path: &Path) -> Vec<String> {
        let document = CifFile::read_from_path(path).unwrap();
        document.chains().into_iter().collect()
    }

    #[test]
    fn writes_one_file_per_solution_with_full_chains_retained() {
        let dir = tempfile::tempdir().unwrap();
        let input = clashing_model(dir.path());
        let out = dir.path().join("out");

        run(args(input, Some(out.clone())), false).unwrap();

        assert_eq!(chain_ids(&out.join("model-B.cif")), vec!["A", "B"]);
        assert_eq!(chain_ids(&out.join("model-C.cif")), vec!["A", "C"]);
        assert_eq!(fs::read_dir(&out).unwrap().count(), 2);
    }

    #[test]
    fn output_defaults_to_the_input_directory() {
        let dir = tempfile::tempdir().unwrap();
        let input = clashing_model(dir.path());

        run(args(input, None), false).unwrap();

        assert!(dir.path().join("model-B.cif").exists());
        assert!(dir.path().join("model-C.cif").exists());
    }

    #[test]
    fn dry_run_writes_report_but_no_structures() {
        let dir = tempfile::tempdir().unwrap();
        let input = clashing_model(dir.path());
        let out = dir.path().join("out");
        let report_path = dir.path().join("report.csv");

        let mut split_args = args(input, Some(out.clone()));
        split_args.dry_run = true;
        split_args.report = Some(report_path.clone());
        run(split_args, false).unwrap();

        assert!(!out.exists());
        let report = fs::read_to_string(&report_path).unwrap();
        assert_eq!(
            report,
            "name,accepted_chains,retained_chains,output_path\nB,B,A B,\nC,C,A C,\n"
        );
    }

    #[test]
    fn clash_free_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_model(
            dir.path(),
            &[
                "ATOM 1 P G A 1 0.000 0.000 0.000 1.00",
                "ATOM 2 P C B 1 0.500 0.000 0.000 1.00",
            ],
        );
        let out = dir.path().join("out");

        run(args(input, Some(out.clone())), false).unwrap();

        assert!(!out.exists());
    }

    #[test]
    fn pinned_only_solution_never_overwrites_the_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_model(
            dir.path(),
            &[
                "ATOM 1 P G A 1 0.000 0.000 0.000 1.00",
                "ATOM 2 P C B 1 0.500 0.000 0.000 0.50",
            ],
        );
        let before = fs::read_to_string(&input).unwrap();

        let mut split_args = args(input.clone(), None);
        split_args.settings.all_chains = true;
        run(split_args, false).unwrap();

        assert_eq!(fs::read_to_string(&input).unwrap(), before);
        assert_eq!(chain_ids(&dir.path().join("model-pinned.cif")), vec!["A"]);
    }

    #[test]
    fn writing_onto_the_input_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let input = clashing_model(dir.path());
        let before = fs::read_to_string(&input).unwrap();
        let document = CifFile::read_from_path(&input).unwrap();
        let solution = Solution {
            accepted: ["B"].into_iter().collect(),
            retained: ["A", "B"].iter().map(|s| s.to_string()).collect(),
        };
        let aliased = dir.path().join(".").join("model.cif");

        let err = write_solution(&input, &document, &solution, &aliased).unwrap_err();

        assert!(matches!(err, CliError::OutputOverwritesInput { .. }));
        assert_eq!(fs::read_to_string(&input).unwrap(), before);
    }

    #[test]
    fn oversized_component_surfaces_as_core_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = clashing_model(dir.path());

        let mut split_args = args(input, Some(dir.path().join("out")));
        split_args.settings.max_component_size = Some(1);
        let err = run(split_args, false).unwrap_err();

        assert!(matches!(err, CliError::Core(_)));
    }

    #[test]
    fn missing_input_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(args(dir.path().join("absent.cif"), None), false).unwrap_err();
        assert!(matches!(err, CliError::FileParsing { .. }));
    }

    #[test]
    fn output_path_uses_stem_and_solution_name() {
        let solution = Solution {
            accepted: ["E", "D"].into_iter().collect(),
            retained: ["D", "E"].iter().map(|s| s.to_string()).collect(),
        };
        assert_eq!(
            output_path(Path::new("/tmp/out"), "1abc", &solution),
            PathBuf::from("/tmp/out/1abc-D-E.cif")
        );
        let pinned_only = Solution {
            accepted: Default::default(),
            retained: ["A".to_string()].into_iter().collect(),
        };
        assert_eq!(
            output_path(Path::new("/tmp/out"), "1abc", &pinned_only),
            PathBuf::from("/tmp/out/1abc-pinned.cif")
        );
        assert_eq!(
            resolve_output_dir(Path::new("model.cif"), None),
            PathBuf::from(".")
        );
    }
}
