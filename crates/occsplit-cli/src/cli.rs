use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "occsplit - Split alternate-conformation chains of an mmCIF model into clash-free variants.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to search connected components.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write one clash-free mmCIF file per maximal combination of alternate chains.
    Split(SplitArgs),
    /// Report chain occupancies, clashes, and connected components without writing files.
    Inspect(InspectArgs),
}

/// Arguments for the `split` subcommand.
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Path to the input mmCIF file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Directory for the output files. Defaults to the directory of the input file.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Write a CSV summary of all solutions to this path.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Compute and print the solutions without writing any structure files.
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the input mmCIF file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Detection and search settings shared by all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Name of the one atom per residue used for clash detection (e.g., 'P').
    #[arg(short = 'a', long, value_name = "NAME")]
    pub representative_atom: Option<String>,

    /// Distance in Angstroms below which two representative atoms clash.
    #[arg(short = 'd', long, value_name = "FLOAT")]
    pub clash_distance: Option<f64>,

    /// Include full-occupancy chains in the clash graph (they are still kept in every output).
    #[arg(long)]
    pub all_chains: bool,

    /// Largest connected component (in chains) the exhaustive search will accept.
    #[arg(long, value_name = "INT")]
    pub max_component_size: Option<usize>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S detection.clash-distance=2.0
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
