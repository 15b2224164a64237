pub mod inspect;
pub mod split;

use crate::cli::SettingsArgs;
use crate::config::PartialSplitConfig;
use crate::error::{CliError, Result};
use occsplit::core::io::cif::{CifDocument, CifFile};
use occsplit::core::io::traits::StructureFile;
use occsplit::engine::config::SplitConfig;
use std::path::Path;
use tracing::info;

/// Resolves the effective configuration and parses the input structure.
fn load_inputs(input: &Path, settings: &SettingsArgs) -> Result<(SplitConfig, CifDocument)> {
    info!("Merging configuration from file and CLI arguments...");
    let config = PartialSplitConfig::load(settings.config.as_deref())?.merge_with_cli(settings)?;

    info!("Loading input structure from {:?}", input);
    let document = CifFile::read_from_path(input).map_err(|e| CliError::FileParsing {
        path: input.to_path_buf(),
        source: e.into(),
    })?;
    info!(
        atoms = document.records().len(),
        chains = document.chains().len(),
        "Input structure loaded."
    );

    Ok((config, document))
}
