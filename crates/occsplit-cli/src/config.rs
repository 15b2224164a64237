mod defaults;

use crate::cli::SettingsArgs;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use occsplit::engine::config::{self as core_config, GraphMode};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialDetectionConfig {
    representative_atom: Option<String>,
    clash_distance: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialSearchConfig {
    graph_mode: Option<GraphMode>,
    max_component_size: Option<usize>,
}

/// Configuration as read from a TOML file; every field may be absent.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct PartialSplitConfig {
    detection: Option<PartialDetectionConfig>,
    search: Option<PartialSearchConfig>,
}

impl PartialSplitConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file named by `--config`, or an empty configuration when none was given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves the final configuration.
    ///
    /// Precedence, highest first: explicit CLI flags, `--set` values, the config file,
    /// built-in defaults.
    pub fn merge_with_cli(mut self, args: &SettingsArgs) -> Result<core_config::SplitConfig> {
        self.apply_set_values(&args.set_values)?;

        let defaults = DefaultsConfig::default();
        let detection = self.detection.take().unwrap_or_default();
        let search = self.search.take().unwrap_or_default();

        let graph_mode = if args.all_chains {
            GraphMode::AllChains
        } else {
            search.graph_mode.unwrap_or(defaults.graph_mode)
        };

        let config = core_config::SplitConfigBuilder::new()
            .representative_atom(
                args.representative_atom
                    .clone()
                    .or(detection.representative_atom)
                    .unwrap_or(defaults.representative_atom),
            )
            .clash_distance(
                args.clash_distance
                    .or(detection.clash_distance)
                    .unwrap_or(defaults.clash_distance),
            )
            .graph_mode(graph_mode)
            .max_component_size(
                args.max_component_size
                    .or(search.max_component_size)
                    .unwrap_or(defaults.max_component_size),
            )
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        debug!("Final configuration: {:?}", config);
        Ok(config)
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "detection.representative-atom" => {
                    self.detection
                        .get_or_insert_with(Default::default)
                        .representative_atom = Some(value_str.to_string());
                }
                "detection.clash-distance" => {
                    self.detection
                        .get_or_insert_with(Default::default)
                        .clash_distance = Some(parse_value(key, value_str, "float")?);
                }
                "search.graph-mode" => {
                    self.search.get_or_insert_with(Default::default).graph_mode = Some(
                        GraphMode::from_str(value_str)
                            .map_err(|e| CliError::Config(e.to_string()))?,
                    );
                }
                "search.max-component-size" => {
                    self.search
                        .get_or_insert_with(Default::default)
                        .max_component_size = Some(parse_value(key, value_str, "integer")?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}
