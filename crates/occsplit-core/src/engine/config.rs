use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest component size the exhaustive search will ever accept (2^30 subsets).
pub const MAX_SUPPORTED_COMPONENT_SIZE: usize = 30;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Which chains become vertices of the clash graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GraphMode {
    /// Only chains with fractional occupancy are considered.
    #[default]
    FractionalOnly,
    /// Every chain is a vertex; full-occupancy chains are pinned into every solution.
    AllChains,
}

impl FromStr for GraphMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "fractional-only" | "fractional" => Ok(GraphMode::FractionalOnly),
            "all-chains" | "all" => Ok(GraphMode::AllChains),
            other => Err(ConfigError::InvalidParameter {
                name: "graph_mode",
                reason: format!("unknown mode '{other}' (expected 'fractional-only' or 'all-chains')"),
            }),
        }
    }
}

impl fmt::Display for GraphMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GraphMode::FractionalOnly => "fractional-only",
            GraphMode::AllChains => "all-chains",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectionConfig {
    pub representative_atom: String,
    pub clash_distance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub graph_mode: GraphMode,
    pub max_component_size: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitConfig {
    pub detection: DetectionConfig,
    pub search: SearchConfig,
}

#[derive(Default)]
pub struct SplitConfigBuilder {
    representative_atom: Option<String>,
    clash_distance: Option<f64>,
    graph_mode: Option<GraphMode>,
    max_component_size: Option<usize>,
}

impl SplitConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn representative_atom(mut self, name: impl Into<String>) -> Self {
        self.representative_atom = Some(name.into());
        self
    }
    pub fn clash_distance(mut self, distance: f64) -> Self {
        self.clash_distance = Some(distance);
        self
    }
    pub fn graph_mode(mut self, mode: GraphMode) -> Self {
        self.graph_mode = Some(mode);
        self
    }
    pub fn max_component_size(mut self, size: usize) -> Self {
        self.max_component_size = Some(size);
        self
    }

    pub fn build(self) -> Result<SplitConfig, ConfigError> {
        let representative_atom = self
            .representative_atom
            .ok_or(ConfigError::MissingParameter("representative_atom"))?;
        if representative_atom.trim().is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "representative_atom",
                reason: "atom name cannot be empty".to_string(),
            });
        }

        let clash_distance = self
            .clash_distance
            .ok_or(ConfigError::MissingParameter("clash_distance"))?;
        if !clash_distance.is_finite() || clash_distance <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "clash_distance",
                reason: format!("must be a finite positive distance, got {clash_distance}"),
            });
        }

        let max_component_size = self
            .max_component_size
            .ok_or(ConfigError::MissingParameter("max_component_size"))?;
        if max_component_size > MAX_SUPPORTED_COMPONENT_SIZE {
            return Err(ConfigError::InvalidParameter {
                name: "max_component_size",
                reason: format!(
                    "{max_component_size} exceeds the supported maximum of {MAX_SUPPORTED_COMPONENT_SIZE}"
                ),
            });
        }

        Ok(SplitConfig {
            detection: DetectionConfig {
                representative_atom,
                clash_distance,
            },
            search: SearchConfig {
                graph_mode: self
                    .graph_mode
                    .ok_or(ConfigError::MissingParameter("graph_mode"))?,
                max_component_size,
            },
        })
    }
}
