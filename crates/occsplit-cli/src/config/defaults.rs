use occsplit::core::clash::PHOSPHORUS_VDW_RADIUS;
use occsplit::engine::config::GraphMode;

pub struct DefaultsConfig {
    pub representative_atom: String,
    pub clash_distance: f64,
    pub graph_mode: GraphMode,
    pub max_component_size: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            representative_atom: "P".to_string(),
            clash_distance: PHOSPHORUS_VDW_RADIUS,
            graph_mode: GraphMode::FractionalOnly,
            max_component_size: 20,
        }
    }
}
