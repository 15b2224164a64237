use super::config::SplitConfig;
use super::progress::ProgressReporter;
use super::tasks::subset_search::ExhaustiveSearch;
use crate::core::clash::SpatialClashDetector;

/// Read-only state shared by every stage of one split run.
#[derive(Clone, Copy)]
pub struct SplitContext<'a> {
    pub config: &'a SplitConfig,
    pub reporter: &'a ProgressReporter<'a>,
}

impl<'a> SplitContext<'a> {
    pub fn new(config: &'a SplitConfig, reporter: &'a ProgressReporter<'a>) -> Self {
        Self { config, reporter }
    }

    pub fn detector(&self) -> SpatialClashDetector {
        SpatialClashDetector::new(self.config.detection.clash_distance)
    }

    pub fn search_strategy(&self) -> ExhaustiveSearch {
        ExhaustiveSearch::new(self.config.search.max_component_size)
    }
}
