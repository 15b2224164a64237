//! Individual stages of the split pipeline, each usable on its own.

pub mod clash_detection;
pub mod composition;
pub mod maximal_filter;
pub mod subset_search;
