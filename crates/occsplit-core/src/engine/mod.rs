//! # Engine Module
//!
//! Orchestrates the clash-resolution pipeline on top of the stateless [`crate::core`] layer.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Detection and search parameters with a validating builder
//! - **Run Context** ([`context`]) - Shared read-only state handed to every stage
//! - **Error Handling** ([`error`]) - Engine-specific error types
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Results** ([`state`]) - Solutions, per-component results, and the run outcome
//! - **Pipeline Stages** ([`tasks`]) - Clash detection, subset search, maximal filtering,
//!   and cross-component composition
//!
//! ## Key Capabilities
//!
//! - **Exhaustive search** of clash-free chain subsets per connected component
//! - **Fail-fast limits** on component size instead of silent truncation
//! - **Parallel component search** behind the `parallel` feature
//! - **Deterministic output** independent of hash or thread ordering

pub mod config;
pub mod context;
pub mod error;
pub mod progress;
pub mod state;
pub mod tasks;
