//! # Core Module
//!
//! Fundamental building blocks for alternate-conformation clash resolution.
//!
//! ## Architecture
//!
//! - **Structural Records** ([`models`]) - Atoms, per-chain occupancy, and chain selections
//! - **Clash Relation** ([`graph`]) - The undirected clash graph and its decompositions
//! - **Spatial Predicate** ([`clash`]) - Distance-based clash test between two chains
//! - **File I/O** ([`io`]) - mmCIF `_atom_site` reading, chain-filtered writing, CSV reports
//!
//! Everything in this module is pure: no global state, no logging side effects beyond
//! `tracing` events, and no knowledge of how the pipeline is orchestrated.

pub mod clash;
pub mod graph;
pub mod io;
pub mod models;
