//! # Workflows Module
//!
//! Top-level entry points that run the complete clash-resolution pipeline.
//!
//! - **Split Workflow** ([`split`]) - Builds the clash graph for the candidate chains,
//!   searches every connected component for maximal clash-free selections, and composes
//!   them into whole-structure solutions.

pub mod split;
