//! Provides input/output functionality for structure files and run reports.
//!
//! This module reads the `_atom_site` table of mmCIF files into per-atom records, writes
//! chain-filtered copies of the original document, and serializes solution summaries as CSV.
//! File formats share a trait-based interface so the workflow never depends on one format.

pub mod cif;
pub mod report;
pub mod traits;
