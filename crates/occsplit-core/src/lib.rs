//! # occsplit Core Library
//!
//! Resolves steric clashes between alternate-conformation chains in a macromolecular model.
//! Chains with fractional occupancy are mutually exclusive placements of the same region; when
//! several of them sit in one coordinate frame their atoms may overlap. This library finds every
//! maximal selection of chains that can coexist without overlap.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Atom`, `ChainOccupancy`,
//!   `ClashFreeChains`), the `ClashGraph`, the spatial clash predicate, and mmCIF/CSV I/O.
//!
//! - **[`engine`]: The Logic Core.** Configuration, error types, progress reporting, and the
//!   individual pipeline stages: clash detection, clash-free subset search, maximal-set
//!   filtering, and cross-component composition.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together into the complete
//!   split procedure, returning either the "already clash-free" outcome or the list of
//!   whole-structure solutions.

pub mod core;
pub mod engine;
pub mod workflows;
