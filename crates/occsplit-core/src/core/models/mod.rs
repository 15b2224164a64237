//! # Core Models Module
//!
//! Data structures describing the input model and the selections computed from it.
//!
//! ## Key Components
//!
//! - [`atom`] - Immutable per-atom records and the representative-atom filter
//! - [`occupancy`] - Minimum occupancy per chain and the fractional/full classification
//! - [`selection`] - Sets of chain ids forming one clash-free selection
//!
//! ## Usage
//!
//! ```ignore
//! use occsplit::core::models::{atom::Atom, occupancy::ChainOccupancy};
//!
//! let occupancy = ChainOccupancy::from_records([("A", 1.0), ("B", 0.5), ("C", 0.5)]);
//! let fractional = occupancy.fractional_chains();
//! let by_chain = atom::representative_atoms(&atoms, "P", &fractional);
//! ```

pub mod atom;
pub mod occupancy;
pub mod selection;
