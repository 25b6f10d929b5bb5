//! # Core Models Module
//!
//! Data structures representing a macromolecular structure as the surface-area
//! algorithms see it: an ordered list of atoms with identity, position and radius.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atoms, residue numbering and polarity classes
//! - [`structure`] - The ordered atom collection with residue and chain indexes
//! - [`builder`] - Loading policies and bulk construction from atom records
//! - [`error`] - Validation failures raised by the model
//!
//! ## Usage
//!
//! ```ignore
//! use sasakit::core::models::structure::{AtomSpec, Structure};
//!
//! let mut structure = Structure::new();
//! structure.add_atom(AtomSpec::new("CA", "ALA", 1.into(), 'A', [0.0, 0.0, 0.0]).with_radius(1.88))?;
//! assert_eq!(structure.len(), 1);
//! ```

pub mod atom;
pub mod builder;
pub mod error;
pub mod structure;
