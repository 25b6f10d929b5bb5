//! # Core Module
//!
//! The fundamental building blocks shared by every calculation: the molecular data
//! model, the atom classification system and coordinate input.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, residue numbering and the
//!   ordered `Structure` that algorithms consume
//! - **Atom Classification** ([`classifier`]) - Mapping of residue/atom names to a
//!   radius and a polarity class, with standard tables selectable by name
//! - **File I/O** ([`io`]) - Minimal coordinate readers producing atom records
//! - **Diagnostics** ([`diagnostics`]) - Caller-supplied sink for warnings raised
//!   during ingestion and classification
//! - **Utilities** ([`utils`]) - Backbone atom names, hydrogen detection and element
//!   radius guesses

pub mod classifier;
pub mod diagnostics;
pub mod io;
pub mod models;
pub mod utils;
