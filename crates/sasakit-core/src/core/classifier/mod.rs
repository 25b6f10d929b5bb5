//! # Atom Classification
//!
//! Maps a (residue name, atom name) pair to a radius and a polarity class.
//!
//! The [`Classifier`] trait is the seam: the native implementation is the
//! table-driven [`table::TableClassifier`] built from a TOML configuration, and the
//! standard tables (ProtOr, OONS, NACCESS) are available by name through
//! [`registry::ClassifierRegistry`]. Callers may plug in their own implementations,
//! which are tagged [`ClassifierKind::Extended`].

use crate::core::models::atom::AtomClass;
use std::fmt;

pub mod config;
pub mod error;
pub mod reference;
pub mod registry;
pub mod table;

pub use error::ClassifierError;

/// Distinguishes built-in table-driven classifiers from caller-supplied ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierKind {
    Native,
    Extended,
}

pub trait Classifier: Send + Sync + fmt::Debug {
    /// Polarity class of an atom; [`AtomClass::Unknown`] when the pair is not covered.
    fn classify(&self, residue_name: &str, atom_name: &str) -> AtomClass;

    /// Radius in Angstroms, or `None` if this classifier cannot assign one.
    fn radius(&self, residue_name: &str, atom_name: &str) -> Option<f64>;

    /// Human-readable name of the classification scheme.
    fn name(&self) -> &str;

    fn kind(&self) -> ClassifierKind {
        ClassifierKind::Extended
    }
}
