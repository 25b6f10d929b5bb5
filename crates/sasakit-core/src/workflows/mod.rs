//! # Workflows Module
//!
//! High-level entry points that tie the data model and the engine together.
//!
//! ## Architecture
//!
//! - **Calculation** ([`calc`]) - Runs a surface-area calculation on a `Structure`
//!   and splits the result by atom class
//! - **Result Tree** ([`tree`]) - Structure, chain, residue and atom aggregation
//!   with main-chain/side-chain splits and relative areas
//! - **Selections** ([`selection`]) - A small query language for summing the area
//!   of named atom subsets
//! - **Error Handling** ([`error`]) - Errors surfaced at the workflow boundary

pub mod calc;
pub mod error;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod selection;
pub mod tree;
