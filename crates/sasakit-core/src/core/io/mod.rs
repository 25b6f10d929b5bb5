//! Coordinate input for surface-area calculations.
//!
//! Readers turn a text source into a flat list of [`record::AtomRecord`]s. Turning
//! records into a `Structure` (filtering, alternate locations, model handling) is
//! the job of `core::models::builder`, so readers stay format-only.

pub mod pdb;
pub mod record;
pub mod traits;
