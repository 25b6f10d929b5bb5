//! # Engine Module
//!
//! The geometric core: validated calculation parameters, the spatial neighbor
//! index and the two surface-area algorithms.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Algorithm selection, probe radius and
//!   resolution knobs with validating setters and a builder
//! - **Neighbor Search** ([`neighbors`]) - Cell-list index of overlapping inflated spheres
//! - **Algorithms** ([`tasks`]) - Shrake-Rupley sphere sampling and Lee-Richards slicing
//! - **Entry Points** ([`sasa`]) - Coordinate-level calculations that tie the above together
//! - **Results** ([`result`]) - Immutable per-atom area vectors
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! Per-atom work is spread across a dedicated worker pool when the `parallel`
//! feature is enabled. Every atom's area is computed independently, so the
//! thread count never affects the numbers.

pub mod config;
pub mod error;
pub mod neighbors;
pub(crate) mod parallel;
pub mod result;
pub mod sasa;
pub mod tasks;
