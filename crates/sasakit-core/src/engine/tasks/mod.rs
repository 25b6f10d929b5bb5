//! The two surface-area algorithms.
//!
//! Both take inflated radii (atom radius plus probe) and a prebuilt
//! [`NeighborList`](super::neighbors::NeighborList), and return one area per atom
//! in input order.

pub mod lee_richards;
pub mod shrake_rupley;
