use crate::core::models::atom::ResidueNumber;
use nalgebra::Point3;

/// One atom as read from a coordinate source, before any loading policy applies.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    pub serial: i64,
    pub name: String,
    /// Alternate location indicator; `None` when blank.
    pub alt_loc: Option<char>,
    pub residue_name: String,
    pub chain: char,
    pub residue_number: ResidueNumber,
    pub position: Point3<f64>,
    /// Element symbol; `None` when the column is blank.
    pub element: Option<String>,
    pub is_hetero: bool,
    /// Model number, 1 when the source has no MODEL records.
    pub model: u32,
}
