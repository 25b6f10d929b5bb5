use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Atom index {index} is out of bounds for a structure with {len} atoms")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Radius array has {actual} entries but the structure has {expected} atoms")]
    RadiusCountMismatch { expected: usize, actual: usize },

    #[error("Invalid radius {radius}: radii must be finite and non-negative")]
    InvalidRadius { radius: f64 },

    #[error("Unknown atom '{atom}' in residue '{residue}': no radius available")]
    UnknownAtom { residue: String, atom: String },

    #[error("Structure contains no atoms")]
    EmptyStructure,

    #[error("Invalid load options: {0}")]
    InvalidOptions(&'static str),
}
