use super::config::Parameters;
use super::error::EngineError;

/// Per-atom surface areas from one calculation.
///
/// Atom `i` of the input has area `atom_areas()[i]`. The total is the sum of the
/// per-atom values in index order.
#[derive(Debug, Clone, PartialEq)]
pub struct SasaResult {
    atom_areas: Vec<f64>,
    total: f64,
    parameters: Parameters,
}

impl SasaResult {
    pub(crate) fn new(atom_areas: Vec<f64>, parameters: Parameters) -> Self {
        let total = atom_areas.iter().sum();
        Self {
            atom_areas,
            total,
            parameters,
        }
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn atom_areas(&self) -> &[f64] {
        &self.atom_areas
    }

    pub fn atom_area(&self, index: usize) -> Result<f64, EngineError> {
        self.atom_areas
            .get(index)
            .copied()
            .ok_or(EngineError::IndexOutOfBounds {
                index,
                len: self.atom_areas.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.atom_areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atom_areas.is_empty()
    }

    /// The parameters the areas were computed with.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }
}
