use super::error::CalcError;
use crate::core::classifier::Classifier;
use crate::core::models::atom::AtomClass;
use crate::core::models::error::ModelError;
use crate::core::models::structure::Structure;
use crate::engine::config::Parameters;
use crate::engine::result::SasaResult;
use crate::engine::sasa::calc_coord;
use std::ops::AddAssign;
use tracing::{info, instrument};

/// Computes the SASA of every atom in `structure`.
///
/// The result is detached from the structure: later changes to either do not
/// affect the other.
#[instrument(skip_all, name = "calc_workflow", fields(atoms = structure.len()))]
pub fn run(structure: &Structure, params: &Parameters) -> Result<SasaResult, CalcError> {
    if structure.is_empty() {
        return Err(ModelError::EmptyStructure.into());
    }
    info!(
        algorithm = %params.algorithm(),
        probe_radius = params.probe_radius(),
        "Starting SASA calculation"
    );
    Ok(calc_coord(&structure.positions(), &structure.radii(), params)?)
}

/// Runs [`run`] on each structure in turn, for model or chain arrays.
pub fn run_all(structures: &[Structure], params: &Parameters) -> Result<Vec<SasaResult>, CalcError> {
    structures.iter().map(|s| run(s, params)).collect()
}

/// Total area per atom class.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClassAreas {
    pub polar: f64,
    pub apolar: f64,
    pub unknown: f64,
}

impl ClassAreas {
    pub fn total(&self) -> f64 {
        self.polar + self.apolar + self.unknown
    }

    pub(crate) fn add(&mut self, class: AtomClass, area: f64) {
        match class {
            AtomClass::Polar => self.polar += area,
            AtomClass::Apolar => self.apolar += area,
            AtomClass::Unknown => self.unknown += area,
        }
    }
}

impl AddAssign for ClassAreas {
    fn add_assign(&mut self, rhs: Self) {
        self.polar += rhs.polar;
        self.apolar += rhs.apolar;
        self.unknown += rhs.unknown;
    }
}

pub(crate) fn check_result(structure: &Structure, result: &SasaResult) -> Result<(), CalcError> {
    if structure.len() != result.len() {
        return Err(CalcError::ResultMismatch {
            structure: structure.len(),
            result: result.len(),
        });
    }
    Ok(())
}

/// Splits a result by atom class without recomputing any geometry.
///
/// With `classifier` set, atoms are relabelled by it; otherwise the classes
/// assigned when the structure was built are used.
pub fn classify_areas(
    structure: &Structure,
    result: &SasaResult,
    classifier: Option<&dyn Classifier>,
) -> Result<ClassAreas, CalcError> {
    check_result(structure, result)?;
    let mut areas = ClassAreas::default();
    for (atom, &area) in structure.atoms().iter().zip(result.atom_areas()) {
        let class = classifier.map_or(atom.class(), |c| c.classify(&atom.residue_name, &atom.name));
        areas.add(class, area);
    }
    Ok(areas)
}
