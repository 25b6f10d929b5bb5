use super::error::ModelError;
use super::structure::{AtomSpec, Structure};
use crate::core::classifier::Classifier;
use crate::core::diagnostics::DiagnosticReporter;
use crate::core::io::record::AtomRecord;
use crate::core::models::atom::ResidueNumber;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// How multi-model inputs (NMR ensembles, trajectories) are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelMode {
    /// Keep only the first model in the input.
    #[default]
    FirstOnly,
    /// Merge all models into one structure.
    Join,
    /// One structure per model; requires [`structure_array`].
    Separate,
}

/// What to do with an atom the classifier has no radius for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownAtomPolicy {
    /// Guess the radius from the element symbol and warn.
    #[default]
    Guess,
    /// Drop the atom silently.
    Skip,
    /// Drop the atom and warn.
    SkipWithWarning,
    /// Abort loading with [`ModelError::UnknownAtom`].
    Halt,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadOptions {
    pub include_hydrogen: bool,
    pub include_hetatm: bool,
    pub models: ModelMode,
    pub separate_chains: bool,
    pub unknown_atoms: UnknownAtomPolicy,
}

impl LoadOptions {
    fn splits(&self) -> bool {
        self.models == ModelMode::Separate || self.separate_chains
    }
}

impl From<&AtomRecord> for AtomSpec {
    fn from(record: &AtomRecord) -> Self {
        AtomSpec {
            name: record.name.clone(),
            residue_name: record.residue_name.clone(),
            residue_number: record.residue_number,
            chain: record.chain,
            position: record.position,
            element: record.element.clone(),
            is_hetero: record.is_hetero,
            radius: None,
        }
    }
}

/// Drops records outside the first model when only the first model is wanted,
/// and alternate-location records whose label is not the first one seen at their
/// residue position, so a microheterogeneous site (`ASER`/`BTHR`) yields one
/// residue.
fn filter_records<'r>(
    records: &'r [AtomRecord],
    options: &LoadOptions,
) -> impl Iterator<Item = &'r AtomRecord> {
    let first_model = records.first().map(|r| r.model);
    let mut chosen: HashMap<(u32, char, ResidueNumber), char> = HashMap::new();

    records.iter().filter(move |record| {
        if options.models == ModelMode::FirstOnly && Some(record.model) != first_model {
            return false;
        }
        let Some(label) = record.alt_loc else {
            return true;
        };
        let position = (record.model, record.chain, record.residue_number);
        let kept = *chosen.entry(position).or_insert(label);
        if kept != label {
            debug!(
                atom = %record.name,
                residue = %record.residue_name,
                alt_loc = %label,
                "Skipping alternate location"
            );
            return false;
        }
        true
    })
}

/// Builds a single structure from a sequence of atom records.
///
/// # Errors
///
/// Returns [`ModelError::InvalidOptions`] if `options` ask for models or chains
/// to be split (use [`structure_array`] for that), [`ModelError::EmptyStructure`]
/// if no atom survives filtering, or any error raised while adding atoms.
#[instrument(skip_all, name = "structure_from_records")]
pub fn structure_from_records(
    records: &[AtomRecord],
    classifier: Option<Arc<dyn Classifier>>,
    options: &LoadOptions,
    reporter: &DiagnosticReporter,
) -> Result<Structure, ModelError> {
    if options.splits() {
        return Err(ModelError::InvalidOptions(
            "splitting models or chains requires building a structure array",
        ));
    }

    let mut structure = new_structure(classifier, options);
    structure.set_model(records.first().map_or(1, |r| r.model));
    for record in filter_records(records, options) {
        structure.add_atom_reporting(record.into(), reporter)?;
    }

    if structure.is_empty() {
        return Err(ModelError::EmptyStructure);
    }
    debug!(
        atoms = structure.len(),
        residues = structure.residues().len(),
        chains = structure.chain_labels().len(),
        "Structure built"
    );
    Ok(structure)
}

/// Builds one structure per model and/or per chain, in order of first appearance.
///
/// Groups whose atoms were all filtered out are dropped.
///
/// # Errors
///
/// Returns [`ModelError::InvalidOptions`] unless `options` separate models or
/// chains, and [`ModelError::EmptyStructure`] if no group has any atoms.
#[instrument(skip_all, name = "structure_array")]
pub fn structure_array(
    records: &[AtomRecord],
    classifier: Option<Arc<dyn Classifier>>,
    options: &LoadOptions,
    reporter: &DiagnosticReporter,
) -> Result<Vec<Structure>, ModelError> {
    if !options.splits() {
        return Err(ModelError::InvalidOptions(
            "a structure array requires separate models or separate chains",
        ));
    }

    let mut groups: Vec<Structure> = Vec::new();
    let mut group_index: HashMap<(Option<u32>, Option<char>), usize> = HashMap::new();

    for record in filter_records(records, options) {
        let key = (
            (options.models == ModelMode::Separate).then_some(record.model),
            options.separate_chains.then_some(record.chain),
        );
        let index = *group_index.entry(key).or_insert_with(|| {
            let mut structure = new_structure(classifier.clone(), options);
            structure.set_model(record.model);
            groups.push(structure);
            groups.len() - 1
        });
        groups[index].add_atom_reporting(record.into(), reporter)?;
    }

    groups.retain(|s| !s.is_empty());
    if groups.is_empty() {
        return Err(ModelError::EmptyStructure);
    }
    debug!(structures = groups.len(), "Structure array built");
    Ok(groups)
}

fn new_structure(classifier: Option<Arc<dyn Classifier>>, options: &LoadOptions) -> Structure {
    match classifier {
        Some(c) => Structure::with_classifier(c, options.clone()),
        None => Structure::with_options(options.clone()),
    }
}

impl Structure {
    /// Convenience wrapper around [`structure_from_records`] without diagnostics.
    pub fn from_records(
        records: &[AtomRecord],
        classifier: Option<Arc<dyn Classifier>>,
        options: &LoadOptions,
    ) -> Result<Self, ModelError> {
        structure_from_records(records, classifier, options, &DiagnosticReporter::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::registry::ClassifierRegistry;
    use nalgebra::Point3;

    fn record(name: &str, res: &str, num: i32, chain: char, model: u32) -> AtomRecord {
        AtomRecord {
            serial: 0,
            name: name.to_string(),
            alt_loc: None,
            residue_name: res.to_string(),
            chain,
            residue_number: num.into(),
            position: Point3::new(num as f64, 0.0, 0.0),
            element: None,
            is_hetero: false,
            model,
        }
    }

    fn protor() -> Option<Arc<dyn Classifier>> {
        Some(ClassifierRegistry::get("protor").unwrap())
    }

    #[test]
    fn builds_structure_from_first_model_only_by_default() {
        let records = vec![
            record("N", "ALA", 1, 'A', 1),
            record("CA", "ALA", 1, 'A', 1),
            record("N", "ALA", 1, 'A', 2),
        ];
        let s = Structure::from_records(&records, protor(), &LoadOptions::default()).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.model(), 1);
    }

    #[test]
    fn join_mode_merges_models() {
        let records = vec![record("N", "ALA", 1, 'A', 1), record("N", "ALA", 1, 'A', 2)];
        let options = LoadOptions {
            models: ModelMode::Join,
            ..LoadOptions::default()
        };
        let s = Structure::from_records(&records, protor(), &options).unwrap();
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn only_first_alternate_location_is_kept() {
        let mut a = record("CB", "SER", 5, 'A', 1);
        a.alt_loc = Some('A');
        let mut b = record("CB", "SER", 5, 'A', 1);
        b.alt_loc = Some('B');
        b.position = Point3::new(9.0, 9.0, 9.0);

        let s = Structure::from_records(&[a, b], protor(), &LoadOptions::default()).unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.position(0), Ok(Point3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn microheterogeneous_site_keeps_a_single_conformer() {
        let mut records = Vec::new();
        for name in ["N", "CA", "CB", "OG"] {
            let mut r = record(name, "SER", 7, 'A', 1);
            r.alt_loc = Some('A');
            records.push(r);
        }
        for name in ["N", "CA", "CB", "OG1", "CG2"] {
            let mut r = record(name, "THR", 7, 'A', 1);
            r.alt_loc = Some('B');
            records.push(r);
        }
        records.push(record("N", "GLY", 8, 'A', 1));

        let s = Structure::from_records(&records, protor(), &LoadOptions::default()).unwrap();
        assert_eq!(s.len(), 5);
        assert!(s.atoms()[..4].iter().all(|a| a.residue_name == "SER"));
        assert_eq!(s.residues().len(), 2);
    }

    #[test]
    fn empty_input_is_an_error() {
        let result = Structure::from_records(&[], protor(), &LoadOptions::default());
        assert_eq!(result.unwrap_err(), ModelError::EmptyStructure);

        let only_hydrogen = vec![record("H", "ALA", 1, 'A', 1)];
        let result = Structure::from_records(&only_hydrogen, protor(), &LoadOptions::default());
        assert_eq!(result.unwrap_err(), ModelError::EmptyStructure);
    }

    #[test]
    fn split_options_are_rejected_for_single_structure() {
        let options = LoadOptions {
            separate_chains: true,
            ..LoadOptions::default()
        };
        let records = vec![record("N", "ALA", 1, 'A', 1)];
        assert!(matches!(
            Structure::from_records(&records, protor(), &options),
            Err(ModelError::InvalidOptions(_))
        ));
        assert!(matches!(
            structure_array(&records, protor(), &LoadOptions::default(), &DiagnosticReporter::new()),
            Err(ModelError::InvalidOptions(_))
        ));
    }

    #[test]
    fn structure_array_splits_by_model_and_chain() {
        let records = vec![
            record("N", "ALA", 1, 'A', 1),
            record("N", "GLY", 1, 'B', 1),
            record("N", "ALA", 1, 'A', 2),
            record("N", "GLY", 1, 'B', 2),
            record("CA", "GLY", 1, 'B', 2),
        ];
        let options = LoadOptions {
            models: ModelMode::Separate,
            separate_chains: true,
            ..LoadOptions::default()
        };
        let structures =
            structure_array(&records, protor(), &options, &DiagnosticReporter::new()).unwrap();
        assert_eq!(structures.len(), 4);
        assert_eq!(structures[3].model(), 2);
        assert_eq!(structures[3].chain_labels(), &['B']);
        assert_eq!(structures[3].len(), 2);

        let by_model = LoadOptions {
            models: ModelMode::Separate,
            ..LoadOptions::default()
        };
        let structures =
            structure_array(&records, protor(), &by_model, &DiagnosticReporter::new()).unwrap();
        assert_eq!(structures.len(), 2);
        assert_eq!(structures[1].len(), 3);
    }
}
