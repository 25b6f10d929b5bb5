use super::atom::{Atom, AtomClass, ResidueNumber};
use super::builder::{LoadOptions, UnknownAtomPolicy};
use super::error::ModelError;
use crate::core::classifier::Classifier;
use crate::core::diagnostics::DiagnosticReporter;
use crate::core::utils::elements::vdw_radius;
use nalgebra::Point3;
use std::ops::Range;
use std::sync::Arc;
use tracing::debug;

/// Everything needed to append one atom to a [`Structure`].
#[derive(Debug, Clone, PartialEq)]
pub struct AtomSpec {
    pub name: String,
    pub residue_name: String,
    pub residue_number: ResidueNumber,
    pub chain: char,
    pub position: Point3<f64>,
    pub element: Option<String>,
    pub is_hetero: bool,
    /// Explicit radius; when `None` the structure's classifier resolves it.
    pub radius: Option<f64>,
}

impl AtomSpec {
    pub fn new(
        name: &str,
        residue_name: &str,
        residue_number: ResidueNumber,
        chain: char,
        position: [f64; 3],
    ) -> Self {
        Self {
            name: name.to_string(),
            residue_name: residue_name.to_string(),
            residue_number,
            chain,
            position: Point3::from(position),
            element: None,
            is_hetero: false,
            radius: None,
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_element(mut self, element: &str) -> Self {
        self.element = Some(element.to_string());
        self
    }

    pub fn hetero(mut self, is_hetero: bool) -> Self {
        self.is_hetero = is_hetero;
        self
    }
}

/// A run of consecutive atoms sharing chain, residue number and residue name.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueSpan {
    pub chain: char,
    pub number: ResidueNumber,
    pub name: String,
    pub atoms: Range<usize>,
}

/// An ordered collection of atoms with stable indices.
///
/// Atom `i` keeps index `i` for the lifetime of the structure, so per-atom
/// results can be matched back by position. Residues are indexed as runs of
/// consecutive atoms and chain labels are kept in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    atoms: Vec<Atom>,
    residues: Vec<ResidueSpan>,
    chain_labels: Vec<char>,
    model: u32,
    classifier: Option<Arc<dyn Classifier>>,
    options: LoadOptions,
}

impl Structure {
    /// Creates an empty structure without a classifier.
    ///
    /// Atoms added to it must carry explicit radii unless the unknown-atom
    /// policy allows guessing from the element.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classifier(classifier: Arc<dyn Classifier>, options: LoadOptions) -> Self {
        Self {
            classifier: Some(classifier),
            options,
            ..Self::default()
        }
    }

    pub fn with_options(options: LoadOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn classifier(&self) -> Option<&dyn Classifier> {
        self.classifier.as_deref()
    }

    pub(crate) fn classifier_handle(&self) -> Option<Arc<dyn Classifier>> {
        self.classifier.clone()
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Model number the atoms were read from (1 when the source had no MODEL records).
    pub fn model(&self) -> u32 {
        self.model
    }

    pub(crate) fn set_model(&mut self, model: u32) {
        self.model = model;
    }

    /// Appends an atom, discarding any diagnostics.
    ///
    /// See [`Structure::add_atom_reporting`].
    pub fn add_atom(&mut self, spec: AtomSpec) -> Result<Option<usize>, ModelError> {
        self.add_atom_reporting(spec, &DiagnosticReporter::new())
    }

    /// Appends an atom and returns its index.
    ///
    /// Returns `Ok(None)` when the loading options filter the atom out (hydrogen,
    /// HETATM, or an unknown atom under a skipping policy).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownAtom`] if no radius can be resolved and the
    /// policy is [`UnknownAtomPolicy::Halt`], or [`ModelError::InvalidRadius`] if
    /// the resolved radius is negative or not finite.
    pub fn add_atom_reporting(
        &mut self,
        spec: AtomSpec,
        reporter: &DiagnosticReporter,
    ) -> Result<Option<usize>, ModelError> {
        let mut atom = Atom::new(
            &spec.name,
            &spec.residue_name,
            spec.residue_number,
            spec.chain,
            spec.position,
        );
        atom.element = spec
            .element
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string);
        atom.is_hetero = spec.is_hetero;

        if !self.options.include_hydrogen && atom.is_hydrogen() {
            debug!(atom = %atom.name, residue = %atom.residue_name, "Skipping hydrogen");
            return Ok(None);
        }
        if !self.options.include_hetatm && atom.is_hetero {
            debug!(atom = %atom.name, residue = %atom.residue_name, "Skipping HETATM");
            return Ok(None);
        }

        if let Some(classifier) = &self.classifier {
            atom.class = classifier.classify(&atom.residue_name, &atom.name);
        }

        let radius = match spec.radius {
            Some(r) => r,
            None => match self.resolve_radius(&atom, reporter)? {
                Some(r) => r,
                None => return Ok(None),
            },
        };
        if !radius.is_finite() || radius < 0.0 {
            return Err(ModelError::InvalidRadius { radius });
        }
        atom.radius = radius;

        Ok(Some(self.push(atom)))
    }

    fn resolve_radius(
        &self,
        atom: &Atom,
        reporter: &DiagnosticReporter,
    ) -> Result<Option<f64>, ModelError> {
        if let Some(r) = self
            .classifier
            .as_ref()
            .and_then(|c| c.radius(&atom.residue_name, &atom.name))
        {
            return Ok(Some(r));
        }

        let label = format!(
            "atom '{}' in residue '{}' {}{}",
            atom.name, atom.residue_name, atom.chain, atom.residue_number
        );
        match self.options.unknown_atoms {
            UnknownAtomPolicy::Guess => match atom.symbol().as_deref().and_then(vdw_radius) {
                Some(r) => {
                    reporter.warn(format!(
                        "Unknown {}, guessing radius {:.2} from element",
                        label, r
                    ));
                    Ok(Some(r))
                }
                None => {
                    reporter.warn(format!(
                        "Unknown {} with unrecognized element, assigning radius 0",
                        label
                    ));
                    Ok(Some(0.0))
                }
            },
            UnknownAtomPolicy::Skip => {
                debug!("Skipping unknown {}", label);
                Ok(None)
            }
            UnknownAtomPolicy::SkipWithWarning => {
                reporter.warn(format!("Skipping unknown {}", label));
                Ok(None)
            }
            UnknownAtomPolicy::Halt => Err(ModelError::UnknownAtom {
                residue: atom.residue_name.clone(),
                atom: atom.name.clone(),
            }),
        }
    }

    fn push(&mut self, atom: Atom) -> usize {
        let index = self.atoms.len();

        let continues_residue = self.residues.last().is_some_and(|span| {
            span.chain == atom.chain
                && span.number == atom.residue_number
                && span.name == atom.residue_name
        });
        match self.residues.last_mut() {
            Some(span) if continues_residue => span.atoms.end = index + 1,
            _ => self.residues.push(ResidueSpan {
                chain: atom.chain,
                number: atom.residue_number,
                name: atom.residue_name.clone(),
                atoms: index..index + 1,
            }),
        }
        if !self.chain_labels.contains(&atom.chain) {
            self.chain_labels.push(atom.chain);
        }

        self.atoms.push(atom);
        index
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, index: usize) -> Result<&Atom, ModelError> {
        self.atoms.get(index).ok_or(ModelError::IndexOutOfBounds {
            index,
            len: self.atoms.len(),
        })
    }

    pub fn atom_name(&self, index: usize) -> Result<&str, ModelError> {
        self.atom(index).map(|a| a.name.as_str())
    }

    pub fn residue_name(&self, index: usize) -> Result<&str, ModelError> {
        self.atom(index).map(|a| a.residue_name.as_str())
    }

    pub fn residue_number(&self, index: usize) -> Result<ResidueNumber, ModelError> {
        self.atom(index).map(|a| a.residue_number)
    }

    pub fn chain_label(&self, index: usize) -> Result<char, ModelError> {
        self.atom(index).map(|a| a.chain)
    }

    pub fn position(&self, index: usize) -> Result<Point3<f64>, ModelError> {
        self.atom(index).map(|a| a.position)
    }

    pub fn radius(&self, index: usize) -> Result<f64, ModelError> {
        self.atom(index).map(|a| a.radius)
    }

    pub fn class(&self, index: usize) -> Result<AtomClass, ModelError> {
        self.atom(index).map(|a| a.class)
    }

    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.atoms.iter().map(|a| a.position).collect()
    }

    pub fn radii(&self) -> Vec<f64> {
        self.atoms.iter().map(|a| a.radius).collect()
    }

    pub fn residues(&self) -> &[ResidueSpan] {
        &self.residues
    }

    pub fn chain_labels(&self) -> &[char] {
        &self.chain_labels
    }

    pub fn set_radius(&mut self, index: usize, radius: f64) -> Result<(), ModelError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(ModelError::InvalidRadius { radius });
        }
        let len = self.atoms.len();
        let atom = self
            .atoms
            .get_mut(index)
            .ok_or(ModelError::IndexOutOfBounds { index, len })?;
        atom.radius = radius;
        Ok(())
    }

    /// Overwrites every radius. The slice length must equal the atom count.
    pub fn set_radii(&mut self, radii: &[f64]) -> Result<(), ModelError> {
        if radii.len() != self.atoms.len() {
            return Err(ModelError::RadiusCountMismatch {
                expected: self.atoms.len(),
                actual: radii.len(),
            });
        }
        if let Some(&radius) = radii.iter().find(|r| !r.is_finite() || **r < 0.0) {
            return Err(ModelError::InvalidRadius { radius });
        }
        for (atom, &radius) in self.atoms.iter_mut().zip(radii) {
            atom.radius = radius;
        }
        Ok(())
    }

    /// Reassigns radius and class of every atom from `classifier`.
    ///
    /// Nothing is modified unless every atom resolves.
    pub fn set_radii_with_classifier(&mut self, classifier: &dyn Classifier) -> Result<(), ModelError> {
        let resolved = self
            .atoms
            .iter()
            .map(|atom| {
                let radius = classifier
                    .radius(&atom.residue_name, &atom.name)
                    .ok_or_else(|| ModelError::UnknownAtom {
                        residue: atom.residue_name.clone(),
                        atom: atom.name.clone(),
                    })?;
                Ok((radius, classifier.classify(&atom.residue_name, &atom.name)))
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        for (atom, (radius, class)) in self.atoms.iter_mut().zip(resolved) {
            atom.radius = radius;
            atom.class = class;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::registry::ClassifierRegistry;
    use crate::core::diagnostics::Severity;
    use std::sync::Mutex;

    fn spec(name: &str, res: &str, num: i32, chain: char) -> AtomSpec {
        AtomSpec::new(name, res, num.into(), chain, [num as f64, 0.0, 0.0])
    }

    fn protor_structure(options: LoadOptions) -> Structure {
        Structure::with_classifier(ClassifierRegistry::get("protor").unwrap(), options)
    }

    #[test]
    fn add_atom_with_explicit_radius_returns_sequential_indices() {
        let mut s = Structure::new();
        assert_eq!(s.add_atom(spec("CA", "ALA", 1, 'A').with_radius(1.5)), Ok(Some(0)));
        assert_eq!(s.add_atom(spec("CB", "ALA", 1, 'A').with_radius(2.0)), Ok(Some(1)));
        assert_eq!(s.len(), 2);
        assert_eq!(s.radii(), vec![1.5, 2.0]);
        assert_eq!(s.atom_name(1), Ok("CB"));
    }

    #[test]
    fn add_atom_rejects_negative_radius() {
        let mut s = Structure::new();
        assert_eq!(
            s.add_atom(spec("CA", "ALA", 1, 'A').with_radius(-1.0)),
            Err(ModelError::InvalidRadius { radius: -1.0 })
        );
        assert!(s.is_empty());
    }

    #[test]
    fn classifier_resolves_radius_and_class() {
        let mut s = protor_structure(LoadOptions::default());
        s.add_atom(spec("CB", "ALA", 1, 'A')).unwrap();
        s.add_atom(spec("NH1", "ARG", 2, 'A')).unwrap();
        assert!((s.radius(0).unwrap() - 1.88).abs() < 1e-12);
        assert_eq!(s.class(0), Ok(AtomClass::Apolar));
        assert_eq!(s.class(1), Ok(AtomClass::Polar));
    }

    #[test]
    fn hydrogens_and_hetatms_are_filtered_by_default() {
        let mut s = Structure::new();
        assert_eq!(s.add_atom(spec("H", "ALA", 1, 'A').with_radius(1.1)), Ok(None));
        assert_eq!(
            s.add_atom(spec("O", "HOH", 2, 'A').with_radius(1.4).hetero(true)),
            Ok(None)
        );
        assert!(s.is_empty());

        let options = LoadOptions {
            include_hydrogen: true,
            include_hetatm: true,
            ..LoadOptions::default()
        };
        let mut s = Structure::with_options(options);
        assert_eq!(s.add_atom(spec("H", "ALA", 1, 'A').with_radius(1.1)), Ok(Some(0)));
        assert_eq!(
            s.add_atom(spec("O", "HOH", 2, 'A').with_radius(1.4).hetero(true)),
            Ok(Some(1))
        );
    }

    #[test]
    fn unknown_atom_policies_behave_as_documented() {
        let unknown = || spec("XX1", "UNK", 1, 'A').with_element("C");

        let mut guess = protor_structure(LoadOptions::default());
        assert_eq!(guess.add_atom(unknown()), Ok(Some(0)));
        assert!((guess.radius(0).unwrap() - 1.70).abs() < 1e-12);

        for policy in [UnknownAtomPolicy::Skip, UnknownAtomPolicy::SkipWithWarning] {
            let mut s = protor_structure(LoadOptions {
                unknown_atoms: policy,
                ..LoadOptions::default()
            });
            assert_eq!(s.add_atom(unknown()), Ok(None));
        }

        let mut halt = protor_structure(LoadOptions {
            unknown_atoms: UnknownAtomPolicy::Halt,
            ..LoadOptions::default()
        });
        assert_eq!(
            halt.add_atom(unknown()),
            Err(ModelError::UnknownAtom {
                residue: "UNK".to_string(),
                atom: "XX1".to_string()
            })
        );
    }

    #[test]
    fn guessing_reports_a_warning() {
        let seen = Mutex::new(Vec::new());
        let reporter = DiagnosticReporter::with_callback(Box::new(|d| {
            seen.lock().unwrap().push(d);
        }));
        let mut s = protor_structure(LoadOptions::default());
        s.add_atom_reporting(spec("QQ", "UNK", 1, 'A'), &reporter)
            .unwrap();
        drop(reporter);

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].severity, Severity::Warning);
        assert!(seen[0].message.contains("UNK"));
        assert_eq!(s.radius(0), Ok(0.0));
    }

    #[test]
    fn residues_and_chains_are_indexed_in_order() {
        let mut s = Structure::new();
        for (name, res, num, chain) in [
            ("N", "ALA", 1, 'B'),
            ("CA", "ALA", 1, 'B'),
            ("N", "GLY", 2, 'B'),
            ("N", "SER", 1, 'A'),
        ] {
            s.add_atom(spec(name, res, num, chain).with_radius(1.0)).unwrap();
        }

        assert_eq!(s.chain_labels(), &['B', 'A']);
        let residues = s.residues();
        assert_eq!(residues.len(), 3);
        assert_eq!(residues[0].atoms, 0..2);
        assert_eq!(residues[1].name, "GLY");
        assert_eq!(residues[2].chain, 'A');
        assert_eq!(residues[2].atoms, 3..4);
    }

    #[test]
    fn out_of_bounds_queries_fail() {
        let s = Structure::new();
        assert_eq!(
            s.radius(3),
            Err(ModelError::IndexOutOfBounds { index: 3, len: 0 })
        );
        assert!(s.atom_name(0).is_err());
        assert!(s.chain_label(0).is_err());
    }

    #[test]
    fn set_radii_requires_matching_length() {
        let mut s = Structure::new();
        s.add_atom(spec("CA", "ALA", 1, 'A').with_radius(1.0)).unwrap();
        s.add_atom(spec("CB", "ALA", 1, 'A').with_radius(1.0)).unwrap();

        assert_eq!(
            s.set_radii(&[1.0]),
            Err(ModelError::RadiusCountMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert!(s.set_radii(&[2.0, 3.0]).is_ok());
        assert_eq!(s.radii(), vec![2.0, 3.0]);
        assert!(s.set_radius(0, 1.25).is_ok());
        assert_eq!(s.radius(0), Ok(1.25));
        assert!(s.set_radius(5, 1.0).is_err());
    }

    #[test]
    fn set_radii_with_classifier_is_all_or_nothing() {
        let oons = ClassifierRegistry::get("oons").unwrap();
        let mut s = Structure::new();
        s.add_atom(spec("CB", "ALA", 1, 'A').with_radius(1.0)).unwrap();
        s.set_radii_with_classifier(oons.as_ref()).unwrap();
        assert!((s.radius(0).unwrap() - 2.00).abs() < 1e-12);

        s.add_atom(spec("ZZ", "UNK", 2, 'A').with_radius(1.0)).unwrap();
        assert!(s.set_radii_with_classifier(oons.as_ref()).is_err());
        assert_eq!(s.radius(1), Ok(1.0));
    }
}
