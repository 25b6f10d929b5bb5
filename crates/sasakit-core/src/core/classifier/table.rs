use super::config::ClassifierConfig;
use super::error::ClassifierError;
use super::{Classifier, ClassifierKind};
use crate::core::models::atom::AtomClass;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Residue group consulted when a residue has no entry for an atom.
pub const FALLBACK_RESIDUE: &str = "ANY";

#[derive(Debug, Clone, Copy, PartialEq)]
struct AtomProperties {
    radius: f64,
    class: AtomClass,
}

/// Table-driven classifier built from a [`ClassifierConfig`].
///
/// Lookups try the residue's own group first and then the `ANY` group. Names are
/// compared exactly after trimming PDB padding.
#[derive(Debug, Clone, PartialEq)]
pub struct TableClassifier {
    name: String,
    residues: HashMap<String, HashMap<String, AtomProperties>>,
}

impl TableClassifier {
    /// Resolves type references and validates every entry.
    ///
    /// `origin` names the source in error messages.
    pub fn from_config(config: ClassifierConfig, origin: &str) -> Result<Self, ClassifierError> {
        let invalid = |entry: String, message: String| ClassifierError::Validation {
            path: origin.to_string(),
            entry,
            message,
        };

        let mut types = HashMap::with_capacity(config.types.len());
        for (type_name, atom_type) in &config.types {
            let entry = format!("types.{}", type_name);
            if !atom_type.radius.is_finite() || atom_type.radius < 0.0 {
                return Err(invalid(
                    entry,
                    format!("radius {} must be finite and non-negative", atom_type.radius),
                ));
            }
            let class = atom_type
                .class
                .parse::<AtomClass>()
                .map_err(|e| invalid(entry, e.to_string()))?;
            types.insert(
                type_name.as_str(),
                AtomProperties {
                    radius: atom_type.radius,
                    class,
                },
            );
        }

        // Keys are compared after trimming, so TOML-distinct keys can still collide.
        let mut residues: HashMap<String, HashMap<String, AtomProperties>> =
            HashMap::with_capacity(config.residues.len());
        for (residue_name, atoms) in &config.residues {
            let residue_key = residue_name.trim().to_string();
            if residues.contains_key(&residue_key) {
                return Err(invalid(
                    format!("residues.{}", residue_name),
                    format!("duplicate residue group '{}'", residue_key),
                ));
            }

            let mut group = HashMap::with_capacity(atoms.len());
            for (atom_name, type_name) in atoms {
                let entry = format!("residues.{}.{}", residue_name, atom_name);
                let properties = types.get(type_name.as_str()).ok_or_else(|| {
                    invalid(entry.clone(), format!("undefined atom type '{}'", type_name))
                })?;
                let atom_key = atom_name.trim().to_string();
                if group.insert(atom_key.clone(), *properties).is_some() {
                    return Err(invalid(
                        entry,
                        format!("duplicate atom '{}' in residue '{}'", atom_key, residue_key),
                    ));
                }
            }
            residues.insert(residue_key, group);
        }

        debug!(
            name = %config.name,
            types = types.len(),
            residues = residues.len(),
            "Classifier table built"
        );
        Ok(Self {
            name: config.name,
            residues,
        })
    }

    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ClassifierError> {
        let config: ClassifierConfig =
            toml::from_str(content).map_err(|e| ClassifierError::Toml {
                path: origin.to_string(),
                source: e,
            })?;
        Self::from_config(config, origin)
    }

    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let content = std::fs::read_to_string(path).map_err(|e| ClassifierError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content, &path.to_string_lossy())
    }

    fn lookup(&self, residue_name: &str, atom_name: &str) -> Option<AtomProperties> {
        let atom_name = atom_name.trim();
        self.residues
            .get(residue_name.trim())
            .and_then(|group| group.get(atom_name))
            .or_else(|| {
                self.residues
                    .get(FALLBACK_RESIDUE)
                    .and_then(|group| group.get(atom_name))
            })
            .copied()
    }
}

impl Classifier for TableClassifier {
    fn classify(&self, residue_name: &str, atom_name: &str) -> AtomClass {
        self.lookup(residue_name, atom_name)
            .map_or(AtomClass::Unknown, |p| p.class)
    }

    fn radius(&self, residue_name: &str, atom_name: &str) -> Option<f64> {
        self.lookup(residue_name, atom_name).map(|p| p.radius)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ClassifierKind {
        ClassifierKind::Native
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const MINI: &str = r#"
        name = "mini"

        [types]
        C_ALI = { radius = 2.0, class = "apolar" }
        O = { radius = 1.5, class = "polar" }

        [residues.ANY]
        CA = "C_ALI"
        O = "O"

        [residues.SER]
        OG = "O"
        CA = "O"
    "#;

    fn mini() -> TableClassifier {
        TableClassifier::from_toml_str(MINI, "mini.toml").unwrap()
    }

    #[test]
    fn residue_specific_entry_takes_precedence_over_fallback() {
        let c = mini();
        assert_eq!(c.radius("SER", "CA"), Some(1.5));
        assert_eq!(c.radius("ALA", "CA"), Some(2.0));
        assert_eq!(c.classify("SER", "OG"), AtomClass::Polar);
    }

    #[test]
    fn names_are_trimmed_before_lookup() {
        let c = mini();
        assert_eq!(c.radius(" SER", " OG "), Some(1.5));
    }

    #[test]
    fn unknown_pairs_have_no_radius_and_unknown_class() {
        let c = mini();
        assert_eq!(c.radius("ALA", "CB"), None);
        assert_eq!(c.classify("ALA", "CB"), AtomClass::Unknown);
    }

    #[test]
    fn table_classifier_is_native_and_named() {
        let c = mini();
        assert_eq!(c.name(), "mini");
        assert_eq!(c.kind(), ClassifierKind::Native);
    }

    #[test]
    fn undefined_type_reference_is_a_validation_error() {
        let text = MINI.replace("OG = \"O\"", "OG = \"O_HYD\"");
        match TableClassifier::from_toml_str(&text, "mini.toml") {
            Err(ClassifierError::Validation { entry, message, .. }) => {
                assert_eq!(entry, "residues.SER.OG");
                assert!(message.contains("O_HYD"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn atom_names_colliding_after_trimming_are_rejected() {
        let text = MINI.replace("OG = \"O\"", "OG = \"O\"\n        \" OG \" = \"C_ALI\"");
        match TableClassifier::from_toml_str(&text, "mini.toml") {
            Err(ClassifierError::Validation { entry, message, .. }) => {
                assert!(entry.starts_with("residues.SER."), "entry: {}", entry);
                assert!(message.contains("duplicate atom 'OG'"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn residue_groups_colliding_after_trimming_are_rejected() {
        let text = format!("{}\n        [residues.\" SER\"]\n        CB = \"C_ALI\"\n", MINI);
        match TableClassifier::from_toml_str(&text, "mini.toml") {
            Err(ClassifierError::Validation { message, .. }) => {
                assert!(message.contains("duplicate residue group 'SER'"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn negative_radius_is_a_validation_error() {
        let text = MINI.replace("radius = 1.5", "radius = -1.5");
        assert!(matches!(
            TableClassifier::from_toml_str(&text, "mini.toml"),
            Err(ClassifierError::Validation { entry, .. }) if entry == "types.O"
        ));
    }

    #[test]
    fn unknown_class_label_is_a_validation_error() {
        let text = MINI.replace("class = \"polar\"", "class = \"charged\"");
        assert!(matches!(
            TableClassifier::from_toml_str(&text, "mini.toml"),
            Err(ClassifierError::Validation { .. })
        ));
    }

    #[test]
    fn malformed_toml_reports_origin() {
        let err = TableClassifier::from_toml_str("name = ", "broken.toml").unwrap_err();
        match err {
            ClassifierError::Toml { path, .. } => assert_eq!(path, "broken.toml"),
            other => panic!("expected TOML error, got {:?}", other),
        }
    }

    #[test]
    fn load_reads_file_and_reports_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mini.toml");
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", MINI).unwrap();

        let c = TableClassifier::load(&path).unwrap();
        assert_eq!(c, mini());

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            TableClassifier::load(&missing),
            Err(ClassifierError::Io { .. })
        ));
    }
}
