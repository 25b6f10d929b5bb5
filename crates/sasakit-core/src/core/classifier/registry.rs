use super::error::ClassifierError;
use super::table::TableClassifier;
use phf::{Map, phf_map};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

static STANDARD_CONFIGS: Map<&'static str, &'static str> = phf_map! {
    "protor" => include_str!("../../../data/classifiers/protor.toml"),
    "oons" => include_str!("../../../data/classifiers/oons.toml"),
    "naccess" => include_str!("../../../data/classifiers/naccess.toml"),
};

/// Access to the standard classification tables shipped with the library.
pub struct ClassifierRegistry;

impl ClassifierRegistry {
    pub const DEFAULT: &'static str = "protor";

    /// Names of the standard tables, sorted.
    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<_> = STANDARD_CONFIGS.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Returns a standard classifier by case-insensitive name. `default` is an
    /// alias for ProtOr.
    pub fn get(name: &str) -> Result<Arc<TableClassifier>, ClassifierError> {
        let key = name.trim().to_ascii_lowercase();
        let key = if key == "default" { Self::DEFAULT } else { key.as_str() };
        let content = STANDARD_CONFIGS
            .get(key)
            .ok_or_else(|| ClassifierError::UnknownStandard(name.to_string()))?;

        debug!(classifier = key, "Loading standard classifier");
        TableClassifier::from_toml_str(content, key).map(Arc::new)
    }

    /// Resolves either a standard name or a path to a classifier TOML file.
    pub fn resolve(name_or_path: &str) -> Result<Arc<TableClassifier>, ClassifierError> {
        match Self::get(name_or_path) {
            Err(ClassifierError::UnknownStandard(_)) if Path::new(name_or_path).is_file() => {
                TableClassifier::load(Path::new(name_or_path)).map(Arc::new)
            }
            other => other,
        }
    }
}
