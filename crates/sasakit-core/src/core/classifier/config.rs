use serde::Deserialize;
use std::collections::BTreeMap;

/// A radius and class pair that residue entries refer to by name.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AtomTypeConfig {
    pub radius: f64,
    pub class: String,
}

/// Raw classifier configuration as written in TOML.
///
/// `residues` maps a residue name (or `ANY` for the fallback group) to a table of
/// atom name to type name.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    pub name: String,
    pub types: BTreeMap<String, AtomTypeConfig>,
    pub residues: BTreeMap<String, BTreeMap<String, String>>,
}
