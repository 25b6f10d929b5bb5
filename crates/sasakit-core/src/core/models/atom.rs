use crate::core::utils::identifiers::{element_from_atom_name, is_backbone_atom, is_hydrogen};
use nalgebra::Point3;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Physicochemical class of an atom used to split surface areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtomClass {
    Polar,
    Apolar,
    #[default]
    Unknown,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid atom class '{0}' (expected 'polar', 'apolar' or 'unknown')")]
pub struct ParseAtomClassError(pub String);

impl FromStr for AtomClass {
    type Err = ParseAtomClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "polar" => Ok(AtomClass::Polar),
            "apolar" => Ok(AtomClass::Apolar),
            "unknown" => Ok(AtomClass::Unknown),
            _ => Err(ParseAtomClassError(s.to_string())),
        }
    }
}

impl fmt::Display for AtomClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                AtomClass::Polar => "Polar",
                AtomClass::Apolar => "Apolar",
                AtomClass::Unknown => "Unknown",
            }
        )
    }
}

/// A residue sequence number with an optional insertion code (e.g. `82A`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueNumber {
    pub sequence: i32,
    pub insertion_code: Option<char>,
}

impl ResidueNumber {
    pub fn new(sequence: i32) -> Self {
        Self {
            sequence,
            insertion_code: None,
        }
    }

    pub fn with_insertion_code(sequence: i32, insertion_code: char) -> Self {
        Self {
            sequence,
            insertion_code: Some(insertion_code),
        }
    }
}

impl From<i32> for ResidueNumber {
    fn from(sequence: i32) -> Self {
        Self::new(sequence)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid residue number '{0}'")]
pub struct ParseResidueNumberError(pub String);

impl FromStr for ResidueNumber {
    type Err = ParseResidueNumberError;

    /// Parses strings such as `"  76 "`, `"-3"` or `"82A"`.
    ///
    /// A single trailing letter is taken as the insertion code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ParseResidueNumberError(s.to_string());

        let (digits, insertion_code) = match trimmed.chars().last() {
            Some(c) if c.is_ascii_alphabetic() => (&trimmed[..trimmed.len() - 1], Some(c)),
            Some(_) => (trimmed, None),
            None => return Err(err()),
        };
        let sequence = digits.trim().parse::<i32>().map_err(|_| err())?;

        Ok(Self {
            sequence,
            insertion_code,
        })
    }
}

impl fmt::Display for ResidueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.insertion_code {
            Some(code) => write!(f, "{}{}", self.sequence, code),
            None => write!(f, "{}", self.sequence),
        }
    }
}

/// An atom as seen by the surface-area calculation.
///
/// Identity fields are fixed once the atom enters a `Structure`; the radius and class
/// can be reassigned through the owning structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Atom name with PDB column padding removed (e.g. "CA").
    pub name: String,
    /// Three-letter residue name (e.g. "ALA").
    pub residue_name: String,
    pub residue_number: ResidueNumber,
    pub chain: char,
    /// Element symbol, if supplied by the source.
    pub element: Option<String>,
    /// Whether the atom came from a HETATM record.
    pub is_hetero: bool,
    /// Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
    /// Radius in Angstroms, excluding the probe.
    pub(crate) radius: f64,
    pub(crate) class: AtomClass,
}

impl Atom {
    /// Creates a new atom with zero radius and an unknown class.
    pub fn new(
        name: &str,
        residue_name: &str,
        residue_number: ResidueNumber,
        chain: char,
        position: Point3<f64>,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            residue_name: residue_name.trim().to_string(),
            residue_number,
            chain,
            element: None,
            is_hetero: false,
            position,
            radius: 0.0,
            class: AtomClass::default(),
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn class(&self) -> AtomClass {
        self.class
    }

    pub fn is_backbone(&self) -> bool {
        is_backbone_atom(&self.name)
    }

    pub fn is_hydrogen(&self) -> bool {
        is_hydrogen(&self.name, self.element.as_deref())
    }

    /// The element symbol, derived from the atom name when the source omitted it.
    pub fn symbol(&self) -> Option<String> {
        self.element
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_ascii_uppercase)
            .or_else(|| element_from_atom_name(&self.name))
    }
}
