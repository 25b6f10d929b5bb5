use super::error::ClassifierError;
use phf::{Map, phf_map};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Surface areas of a residue type in an extended Ala-X-Ala tripeptide, the
/// denominators for relative areas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidueReference {
    pub total: f64,
    pub main_chain: f64,
    pub side_chain: f64,
    pub polar: f64,
    pub apolar: f64,
}

#[derive(Debug, Deserialize)]
struct ReferenceRow {
    residue: String,
    total: f64,
    main_chain: f64,
    side_chain: f64,
    polar: f64,
    apolar: f64,
}

// ProtOr radii, Lee-Richards, probe 1.4: [total, main chain, side chain, polar, apolar].
static PROTOR_REFERENCE: Map<&'static str, [f64; 5]> = phf_map! {
    "ALA" => [107.95, 38.54, 69.41, 36.55, 71.40],
    "ARG" => [238.76, 37.11, 201.65, 130.74, 108.02],
    "ASN" => [143.94, 37.19, 106.75, 84.34, 59.60],
    "ASP" => [140.39, 37.47, 102.92, 79.15, 61.24],
    "CYS" => [134.28, 37.41, 96.87, 34.40, 99.88],
    "GLN" => [178.50, 37.10, 141.40, 87.72, 90.78],
    "GLU" => [172.25, 37.19, 135.06, 83.12, 89.13],
    "GLY" => [81.09, 81.09, 0.00, 44.65, 36.44],
    "HIS" => [180.78, 37.06, 143.72, 71.82, 108.96],
    "ILE" => [175.71, 37.25, 138.46, 31.23, 144.48],
    "LEU" => [178.59, 37.21, 141.38, 31.28, 147.31],
    "LYS" => [200.81, 37.04, 163.77, 73.37, 127.44],
    "MET" => [194.16, 37.13, 157.03, 31.20, 162.96],
    "PHE" => [199.48, 37.09, 162.39, 31.22, 168.26],
    "PRO" => [136.13, 29.95, 106.18, 18.14, 117.99],
    "SER" => [116.50, 38.40, 78.10, 64.88, 51.62],
    "THR" => [139.27, 37.26, 102.01, 56.36, 82.91],
    "TRP" => [249.36, 37.07, 212.29, 46.54, 202.82],
    "TYR" => [212.76, 37.11, 175.65, 66.62, 146.14],
    "VAL" => [151.44, 37.24, 114.20, 31.33, 120.11],
};

/// Per-residue-type reference areas.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReferenceTable {
    residues: HashMap<String, ResidueReference>,
}

impl ReferenceTable {
    /// The built-in table for the twenty standard amino acids.
    pub fn builtin() -> Self {
        let residues = PROTOR_REFERENCE
            .entries()
            .map(|(name, &[total, main_chain, side_chain, polar, apolar])| {
                (
                    name.to_string(),
                    ResidueReference {
                        total,
                        main_chain,
                        side_chain,
                        polar,
                        apolar,
                    },
                )
            })
            .collect();
        Self { residues }
    }

    /// Reads a CSV table with the header
    /// `residue,total,main_chain,side_chain,polar,apolar`.
    pub fn from_csv_reader<R: Read>(reader: R, origin: &str) -> Result<Self, ClassifierError> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut residues = HashMap::new();
        for (index, result) in reader.deserialize::<ReferenceRow>().enumerate() {
            let row = result.map_err(|e| ClassifierError::Csv {
                path: origin.to_string(),
                source: e,
            })?;
            let residue = row.residue.to_ascii_uppercase();
            let reference = ResidueReference {
                total: row.total,
                main_chain: row.main_chain,
                side_chain: row.side_chain,
                polar: row.polar,
                apolar: row.apolar,
            };
            if residues.insert(residue.clone(), reference).is_some() {
                return Err(ClassifierError::Validation {
                    path: origin.to_string(),
                    entry: format!("row {}", index + 1),
                    message: format!("duplicate reference for residue '{}'", residue),
                });
            }
        }
        Ok(Self { residues })
    }

    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let file = std::fs::File::open(path).map_err(|e| ClassifierError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_csv_reader(file, &path.to_string_lossy())
    }

    pub fn get(&self, residue_name: &str) -> Option<&ResidueReference> {
        self.residues.get(residue_name.trim())
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn builtin_table_covers_standard_amino_acids() {
        let table = ReferenceTable::builtin();
        assert_eq!(table.len(), 20);
        let gly = table.get("GLY").unwrap();
        assert_eq!(gly.total, 81.09);
        assert_eq!(gly.side_chain, 0.0);
        assert!(table.get("HOH").is_none());
    }

    #[test]
    fn builtin_components_are_consistent() {
        for (name, r) in ReferenceTable::builtin().residues {
            assert!(
                (r.main_chain + r.side_chain - r.total).abs() < 0.02,
                "{} main + side != total",
                name
            );
            assert!(
                (r.polar + r.apolar - r.total).abs() < 0.02,
                "{} polar + apolar != total",
                name
            );
        }
    }

    #[test]
    fn loads_csv_table() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "residue, total, main_chain, side_chain, polar, apolar").unwrap();
        writeln!(file, "ala, 100.0, 40.0, 60.0, 30.0, 70.0").unwrap();
        let table = ReferenceTable::load(file.path()).unwrap();
        assert_eq!(table.get("ALA").map(|r| r.side_chain), Some(60.0));
    }

    #[test]
    fn repeated_residue_rows_are_rejected() {
        let text = "residue,total,main_chain,side_chain,polar,apolar\n\
                    ALA,100,40,60,30,70\n\
                    GLY,80,80,0,40,40\n\
                    ala,200,80,120,60,140\n";
        match ReferenceTable::from_csv_reader(text.as_bytes(), "custom.csv") {
            Err(ClassifierError::Validation { path, entry, message }) => {
                assert_eq!(path, "custom.csv");
                assert_eq!(entry, "row 3");
                assert!(message.contains("'ALA'"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn malformed_csv_is_an_error() {
        let text = "residue,total,main_chain,side_chain,polar,apolar\nALA,abc,1,1,1,1\n";
        assert!(matches!(
            ReferenceTable::from_csv_reader(text.as_bytes(), "inline"),
            Err(ClassifierError::Csv { .. })
        ));
    }
}
