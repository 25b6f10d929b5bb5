use super::record::AtomRecord;
use super::traits::AtomSource;
use crate::core::models::atom::ResidueNumber;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

/// Record name from columns 1-6; lines such as a bare `END` are shorter than that.
fn record_name(line: &str) -> &str {
    line.get(..6).unwrap_or(line).trim()
}

fn column_char(line: &str, index: usize) -> Option<char> {
    line.get(index..index + 1)
        .and_then(|s| s.chars().next())
        .filter(|c| !c.is_whitespace())
}

fn parse_coordinate(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

/// Minimal reader for the fixed-column PDB format.
///
/// Only `ATOM`, `HETATM`, `MODEL`, `ENDMDL` and `END` records are interpreted;
/// everything else is ignored.
pub struct PdbReader;

impl AtomSource for PdbReader {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<AtomRecord>, Self::Error> {
        let mut records = Vec::new();
        let mut model = 1u32;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let record_type = record_name(&line);
            match record_type {
                "ATOM" | "HETATM" => {
                    if line.len() < 54 {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::LineTooShort,
                        });
                    }

                    let name = slice_and_trim(&line, 12, 16);
                    if name.is_empty() {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::MissingRequiredField {
                                columns: "13-16".into(),
                            },
                        });
                    }

                    let res_seq_str = slice_and_trim(&line, 22, 26);
                    let sequence: i32 = res_seq_str.parse().map_err(|_| PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::InvalidInt {
                            columns: "23-26".into(),
                            value: res_seq_str.into(),
                        },
                    })?;
                    let residue_number = ResidueNumber {
                        sequence,
                        insertion_code: column_char(&line, 26),
                    };

                    let x = parse_coordinate(&line, line_num, 30, 38)?;
                    let y = parse_coordinate(&line, line_num, 38, 46)?;
                    let z = parse_coordinate(&line, line_num, 46, 54)?;

                    // Serials overflow five columns in large files, so fall back to file order.
                    let serial = slice_and_trim(&line, 6, 11)
                        .parse()
                        .unwrap_or(records.len() as i64 + 1);
                    let element = Some(slice_and_trim(&line, 76, 78))
                        .filter(|e| !e.is_empty())
                        .map(str::to_string);

                    records.push(AtomRecord {
                        serial,
                        name: name.to_string(),
                        alt_loc: column_char(&line, 16),
                        residue_name: slice_and_trim(&line, 17, 20).to_string(),
                        chain: column_char(&line, 21).unwrap_or(' '),
                        residue_number,
                        position: Point3::new(x, y, z),
                        element,
                        is_hetero: record_type == "HETATM",
                        model,
                    });
                }
                "MODEL" => {
                    let value = slice_and_trim(&line, 6, line.len().min(80));
                    model = value.parse().map_err(|_| PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::InvalidInt {
                            columns: "11-14".into(),
                            value: value.into(),
                        },
                    })?;
                }
                "END" => break,
                _ => {}
            }
        }

        if records.is_empty() {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }
        debug!(records = records.len(), last_model = model, "Read PDB records");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const TWO_MODELS: &str = "\
HEADER    TEST
MODEL        1
ATOM      1  N   MET A   1      27.340  24.430   2.614  1.00  9.67           N
ATOM      2  CA AMET A   1      26.266  25.413   2.842  1.00 10.38           C
ATOM      3  CA BMET A   1      26.200  25.400   2.800  0.50 10.38           C
HETATM    4  O   HOH A 101      10.000  10.000  10.000  1.00 20.00           O
ENDMDL
MODEL        2
ATOM      1  N   MET A  82A     27.000  24.000   2.000  1.00  9.67
ENDMDL
END
ATOM      9  N   GLY A   2       0.000   0.000   0.000  1.00  9.67           N
";

    fn read(text: &str) -> Result<Vec<AtomRecord>, PdbError> {
        PdbReader::read_from(&mut Cursor::new(text))
    }

    #[test]
    fn reads_atom_fields_from_fixed_columns() {
        let records = read(TWO_MODELS).unwrap();
        assert_eq!(records.len(), 5);

        let n = &records[0];
        assert_eq!(n.serial, 1);
        assert_eq!(n.name, "N");
        assert_eq!(n.residue_name, "MET");
        assert_eq!(n.chain, 'A');
        assert_eq!(n.residue_number, ResidueNumber::new(1));
        assert_eq!(n.position, Point3::new(27.340, 24.430, 2.614));
        assert_eq!(n.element.as_deref(), Some("N"));
        assert_eq!(n.alt_loc, None);
        assert!(!n.is_hetero);
        assert_eq!(n.model, 1);
    }

    #[test]
    fn reads_alt_locs_hetatms_models_and_insertion_codes() {
        let records = read(TWO_MODELS).unwrap();
        assert_eq!(records[1].alt_loc, Some('A'));
        assert_eq!(records[2].alt_loc, Some('B'));
        assert!(records[3].is_hetero);

        let last = &records[4];
        assert_eq!(last.model, 2);
        assert_eq!(last.residue_number, ResidueNumber::with_insertion_code(82, 'A'));
        assert_eq!(last.element, None);
    }

    #[test]
    fn stops_at_end_record() {
        let records = read(TWO_MODELS).unwrap();
        assert!(records.iter().all(|r| r.residue_name != "GLY"));
    }

    #[test]
    fn record_names_shorter_than_six_columns_are_recognised() {
        assert_eq!(record_name("END"), "END");
        assert_eq!(record_name("END   "), "END");
        assert_eq!(record_name("HETATM    4  O"), "HETATM");

        let text = "ATOM      1  N   MET A   1      27.340  24.430   2.614  1.00  9.67           N\n\
END\n\
ATOM      2  CA  MET A   1      26.266  25.413   2.842  1.00 10.38           C\n";
        let records = read(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "N");
    }

    #[test]
    fn malformed_coordinate_reports_line_and_columns() {
        let text = "ATOM      1  N   MET A   1      27.34x  24.430   2.614  1.00  9.67           N\n";
        match read(text) {
            Err(PdbError::Parse { line, kind }) => {
                assert_eq!(line, 1);
                assert_eq!(
                    kind,
                    PdbParseErrorKind::InvalidFloat {
                        columns: "31-38".into(),
                        value: "27.34x".into()
                    }
                );
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn short_atom_line_is_rejected() {
        let err = read("ATOM      1  N   MET A   1      27.340\n").unwrap_err();
        assert!(matches!(
            err,
            PdbError::Parse {
                line: 1,
                kind: PdbParseErrorKind::LineTooShort
            }
        ));
    }

    #[test]
    fn input_without_atoms_is_rejected() {
        assert!(matches!(read("HEADER    EMPTY\nEND\n"), Err(PdbError::MissingRecord(_))));
    }

    #[test]
    fn reads_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(TWO_MODELS.as_bytes()).unwrap();
        let records = PdbReader::read_from_path(file.path()).unwrap();
        assert_eq!(records.len(), 5);
    }
}
