use crate::core::io::traits::GeometryFile;
use crate::core::models::atom::Geometry;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;

/// Number of leading lines that precede the atom table.
pub const HEADER_LINES: usize = 2;

/// Number of columns every atom row must provide:
/// label, x, y, z, charge, element.
pub const REQUIRED_COLUMNS: usize = 6;

/// The two header lines of an extended XYZ file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XyzMetadata {
    /// The atom count on the first line, if it parses as an integer.
    pub declared_count: Option<usize>,
    /// The free-form second line.
    pub comment: String,
}

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum XyzParseErrorKind {
    #[error("Expected at least {expected} columns, found {found}")]
    TooFewColumns { expected: usize, found: usize },
    #[error("Invalid float format in column {column} '{name}' (value: '{value}')")]
    InvalidFloat {
        column: usize,
        name: &'static str,
        value: String,
    },
}

const FLOAT_COLUMNS: [(usize, &str); 4] = [(1, "x"), (2, "y"), (3, "z"), (4, "charge")];

/// Reader for extended XYZ tables: two header lines, then one atom per line as
/// `label x y z charge element`. Extra columns are ignored; blank lines and `#`
/// comments are skipped.
pub struct XyzFile;

impl GeometryFile for XyzFile {
    type Metadata = XyzMetadata;
    type Error = XyzError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Geometry, Self::Metadata), Self::Error> {
        let mut geometry = Geometry::new();
        let mut metadata = XyzMetadata::default();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            if line_num <= HEADER_LINES {
                if line_num == 1 {
                    metadata.declared_count = line.trim().parse().ok();
                } else {
                    metadata.comment = line.trim().to_string();
                }
                continue;
            }

            let content = line.split('#').next().unwrap_or("").trim();
            if content.is_empty() {
                continue;
            }

            let fields: Vec<&str> = content.split_whitespace().collect();
            if fields.len() < REQUIRED_COLUMNS {
                return Err(XyzError::Parse {
                    line: line_num,
                    kind: XyzParseErrorKind::TooFewColumns {
                        expected: REQUIRED_COLUMNS,
                        found: fields.len(),
                    },
                });
            }

            let mut values = [0.0f64; 4];
            for (slot, &(column, name)) in values.iter_mut().zip(FLOAT_COLUMNS.iter()) {
                *slot = fields[column].parse().map_err(|_| XyzError::Parse {
                    line: line_num,
                    kind: XyzParseErrorKind::InvalidFloat {
                        column,
                        name,
                        value: fields[column].to_string(),
                    },
                })?;
            }
            let [x, y, z, charge] = values;

            geometry.push(fields[0], fields[5], Point3::new(x, y, z), charge);
        }

        if geometry.is_empty() {
            return Err(XyzError::MissingRecord("atom rows".into()));
        }
        Ok((geometry, metadata))
    }
}

impl XyzMetadata {
    /// Returns the declared atom count when it disagrees with `actual`.
    pub fn count_mismatch(&self, actual: usize) -> Option<usize> {
        self.declared_count.filter(|&declared| declared != actual)
    }
}
