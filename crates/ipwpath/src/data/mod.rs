//! Loading datasets from delimited text.
//!
//! Column types are inferred: a column whose non-missing cells all parse as
//! numbers is numeric, anything else is categorical. Empty cells and `NA`
//! are missing.
//!
//! # Example
//!
//! ```ignore
//! use ipwpath::data::load_csv;
//! use std::path::Path;
//!
//! let data = load_csv(Path::new("survey.csv"))?;
//! println!("Loaded {} rows, columns {:?}", data.n_rows(), data.column_names());
//! ```

mod csv;

pub use csv::{load_csv, parse_csv};

use std::fmt;

/// Errors that can occur during data loading.
#[derive(Debug)]
pub enum DataError {
    /// IO error reading file.
    Io(std::io::Error),

    /// The input has no header line.
    Empty,

    /// The header names the same column twice.
    DuplicateColumn {
        /// The repeated column name.
        name: String,
    },

    /// A row has the wrong number of fields.
    Parse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Description of the parse error.
        message: String,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io(e) => write!(f, "IO error: {}", e),
            DataError::Empty => write!(f, "input is empty; a header line is required"),
            DataError::DuplicateColumn { name } => {
                write!(f, "duplicate column '{}' in header", name)
            }
            DataError::Parse { line, message } => {
                write!(f, "Parse error at line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DataError {
    fn from(e: std::io::Error) -> Self {
        DataError::Io(e)
    }
}
