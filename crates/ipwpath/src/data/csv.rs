//! CSV parsing into a [`Dataset`].

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use ipwpath_core::{Column, Dataset};

use super::DataError;

/// Cell values treated as missing.
const MISSING_MARKERS: &[&str] = &["", "NA", "NaN"];

/// Load a dataset from a CSV file.
///
/// The first non-empty line is the header. Fields are comma separated and
/// may be wrapped in double quotes, which can then contain commas. Empty
/// cells, `NA` and `NaN` are missing.
///
/// # Example file content
/// ```csv
/// treated,m1,m2,region,income
/// 1,0.4,2.1,north,31.5
/// 0,NA,1.7,south,28.0
/// ```
///
/// # Errors
/// Returns `DataError` if the file cannot be read, has no header, or a row
/// has the wrong number of fields.
pub fn load_csv(path: &Path) -> Result<Dataset, DataError> {
    let file = File::open(path)?;
    let data = parse_csv(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        rows = data.n_rows(),
        columns = data.column_names().len(),
        "loaded dataset"
    );
    Ok(data)
}

/// Parse a dataset from any buffered reader. See [`load_csv`].
pub fn parse_csv<R: BufRead>(reader: R) -> Result<Dataset, DataError> {
    let mut header: Option<Vec<String>> = None;
    let mut cells: Vec<Vec<String>> = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line = line.trim();

        // Skip empty lines
        if line.is_empty() {
            continue;
        }

        let fields = split_fields(line);
        match &header {
            None => {
                let mut seen = HashSet::new();
                for name in &fields {
                    if !seen.insert(name.as_str()) {
                        return Err(DataError::DuplicateColumn { name: name.clone() });
                    }
                }
                cells = vec![Vec::new(); fields.len()];
                header = Some(fields);
            }
            Some(names) => {
                if fields.len() != names.len() {
                    return Err(DataError::Parse {
                        line: line_num + 1,
                        message: format!(
                            "Expected {} columns, got {}",
                            names.len(),
                            fields.len()
                        ),
                    });
                }
                for (column, field) in cells.iter_mut().zip(fields) {
                    column.push(field);
                }
            }
        }
    }

    let names = header.ok_or(DataError::Empty)?;
    Ok(names
        .into_iter()
        .zip(cells)
        .fold(Dataset::new(), |data, (name, raw)| {
            data.with_column(name, infer_column(raw))
        }))
}

/// Split a line on commas outside double quotes. Quotes around a field are
/// removed and `""` inside a quoted field is a literal quote.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut field).trim().to_string()),
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_string());
    fields
}

fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell)
}

fn infer_column(raw: Vec<String>) -> Column {
    let parsed: Option<Vec<Option<f64>>> = raw
        .iter()
        .map(|cell| {
            if is_missing(cell) {
                Some(None)
            } else {
                cell.parse::<f64>().ok().map(Some)
            }
        })
        .collect();

    match parsed {
        Some(values) => Column::Numeric(values),
        None => Column::Categorical(
            raw.into_iter()
                .map(|cell| (!is_missing(&cell)).then_some(cell))
                .collect(),
        ),
    }
}
