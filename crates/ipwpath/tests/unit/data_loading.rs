//! Loading CSV files and analysing them end to end.

use std::fmt::Write as _;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use ipwpath::data::{load_csv, parse_csv, DataError};
use ipwpath::{Column, Dataset, Error, PathAnalysis};

use crate::common::confounded_chain;

fn to_csv(data: &Dataset) -> String {
    let names = data.column_names();
    let mut out = names.join(",");
    out.push('\n');
    for i in 0..data.n_rows() {
        let row = data.row(i);
        let cells: Vec<String> = names
            .iter()
            .map(|n| match &row[n] {
                ipwpath::Value::Numeric(x) => format!("{}", x),
                ipwpath::Value::Categorical(s) => s.clone(),
                ipwpath::Value::Missing => "NA".to_string(),
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join(","));
    }
    out
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("ipwpath-{}-{}.csv", name, std::process::id()))
}

#[test]
fn csv_round_trip_preserves_estimates() {
    let data = confounded_chain(300, 30);
    let path = temp_path("roundtrip");
    fs::write(&path, to_csv(&data)).unwrap();

    let loaded = load_csv(&path).unwrap();
    let _ = fs::remove_file(&path);

    assert_eq!(loaded.n_rows(), 300);
    assert!(matches!(loaded.column("region"), Some(Column::Categorical(_))));
    assert!(matches!(loaded.column("m2"), Some(Column::Numeric(_))));

    let analysis = PathAnalysis::new("d", ["m1", "m2", "m3"], "y").covariates(["region"]);
    let original = analysis.run(&data).unwrap();
    let reloaded = analysis.run(&loaded).unwrap();
    // Shortest round-trip float formatting is exact
    assert_eq!(original.effects, reloaded.effects);
}

#[test]
fn missing_file_is_io_error() {
    let err = load_csv(&temp_path("does-not-exist")).unwrap_err();
    assert!(matches!(err, DataError::Io(_)));
    assert!(err.to_string().starts_with("IO error"));
}

#[test]
fn missing_exposure_in_csv_fails_validation() {
    let csv = "d,m1,y\n1,0.2,1.0\nNA,0.4,0.5\n0,0.1,0.2\n";
    let data = parse_csv(Cursor::new(csv)).unwrap();
    let err = PathAnalysis::new("d", ["m1"], "y").run(&data).unwrap_err();
    assert!(matches!(err, Error::MissingExposure { count: 1, .. }));
}

#[test]
fn text_exposure_in_csv_is_categorical() {
    let csv = "d,m1,y\nyes,0.2,1.0\nno,0.4,0.5\n";
    let data = parse_csv(Cursor::new(csv)).unwrap();
    let err = PathAnalysis::new("d", ["m1"], "y").run(&data).unwrap_err();
    assert!(matches!(err, Error::NonNumericExposure { .. }));
}

#[test]
fn parse_error_display_has_line() {
    let err = parse_csv(Cursor::new("a,b\n1,2\n3,4,5\n")).unwrap_err();
    assert_eq!(err.to_string(), "Parse error at line 3: Expected 2 columns, got 3");
}

#[test]
fn infinite_outcome_in_csv_fails_validation() {
    let csv = "d,m1,y\n1,0.2,inf\n0,0.4,0.5\n1,0.1,NaN\n";
    let data = parse_csv(Cursor::new(csv)).unwrap();
    let err = PathAnalysis::new("d", ["m1"], "y").run(&data).unwrap_err();
    assert!(matches!(err, Error::NonFiniteOutcome { row: 0, .. }));
}

#[test]
fn quoted_category_with_comma_loads() {
    let csv = "d,m1,region,y\n1,0.2,\"north, coast\",1.0\n0,0.4,south,0.5\n";
    let data = parse_csv(Cursor::new(csv)).unwrap();
    assert_eq!(data.n_rows(), 2);
    assert_eq!(
        data.row(0)["region"],
        ipwpath::Value::Categorical("north, coast".to_string())
    );
}
