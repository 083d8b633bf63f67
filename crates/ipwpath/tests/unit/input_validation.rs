//! Fail-fast input checks and estimator failures surfacing as errors.

use std::sync::atomic::{AtomicUsize, Ordering};

use ipwpath::{
    Dataset, Error, EstimationError, IpwMediation, NaturalEffectEstimator,
    NaturalEffectRequest, NaturalEffects, PathAnalysis,
};

use crate::common::mediator_chain;

/// Counts calls and forwards to the reference estimator.
struct Counting {
    calls: AtomicUsize,
}

impl Counting {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

impl NaturalEffectEstimator for Counting {
    fn estimate(
        &self,
        data: &Dataset,
        request: &NaturalEffectRequest<'_>,
    ) -> Result<NaturalEffects, EstimationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        IpwMediation::new().estimate(data, request)
    }
}

fn replace_exposure(data: &Dataset, exposure: Vec<Option<f64>>) -> Dataset {
    Dataset::new()
        .with_numeric_opt("d", exposure)
        .with_column("m1", data.column("m1").unwrap().clone())
        .with_column("m2", data.column("m2").unwrap().clone())
        .with_column("y", data.column("y").unwrap().clone())
}

#[test]
fn exposure_value_two_fails_before_fitting() {
    let data = mediator_chain(50, 1);
    let mut exposure: Vec<Option<f64>> = data
        .column("d")
        .and_then(|c| c.as_numeric())
        .unwrap()
        .to_vec();
    exposure[17] = Some(2.0);
    let bad = replace_exposure(&data, exposure);

    let counting = Counting::new();
    let err = PathAnalysis::new("d", ["m1", "m2"], "y")
        .bootstrap(10)
        .run_with(&bad, &counting)
        .unwrap_err();

    match err {
        Error::NonBinaryExposure { value, row, .. } => {
            assert_eq!(value, 2.0);
            assert_eq!(row, 17);
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(counting.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn missing_exposure_fails_before_fitting() {
    let data = mediator_chain(50, 2);
    let mut exposure: Vec<Option<f64>> = data
        .column("d")
        .and_then(|c| c.as_numeric())
        .unwrap()
        .to_vec();
    exposure[3] = None;
    exposure[4] = None;
    let bad = replace_exposure(&data, exposure);

    let counting = Counting::new();
    let err = PathAnalysis::new("d", ["m1", "m2"], "y")
        .run_with(&bad, &counting)
        .unwrap_err();
    assert!(matches!(err, Error::MissingExposure { count: 2, .. }));
    assert_eq!(counting.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn categorical_exposure_rejected() {
    let data = Dataset::new()
        .with_categorical("d", vec![Some("yes"), Some("no")])
        .with_numeric("m1", vec![0.0, 1.0])
        .with_numeric("y", vec![0.0, 1.0]);
    let err = PathAnalysis::new("d", ["m1"], "y").run(&data).unwrap_err();
    assert!(matches!(err, Error::NonNumericExposure { .. }));
}

#[test]
fn categorical_outcome_rejected() {
    let data = Dataset::new()
        .with_numeric("d", vec![0.0, 1.0])
        .with_numeric("m1", vec![0.0, 1.0])
        .with_categorical("y", vec![Some("low"), Some("high")]);
    let err = PathAnalysis::new("d", ["m1"], "y").run(&data).unwrap_err();
    assert!(matches!(err, Error::NonNumericOutcome { .. }));
}

#[test]
fn unknown_covariate_rejected() {
    let data = mediator_chain(20, 3);
    let err = PathAnalysis::new("d", ["m1", "m2"], "y")
        .covariates(["age"])
        .run(&data)
        .unwrap_err();
    assert!(matches!(err, Error::UnknownColumn { ref name } if name == "age"));
}

#[test]
fn empty_mediator_list_rejected() {
    let data = mediator_chain(20, 4);
    let err = PathAnalysis::new("d", Vec::<String>::new(), "y")
        .run(&data)
        .unwrap_err();
    assert!(matches!(err, Error::NoMediators));
}

#[test]
fn constant_exposure_surfaces_estimator_failure() {
    let data = mediator_chain(40, 5);
    let constant = replace_exposure(&data, vec![Some(0.0); 40]);
    let err = PathAnalysis::new("d", ["m1", "m2"], "y")
        .run(&constant)
        .unwrap_err();
    match err {
        Error::Estimation { mediators, source } => {
            // The first subset attempted is the full mediator set
            assert_eq!(mediators, 2);
            assert_eq!(source, EstimationError::DegenerateExposure { column: "d".into() });
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn missing_mediator_surfaces_estimator_failure() {
    let data = Dataset::new()
        .with_numeric("d", vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0])
        .with_numeric_opt(
            "m1",
            vec![Some(0.1), Some(0.9), None, Some(1.2), Some(0.3), Some(0.4)],
        )
        .with_numeric("y", vec![1.0, 2.0, 1.5, 2.5, 0.5, 2.0]);
    let err = PathAnalysis::new("d", ["m1"], "y").run(&data).unwrap_err();
    assert!(matches!(
        err,
        Error::Estimation {
            source: EstimationError::MissingValues { .. },
            ..
        }
    ));
}

#[test]
fn negative_base_weights_rejected_by_estimator() {
    let data = mediator_chain(30, 6).with_numeric("w", (0..30).map(|i| i as f64 - 1.0).collect());
    let err = PathAnalysis::new("d", ["m1"], "y")
        .base_weights("w")
        .run(&data)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Estimation {
            source: EstimationError::InvalidWeights { .. },
            ..
        }
    ));
}
