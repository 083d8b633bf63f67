//! Path naming and the sum invariant with the reference estimator.

use ipwpath::{path_label, Config, PathAnalysis, VariableRoles};

use crate::common::{confounded_chain, mediator_chain};

#[test]
fn single_mediator_uses_nde_nie_labels() {
    let data = mediator_chain(300, 10);
    let result = PathAnalysis::new("d", ["m1"], "y").run(&data).unwrap();

    assert_eq!(result.effects.names(), vec!["NDE", "NIE"]);
    let nde = result.effects.get("NDE").unwrap();
    let nie = result.effects.get("NIE").unwrap();
    assert!((nde + nie - result.ate).abs() < 1e-9);
}

#[test]
fn three_mediators_with_categorical_covariate() {
    let data = confounded_chain(600, 11);
    let result = PathAnalysis::new("d", ["m1", "m2", "m3"], "y")
        .covariates(["region"])
        .run(&data)
        .unwrap();

    assert_eq!(
        result.effects.names(),
        vec!["D->Y", "D->M3->Y", "D->M2~>Y", "D->M1~>Y"]
    );
    assert!((result.effects.sum() - result.ate).abs() < 1e-9);
    assert!(result.effects.values().iter().all(|v| v.is_finite()));
}

#[test]
fn labels_match_path_label() {
    let data = confounded_chain(400, 12);
    let result = PathAnalysis::new("d", ["m1", "m2", "m3"], "y")
        .covariates(["region"])
        .run(&data)
        .unwrap();
    let names = result.effects.names();
    for j in 1..=3 {
        // Entry K + 1 - j + 1 carries mediator j
        assert_eq!(names[4 - j], path_label(j, 3));
    }
}

#[test]
fn base_weights_shift_but_preserve_invariant() {
    let data = confounded_chain(500, 13);
    let plain = PathAnalysis::new("d", ["m1", "m2"], "y")
        .covariates(["region"])
        .run(&data)
        .unwrap();
    let weighted = PathAnalysis::new("d", ["m1", "m2"], "y")
        .covariates(["region"])
        .base_weights("w")
        .run(&data)
        .unwrap();

    assert_eq!(plain.effects.names(), weighted.effects.names());
    assert!((weighted.effects.sum() - weighted.ate).abs() < 1e-9);
    assert!((plain.ate - weighted.ate).abs() > 0.0);
    // No bootstrap, so no design advisory
    assert!(weighted.advisories.is_empty());
}

#[test]
fn weight_options_change_estimates_not_structure() {
    let data = mediator_chain(400, 14);
    let roles = VariableRoles::new("d", ["m1", "m2"], "y");

    let default = ipwpath::estimate(&data, &roles, &Config::default()).unwrap();
    let raw = ipwpath::estimate(
        &data,
        &roles,
        &Config {
            stabilize: false,
            censor: false,
            ..Config::default()
        },
    )
    .unwrap();

    assert_eq!(default.effects.names(), raw.effects.names());
    assert!((raw.effects.sum() - raw.ate).abs() < 1e-9);
    assert!((default.effects.sum() - default.ate).abs() < 1e-9);
}

#[test]
fn free_function_matches_builder() {
    let data = mediator_chain(300, 15);
    let roles = VariableRoles::new("d", ["m1", "m2"], "y");
    let a = ipwpath::estimate(&data, &roles, &Config::default()).unwrap();
    let b = PathAnalysis::new("d", ["m1", "m2"], "y").run(&data).unwrap();
    assert_eq!(a, b);
}
