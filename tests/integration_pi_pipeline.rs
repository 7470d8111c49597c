//! Integration tests for the Pi-group pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end flow: from a dimensioned variable catalogue
//!   and externally generated candidate group sets, through validity
//!   filtering and Pi-Set construction with target inversion, to the
//!   dimensional↔Pi transform and its inverse in physical units.
//! - Exercise realistic configurations (multiple candidate sets, shared
//!   targets, pre-pi and pre-train hooks, grouping keys) rather than toy
//!   edge cases only.
//!
//! Coverage
//! --------
//! - `pi::catalogue`:
//!   - Catalogue construction and serde round-trip of the configuration
//!     artifact.
//! - `pi::validate` + `pi::set`:
//!   - Silent filtering of sign-unsafe and multi-target candidate sets.
//!   - Shared target registry numbering across sets and the persisted
//!     `Vec<PiSet>` round-trip.
//! - `transform::dim_to_pi`:
//!   - Forward column naming and grouping-key carry.
//!   - Round-trip idempotence with and without pre-transforms.
//!   - The NaN and length guards on realistic data.
//!
//! Exclusions
//! ----------
//! - Fine-grained behavior of the expression engine, solver, and
//!   validator predicates — covered by unit tests in their modules.
//! - The external collaborators (group generation, AutoML training,
//!   ensemble splitting, artifact persistence) — interfaces only.
use ndarray::{array, Array1};
use rust_dimensional::{
    pi::{
        catalogue::{DimVar, DimVarCatalogue, SIGNED, UNSIGNED},
        set::{constrain_pi_sets, PiSet},
    },
    symbolic::expr::{Exponent, Expr},
    table::Table,
    transform::{
        column::{Log10Transform, PowerTransform},
        dim_to_pi::DimToPiTransformer,
        errors::TransformError,
    },
};

/// Surface-layer catalogue: wind speed `u`, length scale `L`, height `z`,
/// and a signed output `y` (e.g. a flux-like quantity).
fn catalogue() -> DimVarCatalogue {
    DimVarCatalogue::new(
        vec![
            DimVar::new("u", UNSIGNED, "L/T"),
            DimVar::new("L", UNSIGNED, "L"),
            DimVar::new("z", UNSIGNED, "L"),
        ],
        DimVar::new("y", SIGNED, "L/T"),
    )
    .expect("catalogue is valid")
}

fn y_over_u() -> Expr {
    Expr::div(Expr::var("y"), Expr::var("u"))
}

fn z_over_l() -> Expr {
    Expr::div(Expr::var("z"), Expr::var("L"))
}

fn u_l_z() -> Expr {
    Expr::mul(vec![
        Expr::var("u"),
        Expr::int_pow(Expr::var("L"), -1),
        Expr::int_pow(Expr::var("z"), -1),
    ])
}

/// Candidate sets as an external generator would emit them: one fully
/// valid, one sign-unsafe (even power of the signed output), one with the
/// target in two groups, and one with no target at all.
fn candidates() -> Vec<Vec<Expr>> {
    let valid = vec![u_l_z(), y_over_u(), z_over_l()];
    let sign_unsafe = vec![
        Expr::mul(vec![
            Expr::pow(Expr::var("y"), Exponent::from_integer(2)),
            Expr::int_pow(Expr::var("u"), -2),
        ]),
        z_over_l(),
    ];
    let double_target = vec![
        y_over_u(),
        Expr::div(Expr::var("y"), Expr::mul(vec![Expr::var("u"), Expr::var("z")])),
    ];
    let targetless = vec![z_over_l(), u_l_z()];
    vec![valid, sign_unsafe, double_target, targetless]
}

fn df_dim(n_half: usize) -> Table {
    // Two "days" of observations with strictly positive inputs and a
    // signed output.
    let n = 2 * n_half;
    let u: Array1<f64> = Array1::from_iter((0..n).map(|i| 1.0 + i as f64));
    let l: Array1<f64> = Array1::from_elem(n, 25.0);
    let z: Array1<f64> = Array1::from_elem(n, 4.0);
    let y: Array1<f64> = Array1::from_iter((0..n).map(|i| (i as f64) - 2.5));
    let day: Array1<f64> =
        Array1::from_iter((0..n).map(|i| if i < n_half { 182.0 } else { 183.0 }));

    let mut t = Table::new();
    t.insert("u", u).unwrap();
    t.insert("L", l).unwrap();
    t.insert("z", z).unwrap();
    t.insert("y", y).unwrap();
    t.insert("DAY_YEAR", day).unwrap();
    t
}

#[test]
// Purpose
// -------
// Filtering drops the sign-unsafe, double-target, and targetless sets;
// the surviving set splits into two features plus the registry target,
// and the persisted collection round-trips structurally.
fn constraining_filters_and_persists() {
    let catalogue = catalogue();
    let sets = constrain_pi_sets(&candidates(), &catalogue).expect("constraining succeeds");

    assert_eq!(sets.len(), 1);
    let set = &sets[0];
    assert_eq!(set.id, 0);
    assert_eq!(set.target_id, "Pi_y_0");
    assert_eq!(set.target_expr, y_over_u());
    assert_eq!(set.feature_exprs.len(), 2);
    // Ascending free-variable count: z/L before u*L^-1*z^-1.
    assert_eq!(set.feature_exprs[0], z_over_l());
    assert_eq!(set.feature_exprs[1], u_l_z());
    // Inverse of y/u is PI_Y * u.
    assert_eq!(
        set.target_inv_expr,
        Expr::mul(vec![Expr::var("PI_Y"), Expr::var("u")])
    );

    // Persisted artifacts: catalogue and Pi-Set collection.
    let catalogue_json = serde_json::to_string(&catalogue).expect("serialize catalogue");
    let catalogue_back: DimVarCatalogue =
        serde_json::from_str(&catalogue_json).expect("deserialize catalogue");
    assert_eq!(catalogue, catalogue_back);

    let sets_json = serde_json::to_string(&sets).expect("serialize sets");
    let sets_back: Vec<PiSet> = serde_json::from_str(&sets_json).expect("deserialize sets");
    assert_eq!(sets, sets_back);
}

#[test]
// Purpose
// -------
// End-to-end forward/inverse flow without pre-transforms: transform a
// dimensional table, take the produced target column as if it were a
// model prediction, and recover the original dimensional output within
// 1e-9 relative tolerance.
fn transform_round_trip_in_physical_units() {
    let catalogue = catalogue();
    let sets = constrain_pi_sets(&candidates(), &catalogue).expect("constraining succeeds");

    let mut tf = DimToPiTransformer::new(sets[0].clone(), catalogue)
        .expect("compilation succeeds")
        .with_group_key("DAY_YEAR");

    let df = df_dim(4);
    tf.fit(&df);
    let df_pi = tf.transform().expect("transform succeeds");

    assert_eq!(
        df_pi.column_names(),
        vec!["s-0_pi-00", "s-0_pi-01", "Pi_y_0", "DAY_YEAR"]
    );
    assert_eq!(tf.feature_names(), &["s-0_pi-00", "s-0_pi-01"]);
    assert_eq!(df_pi.column("DAY_YEAR").unwrap(), df.column("DAY_YEAR").unwrap());

    let y_pi = df_pi.column("Pi_y_0").unwrap();
    let y_dim = tf.inverse_transform_y(y_pi).expect("inverse succeeds");

    let y_orig = df.column("y").unwrap();
    for (orig, rec) in y_orig.iter().zip(y_dim.iter()) {
        assert!(
            (orig - rec).abs() <= 1e-9 * orig.abs().max(1.0),
            "round trip drifted: {orig} vs {rec}"
        );
    }
}

#[test]
// Purpose
// -------
// With a `_tf`-suffixed output, a power-3/2 pre-pi hook, and a log10
// pre-train hook, the full three-stage chain still round-trips back to
// the raw dimensional values.
fn transform_round_trip_with_pre_transforms() {
    let catalogue = DimVarCatalogue::new(
        vec![
            DimVar::new("u", UNSIGNED, "L/T"),
            DimVar::new("L", UNSIGNED, "L"),
            DimVar::new("z", UNSIGNED, "L"),
        ],
        DimVar::new("cn2_tf", UNSIGNED, "L/T"),
    )
    .expect("catalogue is valid");

    let groups = vec![
        Expr::div(Expr::var("cn2_tf"), Expr::var("u")),
        z_over_l(),
        u_l_z(),
    ];
    let sets = constrain_pi_sets(&[groups], &catalogue).expect("constraining succeeds");

    let mut df = Table::new();
    df.insert("u", array![1.0, 2.0, 4.0, 8.0]).unwrap();
    df.insert("L", array![25.0, 25.0, 25.0, 25.0]).unwrap();
    df.insert("z", array![4.0, 4.0, 4.0, 4.0]).unwrap();
    // Raw column name is the output name minus the `_tf` suffix.
    df.insert("cn2", array![1e-15, 3e-14, 2e-13, 5e-13]).unwrap();

    let mut tf = DimToPiTransformer::new(sets[0].clone(), catalogue)
        .expect("compilation succeeds")
        .with_pre_pi(Box::new(
            PowerTransform::new(Exponent::new(3, 2)).expect("non-zero exponent"),
        ))
        .with_pre_train(Box::new(Log10Transform));

    tf.fit(&df);
    let df_pi = tf.transform().expect("transform succeeds");
    assert!(tf.applied_pre_pi());
    assert!(tf.applied_pre_train());

    let y_pi = df_pi.column("Pi_y_0").unwrap();
    let y_dim = tf.inverse_transform_y(y_pi).expect("inverse succeeds");

    for (orig, rec) in df.column("cn2").unwrap().iter().zip(y_dim.iter()) {
        assert!(
            (orig - rec).abs() <= 1e-9 * orig.abs(),
            "round trip drifted: {orig} vs {rec}"
        );
    }
}

#[test]
// Purpose
// -------
// A signed dimensional output under a log10 pre-train lands on NaN; the
// transform must fail naming the target id, and a misaligned prediction
// vector must fail naming both lengths.
fn data_defects_fail_loudly() {
    let catalogue = catalogue();
    let sets = constrain_pi_sets(&candidates(), &catalogue).expect("constraining succeeds");

    // NaN guard: df_dim's output column contains negative values.
    let mut tf = DimToPiTransformer::new(sets[0].clone(), catalogue.clone())
        .expect("compilation succeeds")
        .with_pre_train(Box::new(Log10Transform));
    tf.fit(&df_dim(3));
    match tf.transform() {
        Err(TransformError::NaNInTarget { target_id, n_nan }) => {
            assert_eq!(target_id, "Pi_y_0");
            assert!(n_nan > 0);
        }
        other => panic!("expected NaNInTarget, got {other:?}"),
    }

    // Length guard: prediction vector shorter than the fitted table.
    let mut tf = DimToPiTransformer::new(sets[0].clone(), catalogue)
        .expect("compilation succeeds");
    tf.fit(&df_dim(3));
    tf.transform().expect("transform succeeds");
    let err = tf.inverse_transform_y(&array![0.1, 0.2]).unwrap_err();
    assert_eq!(err, TransformError::LengthMismatch { expected: 6, actual: 2 });
}

#[test]
// Purpose
// -------
// An all-rejected candidate collection is a normal, empty outcome — not
// an error — so batch orchestration can report and move on.
fn empty_filter_result_is_not_an_error() {
    let catalogue = catalogue();
    let targetless = vec![vec![z_over_l(), u_l_z()]];
    let sets = constrain_pi_sets(&targetless, &catalogue).expect("filtering never errors");
    assert!(sets.is_empty());
}
