//! transform::dim_to_pi — the dimensional↔Pi transform pipeline.
//!
//! Purpose
//! -------
//! Map a table of dimensional observations into the Pi-space table a model
//! trains on (forward), and map Pi-space target predictions back to
//! physical units (inverse), for one Pi-Set. The forward pass chains three
//! ordered stages — optional pre-pi (dimensional space), Pi evaluation,
//! optional pre-train (Pi space) — and the inverse pass runs them in
//! reverse, using per-call flags recording which optional stages actually
//! ran.
//!
//! Key behaviors
//! -------------
//! - Two states: *unfit* (just constructed) and *fit* (after `fit` stored a
//!   private copy of the dimensional table). `fit` validates nothing;
//!   missing columns surface during `transform` as evaluation errors.
//! - Pre-pi renames: the catalogue output name must end in the literal
//!   `_tf` suffix; the stage reads the base column (name minus suffix),
//!   fit-transforms it, stores it under the output name, and drops the base
//!   column, so downstream evaluation only ever sees the transformed name.
//! - Feature columns are named `s-<set id>_pi-<00-padded index>`; the
//!   target column is named by the registry `target_id`; an optional
//!   grouping-key column (e.g. day-of-year) is carried through unchanged
//!   for downstream fold splitting.
//! - Post-condition: the Pi target must contain no NaN after all stages; a
//!   NaN (e.g. a log of a negative dimensional value) fails the whole
//!   transform with the target id and NaN count — it must never propagate
//!   into training.
//! - Feature-column names produced by `transform` are recorded for
//!   prediction-time column selection; the recorded list is derived, not
//!   settable.
//! - `inverse_transform_y` requires a prediction vector row-aligned with
//!   the stored table (both lengths reported on mismatch), inverts
//!   pre-train first (Pi space), evaluates the symbolic target inverse,
//!   then inverts pre-pi last (dimensional space).
//!
//! Invariants & assumptions
//! ------------------------
//! - Feature expressions are compiled over *input* names only at
//!   construction, so a defective set referencing the output fails before
//!   any data is seen.
//! - Compiled expressions are cached per instance; expressions are
//!   immutable so repeated `transform` calls are pure re-evaluations.
//! - Single-threaded use: one transformer instance must not be shared
//!   across threads without external locking.
//!
//! Downstream usage
//! ----------------
//! - Training orchestration: `fit` + `transform`, hand the Pi table and
//!   `feature_names()` to the ensemble trainer.
//! - Evaluation: `fit` + `transform` on the test table, predict in Pi
//!   space, then `inverse_transform_y` to score in physical units.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the no-pre-transform round-trip, both pre-transform
//!   stages with their flags, the NaN guard, naming/ordering of produced
//!   columns, and the fit/length guards.
use log::debug;
use ndarray::Array1;

use crate::pi::catalogue::DimVarCatalogue;
use crate::pi::set::PiSet;
use crate::symbolic::eval::CompiledExpr;
use crate::table::Table;
use crate::transform::column::ColumnTransform;
use crate::transform::errors::{TransformError, TransformResult};
use crate::transform::target::PiTargetTransformer;

/// Literal suffix marking a pre-pi-transformed output column. The base
/// (raw) column name is the output name minus this exact suffix — never a
/// generic trim.
pub const TF_SUFFIX: &str = "_tf";

/// Runtime pipeline between dimensional space and Pi space for one Pi-Set.
pub struct DimToPiTransformer {
    pi_set: PiSet,
    catalogue: DimVarCatalogue,
    group_key: Option<String>,
    pre_pi: Option<Box<dyn ColumnTransform>>,
    pre_train: Option<Box<dyn ColumnTransform>>,
    feature_fns: Vec<CompiledExpr>,
    target_tf: PiTargetTransformer,
    df_dim: Option<Table>,
    applied_pre_pi: bool,
    applied_pre_train: bool,
    feature_names: Vec<String>,
}

impl DimToPiTransformer {
    /// Compile the Pi-Set against the catalogue.
    ///
    /// Errors
    /// ------
    /// - `TransformError::Symbolic` if a feature group references anything
    ///   but input variables, or the target maps violate their argument
    ///   contracts.
    pub fn new(pi_set: PiSet, catalogue: DimVarCatalogue) -> TransformResult<Self> {
        let input_names = catalogue.input_names();
        let feature_fns = pi_set
            .feature_exprs
            .iter()
            .map(|expr| CompiledExpr::new(expr.clone(), input_names.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        let target_tf = PiTargetTransformer::new(&pi_set, &catalogue)?;

        Ok(DimToPiTransformer {
            pi_set,
            catalogue,
            group_key: None,
            pre_pi: None,
            pre_train: None,
            feature_fns,
            target_tf,
            df_dim: None,
            applied_pre_pi: false,
            applied_pre_train: false,
            feature_names: Vec::new(),
        })
    }

    /// Carry this grouping-key column through `transform` unchanged.
    pub fn with_group_key(mut self, name: impl Into<String>) -> Self {
        self.group_key = Some(name.into());
        self
    }

    /// Configure the pre-pi hook (dimensional space, output column).
    pub fn with_pre_pi(mut self, tf: Box<dyn ColumnTransform>) -> Self {
        self.pre_pi = Some(tf);
        self
    }

    /// Configure the pre-train hook (Pi space, target column).
    pub fn with_pre_train(mut self, tf: Box<dyn ColumnTransform>) -> Self {
        self.pre_train = Some(tf);
        self
    }

    /// The Pi-Set this transformer evaluates.
    pub fn pi_set(&self) -> &PiSet {
        &self.pi_set
    }

    /// Feature-column names recorded by the last successful `transform`.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// True if the pre-pi stage ran during the last `transform`.
    pub fn applied_pre_pi(&self) -> bool {
        self.applied_pre_pi
    }

    /// True if the pre-train stage ran during the last `transform`.
    pub fn applied_pre_train(&self) -> bool {
        self.applied_pre_train
    }

    /// Bind to one dimensional dataset snapshot (stored privately) and
    /// reset per-call state. The target maps bind to the same snapshot, so
    /// the inverse is usable straight after `fit`. Column validation
    /// happens in `transform`.
    pub fn fit(&mut self, df_dim: &Table) -> &mut Self {
        self.df_dim = Some(df_dim.clone());
        self.target_tf.fit(df_dim);
        self.applied_pre_pi = false;
        self.applied_pre_train = false;
        self.feature_names.clear();
        self
    }

    /// Forward pass: dimensional table → Pi-space table (features, target,
    /// optional grouping key).
    ///
    /// Errors
    /// ------
    /// - `TransformError::NotFitted` before `fit`.
    /// - `TransformError::MissingTfSuffix` if pre-pi is configured but the
    ///   output name lacks the `_tf` suffix.
    /// - `TransformError::Table` / `TransformError::Symbolic` on missing
    ///   columns.
    /// - `TransformError::NaNInTarget` if NaNs survive into the target.
    pub fn transform(&mut self) -> TransformResult<Table> {
        let mut working = self.df_dim.clone().ok_or(TransformError::NotFitted)?;
        self.applied_pre_pi = false;
        self.applied_pre_train = false;

        // Stage 1: pre-pi, dimensional space. The raw column is replaced by
        // its transformed, `_tf`-named variant so downstream evaluation can
        // only see the transformed values.
        if let Some(tf) = self.pre_pi.as_mut() {
            let out_name = self.catalogue.output().name().to_string();
            let base_name = out_name
                .strip_suffix(TF_SUFFIX)
                .ok_or_else(|| TransformError::MissingTfSuffix { name: out_name.clone() })?
                .to_string();

            let raw = working.column(&base_name)?.clone();
            let transformed = tf.fit_transform(&raw)?;
            working.remove(&base_name)?;
            working.insert(&out_name, transformed)?;
            self.applied_pre_pi = true;
            debug!("pre-pi '{}' applied to '{}'", tf.label(), base_name);
        }

        // Stage 2: Pi evaluation — features over inputs, target via the
        // forward target map.
        let mut out = Table::new();
        let mut names = Vec::with_capacity(self.feature_fns.len());
        for (i, feature_fn) in self.feature_fns.iter().enumerate() {
            let name = format!("s-{}_pi-{:02}", self.pi_set.id, i);
            out.insert(&name, feature_fn.eval(&working)?)?;
            names.push(name);
        }

        self.target_tf.fit(&working);
        let mut y_pi = self.target_tf.transform()?;

        // Stage 3: pre-train, Pi space, target column in place.
        if let Some(tf) = self.pre_train.as_mut() {
            y_pi = tf.fit_transform(&y_pi)?;
            self.applied_pre_train = true;
            debug!("pre-train '{}' applied to '{}'", tf.label(), self.pi_set.target_id);
        }

        let n_nan = y_pi.iter().filter(|v| v.is_nan()).count();
        if n_nan > 0 {
            return Err(TransformError::NaNInTarget {
                target_id: self.pi_set.target_id.clone(),
                n_nan,
            });
        }
        out.insert(&self.pi_set.target_id, y_pi)?;

        if let Some(key) = &self.group_key {
            out.insert(key, working.column(key)?.clone())?;
        }

        self.feature_names = names;
        Ok(out)
    }

    /// Inverse pass: Pi-space target predictions → dimensional units,
    /// reversing exactly the stages the forward pass applied.
    ///
    /// Errors
    /// ------
    /// - `TransformError::NotFitted` before `fit` + `transform`.
    /// - `TransformError::LengthMismatch` if `y_pi` is not row-aligned
    ///   with the stored dimensional table (both lengths reported).
    pub fn inverse_transform_y(&self, y_pi: &Array1<f64>) -> TransformResult<Array1<f64>> {
        let df = self.df_dim.as_ref().ok_or(TransformError::NotFitted)?;
        if y_pi.len() != df.n_rows() {
            return Err(TransformError::LengthMismatch {
                expected: df.n_rows(),
                actual: y_pi.len(),
            });
        }

        let mut y = y_pi.clone();
        if self.applied_pre_train {
            if let Some(tf) = self.pre_train.as_ref() {
                y = tf.inverse_transform(&y)?;
            }
        }

        let mut y_dim = self.target_tf.inverse_transform(&y)?;

        if self.applied_pre_pi {
            if let Some(tf) = self.pre_pi.as_ref() {
                y_dim = tf.inverse_transform(&y_dim)?;
            }
        }
        Ok(y_dim)
    }
}
