//! transform::target — forward and inverse Pi target maps.
//!
//! Purpose
//! -------
//! Evaluate a Pi-Set's target group against dimensional observations
//! (forward: dimensional → Pi) and its symbolic inverse against Pi-space
//! predictions (inverse: Pi → dimensional). This is the only evaluation
//! path allowed to reference the dimensional output column — it *is* the
//! supervised label definition — while the inverse is compiled over the
//! `PI_Y` placeholder plus input names only.
//!
//! Key behaviors
//! -------------
//! - Both directions compile once at construction and are cached for the
//!   transformer's lifetime (expressions are immutable, compilation is
//!   pure).
//! - `fit` binds the transformer to one dimensional table snapshot; the
//!   inverse substitutes the stored *input* columns row-for-row, so a
//!   prediction vector must match the snapshot's length exactly. The
//!   mismatch error names both lengths.
//! - By construction of the inverse expression, `inverse_transform` is the
//!   right-inverse of `transform` for the same input rows.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the linear `y/u` round-trip (exact), the unfitted
//!   guard, and the length guard.
use ndarray::Array1;

use crate::pi::catalogue::DimVarCatalogue;
use crate::pi::invert::PI_Y;
use crate::pi::set::PiSet;
use crate::symbolic::eval::CompiledExpr;
use crate::table::Table;
use crate::transform::errors::{TransformError, TransformResult};

/// Transforms the target variable between dimensional and Pi space for one
/// Pi-Set, against a fitted dimensional table snapshot.
#[derive(Debug, Clone)]
pub struct PiTargetTransformer {
    target_id: String,
    forward: CompiledExpr,
    inverse: CompiledExpr,
    df_dim: Option<Table>,
}

impl PiTargetTransformer {
    /// Compile the forward map over all catalogue names and the inverse
    /// map over `[PI_Y, inputs...]`.
    ///
    /// Errors
    /// ------
    /// - `TransformError::Symbolic` if either expression references names
    ///   outside its argument contract (a defective Pi-Set).
    pub fn new(pi_set: &PiSet, catalogue: &DimVarCatalogue) -> TransformResult<Self> {
        let forward = CompiledExpr::new(pi_set.target_expr.clone(), catalogue.all_names())?;

        let mut inv_args = vec![PI_Y.to_string()];
        inv_args.extend(catalogue.input_names());
        let inverse = CompiledExpr::new(pi_set.target_inv_expr.clone(), inv_args)?;

        Ok(PiTargetTransformer {
            target_id: pi_set.target_id.clone(),
            forward,
            inverse,
            df_dim: None,
        })
    }

    /// Registry identifier of the target this transformer maps.
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Bind to a dimensional table snapshot (stored privately).
    pub fn fit(&mut self, df_dim: &Table) -> &mut Self {
        self.df_dim = Some(df_dim.clone());
        self
    }

    fn fitted(&self) -> TransformResult<&Table> {
        self.df_dim.as_ref().ok_or(TransformError::NotFitted)
    }

    /// Dimensional → Pi: evaluate the target group on the stored table.
    ///
    /// Errors
    /// ------
    /// - `TransformError::NotFitted` before `fit`.
    /// - `TransformError::Symbolic` if the table lacks a required column.
    pub fn transform(&self) -> TransformResult<Array1<f64>> {
        let df = self.fitted()?;
        Ok(self.forward.eval(df)?)
    }

    /// Pi → dimensional: evaluate the inverse with `PI_Y := y_pi` and the
    /// stored input columns.
    ///
    /// Errors
    /// ------
    /// - `TransformError::NotFitted` before `fit`.
    /// - `TransformError::LengthMismatch` if `y_pi` and the stored table
    ///   disagree on row count (both lengths reported).
    /// - `TransformError::Symbolic` if a required input column is missing.
    pub fn inverse_transform(&self, y_pi: &Array1<f64>) -> TransformResult<Array1<f64>> {
        let df = self.fitted()?;
        if y_pi.len() != df.n_rows() {
            return Err(TransformError::LengthMismatch {
                expected: df.n_rows(),
                actual: y_pi.len(),
            });
        }

        let mut batch = df.clone();
        batch.insert(PI_Y, y_pi.clone())?;
        Ok(self.inverse.eval(&batch)?)
    }
}
