//! transform::column — pluggable invertible single-column transforms.
//!
//! Purpose
//! -------
//! Define the seam for the two optional pre-processing hooks of the
//! dimensional↔Pi pipeline: the *pre-pi* transform (dimensional space,
//! applied to the output column before group evaluation) and the
//! *pre-train* transform (Pi space, applied to the target column right
//! before model training). Any component exposing a forward fit-and-apply
//! and an inverse over a single column can plug in.
//!
//! Key behaviors
//! -------------
//! - [`ColumnTransform`] is object-safe; transformers hold hooks as
//!   `Box<dyn ColumnTransform>`.
//! - A transform is valid for this pipeline only if its inverse is an
//!   exact or near-exact inverse of its forward pass — the round-trip law
//!   of the whole pipeline inherits any loss here.
//! - The two stock implementations mirror the transforms the pipeline was
//!   built around: [`PowerTransform`] (raise to a fixed rational power,
//!   e.g. 3/2 to align a quantity with integer-exponent dimensional
//!   analysis) and [`Log10Transform`] (compress a quantity spanning orders
//!   of magnitude). Both are stateless and exactly invertible on their
//!   valid domains; out-of-domain values produce NaN, which the
//!   transformer's NaN guard turns into a fatal, named error.
//!
//! Testing notes
//! -------------
//! - Unit tests check exact round-trips on valid domains and NaN
//!   production outside them.
use ndarray::Array1;

use crate::symbolic::expr::Exponent;
use crate::transform::errors::TransformResult;

/// An invertible transform over one named column.
///
/// `fit_transform` may update internal state (hence `&mut`); the stock
/// implementations are stateless. Implementations must preserve length.
pub trait ColumnTransform {
    /// Short label for diagnostics.
    fn label(&self) -> &str;

    /// Fit to the column and return its transformed values.
    fn fit_transform(&mut self, column: &Array1<f64>) -> TransformResult<Array1<f64>>;

    /// Map transformed values back to the original space.
    fn inverse_transform(&self, column: &Array1<f64>) -> TransformResult<Array1<f64>>;
}

/// `x -> log10(x)` with inverse `x -> 10^x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Log10Transform;

impl ColumnTransform for Log10Transform {
    fn label(&self) -> &str {
        "log10"
    }

    fn fit_transform(&mut self, column: &Array1<f64>) -> TransformResult<Array1<f64>> {
        Ok(column.mapv(f64::log10))
    }

    fn inverse_transform(&self, column: &Array1<f64>) -> TransformResult<Array1<f64>> {
        Ok(column.mapv(|x| 10.0_f64.powf(x)))
    }
}

/// `x -> x^p` with inverse `x -> x^(1/p)` for a fixed rational `p`.
#[derive(Debug, Clone, Copy)]
pub struct PowerTransform {
    exponent: Exponent,
}

impl PowerTransform {
    /// Build with a non-zero exponent; `None` for zero (not invertible).
    pub fn new(exponent: Exponent) -> Option<Self> {
        if *exponent.numer() == 0 {
            return None;
        }
        Some(PowerTransform { exponent })
    }

    fn apply(column: &Array1<f64>, exponent: Exponent) -> Array1<f64> {
        let e = *exponent.numer() as f64 / *exponent.denom() as f64;
        column.mapv(|x| x.powf(e))
    }
}

impl ColumnTransform for PowerTransform {
    fn label(&self) -> &str {
        "power"
    }

    fn fit_transform(&mut self, column: &Array1<f64>) -> TransformResult<Array1<f64>> {
        Ok(Self::apply(column, self.exponent))
    }

    fn inverse_transform(&self, column: &Array1<f64>) -> TransformResult<Array1<f64>> {
        Ok(Self::apply(column, self.exponent.recip()))
    }
}
