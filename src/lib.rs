//! rust_dimensional — dimensional-analysis feature engineering for
//! regression pipelines.
//!
//! Purpose
//! -------
//! Serve as the crate root for the Pi-group pipeline: take physically
//! dimensioned input/output quantities, filter externally generated
//! dimensionless (Pi) group sets for physical validity, construct
//! persistable Pi-Sets with symbolically inverted targets, and provide an
//! invertible runtime mapping between dimensional measurement space and
//! the Pi space models train in. When the `python-bindings` feature is
//! enabled, a small JSON-based PyO3 surface exposes validation and
//! constraining to Python orchestration.
//!
//! Key behaviors
//! -------------
//! - Re-export the core modules ([`table`], [`symbolic`], [`pi`],
//!   [`transform`]) as the public crate surface.
//! - Keep the symbolic engine deliberately narrow: the closed operator set
//!   (constant, variable, sum, product, rational power, log) plus a
//!   single-unknown solver — exactly what Buckingham-Pi groups and their
//!   pre-transforms require, with no computer-algebra dependency.
//! - Enforce the pipeline's invariants where they belong: sign-safety and
//!   target-uniqueness as silent filters, inversion uniqueness and
//!   construction counts as fatal defects, NaN/length/missing-column
//!   checks as fatal data errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - Candidate groups are dimensionless by construction; generation is an
//!   external collaborator consumed as plain expression sets.
//! - Expressions, catalogues, and Pi-Sets are immutable values; the
//!   persisted artifacts (catalogue configuration, constrained Pi-Set
//!   collection) round-trip structurally through serde.
//! - Transformer instances are single-threaded; sharing across threads
//!   requires external locking.
//!
//! Conventions
//! -----------
//! - Errors are per-subtree enums with `Display` payloads naming the
//!   offending identifier and magnitudes; validator predicates return
//!   booleans and never raise.
//! - Filtering rejections log at `debug`, an empty post-filter result at
//!   `warn`; the evaluation hot path does not log.
//!
//! Downstream usage
//! ----------------
//! - Typical flow:
//!   1. Deserialize a [`pi::DimVarCatalogue`] from configuration.
//!   2. Feed generator output through [`pi::constrain_pi_sets`] and
//!      persist the resulting `Vec<PiSet>`.
//!   3. Per Pi-Set: build a [`transform::DimToPiTransformer`] (optionally
//!      with pre-pi / pre-train hooks and a grouping key), `fit` it to a
//!      dimensional table, `transform()` for training, and
//!      `inverse_transform_y` to report predictions in physical units.
//! - The AutoML trainer, ensemble splitter, and artifact persistence are
//!   external collaborators; they consume the produced Pi table, the
//!   recorded feature names, and the fitted transformer respectively.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by co-located unit tests per module; the
//!   end-to-end pipeline (catalogue → candidates → constraining →
//!   transform → inverse) is exercised by `tests/integration_pi_pipeline`.
pub mod pi;
pub mod symbolic;
pub mod table;
pub mod transform;

pub use pi::{DimVar, DimVarCatalogue, PiSet};
pub use symbolic::Expr;
pub use table::Table;
pub use transform::DimToPiTransformer;

#[cfg(feature = "python-bindings")]
mod python {
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::pi::catalogue::DimVarCatalogue;
    use crate::pi::set::{constrain_pi_sets, PiSet};
    use crate::pi::validate::valid_pi_set;
    use crate::symbolic::expr::Expr;

    fn json_error(err: serde_json::Error) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    /// Whole-set acceptance predicate over JSON-serialized expressions and
    /// catalogue.
    #[pyfunction]
    fn valid_pi_set_json(groups_json: &str, catalogue_json: &str) -> PyResult<bool> {
        let groups: Vec<Expr> = serde_json::from_str(groups_json).map_err(json_error)?;
        let catalogue: DimVarCatalogue =
            serde_json::from_str(catalogue_json).map_err(json_error)?;
        Ok(valid_pi_set(&groups, &catalogue))
    }

    /// Filter candidate sets and construct Pi-Sets, returned as JSON.
    #[pyfunction]
    fn constrain_pi_sets_json(candidates_json: &str, catalogue_json: &str) -> PyResult<String> {
        let candidates: Vec<Vec<Expr>> =
            serde_json::from_str(candidates_json).map_err(json_error)?;
        let catalogue: DimVarCatalogue =
            serde_json::from_str(catalogue_json).map_err(json_error)?;
        let sets: Vec<PiSet> = constrain_pi_sets(&candidates, &catalogue)?;
        serde_json::to_string(&sets).map_err(json_error)
    }

    #[pymodule]
    fn _rust_dimensional(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(valid_pi_set_json, m)?)?;
        m.add_function(wrap_pyfunction!(constrain_pi_sets_json, m)?)?;
        Ok(())
    }
}
