//! transform::errors — error surface of the dimensional↔Pi pipeline.
//!
//! Purpose
//! -------
//! Collect the data-defect errors of the runtime transform path: calling a
//! transformer before fitting, row-count mismatches between a prediction
//! vector and the stored dimensional table, NaNs surviving into the Pi
//! target, and missing columns. Lower-layer causes (table access, symbolic
//! evaluation) wrap into this type so callers see one error surface.
//!
//! Conventions
//! -----------
//! - Length mismatches always report *both* lengths; NaN failures always
//!   name the target id and the NaN count. No partial tables are ever
//!   returned alongside an error.
use crate::symbolic::errors::SymbolicError;
use crate::table::TableError;

/// Result alias for transform operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Errors raised by the dimensional↔Pi transformers.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// `transform`/`inverse_transform_y` called before `fit`.
    NotFitted,

    /// A target vector's length differs from the stored dimensional table.
    LengthMismatch { expected: usize, actual: usize },

    /// The Pi target column contains NaN after all transform stages.
    NaNInTarget { target_id: String, n_nan: usize },

    /// Pre-pi is configured but the catalogue output name does not carry
    /// the literal `_tf` suffix, so no base column can be derived.
    MissingTfSuffix { name: String },

    /// Table-level failure (missing/duplicate column, ragged insert).
    Table(TableError),

    /// Symbolic compilation/evaluation failure.
    Symbolic(SymbolicError),
}

impl std::error::Error for TransformError {}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformError::NotFitted => {
                write!(f, "transformer has not been fitted to a dimensional table")
            }
            TransformError::LengthMismatch { expected, actual } => {
                write!(
                    f,
                    "stored dimensional table has {expected} row(s) but the \
                     transformation target has {actual}; lengths must match"
                )
            }
            TransformError::NaNInTarget { target_id, n_nan } => {
                write!(
                    f,
                    "pi target '{target_id}' contains {n_nan} NaN value(s) after \
                     all transform stages; the group or pre-transform is invalid \
                     for this dataset"
                )
            }
            TransformError::MissingTfSuffix { name } => {
                write!(
                    f,
                    "pre-pi transform requires the output name '{name}' to end \
                     with the '_tf' suffix"
                )
            }
            TransformError::Table(err) => write!(f, "{err}"),
            TransformError::Symbolic(err) => write!(f, "{err}"),
        }
    }
}

impl From<TableError> for TransformError {
    fn from(err: TableError) -> Self {
        TransformError::Table(err)
    }
}

impl From<SymbolicError> for TransformError {
    fn from(err: SymbolicError) -> Self {
        TransformError::Symbolic(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<TransformError> for pyo3::PyErr {
    fn from(err: TransformError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Display payload checks: these errors surface at run orchestration
    // level where the offending id and magnitudes must be readable.
    // -------------------------------------------------------------------------

    #[test]
    fn length_mismatch_names_both_lengths() {
        let err = TransformError::LengthMismatch { expected: 100, actual: 7 };
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains('7'));
    }

    #[test]
    fn nan_error_names_target_and_count() {
        let err =
            TransformError::NaNInTarget { target_id: "Pi_y_2".to_string(), n_nan: 13 };
        let msg = err.to_string();
        assert!(msg.contains("Pi_y_2"));
        assert!(msg.contains("13"));
    }

    #[test]
    fn wrapped_causes_display_transparently() {
        let err: TransformError =
            TableError::MissingColumn { name: "u".to_string() }.into();
        assert!(err.to_string().contains("'u'"));

        let err: TransformError = SymbolicError::MissingColumn { name: "L".to_string() }.into();
        assert!(err.to_string().contains("'L'"));
    }
}
