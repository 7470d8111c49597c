//! symbolic::errors — error types for expression compilation, evaluation,
//! and the narrow single-unknown solver.
//!
//! Purpose
//! -------
//! Keep symbolic-layer failures localized: compilation/evaluation problems
//! (an expression referencing a name outside its argument list, a batch
//! missing a required column) are [`SymbolicError`]; solver limitations and
//! structural obstructions are [`SolveError`]. Higher layers wrap these into
//! their own error surfaces.
//!
//! Conventions
//! -----------
//! - Every variant carries the offending identifier (variable or column
//!   name, or a rendered expression) so messages are actionable without
//!   extra context.
//! - Conversions to `PyErr` are gated behind the `python-bindings` feature
//!   and map everything to `ValueError`.
use crate::table::TableError;

/// Result alias for compilation/evaluation paths.
pub type SymbolicResult<T> = Result<T, SymbolicError>;

/// Result alias for the single-unknown solver.
pub type SolveResult<T> = Result<T, SolveError>;

/// Errors from compiling or evaluating an expression against a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolicError {
    /// The expression references a variable outside the declared argument
    /// list. This is the data-leakage guard: feature expressions compiled
    /// over input names can never read the output column.
    UnboundVariable { expr: String, name: String },

    /// The evaluation batch lacks a column required by a free variable.
    MissingColumn { name: String },
}

impl std::error::Error for SymbolicError {}

impl std::fmt::Display for SymbolicError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolicError::UnboundVariable { expr, name } => {
                write!(
                    f,
                    "expression '{expr}' references variable '{name}' \
                     which is not in its argument list"
                )
            }
            SymbolicError::MissingColumn { name } => {
                write!(f, "evaluation batch is missing required column '{name}'")
            }
        }
    }
}

impl From<TableError> for SymbolicError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::MissingColumn { name } => SymbolicError::MissingColumn { name },
            // Evaluation only reads columns; other table errors cannot occur
            // on this path but must still map to something descriptive.
            TableError::DuplicateColumn { name }
            | TableError::ColumnLengthMismatch { name, .. } => {
                SymbolicError::MissingColumn { name }
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<SymbolicError> for pyo3::PyErr {
    fn from(err: SymbolicError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

/// Errors from [`crate::symbolic::solve::solve`].
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The unknown occurs in more than one addend or factor; isolating it
    /// is outside the closed operator set this solver supports.
    MultipleOccurrences { expr: String, name: String },

    /// The equation contains a form this solver does not invert (for the
    /// Pi pipeline: a logarithm of the unknown, or a zero exponent).
    Unsupported { expr: String, reason: &'static str },
}

impl std::error::Error for SolveError {}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::MultipleOccurrences { expr, name } => {
                write!(
                    f,
                    "cannot isolate '{name}' in '{expr}': it occurs in more \
                     than one term"
                )
            }
            SolveError::Unsupported { expr, reason } => {
                write!(f, "cannot solve '{expr}': {reason}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<SolveError> for pyo3::PyErr {
    fn from(err: SolveError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests verify that Display messages embed their payloads, so that
    // errors are actionable wherever they surface (logs, test failures,
    // Python exceptions).
    // -------------------------------------------------------------------------

    #[test]
    fn unbound_variable_message_names_expr_and_variable() {
        let err = SymbolicError::UnboundVariable {
            expr: "y*u^-1".to_string(),
            name: "y".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("y*u^-1"));
        assert!(msg.contains("'y'"));
    }

    #[test]
    fn missing_column_message_names_column() {
        let err = SymbolicError::MissingColumn { name: "u".to_string() };
        assert!(err.to_string().contains("'u'"));
    }

    #[test]
    fn table_missing_column_maps_to_symbolic_missing_column() {
        let err: SymbolicError =
            TableError::MissingColumn { name: "L".to_string() }.into();
        assert_eq!(err, SymbolicError::MissingColumn { name: "L".to_string() });
    }

    #[test]
    fn solve_error_messages_embed_payloads() {
        let err = SolveError::MultipleOccurrences {
            expr: "y + y^3".to_string(),
            name: "y".to_string(),
        };
        assert!(err.to_string().contains("y + y^3"));

        let err = SolveError::Unsupported {
            expr: "log(y)".to_string(),
            reason: "logarithm of the unknown has no inverse in the operator set",
        };
        assert!(err.to_string().contains("log(y)"));
    }
}
