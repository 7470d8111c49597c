//! pi::errors — configuration-defect errors for catalogues and Pi-Sets.
//!
//! Purpose
//! -------
//! Collect the fatal, not-retried error conditions of the Pi layer:
//! malformed variable catalogues ([`CatalogueError`]) and Pi-Set
//! construction/inversion defects ([`PiSetError`]). Filtering rejections
//! are *not* errors — the validator predicates return booleans and callers
//! drop failing candidates silently.
//!
//! Conventions
//! -----------
//! - Every variant names the offending identifier (variable name, rendered
//!   expression, or set id) and relevant counts, so a failure in a batch of
//!   hundreds of candidate sets is attributable without a debugger.
//! - `python-bindings` conversions map everything to `ValueError`.
use crate::symbolic::errors::SolveError;

/// Result alias for catalogue construction.
pub type CatalogueResult<T> = Result<T, CatalogueError>;

/// Result alias for Pi-Set construction and target inversion.
pub type PiResult<T> = Result<T, PiSetError>;

/// A variable catalogue that violates its structural invariants.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogueError {
    /// Two catalogue variables (inputs and/or output) share a name.
    DuplicateName { name: String },

    /// The output variable also appears among the inputs.
    OutputAmongInputs { name: String },
}

impl std::error::Error for CatalogueError {}

impl std::fmt::Display for CatalogueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogueError::DuplicateName { name } => {
                write!(f, "catalogue contains variable '{name}' more than once")
            }
            CatalogueError::OutputAmongInputs { name } => {
                write!(f, "output variable '{name}' also appears among the inputs")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<CatalogueError> for pyo3::PyErr {
    fn from(err: CatalogueError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

/// A defect discovered while constructing or inverting a Pi-Set.
///
/// All variants indicate configuration defects in the sense of the error
/// policy: they abort the enclosing step and are never silently resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum PiSetError {
    /// Splitting a candidate set did not yield `features + 1 == groups`,
    /// i.e. the target registry is inconsistent with this set.
    GroupCountMismatch { set_id: usize, n_groups: usize, n_features: usize },

    /// Solving the target equation produced no root.
    Unsolvable { expr: String },

    /// Solving the target equation produced more than one root; picking one
    /// silently is forbidden.
    MultipleRoots { expr: String, count: usize },

    /// The computed inverse still depends on the dimensional output —
    /// a solver defect, surfaced rather than trusted.
    InverseDependsOnOutput { expr: String, name: String },

    /// The solver rejected the target equation's structure.
    Solver(SolveError),
}

impl std::error::Error for PiSetError {}

impl std::fmt::Display for PiSetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PiSetError::GroupCountMismatch { set_id, n_groups, n_features } => {
                write!(
                    f,
                    "pi set {set_id}: split produced {n_features} feature group(s) \
                     from {n_groups} candidate group(s); exactly one target was expected"
                )
            }
            PiSetError::Unsolvable { expr } => {
                write!(f, "inversion of '{expr}' produced no solution")
            }
            PiSetError::MultipleRoots { expr, count } => {
                write!(
                    f,
                    "inversion of '{expr}' produced {count} solutions; \
                     a unique inverse is required"
                )
            }
            PiSetError::InverseDependsOnOutput { expr, name } => {
                write!(
                    f,
                    "inverse expression '{expr}' still depends on output variable '{name}'"
                )
            }
            PiSetError::Solver(err) => write!(f, "target inversion failed: {err}"),
        }
    }
}

impl From<SolveError> for PiSetError {
    fn from(err: SolveError) -> Self {
        PiSetError::Solver(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<PiSetError> for pyo3::PyErr {
    fn from(err: PiSetError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Display messages must embed their payloads; these errors surface at the
    // batch level where the offending set/expression must be identifiable.
    // -------------------------------------------------------------------------

    #[test]
    fn catalogue_errors_name_the_variable() {
        let err = CatalogueError::DuplicateName { name: "u".to_string() };
        assert!(err.to_string().contains("'u'"));

        let err = CatalogueError::OutputAmongInputs { name: "y".to_string() };
        assert!(err.to_string().contains("'y'"));
    }

    #[test]
    fn pi_set_errors_carry_counts_and_expressions() {
        let err = PiSetError::GroupCountMismatch { set_id: 7, n_groups: 3, n_features: 3 };
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains('3'));

        let err = PiSetError::MultipleRoots { expr: "y^2*u^-2".to_string(), count: 2 };
        assert!(err.to_string().contains("y^2*u^-2"));
        assert!(err.to_string().contains('2'));
    }
}
