//! symbolic — minimal expression engine for the Pi pipeline.
//!
//! Purpose
//! -------
//! Bundle the three narrow symbolic capabilities dimensional analysis
//! needs: an immutable expression tree with free-variable extraction and
//! substitution ([`expr`]), vectorized compilation/evaluation over column
//! batches ([`eval`]), and a single-unknown solver over the closed operator
//! set ([`solve`]). Nothing here is a general computer-algebra system; the
//! operator set (constant, variable, sum, product, rational power, log) is
//! exactly what Buckingham-Pi groups and their pre-transforms use.
//!
//! Key behaviors
//! -------------
//! - Expressions are pure values: structural equality, canonical rendering,
//!   referentially transparent evaluation.
//! - Compilation binds an expression to an explicit argument list and
//!   rejects out-of-list names, which is how the transform layer makes
//!   output-column leakage into features impossible.
//! - Solving returns the finite set of roots and reports obstructions
//!   (multiple occurrences, logs) rather than guessing.
//!
//! Downstream usage
//! ----------------
//! - `pi` builds, validates, and inverts groups out of [`expr::Expr`] via
//!   [`solve::solve`]; `transform` compiles and evaluates them against
//!   dimensional tables via [`eval::CompiledExpr`].
pub mod errors;
pub mod eval;
pub mod expr;
pub mod solve;

pub use errors::{SolveError, SolveResult, SymbolicError, SymbolicResult};
pub use eval::CompiledExpr;
pub use expr::{Exponent, Expr};
pub use solve::solve;
