//! pi::invert — solve a target group for the dimensional output.
//!
//! Purpose
//! -------
//! Produce, for a Pi target group, the inverse expression that maps a
//! non-dimensional target value back to physical units: solve
//! `target_expr - PI_Y = 0` for the catalogue's output variable, where
//! [`PI_Y`] is the reserved placeholder for the Pi-space target.
//!
//! Key behaviors
//! -------------
//! - A unique root is required. Zero roots (unsolvable) and multiple roots
//!   (e.g. the output under an even power) are fatal configuration defects:
//!   dimensional analysis is expected to produce a monotonic, invertible
//!   relation for the modeled regime, and picking a root silently would
//!   hide a defective group choice.
//! - The returned inverse is a pure function of `PI_Y` and *input*
//!   variables only; a residual dependence on the output is surfaced as a
//!   defect instead of trusted.
//!
//! Downstream usage
//! ----------------
//! - `pi::set::TargetRegistry` inverts every unique target once at
//!   construction; `transform::target` compiles the inverse over
//!   `[PI_Y, inputs...]` for the prediction-time inverse map.
use crate::pi::catalogue::DimVarCatalogue;
use crate::pi::errors::{PiResult, PiSetError};
use crate::symbolic::expr::Expr;
use crate::symbolic::solve::solve;

/// Reserved symbolic placeholder for the non-dimensional target value.
pub const PI_Y: &str = "PI_Y";

/// Invert `target_expr` for the catalogue's output variable.
///
/// Returns
/// -------
/// The unique inverse expression over `PI_Y` and input variables.
///
/// Errors
/// ------
/// - `PiSetError::Unsolvable` if the solve yields no root.
/// - `PiSetError::MultipleRoots` if it yields more than one.
/// - `PiSetError::InverseDependsOnOutput` if the root still references the
///   output (solver defect guard).
/// - `PiSetError::Solver` if the equation's structure is outside the
///   closed operator set.
pub fn invert_pi_target(target_expr: &Expr, catalogue: &DimVarCatalogue) -> PiResult<Expr> {
    let output_name = catalogue.output().name();
    let equation = Expr::sub(target_expr.clone(), Expr::var(PI_Y));
    let mut roots = solve(&equation, output_name)?;

    match roots.len() {
        0 => Err(PiSetError::Unsolvable { expr: target_expr.to_string() }),
        1 => {
            let inverse = roots.remove(0);
            if inverse.contains(output_name) {
                return Err(PiSetError::InverseDependsOnOutput {
                    expr: inverse.to_string(),
                    name: output_name.to_string(),
                });
            }
            Ok(inverse)
        }
        count => Err(PiSetError::MultipleRoots {
            expr: target_expr.to_string(),
            count,
        }),
    }
}
