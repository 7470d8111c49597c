//! symbolic::solve — isolate a single unknown in one equation.
//!
//! Purpose
//! -------
//! Provide the one symbolic capability target inversion needs: given an
//! equation `lhs = 0` over the closed operator set (sum, product, rational
//! power, log), return the finite set of expressions the unknown can equal.
//! This is deliberately not a general solver — the unknown must occur in
//! exactly one addend of each sum and one factor of each product on the
//! path to it, which is always the case for Buckingham-Pi target groups
//! (monomials in the output variable).
//!
//! Key behaviors
//! -------------
//! - Zero occurrences of the unknown yield an empty root list (the caller
//!   decides whether that is fatal; for target inversion it is).
//! - Isolation through an even integer power yields *both* roots (±); the
//!   caller must treat multiple roots as a configuration defect rather than
//!   pick one.
//! - Odd integer and fractional exponents yield the single (principal)
//!   root via the reciprocal exponent.
//! - A logarithm of the unknown is `Unsupported`: its inverse (exp) lies
//!   outside the operator set, and no Pi target group contains one.
//!
//! Invariants & assumptions
//! ------------------------
//! - Input expressions come from the smart constructors, so exponents are
//!   non-zero and nested sums/products are flattened. Hand-built trees with
//!   a zero exponent are rejected, not mis-solved.
//! - Returned roots never contain the unknown (isolation replaces it
//!   completely); `pi::invert` still asserts this as a defect check.
//!
//! Testing notes
//! -------------
//! - Unit tests mirror the algebra the pipeline relies on: the `y/u`
//!   monomial inversion, even-power double roots, odd/fractional-power
//!   single roots, multiple-occurrence and log obstructions.
use crate::symbolic::errors::{SolveError, SolveResult};
use crate::symbolic::expr::{is_even_integer, Expr};

/// Solve `equation = 0` for `unknown`, returning every root expression.
///
/// Returns
/// -------
/// - `Ok(vec![])` if the unknown does not occur in the equation.
/// - `Ok(roots)` with one entry per solution otherwise.
///
/// Errors
/// ------
/// - `SolveError::MultipleOccurrences` if the unknown occurs in more than
///   one addend or factor anywhere on the isolation path.
/// - `SolveError::Unsupported` for logs of the unknown or degenerate
///   (zero) exponents.
pub fn solve(equation: &Expr, unknown: &str) -> SolveResult<Vec<Expr>> {
    if !equation.contains(unknown) {
        return Ok(Vec::new());
    }
    isolate(equation, Expr::Const(0.0), unknown)
}

/// Rewrite `term = rhs` until the unknown stands alone on the left.
fn isolate(term: &Expr, rhs: Expr, unknown: &str) -> SolveResult<Vec<Expr>> {
    match term {
        Expr::Var(name) if name == unknown => Ok(vec![rhs]),

        Expr::Add(terms) => {
            let (with, without) = partition(terms, unknown);
            let [only] = with.as_slice() else {
                return Err(SolveError::MultipleOccurrences {
                    expr: term.to_string(),
                    name: unknown.to_string(),
                });
            };
            let moved = Expr::sub(rhs, Expr::add(without));
            isolate(only, moved, unknown)
        }

        Expr::Mul(factors) => {
            let (with, without) = partition(factors, unknown);
            let [only] = with.as_slice() else {
                return Err(SolveError::MultipleOccurrences {
                    expr: term.to_string(),
                    name: unknown.to_string(),
                });
            };
            let moved = Expr::div(rhs, Expr::mul(without));
            isolate(only, moved, unknown)
        }

        Expr::Pow(base, exp) => {
            if *exp.numer() == 0 {
                return Err(SolveError::Unsupported {
                    expr: term.to_string(),
                    reason: "zero exponent cannot be inverted",
                });
            }
            let principal = Expr::pow(rhs, exp.recip());
            let mut roots = isolate(base, principal.clone(), unknown)?;
            if is_even_integer(exp) {
                // x^even = c has two real pre-images.
                roots.extend(isolate(base, Expr::neg(principal), unknown)?);
            }
            Ok(roots)
        }

        Expr::Log(_) => Err(SolveError::Unsupported {
            expr: term.to_string(),
            reason: "logarithm of the unknown has no inverse in the operator set",
        }),

        // Reachable only for hand-built trees where the unknown vanished
        // between the caller's containment check and here.
        _ => Err(SolveError::Unsupported {
            expr: term.to_string(),
            reason: "unknown does not occur in an invertible position",
        }),
    }
}

fn partition<'a>(terms: &'a [Expr], unknown: &str) -> (Vec<&'a Expr>, Vec<Expr>) {
    let mut with = Vec::new();
    let mut without = Vec::new();
    for t in terms {
        if t.contains(unknown) {
            with.push(t);
        } else {
            without.push(t.clone());
        }
    }
    (with, without)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::expr::Exponent;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The monomial inversion path used by every Pi target group.
    // - Root multiplicity for even vs odd vs fractional exponents.
    // - Structural obstructions (multiple occurrences, logs).
    //
    // They intentionally DO NOT cover:
    // - The fatality policy for 0 or >1 roots (enforced in `pi::invert`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Solving `y/u - PI_Y = 0` for `y` yields exactly `PI_Y * u`, the
    // canonical scenario of the transform round-trip law.
    fn ratio_target_inverts_to_product() {
        let equation = Expr::sub(
            Expr::div(Expr::var("y"), Expr::var("u")),
            Expr::var("PI_Y"),
        );
        let roots = solve(&equation, "y").unwrap();
        assert_eq!(roots, vec![Expr::mul(vec![Expr::var("PI_Y"), Expr::var("u")])]);
    }

    #[test]
    fn absent_unknown_yields_no_roots() {
        let equation = Expr::sub(Expr::var("u"), Expr::var("PI_Y"));
        assert_eq!(solve(&equation, "y").unwrap(), Vec::<Expr>::new());
    }

    #[test]
    // Purpose
    // -------
    // `y^2 = PI_Y` has two pre-images; both must be returned so the caller
    // can refuse to pick one.
    fn even_power_yields_two_roots() {
        let equation = Expr::sub(
            Expr::pow(Expr::var("y"), Exponent::from_integer(2)),
            Expr::var("PI_Y"),
        );
        let roots = solve(&equation, "y").unwrap();
        assert_eq!(roots.len(), 2);

        let principal = Expr::pow(Expr::var("PI_Y"), Exponent::new(1, 2));
        assert_eq!(roots[0], principal);
        assert_eq!(roots[1], Expr::neg(principal));
    }

    #[test]
    fn odd_power_yields_single_root() {
        let equation = Expr::sub(
            Expr::pow(Expr::var("y"), Exponent::from_integer(3)),
            Expr::var("PI_Y"),
        );
        let roots = solve(&equation, "y").unwrap();
        assert_eq!(
            roots,
            vec![Expr::pow(Expr::var("PI_Y"), Exponent::new(1, 3))]
        );
    }

    #[test]
    fn fractional_power_yields_principal_root() {
        // y^(1/2) = PI_Y  =>  y = PI_Y^2
        let equation = Expr::sub(
            Expr::pow(Expr::var("y"), Exponent::new(1, 2)),
            Expr::var("PI_Y"),
        );
        let roots = solve(&equation, "y").unwrap();
        assert_eq!(
            roots,
            vec![Expr::pow(Expr::var("PI_Y"), Exponent::from_integer(2))]
        );
    }

    #[test]
    // Purpose
    // -------
    // A monomial with other factors isolates through them: solving
    // `y*u^-1*L - PI_Y = 0` for `y` divides them back out.
    fn monomial_with_multiple_inputs_inverts() {
        let target = Expr::mul(vec![
            Expr::var("y"),
            Expr::int_pow(Expr::var("u"), -1),
            Expr::var("L"),
        ]);
        let equation = Expr::sub(target, Expr::var("PI_Y"));
        let roots = solve(&equation, "y").unwrap();
        assert_eq!(roots.len(), 1);

        let vars = roots[0].free_vars();
        assert!(vars.contains("PI_Y"));
        assert!(vars.contains("u"));
        assert!(vars.contains("L"));
        assert!(!vars.contains("y"));
    }

    #[test]
    fn multiple_occurrences_are_rejected() {
        // y + y^3 = PI_Y is outside the closed operator set.
        let equation = Expr::sub(
            Expr::add(vec![
                Expr::var("y"),
                Expr::pow(Expr::var("y"), Exponent::from_integer(3)),
            ]),
            Expr::var("PI_Y"),
        );
        let err = solve(&equation, "y").unwrap_err();
        assert!(matches!(err, SolveError::MultipleOccurrences { .. }));
    }

    #[test]
    fn log_of_unknown_is_unsupported() {
        let equation = Expr::sub(Expr::log(Expr::var("y")), Expr::var("PI_Y"));
        let err = solve(&equation, "y").unwrap_err();
        assert!(matches!(err, SolveError::Unsupported { .. }));
    }
}
