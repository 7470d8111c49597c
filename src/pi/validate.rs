//! pi::validate — pure acceptance predicates for candidate Pi groups.
//!
//! Purpose
//! -------
//! Filter candidate dimensionless group sets for physical validity before
//! any Pi-Set is constructed. Two rules apply: *sign-safety* (no even or
//! fractional power of a signed quantity — such powers either discard sign
//! information or go NaN on physically valid negative inputs) and
//! *target-uniqueness* (the output variable must appear in exactly one
//! group, otherwise the supervised target cannot be separated from the
//! features).
//!
//! Key behaviors
//! -------------
//! - Predicates return booleans and never error: rejection is silent
//!   filtering, the normal mode of operation for a combinatorial generator
//!   that emits many unusable candidates.
//! - Eliminations are logged at `debug` level with the offending group and
//!   sub-term, so a surprising empty result can be diagnosed without
//!   changing behavior.
//! - The power rule is applied on a full recursive walk: every `Pow`
//!   sub-term anywhere in the tree is checked, odd integer exponents pass
//!   unconditionally (sign-preserving), and an even/fractional exponent
//!   requires its base to be an *unsigned catalogue variable* (a constant
//!   base is trivially safe; anything else is rejected).
//!
//! Invariants & assumptions
//! ------------------------
//! - Candidates are dimensionless by construction (the generator's
//!   guarantee); nothing here re-checks dimensions.
//! - A variable name missing from the catalogue is treated as unsafe and
//!   rejected; predicates never raise.
//!
//! Testing notes
//! -------------
//! - Unit tests enumerate the exponent/sign matrix of the power rule and
//!   the single-target counting rule, mirroring the pipeline's documented
//!   acceptance properties.
use log::debug;

use crate::pi::catalogue::DimVarCatalogue;
use crate::symbolic::expr::{is_odd_integer, Expr};

/// True if `group` contains no sign-unsafe power.
///
/// A power `b^e` is unsafe when `e` is even or non-integer and `b` is not
/// an unsigned catalogue variable (or a constant). Odd integer exponents
/// preserve sign and are always accepted; the walk still descends into
/// their bases to catch nested powers.
pub fn sign_valid(group: &Expr, catalogue: &DimVarCatalogue) -> bool {
    match group {
        Expr::Const(_) | Expr::Var(_) => true,
        Expr::Add(terms) | Expr::Mul(terms) => {
            terms.iter().all(|t| sign_valid(t, catalogue))
        }
        Expr::Log(inner) => sign_valid(inner, catalogue),
        Expr::Pow(base, exp) => {
            if is_odd_integer(exp) {
                return sign_valid(base, catalogue);
            }
            // Even or fractional exponent: only safe over an unsigned
            // variable or a constant.
            match base.as_ref() {
                Expr::Const(_) => true,
                Expr::Var(name) => match catalogue.get(name) {
                    Some(v) if !v.signed() => true,
                    _ => {
                        debug!("eliminating {group}: power of signed or unknown variable {name}");
                        false
                    }
                },
                _ => {
                    debug!("eliminating {group}: even/fractional power of compound base {base}");
                    false
                }
            }
        }
    }
}

/// True iff exactly one group in `group_set` has the output variable among
/// its free variables.
pub fn contains_single_target(group_set: &[Expr], output_name: &str) -> bool {
    let count = group_set.iter().filter(|g| g.contains(output_name)).count();
    count == 1
}

/// Conjunction of [`sign_valid`] over every group and
/// [`contains_single_target`]: the whole-set acceptance predicate.
pub fn valid_pi_set(group_set: &[Expr], catalogue: &DimVarCatalogue) -> bool {
    group_set.iter().all(|g| sign_valid(g, catalogue))
        && contains_single_target(group_set, catalogue.output().name())
}
