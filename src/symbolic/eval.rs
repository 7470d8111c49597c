//! symbolic::eval — compile expressions into vectorized batch functions.
//!
//! Purpose
//! -------
//! Turn an immutable [`Expr`] into a function over whole-table batches:
//! every free variable is bound to a named `Array1<f64>` column and the tree
//! is evaluated once per batch with broadcast arithmetic. Direct tree
//! evaluation keeps the operator set closed and needs no computer-algebra
//! dependency.
//!
//! Key behaviors
//! -------------
//! - [`CompiledExpr::new`] binds an expression to an explicit argument list
//!   and fails fast with `UnboundVariable` if the expression references any
//!   name outside that list. Compiling feature groups over *input* names
//!   only is what makes output-column leakage structurally impossible.
//! - [`CompiledExpr::eval`] walks the tree once per batch; constants stay
//!   scalar until they meet a column (lazy broadcast), so constant subtrees
//!   cost nothing per row.
//! - A batch missing a required column is a fatal `MissingColumn` error; no
//!   partial results are produced.
//!
//! Invariants & assumptions
//! ------------------------
//! - Compilation is pure function construction: compiling the same
//!   expression twice yields interchangeable values, and callers (the
//!   transformers) cache compiled expressions per Pi-Set instance.
//! - Integer powers use `powi` when the exponent fits `i32`; other rational
//!   exponents evaluate as `powf(numer/denom)`. Negative bases under
//!   fractional exponents produce NaN, which the transform layer's NaN
//!   guard surfaces — sign-validated groups never hit that case.
//! - Columns are read for free variables only; declared-but-unused
//!   arguments need not be present in the batch.
//!
//! Testing notes
//! -------------
//! - Unit tests cover broadcasting, each operator, the unbound-variable
//!   guard, the missing-column error, and powi/powf agreement.
use ndarray::Array1;

use crate::symbolic::errors::{SymbolicError, SymbolicResult};
use crate::symbolic::expr::Expr;
use crate::table::Table;

/// Intermediate evaluation value: scalar until broadcast against a column.
enum Value {
    Scalar(f64),
    Column(Array1<f64>),
}

impl Value {
    fn broadcast(self, n_rows: usize) -> Array1<f64> {
        match self {
            Value::Scalar(s) => Array1::from_elem(n_rows, s),
            Value::Column(col) => col,
        }
    }
}

/// An expression bound to an explicit, ordered argument list, evaluatable
/// against column batches.
///
/// Notes
/// -----
/// - The argument list is a contract, not a hint: names outside it are
///   rejected at construction. The dimensional↔Pi transformer compiles
///   feature groups over input names and only the forward target map over
///   all catalogue names.
#[derive(Debug, Clone)]
pub struct CompiledExpr {
    expr: Expr,
    args: Vec<String>,
}

impl CompiledExpr {
    /// Bind `expr` to `args`.
    ///
    /// Errors
    /// ------
    /// - `SymbolicError::UnboundVariable` if any free variable of `expr` is
    ///   not listed in `args`.
    pub fn new(expr: Expr, args: Vec<String>) -> SymbolicResult<Self> {
        for name in expr.free_vars() {
            if !args.iter().any(|a| *a == name) {
                return Err(SymbolicError::UnboundVariable {
                    expr: expr.to_string(),
                    name,
                });
            }
        }
        Ok(CompiledExpr { expr, args })
    }

    /// The bound expression.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// The declared argument names.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Evaluate against a batch, producing one value per row.
    ///
    /// Errors
    /// ------
    /// - `SymbolicError::MissingColumn` if the batch lacks a column for any
    ///   free variable.
    pub fn eval(&self, batch: &Table) -> SymbolicResult<Array1<f64>> {
        let value = eval_node(&self.expr, batch)?;
        Ok(value.broadcast(batch.n_rows()))
    }
}

fn eval_node(expr: &Expr, batch: &Table) -> SymbolicResult<Value> {
    match expr {
        Expr::Const(c) => Ok(Value::Scalar(*c)),
        Expr::Var(name) => {
            let col = batch.column(name).map_err(SymbolicError::from)?;
            Ok(Value::Column(col.clone()))
        }
        Expr::Add(terms) => {
            let mut acc = Value::Scalar(0.0);
            for term in terms {
                acc = combine(acc, eval_node(term, batch)?, |a, b| a + b);
            }
            Ok(acc)
        }
        Expr::Mul(terms) => {
            let mut acc = Value::Scalar(1.0);
            for term in terms {
                acc = combine(acc, eval_node(term, batch)?, |a, b| a * b);
            }
            Ok(acc)
        }
        Expr::Pow(base, exp) => {
            let base_val = eval_node(base, batch)?;
            let result = if exp.is_integer() && i32::try_from(*exp.numer()).is_ok() {
                let e = *exp.numer() as i32;
                map_value(base_val, |x| x.powi(e))
            } else {
                let e = *exp.numer() as f64 / *exp.denom() as f64;
                map_value(base_val, |x| x.powf(e))
            };
            Ok(result)
        }
        Expr::Log(inner) => {
            let inner_val = eval_node(inner, batch)?;
            Ok(map_value(inner_val, f64::ln))
        }
    }
}

fn map_value(value: Value, f: impl Fn(f64) -> f64) -> Value {
    match value {
        Value::Scalar(s) => Value::Scalar(f(s)),
        Value::Column(col) => Value::Column(col.mapv(f)),
    }
}

fn combine(lhs: Value, rhs: Value, op: impl Fn(f64, f64) -> f64) -> Value {
    match (lhs, rhs) {
        (Value::Scalar(a), Value::Scalar(b)) => Value::Scalar(op(a, b)),
        (Value::Scalar(a), Value::Column(b)) => Value::Column(b.mapv(|x| op(a, x))),
        (Value::Column(a), Value::Scalar(b)) => Value::Column(a.mapv(|x| op(x, b))),
        (Value::Column(a), Value::Column(b)) => {
            Value::Column(ndarray::Zip::from(&a).and(&b).map_collect(|x, y| op(*x, *y)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::expr::Exponent;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Vectorized evaluation of each operator with scalar/column
    //   broadcasting.
    // - The unbound-variable guard at compilation and the missing-column
    //   error at evaluation.
    //
    // They intentionally DO NOT cover:
    // - Solver behavior or Pi-group semantics (separate modules).
    // -------------------------------------------------------------------------

    fn batch() -> Table {
        let mut t = Table::new();
        t.insert("u", array![1.0, 2.0, 4.0]).unwrap();
        t.insert("y", array![2.0, 2.0, 2.0]).unwrap();
        t
    }

    #[test]
    // Purpose
    // -------
    // `y*u^-1` over a batch evaluates elementwise, matching the forward
    // target map of the canonical `y/u` scenario.
    fn ratio_group_evaluates_elementwise() {
        let expr = Expr::div(Expr::var("y"), Expr::var("u"));
        let compiled =
            CompiledExpr::new(expr, vec!["u".to_string(), "y".to_string()]).unwrap();

        let result = compiled.eval(&batch()).unwrap();
        assert_eq!(result, array![2.0, 1.0, 0.5]);
    }

    #[test]
    fn constants_broadcast_to_row_count() {
        let compiled = CompiledExpr::new(Expr::Const(3.5), vec!["u".to_string()]).unwrap();
        let result = compiled.eval(&batch()).unwrap();
        assert_eq!(result, array![3.5, 3.5, 3.5]);
    }

    #[test]
    fn sums_products_and_logs_evaluate() {
        // log(u) + 2*u
        let expr = Expr::add(vec![
            Expr::log(Expr::var("u")),
            Expr::mul(vec![Expr::Const(2.0), Expr::var("u")]),
        ]);
        let compiled = CompiledExpr::new(expr, vec!["u".to_string()]).unwrap();
        let result = compiled.eval(&batch()).unwrap();

        let expected = array![
            1.0_f64.ln() + 2.0,
            2.0_f64.ln() + 4.0,
            4.0_f64.ln() + 8.0
        ];
        for (r, e) in result.iter().zip(expected.iter()) {
            assert!((r - e).abs() < 1e-12);
        }
    }

    #[test]
    fn integer_and_fractional_powers_agree_with_std() {
        let sq = CompiledExpr::new(
            Expr::pow(Expr::var("u"), Exponent::from_integer(2)),
            vec!["u".to_string()],
        )
        .unwrap();
        assert_eq!(sq.eval(&batch()).unwrap(), array![1.0, 4.0, 16.0]);

        let root = CompiledExpr::new(
            Expr::pow(Expr::var("u"), Exponent::new(1, 2)),
            vec!["u".to_string()],
        )
        .unwrap();
        assert_eq!(root.eval(&batch()).unwrap(), array![1.0, 2.0_f64.sqrt(), 2.0]);
    }

    #[test]
    // Purpose
    // -------
    // An expression referencing a name outside its argument list must fail
    // at compile time — this is the output-leakage guard for features.
    fn compilation_rejects_unbound_variables() {
        let expr = Expr::div(Expr::var("y"), Expr::var("u"));
        let err = CompiledExpr::new(expr, vec!["u".to_string()]).unwrap_err();
        assert_eq!(
            err,
            SymbolicError::UnboundVariable {
                expr: "y*u^-1".to_string(),
                name: "y".to_string()
            }
        );
    }

    #[test]
    fn evaluation_fails_on_missing_column() {
        let compiled =
            CompiledExpr::new(Expr::var("u"), vec!["u".to_string()]).unwrap();
        let empty = Table::new();
        let err = compiled.eval(&empty).unwrap_err();
        assert_eq!(err, SymbolicError::MissingColumn { name: "u".to_string() });
    }

    #[test]
    fn fractional_power_of_negative_base_yields_nan() {
        let mut t = Table::new();
        t.insert("x", array![-4.0]).unwrap();
        let compiled = CompiledExpr::new(
            Expr::pow(Expr::var("x"), Exponent::new(1, 2)),
            vec!["x".to_string()],
        )
        .unwrap();
        let result = compiled.eval(&t).unwrap();
        assert!(result[0].is_nan());
    }
}
