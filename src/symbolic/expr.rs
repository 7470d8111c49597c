//! symbolic::expr — immutable algebraic expressions over named variables.
//!
//! Purpose
//! -------
//! Define the minimal expression tree the Pi pipeline needs: constants,
//! named variables, sums, products, rational powers, and natural logs.
//! Expressions are pure values: structural equality, a canonical `Display`
//! rendering (used to number target groups reproducibly), free-variable
//! extraction, and substitution. No general computer-algebra system is
//! implied or provided.
//!
//! Key behaviors
//! -------------
//! - Smart constructors ([`Expr::add`], [`Expr::mul`], [`Expr::pow`], ...)
//!   flatten nested sums/products, fold constants, collapse power-of-power
//!   where value-preserving, and drop unit/zero exponents, so that
//!   structurally equal groups compare equal regardless of how they were
//!   assembled.
//! - Exponents are exact rationals ([`Exponent`] = `Ratio<i64>`), which is
//!   what the sign-safety rules (integer? even? odd?) and the solver
//!   (reciprocal exponents) require. Buckingham-Pi groups only ever carry
//!   rational exponents.
//! - `Display` produces a deterministic, parenthesized canonical string;
//!   target-registry ordering sorts by this string.
//!
//! Invariants & assumptions
//! ------------------------
//! - Expressions are immutable after construction; all operations return new
//!   values. Evaluation elsewhere is therefore referentially transparent.
//! - `Ratio<i64>` auto-reduces, so `is_integer` and numerator parity checks
//!   are well defined.
//! - Structural equality is the equality of record: two groups match iff
//!   their trees match. The external group generator is assumed to emit
//!   deterministic argument orderings.
//!
//! Conventions
//! -----------
//! - `Log` is the natural logarithm. It participates in evaluation and
//!   sign-validation walks, but the solver treats it as opaque.
//! - No `unwrap`/`expect` outside tests; constructors that cannot fail take
//!   already-validated rationals.
//!
//! Downstream usage
//! ----------------
//! - `pi::validate` pattern-matches on the public variants for the power
//!   rule; `pi::set` sorts by free-variable count and canonical string;
//!   `symbolic::eval` compiles trees into vectorized batch functions;
//!   `symbolic::solve` isolates a single unknown.
//!
//! Testing notes
//! -------------
//! - Unit tests cover constructor normalization, free variables,
//!   substitution, display rendering, parity helpers, and structural serde
//!   round-trips.
use std::collections::BTreeSet;

use num_rational::Ratio;
use serde::{Deserialize, Serialize};

/// Exact rational exponent of a power expression.
pub type Exponent = Ratio<i64>;

/// True if `exp` is an even integer (e.g. `-2`, `0`, `4`).
pub fn is_even_integer(exp: &Exponent) -> bool {
    exp.is_integer() && exp.numer() % 2 == 0
}

/// True if `exp` is an odd integer (e.g. `-3`, `1`, `5`).
pub fn is_odd_integer(exp: &Exponent) -> bool {
    exp.is_integer() && exp.numer() % 2 != 0
}

/// Immutable algebraic expression over named scalar variables.
///
/// Variants are public so validators and the solver can pattern-match on
/// structure; construction should nevertheless go through the smart
/// constructors, which normalize the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Numeric constant.
    Const(f64),
    /// Named variable (a catalogue name or the reserved `PI_Y`).
    Var(String),
    /// Sum of two or more terms (flattened).
    Add(Vec<Expr>),
    /// Product of two or more factors (flattened).
    Mul(Vec<Expr>),
    /// Base raised to an exact rational exponent.
    Pow(Box<Expr>, Exponent),
    /// Natural logarithm.
    Log(Box<Expr>),
}

impl Expr {
    /// Named variable.
    pub fn var(name: impl Into<String>) -> Expr {
        Expr::Var(name.into())
    }

    /// Numeric constant.
    pub fn constant(value: f64) -> Expr {
        Expr::Const(value)
    }

    /// Sum of `terms`, flattening nested sums, folding constants, and
    /// dropping zero terms. An empty (or all-zero) sum is `Const(0.0)`.
    pub fn add(terms: Vec<Expr>) -> Expr {
        let mut flat: Vec<Expr> = Vec::with_capacity(terms.len());
        let mut const_sum = 0.0_f64;
        for term in terms {
            match term {
                Expr::Add(inner) => {
                    for t in inner {
                        match t {
                            Expr::Const(c) => const_sum += c,
                            other => flat.push(other),
                        }
                    }
                }
                Expr::Const(c) => const_sum += c,
                other => flat.push(other),
            }
        }
        if const_sum != 0.0 {
            flat.push(Expr::Const(const_sum));
        }
        match flat.len() {
            0 => Expr::Const(0.0),
            1 => flat.pop().unwrap_or(Expr::Const(0.0)),
            _ => Expr::Add(flat),
        }
    }

    /// Product of `factors`, flattening nested products, folding constants,
    /// and short-circuiting on zero. An empty (or all-one) product is
    /// `Const(1.0)`.
    pub fn mul(factors: Vec<Expr>) -> Expr {
        let mut flat: Vec<Expr> = Vec::with_capacity(factors.len());
        let mut const_prod = 1.0_f64;
        for factor in factors {
            match factor {
                Expr::Mul(inner) => {
                    for t in inner {
                        match t {
                            Expr::Const(c) => const_prod *= c,
                            other => flat.push(other),
                        }
                    }
                }
                Expr::Const(c) => const_prod *= c,
                other => flat.push(other),
            }
        }
        if const_prod == 0.0 {
            return Expr::Const(0.0);
        }
        if const_prod != 1.0 {
            flat.insert(0, Expr::Const(const_prod));
        }
        match flat.len() {
            0 => Expr::Const(1.0),
            1 => flat.pop().unwrap_or(Expr::Const(1.0)),
            _ => Expr::Mul(flat),
        }
    }

    /// `base` raised to `exp`, collapsing `Pow` of `Pow` where exponent
    /// multiplication is value-preserving (odd inner exponent, or integer
    /// outer exponent), dropping unit exponents, and folding integer powers
    /// of constants. A zero exponent yields `Const(1.0)`.
    ///
    /// `(x^2)^(1/2)` stays nested: collapsing it to `x` would change the
    /// value for negative `x` (the written expression is `|x|`).
    pub fn pow(base: Expr, exp: Exponent) -> Expr {
        if exp == Exponent::from_integer(0) {
            return Expr::Const(1.0);
        }
        if exp == Exponent::from_integer(1) {
            return base;
        }
        match base {
            Expr::Pow(inner, inner_exp)
                if is_odd_integer(&inner_exp) || exp.is_integer() =>
            {
                Expr::pow(*inner, inner_exp * exp)
            }
            Expr::Const(c) if exp.is_integer() => {
                Expr::Const(c.powf(*exp.numer() as f64))
            }
            other => Expr::Pow(Box::new(other), exp),
        }
    }

    /// `base` raised to an integer exponent.
    pub fn int_pow(base: Expr, exp: i64) -> Expr {
        Expr::pow(base, Exponent::from_integer(exp))
    }

    /// Natural logarithm.
    pub fn log(inner: Expr) -> Expr {
        Expr::Log(Box::new(inner))
    }

    /// `-expr`, represented as `(-1) * expr`.
    pub fn neg(expr: Expr) -> Expr {
        Expr::mul(vec![Expr::Const(-1.0), expr])
    }

    /// `lhs - rhs`.
    pub fn sub(lhs: Expr, rhs: Expr) -> Expr {
        Expr::add(vec![lhs, Expr::neg(rhs)])
    }

    /// `num / den`, represented as `num * den^-1`.
    pub fn div(num: Expr, den: Expr) -> Expr {
        Expr::mul(vec![num, Expr::int_pow(den, -1)])
    }

    /// True for leaves (constants and variables).
    pub fn is_atom(&self) -> bool {
        matches!(self, Expr::Const(_) | Expr::Var(_))
    }

    /// Ordered set of free variable names this expression depends on.
    pub fn free_vars(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_free_vars(&mut out);
        out
    }

    fn collect_free_vars(&self, out: &mut BTreeSet<String>) {
        match self {
            Expr::Const(_) => {}
            Expr::Var(name) => {
                out.insert(name.clone());
            }
            Expr::Add(terms) | Expr::Mul(terms) => {
                for t in terms {
                    t.collect_free_vars(out);
                }
            }
            Expr::Pow(base, _) => base.collect_free_vars(out),
            Expr::Log(inner) => inner.collect_free_vars(out),
        }
    }

    /// True if `name` occurs as a free variable anywhere in the tree.
    pub fn contains(&self, name: &str) -> bool {
        match self {
            Expr::Const(_) => false,
            Expr::Var(v) => v == name,
            Expr::Add(terms) | Expr::Mul(terms) => terms.iter().any(|t| t.contains(name)),
            Expr::Pow(base, _) => base.contains(name),
            Expr::Log(inner) => inner.contains(name),
        }
    }

    /// Pure substitution: every free occurrence of `name` is replaced by
    /// `replacement`, rebuilding through the smart constructors so the
    /// result stays normalized.
    pub fn substitute(&self, name: &str, replacement: &Expr) -> Expr {
        match self {
            Expr::Const(c) => Expr::Const(*c),
            Expr::Var(v) => {
                if v == name {
                    replacement.clone()
                } else {
                    Expr::Var(v.clone())
                }
            }
            Expr::Add(terms) => {
                Expr::add(terms.iter().map(|t| t.substitute(name, replacement)).collect())
            }
            Expr::Mul(terms) => {
                Expr::mul(terms.iter().map(|t| t.substitute(name, replacement)).collect())
            }
            Expr::Pow(base, exp) => Expr::pow(base.substitute(name, replacement), *exp),
            Expr::Log(inner) => Expr::log(inner.substitute(name, replacement)),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(_) => 1,
            Expr::Mul(_) => 2,
            Expr::Pow(_, _) => 3,
            Expr::Const(_) | Expr::Var(_) | Expr::Log(_) => 4,
        }
    }

    fn fmt_child(&self, parent: u8, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.precedence() < parent {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Const(c) => write!(f, "{c}"),
            Expr::Var(name) => write!(f, "{name}"),
            Expr::Add(terms) => {
                for (i, t) in terms.iter().enumerate() {
                    if i > 0 {
                        write!(f, " + ")?;
                    }
                    t.fmt_child(1, f)?;
                }
                Ok(())
            }
            Expr::Mul(terms) => {
                for (i, t) in terms.iter().enumerate() {
                    if i > 0 {
                        write!(f, "*")?;
                    }
                    t.fmt_child(2, f)?;
                }
                Ok(())
            }
            Expr::Pow(base, exp) => {
                base.fmt_child(4, f)?;
                if exp.is_integer() {
                    write!(f, "^{}", exp.numer())
                } else {
                    write!(f, "^({}/{})", exp.numer(), exp.denom())
                }
            }
            Expr::Log(inner) => write!(f, "log({inner})"),
        }
    }
}
