//! pi::set — validated Pi-Sets and the shared target registry.
//!
//! Purpose
//! -------
//! Turn validated candidate group sets into the structured, persistable
//! [`PiSet`] records the training pipeline consumes: one designated target
//! group with its precomputed symbolic inverse, plus an ordered list of
//! feature groups. Target identity is shared *across* sets through a
//! [`TargetRegistry`]: every unique target group observed in any validated
//! set gets one reproducible identifier (`Pi_y_<index>`), so two sets with
//! the same target train against the same label column name.
//!
//! Key behaviors
//! -------------
//! - Registry construction deduplicates targets structurally, sorts them by
//!   canonical string form for reproducible numbering, and inverts each one
//!   once (fatal on zero/multiple roots).
//! - Splitting a set locates its target by structural equality against the
//!   registry; everything else becomes a feature group. The count invariant
//!   `features + 1 == groups` is checked and its violation reported as a
//!   defect (it means deduplication is inconsistent with the set).
//! - Feature groups are sorted ascending by free-variable count with a
//!   stable sort, preserving the generator's relative order on ties.
//! - [`constrain_pi_sets`] is the whole filter→registry→split pipeline;
//!   an all-rejected outcome is reportable (warn) but not an error.
//!
//! Invariants & assumptions
//! ------------------------
//! - `PiSet` values are immutable after construction and serde-persistable;
//!   the persisted collection round-trips with identical ids, expression
//!   structure, and target mapping.
//! - Set ids are the positional index within the validated collection.
//!
//! Testing notes
//! -------------
//! - Unit tests cover registry numbering, the split invariant, feature
//!   ordering, the empty-after-filter path, and serde round-trips.
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::pi::catalogue::DimVarCatalogue;
use crate::pi::errors::{PiResult, PiSetError};
use crate::pi::invert::invert_pi_target;
use crate::pi::validate::valid_pi_set;
use crate::symbolic::expr::Expr;

/// One validated, complete assignment of feature groups plus a single
/// target group and its symbolic inverse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiSet {
    /// Stable identifier: position within the validated collection.
    pub id: usize,
    /// Feature groups, ascending by free-variable count (stable on ties).
    pub feature_exprs: Vec<Expr>,
    /// Registry identifier of the target group (`Pi_y_<index>`).
    pub target_id: String,
    /// The target group itself.
    pub target_expr: Expr,
    /// Inverse of the target group over `PI_Y` and input variables.
    pub target_inv_expr: Expr,
}

impl PiSet {
    /// Feature and target expressions combined, features first.
    pub fn all_exprs(&self) -> Vec<&Expr> {
        let mut exprs: Vec<&Expr> = self.feature_exprs.iter().collect();
        exprs.push(&self.target_expr);
        exprs
    }

    /// Split one validated candidate set into features and its registry
    /// target.
    ///
    /// Errors
    /// ------
    /// - `PiSetError::GroupCountMismatch` if the registry matches zero or
    ///   multiple groups of this set, i.e. `features + 1 != groups`.
    pub fn from_groups(
        groups: &[Expr], set_id: usize, registry: &TargetRegistry,
    ) -> PiResult<PiSet> {
        let mut feature_exprs: Vec<Expr> = Vec::with_capacity(groups.len());
        let mut matched: Vec<&TargetEntry> = Vec::new();

        for group in groups {
            match registry.find(group) {
                Some(entry) => matched.push(entry),
                None => feature_exprs.push(group.clone()),
            }
        }

        let target = match matched.as_slice() {
            [entry] if feature_exprs.len() + 1 == groups.len() => *entry,
            _ => {
                return Err(PiSetError::GroupCountMismatch {
                    set_id,
                    n_groups: groups.len(),
                    n_features: feature_exprs.len(),
                });
            }
        };

        // Stable sort: equal free-variable counts keep generator order.
        feature_exprs.sort_by_key(|e| e.free_vars().len());

        Ok(PiSet {
            id: set_id,
            feature_exprs,
            target_id: target.id.clone(),
            target_expr: target.expr.clone(),
            target_inv_expr: target.inverse.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TargetEntry {
    expr: Expr,
    inverse: Expr,
    id: String,
}

/// Unique target groups observed across all validated sets, with
/// reproducible identifiers and precomputed inverses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRegistry {
    entries: Vec<TargetEntry>,
}

impl TargetRegistry {
    /// Collect, deduplicate, sort, name, and invert the target groups of
    /// `validated_sets`.
    ///
    /// Errors
    /// ------
    /// - Any error of [`invert_pi_target`] for a collected target.
    pub fn from_sets(
        validated_sets: &[Vec<Expr>], catalogue: &DimVarCatalogue,
    ) -> PiResult<TargetRegistry> {
        let output_name = catalogue.output().name();

        let mut uniques: Vec<&Expr> = Vec::new();
        for group in validated_sets.iter().flatten() {
            if group.contains(output_name) && !uniques.contains(&group) {
                uniques.push(group);
            }
        }
        // Canonical string order makes `Pi_y_<i>` assignment reproducible
        // across runs and candidate orderings.
        uniques.sort_by_key(|e| e.to_string());

        let mut entries = Vec::with_capacity(uniques.len());
        for (i, expr) in uniques.into_iter().enumerate() {
            let inverse = invert_pi_target(expr, catalogue)?;
            entries.push(TargetEntry {
                expr: expr.clone(),
                inverse,
                id: format!("Pi_y_{i}"),
            });
        }
        Ok(TargetRegistry { entries })
    }

    fn find(&self, expr: &Expr) -> Option<&TargetEntry> {
        self.entries.iter().find(|e| &e.expr == expr)
    }

    /// Number of unique targets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no targets were observed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registry identifiers in assignment order.
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }
}

/// Filter candidate group sets for validity, build the shared target
/// registry, and construct one [`PiSet`] per surviving set.
///
/// Returns
/// -------
/// The constructed sets in candidate order (ids are positional). An empty
/// vector is a normal, reportable outcome when every candidate was
/// filtered out.
///
/// Errors
/// ------
/// - Any registry or split error — these indicate configuration defects,
///   not filterable candidates.
pub fn constrain_pi_sets(
    candidates: &[Vec<Expr>], catalogue: &DimVarCatalogue,
) -> PiResult<Vec<PiSet>> {
    let validated: Vec<Vec<Expr>> = candidates
        .iter()
        .filter(|set| valid_pi_set(set, catalogue))
        .cloned()
        .collect();
    debug!(
        "validated {} of {} candidate pi set(s)",
        validated.len(),
        candidates.len()
    );

    if validated.is_empty() {
        warn!("no candidate pi set survived validity filtering");
        return Ok(Vec::new());
    }

    let registry = TargetRegistry::from_sets(&validated, catalogue)?;

    validated
        .iter()
        .enumerate()
        .map(|(i, set)| PiSet::from_groups(set, i, &registry))
        .collect()
}
