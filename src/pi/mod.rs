//! pi — Pi-group data model: catalogue, validity filtering, set
//! construction, and target inversion.
//!
//! Purpose
//! -------
//! Provide everything between the external Buckingham-Pi group generator
//! and the runtime transformers: the dimensioned variable catalogue
//! ([`catalogue`]), the pure acceptance predicates ([`validate`]), the
//! shared target registry and [`set::PiSet`] construction ([`set`]), and
//! symbolic target inversion ([`invert`]).
//!
//! Key behaviors
//! -------------
//! - Candidate sets arrive as plain `Vec<Vec<Expr>>` from the generator
//!   (an opaque collaborator); only their free-variable structure matters
//!   here.
//! - [`set::constrain_pi_sets`] is the one-call pipeline from candidates
//!   to persisted-ready `PiSet` records; filtering is silent, construction
//!   and inversion defects are fatal.
//! - `PiSet` and the catalogue are the two serde-persisted artifacts of
//!   the system and round-trip structurally.
//!
//! Downstream usage
//! ----------------
//! - `transform` consumes a `PiSet` plus the catalogue to build the
//!   dimensional↔Pi transformers; training orchestration persists the
//!   constrained `Vec<PiSet>` once and reloads it for every run.
pub mod catalogue;
pub mod errors;
pub mod invert;
pub mod set;
pub mod validate;

pub use catalogue::{DimVar, DimVarCatalogue, SIGNED, UNSIGNED};
pub use errors::{CatalogueError, CatalogueResult, PiResult, PiSetError};
pub use invert::{invert_pi_target, PI_Y};
pub use set::{constrain_pi_sets, PiSet, TargetRegistry};
pub use validate::{contains_single_target, sign_valid, valid_pi_set};
