//! transform — runtime pipeline between dimensional and Pi space.
//!
//! Purpose
//! -------
//! Everything that touches data at train/predict time: the pluggable
//! invertible column transforms ([`column`]), the forward/inverse target
//! maps ([`target`]), and the full three-stage dimensional↔Pi pipeline
//! ([`dim_to_pi`]) with its round-trip guarantee.
//!
//! Key behaviors
//! -------------
//! - Fit-then-transform binding: a transformer is bound to one dimensional
//!   dataset snapshot and may transform/invert repeatedly against it.
//! - Strict error policy: missing columns, length mismatches, and NaNs in
//!   the Pi target are fatal and carry the offending identifier; no
//!   partial tables are returned.
//! - Single-threaded by design; instances are not shared across threads
//!   without external locking.
//!
//! Downstream usage
//! ----------------
//! - The ensemble trainer consumes `transform()` output (features +
//!   target + grouping key); the evaluator consumes `inverse_transform_y`
//!   to report scores in physical units.
pub mod column;
pub mod dim_to_pi;
pub mod errors;
pub mod target;

pub use column::{ColumnTransform, Log10Transform, PowerTransform};
pub use dim_to_pi::{DimToPiTransformer, TF_SUFFIX};
pub use errors::{TransformError, TransformResult};
pub use target::PiTargetTransformer;
