//! pi::catalogue — dimensioned variable catalogue.
//!
//! Purpose
//! -------
//! Describe the physical quantities a dataset measures: an ordered list of
//! input variables plus one distinguished output, each tagged with a sign
//! class and a physical-dimension descriptor (e.g. `"L/T"`). The catalogue
//! is the single source of truth for variable names, for the sign-safety
//! rules, and for the argument lists the transformers compile against.
//!
//! Key behaviors
//! -------------
//! - Constructor-time validation: names are unique and the output never
//!   appears among the inputs; violations are fatal configuration defects.
//! - Name views in a fixed order (inputs first, then output) so compiled
//!   argument lists are deterministic across runs.
//! - Serde support: the catalogue is the consumed configuration artifact of
//!   the pipeline, deserialized through the same validation as `new` (a
//!   hand-edited artifact cannot smuggle in a duplicate name).
//!
//! Invariants & assumptions
//! ------------------------
//! - Catalogues are created once from static configuration and immutable
//!   afterwards; lookups borrow.
//! - The `dimensions` descriptor is carried verbatim for the external group
//!   generator; this crate never parses it.
//!
//! Testing notes
//! -------------
//! - Unit tests cover validation, lookups, name views, and the serde
//!   round-trip including the reject-on-deserialize path.
use serde::{Deserialize, Serialize};

use crate::pi::errors::{CatalogueError, CatalogueResult};
use crate::symbolic::expr::Expr;

/// Sign class of a variable that can take either sign.
pub const SIGNED: bool = true;

/// Sign class of a strictly non-negative variable.
pub const UNSIGNED: bool = false;

/// One physically dimensioned quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimVar {
    name: String,
    signed: bool,
    dimensions: String,
}

impl DimVar {
    /// Build a variable descriptor; see [`SIGNED`] / [`UNSIGNED`].
    pub fn new(name: impl Into<String>, signed: bool, dimensions: impl Into<String>) -> Self {
        DimVar { name: name.into(), signed, dimensions: dimensions.into() }
    }

    /// Variable name as used in expressions and table columns.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if the quantity can take negative values.
    pub fn signed(&self) -> bool {
        self.signed
    }

    /// Physical-dimension descriptor (opaque to this crate).
    pub fn dimensions(&self) -> &str {
        &self.dimensions
    }

    /// The variable as a symbolic expression leaf.
    pub fn var(&self) -> Expr {
        Expr::var(&self.name)
    }
}

/// Serde mirror used so deserialization funnels through validation.
#[derive(Serialize, Deserialize)]
struct CatalogueSpec {
    inputs: Vec<DimVar>,
    output: DimVar,
}

/// Ordered input variables plus the distinguished output variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogueSpec", into = "CatalogueSpec")]
pub struct DimVarCatalogue {
    inputs: Vec<DimVar>,
    output: DimVar,
}

impl TryFrom<CatalogueSpec> for DimVarCatalogue {
    type Error = CatalogueError;

    fn try_from(spec: CatalogueSpec) -> Result<Self, Self::Error> {
        DimVarCatalogue::new(spec.inputs, spec.output)
    }
}

impl From<DimVarCatalogue> for CatalogueSpec {
    fn from(catalogue: DimVarCatalogue) -> Self {
        CatalogueSpec { inputs: catalogue.inputs, output: catalogue.output }
    }
}

impl DimVarCatalogue {
    /// Validate and build a catalogue.
    ///
    /// Errors
    /// ------
    /// - `CatalogueError::OutputAmongInputs` if the output name is also an
    ///   input name.
    /// - `CatalogueError::DuplicateName` if any name repeats.
    pub fn new(inputs: Vec<DimVar>, output: DimVar) -> CatalogueResult<Self> {
        if inputs.iter().any(|v| v.name == output.name) {
            return Err(CatalogueError::OutputAmongInputs { name: output.name });
        }
        for (i, v) in inputs.iter().enumerate() {
            if inputs[..i].iter().any(|w| w.name == v.name) {
                return Err(CatalogueError::DuplicateName { name: v.name.clone() });
            }
        }
        Ok(DimVarCatalogue { inputs, output })
    }

    /// Input variables in catalogue order.
    pub fn inputs(&self) -> &[DimVar] {
        &self.inputs
    }

    /// The distinguished output variable.
    pub fn output(&self) -> &DimVar {
        &self.output
    }

    /// All names, inputs first and the output last. This order is the
    /// argument-list contract of the forward target map.
    pub fn all_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inputs.iter().map(|v| v.name.clone()).collect();
        names.push(self.output.name.clone());
        names
    }

    /// Input names only, in catalogue order.
    pub fn input_names(&self) -> Vec<String> {
        self.inputs.iter().map(|v| v.name.clone()).collect()
    }

    /// Look up any catalogue variable (input or output) by name.
    pub fn get(&self, name: &str) -> Option<&DimVar> {
        self.inputs
            .iter()
            .chain(std::iter::once(&self.output))
            .find(|v| v.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Constructor validation (duplicates, output-among-inputs).
    // - Name views and lookup behavior.
    // - Serde round-trips, including validation on the deserialize path.
    // -------------------------------------------------------------------------

    fn catalogue() -> DimVarCatalogue {
        DimVarCatalogue::new(
            vec![
                DimVar::new("u", UNSIGNED, "L/T"),
                DimVar::new("L", UNSIGNED, "L"),
            ],
            DimVar::new("y", SIGNED, "L/T"),
        )
        .expect("catalogue is valid")
    }

    #[test]
    fn new_accepts_valid_catalogue() {
        let c = catalogue();
        assert_eq!(c.all_names(), vec!["u", "L", "y"]);
        assert_eq!(c.input_names(), vec!["u", "L"]);
        assert_eq!(c.output().name(), "y");
        assert!(c.get("L").is_some());
        assert!(c.get("y").is_some());
        assert!(c.get("w").is_none());
    }

    #[test]
    fn new_rejects_output_among_inputs() {
        let err = DimVarCatalogue::new(
            vec![DimVar::new("y", SIGNED, "L/T")],
            DimVar::new("y", SIGNED, "L/T"),
        )
        .unwrap_err();
        assert_eq!(err, CatalogueError::OutputAmongInputs { name: "y".to_string() });
    }

    #[test]
    fn new_rejects_duplicate_inputs() {
        let err = DimVarCatalogue::new(
            vec![
                DimVar::new("u", UNSIGNED, "L/T"),
                DimVar::new("u", UNSIGNED, "L/T"),
            ],
            DimVar::new("y", SIGNED, "L/T"),
        )
        .unwrap_err();
        assert_eq!(err, CatalogueError::DuplicateName { name: "u".to_string() });
    }

    #[test]
    // Purpose
    // -------
    // The catalogue is a persisted configuration artifact; it must
    // round-trip through serde, and a corrupted artifact must fail
    // deserialization rather than construct an invalid catalogue.
    fn serde_round_trip_validates() {
        let c = catalogue();
        let json = serde_json::to_string(&c).expect("serialize");
        let back: DimVarCatalogue = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(c, back);

        let corrupt = r#"{
            "inputs": [
                {"name": "y", "signed": true, "dimensions": "L/T"}
            ],
            "output": {"name": "y", "signed": true, "dimensions": "L/T"}
        }"#;
        let result: Result<DimVarCatalogue, _> = serde_json::from_str(corrupt);
        assert!(result.is_err());
    }
}
