//! Error types for malformed pipeline inputs.
//!
//! Value-level problems (division by zero, empty groups, applicants without
//! history) never surface here: they become nulls in the output. These
//! variants cover inputs the pipeline cannot featurize at all.

use std::fmt;

use thiserror::Error;

/// The four source tables the pipeline consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Applicant,
    Previous,
    Bureau,
    Installments,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Applicant => write!(f, "applicant"),
            TableKind::Previous => write!(f, "previous-application"),
            TableKind::Bureau => write!(f, "bureau"),
            TableKind::Installments => write!(f, "installment-payment"),
        }
    }
}

/// Errors raised when an input table or supplied statistics are unusable.
#[derive(Debug, Error, PartialEq)]
pub enum FeatureError {
    /// A column the pipeline reads is absent from its table.
    #[error("{table} table is missing required column '{column}'")]
    MissingColumn { table: TableKind, column: String },

    /// A column used in arithmetic holds non-numeric data.
    #[error("column '{column}' in {table} table must be numeric, found {dtype}")]
    NonNumericColumn {
        table: TableKind,
        column: String,
        dtype: String,
    },

    /// Supplied imputation statistics lack a fill value for a score column.
    #[error("supplied imputation statistics have no value for '{column}'")]
    MissingReference { column: String },
}
