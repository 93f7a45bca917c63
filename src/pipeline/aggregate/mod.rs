//! One-row-per-applicant summaries of the history tables
//!
//! Every aggregator groups its history table by applicant identifier and
//! returns the summaries sorted by identifier. Reductions skip nulls; when
//! an applicant's relevant column holds no values at all the aggregate is
//! null rather than zero.

pub mod bureau;
pub mod installments;
pub mod previous;

pub use bureau::*;
pub use installments::*;
pub use previous::*;

use polars::prelude::*;

/// Number of non-null values of `expr` within the group.
pub(crate) fn present_count(expr: Expr) -> Expr {
    expr.is_not_null().sum()
}

/// `aggregate` when the group has at least one non-null `source` value,
/// null otherwise.
pub(crate) fn unless_all_missing(source: Expr, aggregate: Expr) -> Expr {
    when(present_count(source).gt(lit(0)))
        .then(aggregate)
        .otherwise(lit(NULL))
}

/// Count of rows in the group where `flag` is true, null when every flag is
/// missing.
pub(crate) fn true_count(flag: Expr) -> Expr {
    unless_all_missing(flag.clone(), flag.sum().cast(DataType::Int64))
}

/// Row count of the group, nulls included.
pub(crate) fn row_count() -> Expr {
    len().cast(DataType::Int64)
}
