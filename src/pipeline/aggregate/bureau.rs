//! Credit-bureau history summaries

use anyhow::{Context, Result};
use polars::prelude::*;

use super::{row_count, true_count, unless_all_missing};
use crate::pipeline::schema::{
    AMT_CREDIT_SUM, AMT_CREDIT_SUM_DEBT, AMT_CREDIT_SUM_OVERDUE, APPLICANT_ID, CREDIT_ACTIVE,
};
use crate::pipeline::stats::safe_div;

pub const BUREAU_COUNT: &str = "BUREAU_COUNT";
pub const BUREAU_ACTIVE_COUNT: &str = "BUREAU_ACTIVE_COUNT";
pub const BUREAU_CLOSED_COUNT: &str = "BUREAU_CLOSED_COUNT";
pub const BUREAU_OVERDUE_SUM: &str = "BUREAU_OVERDUE_SUM";
pub const BUREAU_DEBT_CREDIT_RATIO: &str = "BUREAU_DEBT_CREDIT_RATIO";

/// Sum of a numeric column, null when the group has no values for it.
fn sum_present(name: &str) -> Expr {
    let values = col(name).cast(DataType::Float64);
    unless_all_missing(values.clone(), values.sum())
}

/// Summarize bureau records per applicant.
///
/// The debt ratio is the group's summed debt over its summed credit amount,
/// null when the summed credit is zero or missing.
pub fn aggregate_bureau(df: &DataFrame) -> Result<DataFrame> {
    let active = || col(CREDIT_ACTIVE).cast(DataType::String);

    df.clone()
        .lazy()
        .group_by([col(APPLICANT_ID)])
        .agg([
            row_count().alias(BUREAU_COUNT),
            true_count(active().eq(lit("Active"))).alias(BUREAU_ACTIVE_COUNT),
            true_count(active().eq(lit("Closed"))).alias(BUREAU_CLOSED_COUNT),
            sum_present(AMT_CREDIT_SUM_OVERDUE).alias(BUREAU_OVERDUE_SUM),
            safe_div(sum_present(AMT_CREDIT_SUM_DEBT), sum_present(AMT_CREDIT_SUM))
                .alias(BUREAU_DEBT_CREDIT_RATIO),
        ])
        .sort([APPLICANT_ID], SortMultipleOptions::default())
        .collect()
        .context("Failed to aggregate bureau records")
}
