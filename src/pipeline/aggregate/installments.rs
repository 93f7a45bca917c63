//! Installment-payment history summaries

use anyhow::{Context, Result};
use polars::prelude::*;

use super::{row_count, true_count};
use crate::pipeline::schema::{
    AMT_INSTALMENT, AMT_PAYMENT, APPLICANT_ID, DAYS_ENTRY_PAYMENT, DAYS_INSTALMENT,
};
use crate::pipeline::stats::safe_div;

pub const INST_COUNT: &str = "INST_COUNT";
pub const INST_LATE_COUNT: &str = "INST_LATE_COUNT";
pub const INST_LATE_RATE: &str = "INST_LATE_RATE";
pub const INST_PAYMENT_RATIO_MEAN: &str = "INST_PAYMENT_RATIO_MEAN";

// Per-installment intermediates, dropped by the group-by
const LATE: &str = "LATE";
const PAYMENT_RATIO: &str = "PAYMENT_RATIO";

/// Summarize installment payments per applicant.
///
/// An installment is late when it was paid strictly after its scheduled day.
/// The payment ratio is computed per installment and then averaged, so it is
/// a mean of ratios rather than a ratio of sums.
pub fn aggregate_installments(df: &DataFrame) -> Result<DataFrame> {
    df.clone()
        .lazy()
        .with_columns([
            col(DAYS_ENTRY_PAYMENT)
                .cast(DataType::Float64)
                .gt(col(DAYS_INSTALMENT).cast(DataType::Float64))
                .alias(LATE),
            safe_div(col(AMT_PAYMENT), col(AMT_INSTALMENT)).alias(PAYMENT_RATIO),
        ])
        .group_by([col(APPLICANT_ID)])
        .agg([
            row_count().alias(INST_COUNT),
            true_count(col(LATE)).alias(INST_LATE_COUNT),
            col(LATE).cast(DataType::Float64).mean().alias(INST_LATE_RATE),
            col(PAYMENT_RATIO).mean().alias(INST_PAYMENT_RATIO_MEAN),
        ])
        .sort([APPLICANT_ID], SortMultipleOptions::default())
        .collect()
        .context("Failed to aggregate installment payments")
}
