//! Demographic and financial ratio features

use anyhow::{Context, Result};
use polars::prelude::*;

use super::anomaly::DAYS_PER_YEAR;
use super::schema::*;
use super::stats::safe_div;

/// Derive age in years and the four credit ratios.
///
/// A zero or missing denominator gives a null ratio rather than an error or
/// an infinity.
pub fn add_ratio_features(df: &DataFrame) -> Result<DataFrame> {
    df.clone()
        .lazy()
        .with_columns([
            (col(DAYS_BIRTH).cast(DataType::Float64) / lit(-DAYS_PER_YEAR)).alias(AGE_YEARS),
            safe_div(col(AMT_CREDIT), col(AMT_INCOME_TOTAL)).alias(CREDIT_INCOME_RATIO),
            safe_div(col(AMT_ANNUITY), col(AMT_INCOME_TOTAL)).alias(ANNUITY_INCOME_RATIO),
            safe_div(col(AMT_CREDIT), col(AMT_ANNUITY)).alias(CREDIT_ANNUITY_RATIO),
            safe_div(col(AMT_CREDIT), col(AMT_GOODS_PRICE)).alias(LOAN_TO_VALUE),
        ])
        .collect()
        .context("Failed to derive ratio features")
}
