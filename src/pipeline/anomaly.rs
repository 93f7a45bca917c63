//! Employment-duration anomaly cleaning
//!
//! `DAYS_EMPLOYED` is a negative day offset, except that unemployed and
//! retired applicants carry the placeholder 365243. The placeholder becomes
//! a null before any duration is derived from the column.

use anyhow::{Context, Result};
use polars::prelude::*;

use super::schema::{DAYS_EMPLOYED, DAYS_EMPLOYED_MISSING, YEARS_EMPLOYED};

/// Placeholder day count meaning "not applicable"
pub const DAYS_EMPLOYED_SENTINEL: i64 = 365_243;

/// Days per year used for every day-offset to years conversion
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Null out the employment sentinel and derive `YEARS_EMPLOYED` plus its
/// missingness flag.
pub fn clean_employment_anomaly(df: &DataFrame) -> Result<DataFrame> {
    df.clone()
        .lazy()
        .with_column(
            when(
                col(DAYS_EMPLOYED)
                    .cast(DataType::Float64)
                    .eq(lit(DAYS_EMPLOYED_SENTINEL as f64)),
            )
                .then(lit(NULL))
                .otherwise(col(DAYS_EMPLOYED))
                .alias(DAYS_EMPLOYED),
        )
        .with_columns([
            (col(DAYS_EMPLOYED).cast(DataType::Float64) / lit(-DAYS_PER_YEAR))
                .alias(YEARS_EMPLOYED),
            col(DAYS_EMPLOYED).is_null().alias(DAYS_EMPLOYED_MISSING),
        ])
        .collect()
        .context("Failed to clean employment anomaly")
}
