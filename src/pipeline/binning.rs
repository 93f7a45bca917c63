//! Age and credit-income bins plus the age × employment interaction

use anyhow::{Context, Result};
use polars::prelude::*;

use super::reference::{QuantileEdges, QUANTILE_BUCKETS};
use super::schema::{
    AGE_BIN, AGE_X_YEARS_EMPLOYED, AGE_YEARS, CREDIT_INCOME_BIN, CREDIT_INCOME_RATIO,
    YEARS_EMPLOYED,
};
use super::stats::{column_values, quantile_sorted, sorted_present};

/// Age bin boundaries in years; bins are right-closed `(lower, upper]`
pub const AGE_BIN_EDGES: [f64; 6] = [20.0, 30.0, 40.0, 50.0, 60.0, 70.0];

/// Label of the age bin containing `age`, or `None` outside (20, 70].
pub fn age_bin_label(age: f64) -> Option<String> {
    AGE_BIN_EDGES
        .windows(2)
        .find(|w| age > w[0] && age <= w[1])
        .map(|w| format!("({}, {}]", w[0], w[1]))
}

/// Fit the credit-income bucket edges on `df`.
///
/// The edges are the 0/20/40/60/80/100th percentiles of the ratio column.
/// Returns `None` when the column has no non-missing values.
pub fn fit_quantile_edges(df: &DataFrame) -> Result<Option<QuantileEdges>> {
    let sorted = sorted_present(&column_values(df, CREDIT_INCOME_RATIO)?);
    if sorted.is_empty() {
        return Ok(None);
    }

    let mut edges = [0.0; QUANTILE_BUCKETS + 1];
    for (i, edge) in edges.iter_mut().enumerate() {
        let q = i as f64 / QUANTILE_BUCKETS as f64;
        // Non-empty input always yields a quantile
        *edge = quantile_sorted(&sorted, q).unwrap_or(f64::NAN);
    }

    Ok(Some(QuantileEdges(edges)))
}

/// Add `AGE_BIN`, `CREDIT_INCOME_BIN` and `AGE_X_YEARS_EMPLOYED`.
///
/// `edges` are used as given; with `None` every credit-income bin is null.
/// Requires the outputs of the anomaly cleaner and the ratio builder.
pub fn add_bin_features(df: &DataFrame, edges: Option<&QuantileEdges>) -> Result<DataFrame> {
    let ages = column_values(df, AGE_YEARS)?;
    let age_bins: Vec<Option<String>> = ages
        .iter()
        .map(|age| age.and_then(age_bin_label))
        .collect();

    let ratios = column_values(df, CREDIT_INCOME_RATIO)?;
    let credit_bins: Vec<Option<u32>> = ratios
        .iter()
        .map(|ratio| match (ratio, edges) {
            (Some(r), Some(e)) => e.bucket(*r),
            _ => None,
        })
        .collect();

    let mut out = df
        .clone()
        .lazy()
        .with_column(
            (col(AGE_YEARS).cast(DataType::Float64) * col(YEARS_EMPLOYED).cast(DataType::Float64))
                .alias(AGE_X_YEARS_EMPLOYED),
        )
        .collect()
        .context("Failed to derive age-employment interaction")?;

    out.with_column(Series::new(AGE_BIN.into(), age_bins))?;
    out.with_column(Series::new(CREDIT_INCOME_BIN.into(), credit_bins))?;

    Ok(out)
}
