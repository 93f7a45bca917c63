//! Numeric helpers shared by the pipeline stages

use anyhow::{Context, Result};
use polars::prelude::*;

/// Read a column as `f64` values, treating NaN as missing.
pub fn column_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?;
    let float_col = column
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' cannot be cast to Float64", name))?;

    Ok(float_col
        .f64()?
        .iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Non-missing values of a column, sorted ascending.
pub fn sorted_present(values: &[Option<f64>]) -> Vec<f64> {
    let mut present: Vec<f64> = values.iter().filter_map(|v| *v).collect();
    present.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    present
}

/// Quantile of pre-sorted data using linear interpolation between the two
/// nearest ranks. Returns `None` for empty input.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Median of the non-missing values; `None` when every value is missing.
pub fn median(values: &[Option<f64>]) -> Option<f64> {
    quantile_sorted(&sorted_present(values), 0.5)
}

/// `numerator / denominator` as `Float64`, null when the denominator is zero
/// or null.
pub fn safe_div(numerator: Expr, denominator: Expr) -> Expr {
    let denominator = denominator.cast(DataType::Float64);
    when(denominator.clone().eq(lit(0.0)))
        .then(lit(NULL).cast(DataType::Float64))
        .otherwise(numerator.cast(DataType::Float64) / denominator)
}
