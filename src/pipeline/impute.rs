//! Median imputation of the external score columns

use anyhow::{Context, Result};
use polars::prelude::*;

use super::reference::{ImputationStats, Reference};
use super::schema::{missing_flag_name, SCORE_COLUMNS};
use super::stats::{column_values, median};

/// Fill value used when a score column has no values to take a median of
pub const ALL_MISSING_FILL: f64 = 0.0;

/// Fill missing score values with a reference median.
///
/// Under [`Reference::Compute`] the median of each column's non-missing
/// values is used; under [`Reference::Supplied`] the given values are used
/// unconditionally. A `<COLUMN>_MISSING` flag is added for each score column
/// before filling. Returns the table together with the exact mapping used,
/// which the caller persists after a training run.
pub fn impute_scores(
    df: &DataFrame,
    reference: &Reference<ImputationStats>,
) -> Result<(DataFrame, ImputationStats)> {
    let mut out = df.clone();
    let mut used = ImputationStats::new();

    for name in SCORE_COLUMNS {
        let values = column_values(df, name)?;

        let fill = match reference {
            Reference::Compute => median(&values).unwrap_or(ALL_MISSING_FILL),
            Reference::Supplied(stats) => stats.require(name)?,
        };
        used.insert(name, fill);

        let flags: Vec<bool> = values.iter().map(Option::is_none).collect();
        let filled: Vec<f64> = values.iter().map(|v| v.unwrap_or(fill)).collect();

        out.with_column(Series::new(missing_flag_name(name).into(), flags))
            .with_context(|| format!("Failed to add missingness flag for '{}'", name))?;
        out.with_column(Series::new(name.into(), filled))
            .with_context(|| format!("Failed to fill '{}'", name))?;
    }

    Ok((out, used))
}

/// Score columns with no non-missing values at all.
///
/// Under [`Reference::Compute`] these fall back to [`ALL_MISSING_FILL`].
pub fn all_missing_scores(df: &DataFrame) -> Result<Vec<String>> {
    let mut empty = Vec::new();
    for name in SCORE_COLUMNS {
        if column_values(df, name)?.iter().all(Option::is_none) {
            empty.push(name.to_string());
        }
    }
    Ok(empty)
}
