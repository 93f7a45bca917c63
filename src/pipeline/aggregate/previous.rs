//! Previous-application history summaries

use anyhow::{Context, Result};
use polars::prelude::*;

use super::{present_count, row_count, true_count, unless_all_missing};
use crate::pipeline::schema::{APPLICANT_ID, CONTRACT_STATUS};
use crate::pipeline::stats::safe_div;

pub const PREV_COUNT: &str = "PREV_COUNT";
pub const PREV_APPROVED_COUNT: &str = "PREV_APPROVED_COUNT";
pub const PREV_REFUSED_COUNT: &str = "PREV_REFUSED_COUNT";
pub const PREV_APPROVED_RATE: &str = "PREV_APPROVED_RATE";

const APPROVED: &str = "Approved";
const REFUSED: &str = "Refused";

/// Count past applications and their approval/refusal outcomes per applicant.
///
/// Status counts and the approval rate only consider rows with a status.
pub fn aggregate_previous(df: &DataFrame) -> Result<DataFrame> {
    let status = || col(CONTRACT_STATUS).cast(DataType::String);
    let approved = || status().eq(lit(APPROVED));

    df.clone()
        .lazy()
        .group_by([col(APPLICANT_ID)])
        .agg([
            row_count().alias(PREV_COUNT),
            true_count(approved()).alias(PREV_APPROVED_COUNT),
            true_count(status().eq(lit(REFUSED))).alias(PREV_REFUSED_COUNT),
            unless_all_missing(
                status(),
                safe_div(approved().sum(), present_count(status())),
            )
            .alias(PREV_APPROVED_RATE),
        ])
        .sort([APPLICANT_ID], SortMultipleOptions::default())
        .collect()
        .context("Failed to aggregate previous applications")
}
