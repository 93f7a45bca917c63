//! End-to-end feature pipeline over the applicant and history tables

use anyhow::{Context, Result};
use polars::prelude::*;

use super::aggregate::{aggregate_bureau, aggregate_installments, aggregate_previous};
use super::anomaly::clean_employment_anomaly;
use super::binning::{add_bin_features, fit_quantile_edges};
use super::impute::impute_scores;
use super::ratios::add_ratio_features;
use super::reference::{FeatureStatistics, Reference};
use super::schema::{
    validate_applicant, validate_bureau, validate_installments, validate_previous, APPLICANT_ID,
};

/// Temporary column holding the applicant table's original row position
const ROW_INDEX: &str = "__row_index";

/// The four raw input tables.
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub applicant: DataFrame,
    pub previous: DataFrame,
    pub bureau: DataFrame,
    pub installments: DataFrame,
}

/// How the history aggregators are scheduled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Execution {
    /// Run the three aggregators concurrently on the rayon pool
    #[default]
    Parallel,
    /// Run them one after another
    Sequential,
}

/// Enriched applicant table plus the statistics it was built with.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub features: DataFrame,
    /// Persist after a fit run; pass back as `Reference::Supplied` on the
    /// paired test run
    pub statistics: FeatureStatistics,
}

/// Per-applicant summaries of the three history tables
struct HistoryAggregates {
    previous: DataFrame,
    bureau: DataFrame,
    installments: DataFrame,
}

/// Run the full pipeline with the default (parallel) aggregation.
pub fn build_features(
    tables: &SourceTables,
    reference: &Reference<FeatureStatistics>,
) -> Result<PipelineOutput> {
    build_features_with(tables, reference, Execution::default())
}

/// Run the full pipeline.
///
/// The applicant table goes through anomaly cleaning, median imputation,
/// ratio derivation, and binning in that order. The history tables are
/// aggregated independently and left-joined onto the result by applicant
/// identifier. Row count and row order of the applicant table are preserved.
///
/// Under `Reference::Supplied` neither the medians nor the credit-income
/// edges are recomputed.
pub fn build_features_with(
    tables: &SourceTables,
    reference: &Reference<FeatureStatistics>,
    execution: Execution,
) -> Result<PipelineOutput> {
    validate_applicant(&tables.applicant)?;
    validate_previous(&tables.previous)?;
    validate_bureau(&tables.bureau)?;
    validate_installments(&tables.installments)?;

    let (applicant, aggregates) = match execution {
        Execution::Parallel => rayon::join(
            || build_applicant_features(&tables.applicant, reference),
            || aggregate_histories(tables, execution),
        ),
        Execution::Sequential => (
            build_applicant_features(&tables.applicant, reference),
            aggregate_histories(tables, execution),
        ),
    };
    let (applicant, statistics) = applicant?;
    let aggregates = aggregates?;

    let features = join_aggregates(applicant, aggregates)?;

    Ok(PipelineOutput {
        features,
        statistics,
    })
}

/// Stages 1-4 over the applicant table.
fn build_applicant_features(
    applicant: &DataFrame,
    reference: &Reference<FeatureStatistics>,
) -> Result<(DataFrame, FeatureStatistics)> {
    let df = clean_employment_anomaly(applicant)?;

    let imputation_reference = match reference {
        Reference::Compute => Reference::Compute,
        Reference::Supplied(stats) => Reference::Supplied(stats.imputation.clone()),
    };
    let (df, imputation) = impute_scores(&df, &imputation_reference)?;

    let df = add_ratio_features(&df)?;

    let credit_income_edges = match reference {
        Reference::Compute => fit_quantile_edges(&df)?,
        Reference::Supplied(stats) => stats.credit_income_edges,
    };
    let df = add_bin_features(&df, credit_income_edges.as_ref())?;

    Ok((
        df,
        FeatureStatistics {
            imputation,
            credit_income_edges,
        },
    ))
}

fn aggregate_histories(tables: &SourceTables, execution: Execution) -> Result<HistoryAggregates> {
    let (previous, (bureau, installments)) = match execution {
        Execution::Parallel => rayon::join(
            || aggregate_previous(&tables.previous),
            || {
                rayon::join(
                    || aggregate_bureau(&tables.bureau),
                    || aggregate_installments(&tables.installments),
                )
            },
        ),
        Execution::Sequential => (
            aggregate_previous(&tables.previous),
            (
                aggregate_bureau(&tables.bureau),
                aggregate_installments(&tables.installments),
            ),
        ),
    };

    Ok(HistoryAggregates {
        previous: previous?,
        bureau: bureau?,
        installments: installments?,
    })
}

/// Left-join every aggregate table onto the applicant table.
///
/// Aggregate keys are cast to the applicant key's dtype so that, for example,
/// an `i32` history key still matches an `i64` applicant key.
fn join_aggregates(applicant: DataFrame, aggregates: HistoryAggregates) -> Result<DataFrame> {
    let key_dtype = applicant
        .column(APPLICANT_ID)
        .with_context(|| format!("Applicant table has no '{}' column", APPLICANT_ID))?
        .dtype()
        .clone();

    let mut joined = applicant.lazy().with_row_index(ROW_INDEX, None);

    for aggregate in [
        aggregates.previous,
        aggregates.bureau,
        aggregates.installments,
    ] {
        let aggregate = aggregate
            .lazy()
            .with_column(col(APPLICANT_ID).cast(key_dtype.clone()));
        joined = joined.join(
            aggregate,
            [col(APPLICANT_ID)],
            [col(APPLICANT_ID)],
            JoinArgs::new(JoinType::Left),
        );
    }

    let joined = joined
        .sort([ROW_INDEX], SortMultipleOptions::default())
        .collect()
        .context("Failed to join history aggregates onto applicant table")?;

    Ok(joined.drop(ROW_INDEX)?)
}
