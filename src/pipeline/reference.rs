//! Fitted statistics and the explicit choice between fitting and replaying them
//!
//! A training run fits the score medians and the credit-income bin edges on
//! its own data. A paired test run must replay exactly those values, so the
//! choice is passed explicitly as a [`Reference`] instead of being inferred
//! from an optional argument.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::FeatureError;

/// Where a stage gets its reference statistics from.
#[derive(Debug, Clone, PartialEq)]
pub enum Reference<T> {
    /// Fit the statistics on the table being processed.
    Compute,
    /// Use these statistics verbatim, even if the data would give others.
    Supplied(T),
}

impl<T> Reference<T> {
    pub fn is_supplied(&self) -> bool {
        matches!(self, Reference::Supplied(_))
    }
}

/// Per-column fill values for the external score columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImputationStats {
    medians: BTreeMap<String, f64>,
}

impl ImputationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: &str, value: f64) {
        self.medians.insert(column.to_string(), value);
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.medians.get(column).copied()
    }

    /// Fill value for `column`, failing when the mapping has none.
    pub fn require(&self, column: &str) -> Result<f64, FeatureError> {
        self.get(column).ok_or_else(|| FeatureError::MissingReference {
            column: column.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.medians.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.medians.len()
    }

    pub fn is_empty(&self) -> bool {
        self.medians.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ImputationStats {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            medians: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Number of credit-income buckets
pub const QUANTILE_BUCKETS: usize = 5;

/// Boundaries of the credit-income quantile buckets, lowest first.
///
/// Bucket `i` covers `(edges[i], edges[i + 1]]`; the lowest edge itself
/// belongs to bucket 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantileEdges(pub [f64; QUANTILE_BUCKETS + 1]);

impl QuantileEdges {
    /// Bucket index for `value`, or `None` outside the edges.
    pub fn bucket(&self, value: f64) -> Option<u32> {
        let edges = &self.0;
        if value < edges[0] || value > edges[QUANTILE_BUCKETS] || value.is_nan() {
            return None;
        }
        if value == edges[0] {
            return Some(0);
        }
        edges[1..]
            .iter()
            .position(|&upper| value <= upper)
            .map(|idx| idx as u32)
    }
}

/// Everything a fit run learns and a replay run reuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureStatistics {
    pub imputation: ImputationStats,
    /// `None` when the fitted table had no credit-income ratios at all
    pub credit_income_edges: Option<QuantileEdges>,
}
