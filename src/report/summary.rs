//! Feature pipeline summary report

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use polars::prelude::DataFrame;

use crate::pipeline::FeatureStatistics;

/// Coverage of one history table: how many applicants it contributed to
#[derive(Debug, Clone)]
pub struct HistoryCoverage {
    pub table: String,
    pub source_rows: usize,
    pub matched_applicants: usize,
}

/// Summary of one pipeline run
#[derive(Debug, Default)]
pub struct FeatureSummary {
    pub applicants: usize,
    pub input_columns: usize,
    pub output_columns: usize,
    pub replayed: bool,
    pub medians: Vec<(String, f64)>,
    pub credit_income_edges: Option<Vec<f64>>,
    pub coverage: Vec<HistoryCoverage>,
    pub load_time: Duration,
    pub features_time: Duration,
    pub save_time: Duration,
}

impl FeatureSummary {
    pub fn new(applicants: usize, input_columns: usize, replayed: bool) -> Self {
        Self {
            applicants,
            input_columns,
            output_columns: input_columns,
            replayed,
            ..Default::default()
        }
    }

    pub fn set_statistics(&mut self, stats: &FeatureStatistics) {
        self.medians = stats
            .imputation
            .iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        self.credit_income_edges = stats.credit_income_edges.map(|e| e.0.to_vec());
    }

    pub fn set_output(&mut self, features: &DataFrame) {
        self.output_columns = features.width();
    }

    /// Record how many applicants received a value in `count_column`, the
    /// history table's row-count aggregate.
    pub fn add_coverage(
        &mut self,
        table: &str,
        source_rows: usize,
        features: &DataFrame,
        count_column: &str,
    ) {
        let matched = features
            .column(count_column)
            .map(|c| c.len() - c.null_count())
            .unwrap_or(0);
        self.coverage.push(HistoryCoverage {
            table: table.to_string(),
            source_rows,
            matched_applicants: matched,
        });
    }

    pub fn set_load_time(&mut self, elapsed: Duration) {
        self.load_time = elapsed;
    }

    pub fn set_features_time(&mut self, elapsed: Duration) {
        self.features_time = elapsed;
    }

    pub fn set_save_time(&mut self, elapsed: Duration) {
        self.save_time = elapsed;
    }

    pub fn added_columns(&self) -> usize {
        self.output_columns.saturating_sub(self.input_columns)
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("FEATURE SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("👤 Applicants"), Cell::new(self.applicants)]);
        table.add_row(vec![
            Cell::new("📁 Input Columns"),
            Cell::new(self.input_columns),
        ]);
        table.add_row(vec![
            Cell::new("➕ Added Columns"),
            Cell::new(self.added_columns()).fg(Color::Cyan),
        ]);
        table.add_row(vec![
            Cell::new("✅ Output Columns"),
            Cell::new(self.output_columns)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("📐 Statistics"),
            Cell::new(if self.replayed { "replayed" } else { "fitted" }).fg(if self.replayed {
                Color::Yellow
            } else {
                Color::Green
            }),
        ]);

        for (name, value) in &self.medians {
            table.add_row(vec![
                Cell::new(format!("   median {}", name)),
                Cell::new(format!("{:.6}", value)),
            ]);
        }

        table.add_row(vec![
            Cell::new("   credit/income edges"),
            Cell::new(match &self.credit_income_edges {
                Some(edges) => edges
                    .iter()
                    .map(|e| format!("{:.3}", e))
                    .collect::<Vec<_>>()
                    .join(" | "),
                None => "none (no ratios)".to_string(),
            }),
        ]);

        for coverage in &self.coverage {
            let pct = if self.applicants > 0 {
                coverage.matched_applicants as f64 / self.applicants as f64 * 100.0
            } else {
                0.0
            };
            table.add_row(vec![
                Cell::new(format!("🔗 {}", coverage.table)),
                Cell::new(format!(
                    "{} rows → {} applicants ({:.1}%)",
                    coverage.source_rows, coverage.matched_applicants, pct
                )),
            ]);
        }

        table.add_row(vec![
            Cell::new("⏱  Time (load / build / save)"),
            Cell::new(format!(
                "{:.2}s / {:.2}s / {:.2}s",
                self.load_time.as_secs_f64(),
                self.features_time.as_secs_f64(),
                self.save_time.as_secs_f64()
            )),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_added_columns_and_coverage() {
        let features = df! {
            "SK_ID_CURR" => [1i64, 2, 3, 4],
            "PREV_COUNT" => [Some(2i64), None, Some(1), None],
            "EXTRA" => [0.0f64; 4],
        }
        .unwrap();

        let mut summary = FeatureSummary::new(4, 1, false);
        summary.set_output(&features);
        summary.add_coverage("previous", 3, &features, "PREV_COUNT");
        summary.add_coverage("bureau", 0, &features, "BUREAU_COUNT");

        assert_eq!(summary.added_columns(), 2);
        assert_eq!(summary.coverage[0].matched_applicants, 2);
        assert_eq!(summary.coverage[1].matched_applicants, 0);
    }
}
