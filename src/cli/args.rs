//! Command-line argument definitions using clap

use clap::Parser;
use std::path::{Path, PathBuf};

/// credit-features - Build a default-risk feature matrix from applicant and history tables
#[derive(Parser, Debug)]
#[command(name = "credit-features")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Applicant table (CSV or Parquet), one row per applicant
    #[arg(short, long, value_parser = validate_table_path)]
    pub application: PathBuf,

    /// Previous-application history table (CSV or Parquet)
    #[arg(short, long, value_parser = validate_table_path)]
    pub previous: PathBuf,

    /// Credit-bureau history table (CSV or Parquet)
    #[arg(short, long, value_parser = validate_table_path)]
    pub bureau: PathBuf,

    /// Installment-payment history table (CSV or Parquet)
    #[arg(long, value_parser = validate_table_path)]
    pub installments: PathBuf,

    /// Output file path (CSV or Parquet, determined by extension).
    /// Defaults to the applicant table's directory with a '_features' suffix
    /// (e.g., application_train.csv → application_train_features.csv).
    #[arg(short, long, value_parser = validate_table_path)]
    pub output: Option<PathBuf>,

    /// Statistics from a previous fit run (JSON). When given, the run replays
    /// these medians and bin edges instead of computing them from the data.
    #[arg(long)]
    pub stats_in: Option<PathBuf>,

    /// Where to write the statistics used by this run (JSON).
    /// Defaults to '<applicant stem>_stats.json' on a fit run; a replay run
    /// writes nothing unless this is given.
    #[arg(long)]
    pub stats_out: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Run the three history aggregators one after another instead of in parallel
    #[arg(long, default_value = "false")]
    pub sequential: bool,
}

impl Cli {
    /// Get the output path, deriving from the applicant table if not explicitly provided.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| sibling_path(&self.application, "features", None))
    }

    /// Statistics output path: explicit, or derived on a fit run only.
    pub fn stats_output_path(&self) -> Option<PathBuf> {
        match (&self.stats_out, &self.stats_in) {
            (Some(path), _) => Some(path.clone()),
            (None, Some(_)) => None,
            (None, None) => Some(sibling_path(&self.application, "stats", Some("json"))),
        }
    }

    pub fn is_replay(&self) -> bool {
        self.stats_in.is_some()
    }
}

/// `<dir>/<stem>_<suffix>.<ext>` next to `input`, keeping its extension
/// unless one is given.
fn sibling_path(input: &Path, suffix: &str, extension: Option<&str>) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let extension = extension.unwrap_or_else(|| {
        input
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("parquet")
    });
    parent.join(format!("{}_{}.{}", stem, suffix, extension))
}

/// Validator for table paths: only CSV and Parquet are accepted
fn validate_table_path(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" | "parquet" => Ok(path),
        _ => Err(format!("'{}' must be a .csv or .parquet file", s)),
    }
}
