//! Loading and saving of tables and fitted statistics

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

use super::reference::FeatureStatistics;

/// Supported table formats, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Parquet,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "csv" => Ok(TableFormat::Csv),
            "parquet" => Ok(TableFormat::Parquet),
            _ => anyhow::bail!(
                "Unsupported file format: '{}'. Supported formats: csv, parquet",
                extension
            ),
        }
    }
}

/// Load a table from a CSV or Parquet file.
///
/// `infer_schema_length` is the number of CSV rows used for type inference;
/// 0 scans the whole file.
pub fn load_table(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let lf = match TableFormat::from_path(path)? {
        TableFormat::Csv => {
            let schema_length = if infer_schema_length == 0 {
                None
            } else {
                Some(infer_schema_length)
            };
            LazyCsvReader::new(path)
                .with_infer_schema_length(schema_length)
                .finish()
                .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        }
        TableFormat::Parquet => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
    };

    lf.collect()
        .with_context(|| format!("Failed to read table: {}", path.display()))
}

/// Save a table to CSV or Parquet based on the output extension.
pub fn save_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    let format = TableFormat::from_path(path)?;
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    match format {
        TableFormat::Csv => {
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        TableFormat::Parquet => {
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
    }

    Ok(())
}

/// Persist fitted statistics as pretty-printed JSON.
pub fn save_statistics(stats: &FeatureStatistics, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create statistics file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, stats)
        .with_context(|| format!("Failed to write statistics: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write statistics: {}", path.display()))
}

/// Read statistics written by [`save_statistics`].
pub fn load_statistics(path: &Path) -> Result<FeatureStatistics> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open statistics file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse statistics file: {}", path.display()))
}
