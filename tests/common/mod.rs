//! Shared test utilities and fixture generators

#![allow(dead_code)]

use credit_features::pipeline::SourceTables;
use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Applicant table with known characteristics:
/// - applicant 100002: ordinary row, all scores present
/// - applicant 100003: employment sentinel 365243, EXT_SOURCE_1 missing
/// - applicant 100004: zero income, EXT_SOURCE_2/3 missing
/// - applicant 100006: no history in any table
/// - applicant 100007: young applicant (age < 20), missing goods price
pub fn create_applicant_dataframe() -> DataFrame {
    df! {
        "SK_ID_CURR" => [100002i64, 100003, 100004, 100006, 100007],
        "TARGET" => [1i32, 0, 0, 0, 1],
        "DAYS_BIRTH" => [-9461i64, -16765, -19046, -19005, -7000],
        "DAYS_EMPLOYED" => [-637i64, 365_243, -225, -3039, -300],
        "AMT_CREDIT" => [406597.5f64, 1293502.5, 135000.0, 312682.5, 100000.0],
        "AMT_INCOME_TOTAL" => [202500.0f64, 270000.0, 0.0, 135000.0, 50000.0],
        "AMT_ANNUITY" => [24700.5f64, 35698.5, 6750.0, 29686.5, 10000.0],
        "AMT_GOODS_PRICE" => [Some(351000.0f64), Some(1129500.0), Some(135000.0), Some(297000.0), None],
        "EXT_SOURCE_1" => [Some(0.083f64), None, Some(0.5), Some(0.7), Some(0.3)],
        "EXT_SOURCE_2" => [Some(0.263f64), Some(0.622), None, Some(0.650), Some(0.322)],
        "EXT_SOURCE_3" => [Some(0.139f64), Some(0.2), None, Some(0.5), Some(0.8)],
    }
    .unwrap()
}

/// Previous applications; 100002 has {Approved, Approved, Refused}
pub fn create_previous_dataframe() -> DataFrame {
    df! {
        "SK_ID_PREV" => [1i64, 2, 3, 4, 5, 6],
        "SK_ID_CURR" => [100002i64, 100002, 100002, 100003, 100007, 999999],
        "NAME_CONTRACT_STATUS" => [
            Some("Approved"), Some("Approved"), Some("Refused"), Some("Canceled"), None, Some("Approved"),
        ],
    }
    .unwrap()
}

/// Bureau records; 100002 has debt {100, 200} over credit {500, 500}
pub fn create_bureau_dataframe() -> DataFrame {
    df! {
        "SK_ID_CURR" => [100002i64, 100002, 100004, 100007],
        "CREDIT_ACTIVE" => ["Active", "Closed", "Closed", "Active"],
        "AMT_CREDIT_SUM_OVERDUE" => [Some(0.0f64), Some(25.0), None, Some(0.0)],
        "AMT_CREDIT_SUM_DEBT" => [Some(100.0f64), Some(200.0), Some(0.0), None],
        "AMT_CREDIT_SUM" => [Some(500.0f64), Some(500.0), Some(0.0), Some(1000.0)],
    }
    .unwrap()
}

/// Installments; 100002 paid one of two installments late
pub fn create_installments_dataframe() -> DataFrame {
    df! {
        "SK_ID_CURR" => [100002i64, 100002, 100003, 100004],
        "DAYS_INSTALMENT" => [10.0f64, 40.0, -100.0, -50.0],
        "DAYS_ENTRY_PAYMENT" => [Some(15.0f64), Some(38.0), Some(-100.0), None],
        "AMT_INSTALMENT" => [1000.0f64, 1000.0, 500.0, 0.0],
        "AMT_PAYMENT" => [1000.0f64, 500.0, 500.0, 10.0],
    }
    .unwrap()
}

pub fn create_source_tables() -> SourceTables {
    SourceTables {
        applicant: create_applicant_dataframe(),
        previous: create_previous_dataframe(),
        bureau: create_bureau_dataframe(),
        installments: create_installments_dataframe(),
    }
}

/// Larger random source tables for property-style and performance tests
pub fn create_random_source_tables(applicants: usize, seed: u64) -> SourceTables {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let ids: Vec<i64> = (0..applicants as i64).map(|i| 100_000 + i).collect();
    let maybe = |rng: &mut rand::rngs::StdRng, p: f64, v: f64| if rng.gen::<f64>() < p { None } else { Some(v) };

    let days_birth: Vec<i64> = ids.iter().map(|_| -rng.gen_range(7000..25000)).collect();
    let days_employed: Vec<i64> = ids
        .iter()
        .map(|_| if rng.gen::<f64>() < 0.15 { 365_243 } else { -rng.gen_range(0..15000) })
        .collect();
    let credit: Vec<f64> = ids.iter().map(|_| rng.gen_range(45000.0..2_000_000.0)).collect();
    let income: Vec<f64> = ids.iter().map(|_| rng.gen_range(25000.0..500_000.0)).collect();
    let annuity: Vec<Option<f64>> = credit.iter().map(|c| maybe(&mut rng, 0.01, c / 20.0)).collect();
    let goods: Vec<Option<f64>> = credit.iter().map(|c| maybe(&mut rng, 0.02, c * 0.9)).collect();
    let ext1: Vec<Option<f64>> = ids.iter().map(|_| { let v = rng.gen::<f64>(); maybe(&mut rng, 0.5, v) }).collect();
    let ext2: Vec<Option<f64>> = ids.iter().map(|_| { let v = rng.gen::<f64>(); maybe(&mut rng, 0.01, v) }).collect();
    let ext3: Vec<Option<f64>> = ids.iter().map(|_| { let v = rng.gen::<f64>(); maybe(&mut rng, 0.2, v) }).collect();

    let applicant = DataFrame::new(vec![
        Column::new("SK_ID_CURR".into(), ids.clone()),
        Column::new("DAYS_BIRTH".into(), days_birth),
        Column::new("DAYS_EMPLOYED".into(), days_employed),
        Column::new("AMT_CREDIT".into(), credit),
        Column::new("AMT_INCOME_TOTAL".into(), income),
        Column::new("AMT_ANNUITY".into(), annuity),
        Column::new("AMT_GOODS_PRICE".into(), goods),
        Column::new("EXT_SOURCE_1".into(), ext1),
        Column::new("EXT_SOURCE_2".into(), ext2),
        Column::new("EXT_SOURCE_3".into(), ext3),
    ])
    .unwrap();

    // Histories cover roughly 80% of applicants, with several rows each
    let history_ids = |rng: &mut rand::rngs::StdRng, per_applicant: usize| -> Vec<i64> {
        let mut out = Vec::new();
        for id in &ids {
            if rng.gen::<f64>() < 0.8 {
                let rows = 1 + rng.gen_range(0..per_applicant);
                out.extend(std::iter::repeat(*id).take(rows));
            }
        }
        out
    };

    let prev_ids = history_ids(&mut rng, 5);
    let statuses: Vec<Option<&str>> = prev_ids
        .iter()
        .map(|_| match rng.gen_range(0..5) {
            0 | 1 => Some("Approved"),
            2 => Some("Refused"),
            3 => Some("Canceled"),
            _ => None,
        })
        .collect();
    let previous = DataFrame::new(vec![
        Column::new("SK_ID_CURR".into(), prev_ids),
        Column::new("NAME_CONTRACT_STATUS".into(), statuses),
    ])
    .unwrap();

    let bureau_ids = history_ids(&mut rng, 4);
    let active: Vec<&str> = bureau_ids
        .iter()
        .map(|_| if rng.gen::<bool>() { "Active" } else { "Closed" })
        .collect();
    let overdue: Vec<Option<f64>> = bureau_ids.iter().map(|_| maybe(&mut rng, 0.3, 0.0)).collect();
    let debt: Vec<Option<f64>> = bureau_ids
        .iter()
        .map(|_| { let v = rng.gen_range(0.0..100_000.0); maybe(&mut rng, 0.2, v) })
        .collect();
    let total: Vec<Option<f64>> = bureau_ids
        .iter()
        .map(|_| { let v = rng.gen_range(0.0..200_000.0); maybe(&mut rng, 0.1, v) })
        .collect();
    let bureau = DataFrame::new(vec![
        Column::new("SK_ID_CURR".into(), bureau_ids),
        Column::new("CREDIT_ACTIVE".into(), active),
        Column::new("AMT_CREDIT_SUM_OVERDUE".into(), overdue),
        Column::new("AMT_CREDIT_SUM_DEBT".into(), debt),
        Column::new("AMT_CREDIT_SUM".into(), total),
    ])
    .unwrap();

    let inst_ids = history_ids(&mut rng, 12);
    let scheduled: Vec<f64> = inst_ids.iter().map(|_| -rng.gen_range(0.0..3000.0f64).round()).collect();
    let paid: Vec<Option<f64>> = scheduled
        .iter()
        .map(|d| { let v = d + rng.gen_range(-10.0..10.0f64).round(); maybe(&mut rng, 0.05, v) })
        .collect();
    let amount: Vec<f64> = inst_ids.iter().map(|_| rng.gen_range(1000.0..50_000.0)).collect();
    let payment: Vec<f64> = amount.iter().map(|a| a * rng.gen_range(0.5..1.2)).collect();
    let installments = DataFrame::new(vec![
        Column::new("SK_ID_CURR".into(), inst_ids),
        Column::new("DAYS_INSTALMENT".into(), scheduled),
        Column::new("DAYS_ENTRY_PAYMENT".into(), paid),
        Column::new("AMT_INSTALMENT".into(), amount),
        Column::new("AMT_PAYMENT".into(), payment),
    ])
    .unwrap();

    SourceTables {
        applicant,
        previous,
        bureau,
        installments,
    }
}

/// Write a DataFrame to a CSV file inside `dir`
pub fn write_csv(dir: &TempDir, name: &str, df: &mut DataFrame) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();
    path
}

/// Write all four source tables as CSV files into a fresh temporary directory
pub fn write_source_csvs(tables: &SourceTables) -> (TempDir, [PathBuf; 4]) {
    let dir = TempDir::new().unwrap();
    let paths = [
        write_csv(&dir, "application.csv", &mut tables.applicant.clone()),
        write_csv(&dir, "previous.csv", &mut tables.previous.clone()),
        write_csv(&dir, "bureau.csv", &mut tables.bureau.clone()),
        write_csv(&dir, "installments.csv", &mut tables.installments.clone()),
    ];
    (dir, paths)
}

/// Values of a Float64 column
pub fn f64_column(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap_or_else(|_| panic!("Missing column '{}'", name))
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .iter()
        .collect()
}

/// Values of an integer column, widened to i64
pub fn i64_column(df: &DataFrame, name: &str) -> Vec<Option<i64>> {
    df.column(name)
        .unwrap_or_else(|_| panic!("Missing column '{}'", name))
        .cast(&DataType::Int64)
        .unwrap()
        .i64()
        .unwrap()
        .iter()
        .collect()
}

/// Value of column `name` for the applicant with identifier `id`
pub fn value_for(df: &DataFrame, id: i64, name: &str) -> Option<f64> {
    let ids = i64_column(df, "SK_ID_CURR");
    let row = ids
        .iter()
        .position(|v| *v == Some(id))
        .unwrap_or_else(|| panic!("Applicant {} not found", id));
    f64_column(df, name)[row]
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}
