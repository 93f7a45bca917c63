//! Column names and required-column validation for the source tables

use polars::prelude::*;

use crate::error::{FeatureError, TableKind};

/// Applicant identifier shared by all four tables
pub const APPLICANT_ID: &str = "SK_ID_CURR";

// Applicant table
pub const DAYS_BIRTH: &str = "DAYS_BIRTH";
pub const DAYS_EMPLOYED: &str = "DAYS_EMPLOYED";
pub const AMT_CREDIT: &str = "AMT_CREDIT";
pub const AMT_INCOME_TOTAL: &str = "AMT_INCOME_TOTAL";
pub const AMT_ANNUITY: &str = "AMT_ANNUITY";
pub const AMT_GOODS_PRICE: &str = "AMT_GOODS_PRICE";
pub const EXT_SOURCE_1: &str = "EXT_SOURCE_1";
pub const EXT_SOURCE_2: &str = "EXT_SOURCE_2";
pub const EXT_SOURCE_3: &str = "EXT_SOURCE_3";

/// The external score columns filled by the median imputer
pub const SCORE_COLUMNS: [&str; 3] = [EXT_SOURCE_1, EXT_SOURCE_2, EXT_SOURCE_3];

// Previous-application history
pub const CONTRACT_STATUS: &str = "NAME_CONTRACT_STATUS";

// Bureau history
pub const CREDIT_ACTIVE: &str = "CREDIT_ACTIVE";
pub const AMT_CREDIT_SUM_OVERDUE: &str = "AMT_CREDIT_SUM_OVERDUE";
pub const AMT_CREDIT_SUM_DEBT: &str = "AMT_CREDIT_SUM_DEBT";
pub const AMT_CREDIT_SUM: &str = "AMT_CREDIT_SUM";

// Installment-payment history
pub const DAYS_INSTALMENT: &str = "DAYS_INSTALMENT";
pub const DAYS_ENTRY_PAYMENT: &str = "DAYS_ENTRY_PAYMENT";
pub const AMT_INSTALMENT: &str = "AMT_INSTALMENT";
pub const AMT_PAYMENT: &str = "AMT_PAYMENT";

// Derived applicant columns
pub const YEARS_EMPLOYED: &str = "YEARS_EMPLOYED";
pub const DAYS_EMPLOYED_MISSING: &str = "DAYS_EMPLOYED_MISSING";
pub const AGE_YEARS: &str = "AGE_YEARS";
pub const CREDIT_INCOME_RATIO: &str = "CREDIT_INCOME_RATIO";
pub const ANNUITY_INCOME_RATIO: &str = "ANNUITY_INCOME_RATIO";
pub const CREDIT_ANNUITY_RATIO: &str = "CREDIT_ANNUITY_RATIO";
pub const LOAN_TO_VALUE: &str = "LOAN_TO_VALUE";
pub const AGE_BIN: &str = "AGE_BIN";
pub const CREDIT_INCOME_BIN: &str = "CREDIT_INCOME_BIN";
pub const AGE_X_YEARS_EMPLOYED: &str = "AGE_X_YEARS_EMPLOYED";

/// Name of the missingness flag added for a score column
pub fn missing_flag_name(column: &str) -> String {
    format!("{}_MISSING", column)
}

/// Numeric applicant columns read by the cleaning and ratio stages
pub const APPLICANT_NUMERIC: [&str; 9] = [
    DAYS_BIRTH,
    DAYS_EMPLOYED,
    AMT_CREDIT,
    AMT_INCOME_TOTAL,
    AMT_ANNUITY,
    AMT_GOODS_PRICE,
    EXT_SOURCE_1,
    EXT_SOURCE_2,
    EXT_SOURCE_3,
];

pub const BUREAU_NUMERIC: [&str; 3] = [AMT_CREDIT_SUM_OVERDUE, AMT_CREDIT_SUM_DEBT, AMT_CREDIT_SUM];

pub const INSTALLMENT_NUMERIC: [&str; 4] =
    [DAYS_INSTALMENT, DAYS_ENTRY_PAYMENT, AMT_INSTALMENT, AMT_PAYMENT];

/// Check that every named column exists in `df`.
pub fn require_columns(
    df: &DataFrame,
    table: TableKind,
    columns: &[&str],
) -> Result<(), FeatureError> {
    match columns.iter().find(|name| df.column(name).is_err()) {
        Some(missing) => Err(FeatureError::MissingColumn {
            table,
            column: missing.to_string(),
        }),
        None => Ok(()),
    }
}

/// Check that every named column exists and is numeric.
///
/// An all-null column is accepted whatever its dtype: CSV inference types an
/// empty column as `String`, and a column with no values is simply missing
/// data for the stages downstream.
pub fn require_numeric(
    df: &DataFrame,
    table: TableKind,
    columns: &[&str],
) -> Result<(), FeatureError> {
    require_columns(df, table, columns)?;

    for name in columns {
        let column = df.column(name).map_err(|_| FeatureError::MissingColumn {
            table,
            column: name.to_string(),
        })?;
        let all_null = column.null_count() == column.len();
        if !column.dtype().is_primitive_numeric() && !all_null {
            return Err(FeatureError::NonNumericColumn {
                table,
                column: name.to_string(),
                dtype: column.dtype().to_string(),
            });
        }
    }

    Ok(())
}

/// Validate all columns the applicant stages read.
pub fn validate_applicant(df: &DataFrame) -> Result<(), FeatureError> {
    require_columns(df, TableKind::Applicant, &[APPLICANT_ID])?;
    require_numeric(df, TableKind::Applicant, &APPLICANT_NUMERIC)
}

pub fn validate_previous(df: &DataFrame) -> Result<(), FeatureError> {
    require_columns(df, TableKind::Previous, &[APPLICANT_ID, CONTRACT_STATUS])
}

pub fn validate_bureau(df: &DataFrame) -> Result<(), FeatureError> {
    require_columns(df, TableKind::Bureau, &[APPLICANT_ID, CREDIT_ACTIVE])?;
    require_numeric(df, TableKind::Bureau, &BUREAU_NUMERIC)
}

pub fn validate_installments(df: &DataFrame) -> Result<(), FeatureError> {
    require_columns(df, TableKind::Installments, &[APPLICANT_ID])?;
    require_numeric(df, TableKind::Installments, &INSTALLMENT_NUMERIC)
}
