//! credit-features: Loan Default-Risk Feature Engineering
//!
//! A library for turning an applicant table and three history tables
//! (previous applications, credit bureau, installment payments) into one
//! feature matrix, with imputation statistics that replay exactly on a
//! paired test set.

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod utils;
