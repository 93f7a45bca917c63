//! Pipeline module - the feature-engineering stages and their orchestration

pub mod aggregate;
pub mod anomaly;
pub mod binning;
pub mod impute;
pub mod loader;
pub mod orchestrator;
pub mod ratios;
pub mod reference;
pub mod schema;
pub mod stats;

pub use aggregate::*;
pub use anomaly::*;
pub use binning::*;
pub use impute::*;
pub use loader::*;
pub use orchestrator::*;
pub use ratios::*;
pub use reference::*;
