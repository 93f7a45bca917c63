//! Terminal output helpers for the binary

pub mod progress;
pub mod styling;

pub use progress::*;
pub use styling::*;
