/// history-lens library
///
/// Core functionality for turning a plain-text shell history into usage analytics.

pub mod config;
pub mod core;
pub mod error;
pub mod intelligence;
pub mod models;
pub mod report;

// Re-exports for convenience
pub use config::Config;
pub use error::{HistoryError, Result};
pub use intelligence::{Analyzer, HistoryAnalysis, QueryEngine};
